use lettamem_core::{MEMORY_FOOTER, MEMORY_HEADER, MemoryBlock};

/// Serialize memory blocks into the text fragment injected into a prompt.
///
/// Each block with non-blank content renders as its label in square
/// brackets followed by the trimmed value. The joined entries are wrapped
/// with [`MEMORY_HEADER`] and [`MEMORY_FOOTER`]. Blocks whose value trims
/// to nothing are skipped entirely; when every block is skipped (or the
/// input is empty) the result is the empty string, so the wrapper never
/// appears around zero content.
#[must_use]
pub fn format_memories_for_injection(blocks: &[MemoryBlock]) -> String {
    let entries: Vec<String> = blocks
        .iter()
        .filter(|block| !block.value.trim().is_empty())
        .map(|block| format!("[{}]\n{}", block.label, block.value.trim()))
        .collect();

    if entries.is_empty() {
        return String::new();
    }

    format!("{MEMORY_HEADER}\n\n{}\n\n{MEMORY_FOOTER}", entries.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(id: &str, label: &str, value: &str) -> MemoryBlock {
        MemoryBlock {
            id: id.to_string(),
            label: label.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn returns_empty_string_for_empty_input() {
        assert_eq!(format_memories_for_injection(&[]), "");
    }

    #[test]
    fn wraps_memories_with_header_and_footer() {
        let blocks = vec![block("1", "user_context", "Test value")];
        let result = format_memories_for_injection(&blocks);
        assert!(result.contains(MEMORY_HEADER));
        assert!(result.contains(MEMORY_FOOTER));
        assert!(result.starts_with(MEMORY_HEADER));
        assert!(result.ends_with(MEMORY_FOOTER));
    }

    #[test]
    fn formats_block_with_label_in_brackets() {
        let blocks = vec![block("1", "facts", "User likes coffee")];
        let result = format_memories_for_injection(&blocks);
        assert!(result.contains("[facts]"));
        assert!(result.contains("User likes coffee"));
    }

    #[test]
    fn skips_blocks_with_blank_values() {
        let blocks = vec![
            block("1", "empty_block", "   "),
            block("2", "valid_block", "Has content"),
        ];
        let result = format_memories_for_injection(&blocks);
        assert!(!result.contains("[empty_block]"));
        assert!(result.contains("[valid_block]"));
    }

    #[test]
    fn all_blank_blocks_produce_empty_string() {
        let blocks = vec![block("1", "a", ""), block("2", "b", " \t\n ")];
        assert_eq!(format_memories_for_injection(&blocks), "");
    }

    #[test]
    fn renders_blocks_in_input_order() {
        let blocks = vec![
            block("1", "first", "alpha"),
            block("2", "second", "beta"),
        ];
        let result = format_memories_for_injection(&blocks);
        let first = result.find("[first]").unwrap();
        let second = result.find("[second]").unwrap();
        assert!(first < second);
    }

    #[test]
    fn trims_surrounding_whitespace_from_values() {
        let blocks = vec![block("1", "facts", "  padded value  \n")];
        let result = format_memories_for_injection(&blocks);
        assert!(result.contains("[facts]\npadded value"));
    }
}
