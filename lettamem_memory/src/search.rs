use lettamem_core::{CONVERSATION_PATTERNS_LABEL, MemoryBlock};
use tracing::debug;

/// Select the memory blocks relevant to a free-text query.
///
/// Blocks labeled [`CONVERSATION_PATTERNS_LABEL`] are always removed first;
/// they describe interaction style and are never injectable context. Every
/// other label is searchable.
///
/// An empty or whitespace-only query returns the full searchable set.
/// Otherwise matching is lexical: a block survives when any
/// whitespace-separated term of the query appears, case-insensitively, in
/// its label or value. Source order is preserved and nothing is ranked.
///
/// When a non-empty query matches nothing, the full searchable set is
/// returned instead of an empty list. Surfacing stale context is preferred
/// over injecting no memory at all, so this branch is deliberate and
/// load-bearing rather than a scoring artifact.
#[must_use]
pub fn search_memory_blocks(blocks: &[MemoryBlock], query: &str) -> Vec<MemoryBlock> {
    let searchable: Vec<MemoryBlock> = blocks
        .iter()
        .filter(|block| block.label != CONVERSATION_PATTERNS_LABEL)
        .cloned()
        .collect();

    let trimmed = query.trim();
    if trimmed.is_empty() {
        debug!("Empty query, returning all {} searchable blocks", searchable.len());
        return searchable;
    }

    let terms: Vec<String> = trimmed.split_whitespace().map(str::to_lowercase).collect();

    let matches: Vec<MemoryBlock> = searchable
        .iter()
        .filter(|block| block_matches(block, &terms))
        .cloned()
        .collect();

    if matches.is_empty() {
        // Fallback: no lexical match means relevance is unknown, not absent.
        debug!(
            "No blocks matched query {trimmed:?}, falling back to all {} searchable blocks",
            searchable.len()
        );
        searchable
    } else {
        debug!("{} of {} blocks matched query {trimmed:?}", matches.len(), searchable.len());
        matches
    }
}

/// Case-insensitive containment of any query term in the block's label or
/// value.
fn block_matches(block: &MemoryBlock, terms: &[String]) -> bool {
    let label = block.label.to_lowercase();
    let value = block.value.to_lowercase();
    terms
        .iter()
        .any(|term| label.contains(term.as_str()) || value.contains(term.as_str()))
}
