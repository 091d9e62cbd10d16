#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Memory selection and prompt rendering.
//!
//! Two pure operations over fetched memory blocks:
//! - [`search_memory_blocks`] decides which blocks are relevant to a query
//! - [`format_memories_for_injection`] serializes the survivors for
//!   insertion into a conversation prompt

mod inject;
mod search;

pub use inject::format_memories_for_injection;
pub use search::search_memory_blocks;
