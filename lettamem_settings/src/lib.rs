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

//! Settings persistence with merge-over-defaults semantics.
//!
//! [`SettingsStore`] wraps any [`lettamem_core::KeyValueStore`] and keeps
//! the whole settings record under the single `letta_settings` key. Two
//! store backends ship with this crate: a JSON file for the CLI and an
//! in-process map for tests and embedders.

mod settings;
mod store;

pub use settings::SettingsStore;
pub use store::{JsonFileStore, MemoryStore};
