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

//! Thin client for the Letta memory service and the process-wide
//! per-credential client registry.

mod client;
mod error;
mod registry;

pub use client::{AgentSummary, LettaClient};
pub use error::{Error, Result};
pub use registry::get_client;
