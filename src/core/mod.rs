//! Core types for layerlift
//!
//! The core module holds the crate-wide error type. Fallible operations in
//! the filesystem helpers and the orchestrator return [`anyhow::Result`] so
//! callers get full context chains, while the typed [`LayerliftError`]
//! variants remain downcastable for callers that need to react to a specific
//! failure mode (for example a missing runtime definition).

pub mod error;

pub use error::LayerliftError;
