//! Integration test suite for layerlift
//!
//! End-to-end tests driving the orchestrator against real temp directories:
//! layer folders on disk, nested template files, and patched templates are
//! all verified together. Run with:
//!
//! ```bash
//! cargo test --test integration
//! ```

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;
