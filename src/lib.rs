//! Library crate for ghfinder.
//!
//! This crate exposes the building blocks of the TUI:
//! - Application state, settings and update loop (`app`)
//! - Command-line flags (`cli`)
//! - Cancellable settle timer (`debounce`)
//! - Error and result types (`error`)
//! - GitHub API types and client (`github`)
//! - Profile lookup flow (`lookup`)
//! - Debounced user search flow (`search`)
//! - UI rendering (`ui`)
//!
//! It is used by the `ghfinder` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod cli;
pub mod debounce;
pub mod error;
pub mod github;
pub mod lookup;
pub mod search;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
/// Convenient error and result types shared across the crate.
pub use error::{DynError, Result};
