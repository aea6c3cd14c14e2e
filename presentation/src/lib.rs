//! Presentation layer for omni-ai
//!
//! This crate contains the HTTP front door, CLI definitions,
//! output formatters, and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;
pub mod server;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat, SummaryMode};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use server::{AskRequest, router, serve};
