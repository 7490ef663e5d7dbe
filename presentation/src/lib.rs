//! Presentation layer for promptgrid
//!
//! This crate contains the CLI definition, progress reporters, and the
//! end-of-run console summary.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
