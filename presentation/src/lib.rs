//! Presentation layer for model-ensemble
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the live stream printer.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;
pub mod stream;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use config::OutputConfig;
pub use output::console::ConsoleFormatter;
pub use output::report::RunReport;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use stream::printer::StreamPrinter;
