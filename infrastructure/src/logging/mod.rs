//! Structured run logging
//!
//! Adapters for the [`ExecutionLogger`](ensemble_application::ExecutionLogger) port.

mod jsonl_logger;

pub use jsonl_logger::{JsonlExecutionLogger, run_log_path};
