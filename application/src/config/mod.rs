//! Application-level configuration.
//!
//! - [`ExecutionParams`] - fan-out control (default timeout, concurrency cap)
//! - [`EnsembleConfig`] - container handed to the use cases at startup

pub mod ensemble_config;
pub mod execution_params;

pub use ensemble_config::EnsembleConfig;
pub use execution_params::ExecutionParams;
