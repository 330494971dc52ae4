//! Application layer for model-ensemble
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{EnsembleConfig, ExecutionParams};
pub use ports::{
    execution_logger::{ExecutionEvent, ExecutionLogger, NoExecutionLogger},
    generation_backend::{BackendError, GenerationBackend, StreamHandle},
    model_catalog::ModelCatalog,
    progress::{NoProgress, ProgressNotifier, StreamObserver},
};
pub use use_cases::aggregate_responses::AggregateResponsesUseCase;
pub use use_cases::execute_parallel::{ExecuteParallelError, ExecuteParallelUseCase};
