//! Execute Parallel use case
//!
//! Fans one prompt out to every target model concurrently, waits for all of
//! them to settle, and assembles an [`ExecutionResult`] in dispatch order.
//!
//! Per-model failures (backend errors, timeouts, cancellation) never fail the
//! call; they are captured as failed [`ModelResult`]s. Only request validation
//! and an empty target set are reported as errors.

use crate::config::ExecutionParams;
use crate::ports::execution_logger::{ExecutionEvent, ExecutionLogger, NoExecutionLogger};
use crate::ports::generation_backend::{BackendError, GenerationBackend};
use crate::ports::model_catalog::ModelCatalog;
use crate::ports::progress::{NoProgress, ProgressNotifier, StreamObserver};
use ensemble_domain::{
    CANCELLED_MESSAGE, ExecutionRequest, ExecutionResult, GenerationOptions, ModelMeta,
    ModelResult, ValidationError, score_quality, validate_request,
};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Error message for a task that ended without reporting a result.
const ABORTED_MESSAGE: &str = "Task aborted";

/// Errors that abort an execution before any model is called
#[derive(Error, Debug)]
pub enum ExecuteParallelError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No models available")]
    NoModelsAvailable,
}

/// (model id, chunk) pairs forwarded from streaming tasks.
type ChunkSender = mpsc::UnboundedSender<(String, String)>;

/// Everything one spawned task needs; cloned per model.
struct Dispatch<B> {
    backend: Arc<B>,
    prompt: Arc<str>,
    options: Arc<GenerationOptions>,
    timeout: Duration,
    limiter: Option<Arc<Semaphore>>,
    cancellation: CancellationToken,
    chunks: Option<ChunkSender>,
}

impl<B> Clone for Dispatch<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            prompt: Arc::clone(&self.prompt),
            options: Arc::clone(&self.options),
            timeout: self.timeout,
            limiter: self.limiter.clone(),
            cancellation: self.cancellation.clone(),
            chunks: self.chunks.clone(),
        }
    }
}

/// How a single model call ended.
enum Outcome {
    Completed(Result<String, BackendError>),
    TimedOut,
    Cancelled,
}

/// Use case for running one prompt against many models in parallel
pub struct ExecuteParallelUseCase<B: GenerationBackend + 'static> {
    backend: Arc<B>,
    catalog: Arc<dyn ModelCatalog>,
    params: ExecutionParams,
    logger: Arc<dyn ExecutionLogger>,
    cancellation: Option<CancellationToken>,
}

impl<B: GenerationBackend + 'static> ExecuteParallelUseCase<B> {
    pub fn new(backend: Arc<B>, catalog: Arc<dyn ModelCatalog>) -> Self {
        Self {
            backend,
            catalog,
            params: ExecutionParams::default(),
            logger: Arc::new(NoExecutionLogger),
            cancellation: None,
        }
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ExecutionLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Outstanding calls stop when `token` is cancelled and report
    /// `"Cancelled"`.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Execute with default (no-op) progress
    pub async fn execute(
        &self,
        request: &ExecutionRequest,
    ) -> Result<ExecutionResult, ExecuteParallelError> {
        self.execute_with_progress(request, &NoProgress).await
    }

    /// Execute with progress callbacks
    pub async fn execute_with_progress(
        &self,
        request: &ExecutionRequest,
        progress: &dyn ProgressNotifier,
    ) -> Result<ExecutionResult, ExecuteParallelError> {
        self.run(request, progress, None).await
    }

    /// Execute with every model streaming.
    ///
    /// Chunks are forwarded to `observer` as they arrive while each task
    /// accumulates its full text. The timeout covers the whole streaming call.
    pub async fn execute_stream(
        &self,
        request: &ExecutionRequest,
        observer: &dyn StreamObserver,
    ) -> Result<ExecutionResult, ExecuteParallelError> {
        self.run(request, &NoProgress, Some(observer)).await
    }

    /// Resolve which models to call.
    ///
    /// Explicit ids are kept only when the catalog knows them and they are
    /// installed; unknown or uninstalled ids are dropped. Without ids every
    /// installed model is targeted.
    pub fn resolve_targets(&self, request: &ExecutionRequest) -> Vec<ModelMeta> {
        match &request.model_ids {
            Some(ids) => ids
                .iter()
                .filter_map(|id| match self.catalog.get(id) {
                    Some(meta) if meta.is_installed => Some(meta),
                    Some(_) => {
                        debug!("Dropping model {}: not installed", id);
                        None
                    }
                    None => {
                        debug!("Dropping model {}: not in catalog", id);
                        None
                    }
                })
                .collect(),
            None => self.catalog.list_installed(),
        }
    }

    async fn run(
        &self,
        request: &ExecutionRequest,
        progress: &dyn ProgressNotifier,
        observer: Option<&dyn StreamObserver>,
    ) -> Result<ExecutionResult, ExecuteParallelError> {
        let warnings = validate_request(request)?;
        for warning in &warnings {
            warn!("{}", warning);
        }

        let targets = self.resolve_targets(request);
        if targets.is_empty() {
            return Err(ExecuteParallelError::NoModelsAvailable);
        }

        let total = targets.len();
        let timeout = request.timeout_or(self.params.default_timeout_ms);
        info!(
            "Executing prompt on {} models (timeout {}ms, streaming: {})",
            total,
            timeout.as_millis(),
            observer.is_some()
        );
        self.logger.log(ExecutionEvent::new(
            "execution_started",
            json!({
                "models": targets.iter().map(|m| m.id.as_str()).collect::<Vec<_>>(),
                "prompt_chars": request.prompt.chars().count(),
                "timeout_ms": timeout.as_millis() as u64,
                "streaming": observer.is_some(),
            }),
        ));
        progress.on_execution_start(total);

        let started = Instant::now();
        let (chunk_tx, mut chunk_rx) = mpsc::unbounded_channel::<(String, String)>();
        let dispatch = Dispatch {
            backend: Arc::clone(&self.backend),
            prompt: Arc::from(request.prompt.as_str()),
            options: Arc::new(request.generation_options.clone()),
            timeout,
            limiter: self
                .params
                .max_concurrency
                // A zero cap would leave every task waiting for a permit
                .map(|n| Arc::new(Semaphore::new(n.max(1)))),
            cancellation: self
                .cancellation
                .clone()
                .unwrap_or_else(CancellationToken::new),
            chunks: observer.map(|_| chunk_tx.clone()),
        };
        // Only task-held senders keep the channel open
        drop(chunk_tx);

        let mut join_set = JoinSet::new();
        for (index, meta) in targets.iter().cloned().enumerate() {
            let dispatch = dispatch.clone();
            join_set.spawn(async move { (index, Self::run_model(dispatch, meta).await) });
        }
        drop(dispatch);

        let mut slots: Vec<Option<ModelResult>> = vec![None; total];
        let mut completed = 0;

        loop {
            tokio::select! {
                biased;
                Some((model_id, chunk)) = chunk_rx.recv() => {
                    if let Some(observer) = observer {
                        observer.on_chunk(&model_id, &chunk);
                    }
                }
                joined = join_set.join_next() => {
                    let Some(joined) = joined else { break };
                    // A finished task's chunks are already queued; flush them first
                    Self::flush_chunks(&mut chunk_rx, observer);
                    match joined {
                        Ok((index, result)) => {
                            completed += 1;
                            self.settle(&result, completed, total, progress, observer);
                            slots[index] = Some(result);
                        }
                        Err(e) => warn!("Task join error: {}", e),
                    }
                }
            }
        }
        Self::flush_chunks(&mut chunk_rx, observer);

        let results: Vec<ModelResult> = slots
            .into_iter()
            .zip(&targets)
            .map(|(slot, meta)| match slot {
                Some(result) => result,
                None => {
                    let result = ModelResult::failure(
                        &meta.id,
                        &meta.display_name,
                        ABORTED_MESSAGE,
                        started.elapsed().as_millis() as u64,
                    );
                    completed += 1;
                    self.settle(&result, completed, total, progress, observer);
                    result
                }
            })
            .collect();

        let best_result = Self::pick_best(&results, &targets);
        let execution = ExecutionResult::new(
            results,
            started.elapsed().as_millis() as u64,
            best_result,
        );

        info!(
            "Execution finished: {}/{} succeeded in {}ms",
            execution.success_count, execution.total_models, execution.total_time_ms
        );
        self.logger.log(ExecutionEvent::new(
            "execution_completed",
            json!({
                "total_models": execution.total_models,
                "success_count": execution.success_count,
                "failure_count": execution.failure_count,
                "total_time_ms": execution.total_time_ms,
                "best_model": execution.best_result.as_ref().map(|r| r.model_id.as_str()),
            }),
        ));
        progress.on_execution_complete(&execution);

        Ok(execution)
    }

    /// Record one settled model and notify listeners.
    fn settle(
        &self,
        result: &ModelResult,
        completed: usize,
        total: usize,
        progress: &dyn ProgressNotifier,
        observer: Option<&dyn StreamObserver>,
    ) {
        if result.success {
            info!(
                "Model {} responded in {}ms",
                result.model_id, result.latency_ms
            );
        } else {
            warn!(
                "Model {} failed after {}ms: {}",
                result.model_id,
                result.latency_ms,
                result.error_message.as_deref().unwrap_or("unknown error")
            );
        }
        self.logger.log(ExecutionEvent::new(
            "model_result",
            serde_json::to_value(result).unwrap_or_default(),
        ));
        progress.on_model_complete(completed, total, result);
        if let Some(observer) = observer {
            observer.on_model_complete(result);
        }
    }

    fn flush_chunks(
        chunk_rx: &mut mpsc::UnboundedReceiver<(String, String)>,
        observer: Option<&dyn StreamObserver>,
    ) {
        while let Ok((model_id, chunk)) = chunk_rx.try_recv() {
            if let Some(observer) = observer {
                observer.on_chunk(&model_id, &chunk);
            }
        }
    }

    /// Highest-scoring successful result; the earliest wins ties.
    fn pick_best(results: &[ModelResult], targets: &[ModelMeta]) -> Option<ModelResult> {
        let mut best: Option<(&ModelResult, f64)> = None;
        for (result, meta) in results.iter().zip(targets) {
            if !result.success {
                continue;
            }
            let score = score_quality(result, Some(meta));
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((result, score));
            }
        }
        best.map(|(result, _)| result.clone())
    }

    /// Run one model call to completion, timeout or cancellation.
    async fn run_model(dispatch: Dispatch<B>, meta: ModelMeta) -> ModelResult {
        let cancellation = dispatch.cancellation.clone();

        // The timeout clock starts only once a permit is held
        let _permit = match &dispatch.limiter {
            Some(limiter) => {
                let limiter = Arc::clone(limiter);
                tokio::select! {
                    biased;
                    _ = cancellation.cancelled() => {
                        return ModelResult::failure(&meta.id, &meta.display_name, CANCELLED_MESSAGE, 0);
                    }
                    permit = limiter.acquire_owned() => match permit {
                        Ok(permit) => Some(permit),
                        Err(e) => {
                            return ModelResult::failure(&meta.id, &meta.display_name, e.to_string(), 0);
                        }
                    }
                }
            }
            None => None,
        };

        debug!("Dispatching prompt to {}", meta.id);
        let start = Instant::now();
        let call = Self::call_backend(&dispatch, &meta.id);

        let outcome = tokio::select! {
            biased;
            _ = cancellation.cancelled() => Outcome::Cancelled,
            timed = tokio::time::timeout(dispatch.timeout, call) => match timed {
                Ok(result) => Outcome::Completed(result),
                Err(_) => Outcome::TimedOut,
            },
        };
        let latency_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Outcome::Completed(Ok(text)) => {
                ModelResult::success(&meta.id, &meta.display_name, text, latency_ms)
            }
            Outcome::Completed(Err(e)) => {
                ModelResult::failure(&meta.id, &meta.display_name, e.to_string(), latency_ms)
            }
            Outcome::TimedOut => ModelResult::timeout(&meta.id, &meta.display_name, latency_ms),
            Outcome::Cancelled => {
                ModelResult::failure(&meta.id, &meta.display_name, CANCELLED_MESSAGE, latency_ms)
            }
        }
    }

    async fn call_backend(dispatch: &Dispatch<B>, model_id: &str) -> Result<String, BackendError> {
        let Some(chunks) = &dispatch.chunks else {
            return dispatch
                .backend
                .generate(model_id, &dispatch.prompt, &dispatch.options)
                .await;
        };

        dispatch
            .backend
            .generate_stream(model_id, &dispatch.prompt, &dispatch.options)
            .await?
            .drain(|chunk| {
                let _ = chunks.send((model_id.to_string(), chunk.to_string()));
            })
            .await
    }
}
