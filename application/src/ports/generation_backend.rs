//! Generation backend port
//!
//! Defines the interface for sending a prompt to a single text-generation
//! model.

use async_trait::async_trait;
use ensemble_domain::{GenerationOptions, StreamEvent};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during a backend call
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Stream failed: {0}")]
    StreamFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Handle for receiving streaming events from a backend call.
///
/// Wraps an `mpsc::Receiver<StreamEvent>`. Dropping the handle closes the
/// channel, which tells the producer to stop.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// A handle that yields a single `Completed` event.
    pub fn completed(text: String) -> Self {
        let (tx, rx) = mpsc::channel(1);
        // Capacity 1 and nothing sent yet, so this cannot fail
        let _ = tx.try_send(StreamEvent::Completed(text));
        Self::new(rx)
    }

    /// Consume the stream and collect all text into a single string.
    pub async fn collect_text(self) -> Result<String, BackendError> {
        self.drain(|_| {}).await
    }

    /// Consume the stream, handing each piece of text to `on_chunk` as it
    /// arrives, and return the full text.
    ///
    /// A `Completed` event with no preceding deltas (non-streaming backends)
    /// is handed over as a single chunk.
    pub async fn drain<F>(mut self, mut on_chunk: F) -> Result<String, BackendError>
    where
        F: FnMut(&str) + Send,
    {
        let mut full_text = String::new();
        while let Some(event) = self.receiver.recv().await {
            match event {
                StreamEvent::Delta(chunk) => {
                    on_chunk(&chunk);
                    full_text.push_str(&chunk);
                }
                StreamEvent::Completed(text) => {
                    if full_text.is_empty() {
                        if !text.is_empty() {
                            on_chunk(&text);
                        }
                        return Ok(text);
                    }
                    return Ok(full_text);
                }
                StreamEvent::Error(e) => {
                    return Err(BackendError::StreamFailed(e));
                }
            }
        }
        // Channel closed without Completed, return what we have
        Ok(full_text)
    }
}

/// Text-generation backend
///
/// Implementations (adapters) live in the infrastructure layer. A backend
/// must be safe to call concurrently for different models.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate a complete response.
    async fn generate(
        &self,
        model_id: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, BackendError>;

    /// Generate a streaming response.
    ///
    /// Default implementation calls `generate()` and wraps the result in a
    /// single `Completed` event, so non-streaming backends work unchanged.
    async fn generate_stream(
        &self,
        model_id: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<StreamHandle, BackendError> {
        let text = self.generate(model_id, prompt, options).await?;
        Ok(StreamHandle::completed(text))
    }
}
