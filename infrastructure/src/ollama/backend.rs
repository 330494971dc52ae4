//! [`GenerationBackend`] adapter for an Ollama server.

use super::error::OllamaError;
use super::wire::{GenerateChunk, GenerateRequest, LineBuffer};
use async_trait::async_trait;
use ensemble_application::{BackendError, GenerationBackend, StreamHandle};
use ensemble_domain::{GenerationOptions, StreamEvent};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Connection attempts give up after this long; generation itself is
/// bounded by the per-model timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Buffered stream events per model before the reader waits.
const STREAM_BUFFER: usize = 64;

/// Sends prompts to `POST {base_url}/api/generate`.
#[derive(Debug, Clone)]
pub struct OllamaBackend {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self, OllamaError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| OllamaError::Client(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }

    async fn post_generate(
        &self,
        model_id: &str,
        prompt: &str,
        options: &GenerationOptions,
        stream: bool,
    ) -> Result<reqwest::Response, OllamaError> {
        let body = GenerateRequest::new(model_id, prompt, options, stream);
        debug!("POST {} (model {}, stream {})", self.generate_url(), model_id, stream);

        let response = self
            .client
            .post(self.generate_url())
            .json(&body)
            .send()
            .await
            .map_err(|source| {
                if source.is_connect() {
                    OllamaError::Connect {
                        url: self.base_url.clone(),
                        source,
                    }
                } else {
                    OllamaError::Http(source)
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(OllamaError::ModelNotFound(model_id.to_string()));
        }
        Err(OllamaError::Status {
            status: status.as_u16(),
            body: server_message(&body),
        })
    }
}

/// Pull the `error` field out of an Ollama error body when there is one.
fn server_message(body: &str) -> String {
    GenerateChunk::parse(body)
        .ok()
        .and_then(|c| c.error)
        .unwrap_or_else(|| body.trim().to_string())
}

/// Turn one NDJSON line into a stream event.
///
/// Returns `None` for an empty, unfinished line.
fn line_to_event(line: &str) -> Option<StreamEvent> {
    match GenerateChunk::parse(line) {
        Ok(GenerateChunk {
            error: Some(error), ..
        }) => Some(StreamEvent::Error(error)),
        Ok(chunk) if chunk.done => Some(StreamEvent::Completed(chunk.response)),
        Ok(chunk) if chunk.response.is_empty() => None,
        Ok(chunk) => Some(StreamEvent::Delta(chunk.response)),
        Err(e) => Some(StreamEvent::Error(e.to_string())),
    }
}

#[async_trait]
impl GenerationBackend for OllamaBackend {
    async fn generate(
        &self,
        model_id: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, BackendError> {
        let response = self.post_generate(model_id, prompt, options, false).await?;
        let text = response.text().await.map_err(OllamaError::Http)?;
        let chunk = GenerateChunk::parse(&text)?;
        if let Some(error) = chunk.error {
            return Err(OllamaError::Server(error).into());
        }
        Ok(chunk.response)
    }

    async fn generate_stream(
        &self,
        model_id: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<StreamHandle, BackendError> {
        let response = self.post_generate(model_id, prompt, options, true).await?;
        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        let model = model_id.to_string();

        // Dropping the handle closes `tx`; the reader then drops the response,
        // which aborts the HTTP request even while the model is silent.
        tokio::spawn(async move {
            let mut bytes = response.bytes_stream();
            let mut lines = LineBuffer::new();

            loop {
                let next = tokio::select! {
                    _ = tx.closed() => {
                        trace!("{}: receiver dropped, aborting request", model);
                        return;
                    }
                    next = bytes.next() => next,
                };
                let Some(next) = next else {
                    break;
                };
                let chunk = match next {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                        return;
                    }
                };
                for line in lines.push(&chunk) {
                    trace!("{}: {}", model, line);
                    let Some(event) = line_to_event(&line) else {
                        continue;
                    };
                    let terminal = event.is_terminal();
                    if tx.send(event).await.is_err() || terminal {
                        return;
                    }
                }
            }

            if let Some(event) = lines.finish().as_deref().and_then(line_to_event) {
                let _ = tx.send(event).await;
            }
        });

        Ok(StreamHandle::new(rx))
    }
}
