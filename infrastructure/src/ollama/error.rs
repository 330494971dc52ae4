//! Error types for the Ollama adapter.

use ensemble_application::BackendError;
use thiserror::Error;

/// Errors raised while talking to an Ollama server
#[derive(Error, Debug)]
pub enum OllamaError {
    #[error("could not build HTTP client: {0}")]
    Client(String),

    #[error("cannot reach Ollama at {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model '{0}' not found on the server")]
    ModelNotFound(String),

    #[error("Ollama returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Ollama reported an error: {0}")]
    Server(String),

    #[error("could not decode Ollama response: {0}")]
    Decode(String),
}

impl From<OllamaError> for BackendError {
    fn from(err: OllamaError) -> Self {
        match err {
            OllamaError::Connect { .. } => BackendError::ConnectionError(err.to_string()),
            OllamaError::ModelNotFound(model) => BackendError::ModelNotAvailable(model),
            OllamaError::Decode(msg) => BackendError::InvalidResponse(msg),
            OllamaError::Client(_)
            | OllamaError::Http(_)
            | OllamaError::Status { .. }
            | OllamaError::Server(_) => BackendError::RequestFailed(err.to_string()),
        }
    }
}
