//! Ollama adapters
//!
//! - [`OllamaBackend`] - text generation (plain and NDJSON streaming)
//! - [`OllamaCatalogDiscovery`] - installed-model listing

mod backend;
mod discovery;
mod error;
mod wire;

pub use backend::OllamaBackend;
pub use discovery::{OllamaCatalogDiscovery, infer_category, tag_to_meta};
pub use error::OllamaError;
pub use wire::{LineBuffer, TagModel};
