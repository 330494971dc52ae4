//! Ollama HTTP wire types and NDJSON framing.

use ensemble_domain::{GIB, GenerationOptions};
use serde::{Deserialize, Serialize};

use super::error::OllamaError;

/// Body of `POST /api/generate`
#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<&'a GenerationOptions>,
}

impl<'a> GenerateRequest<'a> {
    pub fn new(model: &'a str, prompt: &'a str, options: &'a GenerationOptions, stream: bool) -> Self {
        Self {
            model,
            prompt,
            stream,
            options: (!options.is_empty()).then_some(options),
        }
    }
}

/// One `/api/generate` response object.
///
/// Non-streaming calls return a single object with `done = true`; streaming
/// calls return one object per line.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateChunk {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl GenerateChunk {
    pub fn parse(line: &str) -> Result<Self, OllamaError> {
        serde_json::from_str(line).map_err(|e| OllamaError::Decode(format!("{}: {}", e, line)))
    }
}

/// Body of `GET /api/tags`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<TagModel>,
}

/// One installed model as listed by `/api/tags`
#[derive(Debug, Clone, Deserialize)]
pub struct TagModel {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub details: Option<TagDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagDetails {
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub parameter_size: Option<String>,
}

impl TagModel {
    /// Human-friendly label, e.g. `"qwen2.5-coder:7b (7.6B, 4.4 GiB)"`.
    pub fn label(&self) -> String {
        let params = self
            .details
            .as_ref()
            .and_then(|d| d.parameter_size.as_deref());
        match params {
            Some(p) => format!("{} ({}, {:.1} GiB)", self.name, p, self.size as f64 / GIB as f64),
            None => self.name.clone(),
        }
    }
}

/// Splits a byte stream into newline-terminated lines.
///
/// HTTP chunks do not respect line boundaries, so partial lines are held
/// until the rest arrives.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `bytes` and return every line completed by them.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(bytes);
        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            let text = String::from_utf8_lossy(&line);
            let text = text.trim();
            if !text.is_empty() {
                lines.push(text.to_string());
            }
        }
        lines
    }

    /// Whatever is left once the stream ends.
    pub fn finish(self) -> Option<String> {
        let text = String::from_utf8_lossy(&self.pending).trim().to_string();
        (!text.is_empty()).then_some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_omits_empty_options() {
        let options = GenerationOptions::new();
        let body = serde_json::to_value(GenerateRequest::new("m", "p", &options, false)).unwrap();
        assert_eq!(body, json!({"model": "m", "prompt": "p", "stream": false}));
    }

    #[test]
    fn test_request_forwards_options() {
        let mut options = GenerationOptions::new();
        options.insert("temperature".into(), json!(0.3));
        let body = serde_json::to_value(GenerateRequest::new("m", "p", &options, true)).unwrap();
        assert_eq!(body["options"]["temperature"], json!(0.3));
        assert_eq!(body["stream"], json!(true));
    }

    #[test]
    fn test_parse_chunk() {
        let chunk = GenerateChunk::parse(r#"{"model":"m","response":"Hi","done":false}"#).unwrap();
        assert_eq!(chunk.response, "Hi");
        assert!(!chunk.done);

        let err = GenerateChunk::parse(r#"{"error":"model 'x' not found"}"#).unwrap();
        assert_eq!(err.error.as_deref(), Some("model 'x' not found"));

        assert!(GenerateChunk::parse("not json").is_err());
    }

    #[test]
    fn test_line_buffer_handles_split_lines() {
        let mut buffer = LineBuffer::new();
        assert!(buffer.push(b"{\"response\":\"He").is_empty());
        let lines = buffer.push(b"llo\"}\n{\"response\":\" wor");
        assert_eq!(lines, vec![r#"{"response":"Hello"}"#]);
        let lines = buffer.push(b"ld\"}\n\n");
        assert_eq!(lines, vec![r#"{"response":" world"}"#]);
        assert!(buffer.finish().is_none());
    }

    #[test]
    fn test_line_buffer_finish_returns_tail() {
        let mut buffer = LineBuffer::new();
        buffer.push(b"{\"done\":true}");
        assert_eq!(buffer.finish().as_deref(), Some(r#"{"done":true}"#));
    }

    #[test]
    fn test_tags_response() {
        let tags: TagsResponse = serde_json::from_value(json!({
            "models": [{
                "name": "qwen2.5-coder:7b",
                "size": 4683087332u64,
                "details": {"family": "qwen2", "parameter_size": "7.6B"}
            }]
        }))
        .unwrap();
        assert_eq!(tags.models.len(), 1);
        assert_eq!(tags.models[0].label(), "qwen2.5-coder:7b (7.6B, 4.4 GiB)");
    }
}
