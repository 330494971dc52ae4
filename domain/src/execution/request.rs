//! Execution request value object

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeout applied to each model call when the request does not set one.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Opaque generation parameters (temperature, top_p, ...).
///
/// Forwarded verbatim to the generation backend; nothing in the engine
/// interprets the contents.
pub type GenerationOptions = serde_json::Map<String, serde_json::Value>;

/// A single prompt to fan out to several models.
///
/// `timeout_ms` is signed so that a negative value coming from an untyped
/// caller survives deserialization and is rejected by the validator instead
/// of silently wrapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRequest {
    #[serde(default)]
    pub prompt: String,
    /// `None` targets every installed model; `Some(vec![])` is invalid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<i64>,
    #[serde(default)]
    pub generation_options: GenerationOptions,
}

impl ExecutionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_models<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.model_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: i64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.generation_options.insert(key.into(), value);
        self
    }

    /// Effective per-call timeout, falling back to `default_ms` when unset.
    ///
    /// Negative values are clamped to zero; callers are expected to have run
    /// the validator first.
    pub fn timeout_or(&self, default_ms: u64) -> Duration {
        let ms = match self.timeout_ms {
            Some(ms) => u64::try_from(ms).unwrap_or(0),
            None => default_ms,
        };
        Duration::from_millis(ms)
    }

    /// Effective per-call timeout using [`DEFAULT_TIMEOUT_MS`].
    pub fn timeout(&self) -> Duration {
        self.timeout_or(DEFAULT_TIMEOUT_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout() {
        let request = ExecutionRequest::new("hello");
        assert_eq!(request.timeout(), Duration::from_millis(30_000));
    }

    #[test]
    fn test_explicit_timeout() {
        let request = ExecutionRequest::new("hello").with_timeout_ms(250);
        assert_eq!(request.timeout(), Duration::from_millis(250));
        assert_eq!(request.timeout_or(5), Duration::from_millis(250));
    }

    #[test]
    fn test_builder() {
        let request = ExecutionRequest::new("Explain borrowing")
            .with_models(["llama3.1:8b", "qwen2.5-coder:7b"])
            .with_option("temperature", serde_json::json!(0.2));

        assert_eq!(request.model_ids.as_ref().map(Vec::len), Some(2));
        assert_eq!(request.generation_options["temperature"], 0.2);
    }

    #[test]
    fn test_deserialize_from_camel_case() {
        let request: ExecutionRequest = serde_json::from_value(serde_json::json!({
            "prompt": "hi",
            "modelIds": ["a"],
            "timeoutMs": -5,
            "generationOptions": {"seed": 7}
        }))
        .unwrap();
        assert_eq!(request.timeout_ms, Some(-5));
        assert_eq!(request.generation_options["seed"], 7);
    }
}
