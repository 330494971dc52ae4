//! Precondition checks for [`ExecutionRequest`].
//!
//! Validation is synchronous and side-effect free. Fatal problems come back
//! as a [`ValidationError`]; suspicious-but-legal settings come back as a
//! list of [`ValidationWarning`]s for the caller to log.
//!
//! # Examples
//!
//! ```
//! use ensemble_domain::execution::request::ExecutionRequest;
//! use ensemble_domain::execution::validation::validate_request;
//!
//! let warnings = validate_request(&ExecutionRequest::new("What is a lifetime?")).unwrap();
//! assert!(warnings.is_empty());
//!
//! let err = validate_request(&ExecutionRequest::new("hi").with_models(Vec::<String>::new()));
//! assert!(err.is_err());
//! ```

use super::request::ExecutionRequest;
use crate::core::error::ValidationError;

/// Timeouts below this are legal but almost always a mistake.
pub const MIN_RECOMMENDED_TIMEOUT_MS: i64 = 1_000;

/// Prompts longer than this are legal but likely to be truncated by backends.
pub const MAX_RECOMMENDED_PROMPT_CHARS: usize = 100_000;

/// Identifies a specific non-fatal issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationWarningCode {
    ShortTimeout,
    LongPrompt,
}

/// A non-fatal issue detected in a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    pub code: ValidationWarningCode,
    pub message: String,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Validate a request before any backend is contacted.
///
/// Checks run in a fixed order and the first fatal problem wins.
pub fn validate_request(
    request: &ExecutionRequest,
) -> Result<Vec<ValidationWarning>, ValidationError> {
    let mut warnings = Vec::new();

    if request.prompt.is_empty() {
        return Err(ValidationError::MissingPrompt);
    }
    if request.prompt.trim().is_empty() {
        return Err(ValidationError::BlankPrompt);
    }

    if let Some(timeout_ms) = request.timeout_ms {
        if timeout_ms < 0 {
            return Err(ValidationError::NegativeTimeout(timeout_ms));
        }
        if timeout_ms < MIN_RECOMMENDED_TIMEOUT_MS {
            warnings.push(ValidationWarning {
                code: ValidationWarningCode::ShortTimeout,
                message: format!(
                    "timeoutMs of {}ms is very short; most models need more than {}ms",
                    timeout_ms, MIN_RECOMMENDED_TIMEOUT_MS
                ),
            });
        }
    }

    let prompt_chars = request.prompt.chars().count();
    if prompt_chars > MAX_RECOMMENDED_PROMPT_CHARS {
        warnings.push(ValidationWarning {
            code: ValidationWarningCode::LongPrompt,
            message: format!(
                "prompt is {} characters; backends may truncate beyond {}",
                prompt_chars, MAX_RECOMMENDED_PROMPT_CHARS
            ),
        });
    }

    if let Some(ids) = &request.model_ids {
        if ids.is_empty() {
            return Err(ValidationError::EmptyModelIds);
        }
        if let Some(index) = ids.iter().position(|id| id.trim().is_empty()) {
            return Err(ValidationError::BlankModelId { index });
        }
    }

    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_request_has_no_warnings() {
        let request = ExecutionRequest::new("Explain Send and Sync")
            .with_models(["a", "b"])
            .with_timeout_ms(5_000);
        assert_eq!(validate_request(&request), Ok(vec![]));
    }

    #[test]
    fn empty_prompt_is_rejected() {
        let err = validate_request(&ExecutionRequest::new("")).unwrap_err();
        assert_eq!(err, ValidationError::MissingPrompt);
    }

    #[test]
    fn blank_prompt_is_rejected() {
        let err = validate_request(&ExecutionRequest::new("  \n\t ")).unwrap_err();
        assert_eq!(err, ValidationError::BlankPrompt);
    }

    #[test]
    fn negative_timeout_is_rejected() {
        let err = validate_request(&ExecutionRequest::new("hi").with_timeout_ms(-1)).unwrap_err();
        assert_eq!(err, ValidationError::NegativeTimeout(-1));
    }

    #[test]
    fn zero_timeout_only_warns() {
        let warnings = validate_request(&ExecutionRequest::new("hi").with_timeout_ms(0)).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, ValidationWarningCode::ShortTimeout);
    }

    #[test]
    fn long_prompt_warns() {
        let prompt = "x".repeat(MAX_RECOMMENDED_PROMPT_CHARS + 1);
        let warnings = validate_request(&ExecutionRequest::new(prompt)).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, ValidationWarningCode::LongPrompt);
    }

    #[test]
    fn short_timeout_and_long_prompt_warn_together() {
        let prompt = "y".repeat(MAX_RECOMMENDED_PROMPT_CHARS + 10);
        let warnings =
            validate_request(&ExecutionRequest::new(prompt).with_timeout_ms(100)).unwrap();
        let codes: Vec<_> = warnings.iter().map(|w| w.code).collect();
        assert_eq!(
            codes,
            vec![ValidationWarningCode::ShortTimeout, ValidationWarningCode::LongPrompt]
        );
    }

    #[test]
    fn empty_model_list_is_rejected() {
        let request = ExecutionRequest::new("hi").with_models(Vec::<String>::new());
        let err = validate_request(&request).unwrap_err();
        assert_eq!(err, ValidationError::EmptyModelIds);
        assert!(err.to_string().contains("cannot be empty array"));
    }

    #[test]
    fn blank_model_id_reports_index() {
        let request = ExecutionRequest::new("hi").with_models(["", "x"]);
        let err = validate_request(&request).unwrap_err();
        assert_eq!(err, ValidationError::BlankModelId { index: 0 });
        assert!(err.to_string().contains("[0]"));

        let request = ExecutionRequest::new("hi").with_models(["a", "b", "   "]);
        assert_eq!(
            validate_request(&request).unwrap_err(),
            ValidationError::BlankModelId { index: 2 }
        );
    }

    #[test]
    fn absent_model_list_is_fine() {
        let request = ExecutionRequest::new("hi");
        assert!(request.model_ids.is_none());
        assert!(validate_request(&request).is_ok());
    }
}
