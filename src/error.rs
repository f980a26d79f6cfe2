//! Pipeline error taxonomy
//!
//! Three caller-visible failure classes: malformed caller input, malformed
//! service output, and transport failures. Sanitization clamps are the only
//! silent corrections anywhere, and only for list lengths and dangling
//! mapping keys; a missing goal or purpose is always a hard failure.

use thiserror::Error;

use crate::llm::LlmError;

/// Errors surfaced by the drafting pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Caller input violates the declared request shape (e.g. a resumed
    /// draft with outcomes outside 1-5). Surfaced directly, never retried.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The generation service returned non-JSON or schema-violating content
    /// even after sanitization. Carries the raw payload for diagnostics.
    #[error("malformed generation output: {reason}")]
    MalformedGeneration { reason: String, raw: String },

    /// Network/timeout/auth failure from the generation service,
    /// propagated as-is with no internal retry or backoff.
    #[error("generation service error: {0}")]
    External(#[from] LlmError),

    /// Internal configuration failure (template loading/rendering,
    /// context serialization). Not part of the wire taxonomy.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PipelineError {
    /// The raw offending payload, when this is a generation failure
    pub fn raw_payload(&self) -> Option<&str> {
        match self {
            Self::MalformedGeneration { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_generation_carries_raw_payload() {
        let err = PipelineError::MalformedGeneration {
            reason: "not JSON".to_string(),
            raw: "oops, plain text".to_string(),
        };
        assert_eq!(err.raw_payload(), Some("oops, plain text"));
        assert!(err.to_string().contains("not JSON"));
    }

    #[test]
    fn test_validation_has_no_payload() {
        let err = PipelineError::Validation("outcomes must hold 1-5 items".to_string());
        assert!(err.raw_payload().is_none());
    }

    #[test]
    fn test_external_wraps_llm_error() {
        let err = PipelineError::from(LlmError::ApiError {
            status: 503,
            message: "unavailable".to_string(),
        });
        assert!(matches!(err, PipelineError::External(_)));
    }
}
