//! LLM request/response types
//!
//! Modeled on the OpenAI Chat Completions API but provider-agnostic: a
//! role-tagged system/user prompt pair plus an optional structured-output
//! constraint.

use tracing::debug;

/// Everything needed for one completion call
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System instructions (rendered from a Handlebars template)
    pub system_prompt: String,

    /// User content (normalized text or refinement context)
    pub user_prompt: String,

    /// Max tokens for the response
    pub max_tokens: u32,

    /// Decoding temperature; the pipeline always requests 0.0 for the
    /// lowest-variance setting available
    pub temperature: f32,

    /// Optional `response_format` constraint (JSON schema) passed through
    /// to the provider verbatim
    pub response_format: Option<serde_json::Value>,
}

/// Response from a completion request
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Text content, expected to parse as JSON for structured calls
    pub content: Option<String>,

    /// Why the model stopped
    pub stop_reason: StopReason,

    /// Token usage for logging
    pub usage: TokenUsage,
}

/// Why the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    Other,
}

impl StopReason {
    /// Parse from an OpenAI `finish_reason` string
    pub fn from_finish_reason(s: &str) -> Self {
        debug!(%s, "StopReason::from_finish_reason: called");
        match s {
            "stop" => StopReason::EndTurn,
            "length" => StopReason::MaxTokens,
            _ => StopReason::Other,
        }
    }
}

/// Token usage reported by the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}
