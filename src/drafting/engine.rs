//! Draft generation and refinement engine
//!
//! Exactly one external completion call per operation. The service is asked
//! for temperature-0 decoding and a JSON-schema constrained response; its
//! output still passes through sanitization and hard validation before
//! anything downstream sees it.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::clarify::ClarificationQuestion;
use crate::domain::{DraftEngineOutput, DraftLogFrame};
use crate::error::PipelineError;
use crate::llm::{CompletionRequest, LlmClient, StopReason};
use crate::prompts::{DraftContext, PromptLoader, RefineContext};

/// Drafting adapter over an injected generation client
pub struct DraftEngine {
    llm: Arc<dyn LlmClient>,
    prompts: PromptLoader,
    max_tokens: u32,
}

impl DraftEngine {
    /// Create an engine from an injected client and prompt loader
    pub fn new(llm: Arc<dyn LlmClient>, prompts: PromptLoader, max_tokens: u32) -> Self {
        debug!(max_tokens, "DraftEngine::new: called");
        Self {
            llm,
            prompts,
            max_tokens,
        }
    }

    /// Generate a fresh draft from normalized project text
    pub async fn generate_draft(&self, normalized_text: &str) -> Result<DraftEngineOutput, PipelineError> {
        debug!(text_len = normalized_text.len(), "generate_draft: called");
        let context = DraftContext {
            normalized_input: normalized_text.to_string(),
        };
        let system_prompt = self.render("draft-system", &context)?;
        let user_prompt = self.render("draft-user", &context)?;

        self.complete_structured(system_prompt, user_prompt).await
    }

    /// Produce an improved draft from a prior draft plus clarification answers
    ///
    /// The prior draft, the full question set, and the answers map are all
    /// serialized into the outbound prompt as structured context.
    pub async fn refine_draft(
        &self,
        normalized_text: &str,
        prior_draft: &DraftLogFrame,
        question_set: &[ClarificationQuestion],
        answers: &BTreeMap<String, String>,
    ) -> Result<DraftEngineOutput, PipelineError> {
        debug!(
            text_len = normalized_text.len(),
            question_count = question_set.len(),
            answer_count = answers.len(),
            "refine_draft: called"
        );
        let context = RefineContext {
            normalized_input: normalized_text.to_string(),
            draft_json: to_pretty_json(prior_draft)?,
            questions_json: to_pretty_json(question_set)?,
            answers_json: to_pretty_json(answers)?,
        };
        let system_prompt = self.render("refine-system", &context)?;
        let user_prompt = self.render("refine-user", &context)?;

        self.complete_structured(system_prompt, user_prompt).await
    }

    fn render<C: serde::Serialize>(&self, name: &str, context: &C) -> Result<String, PipelineError> {
        self.prompts
            .render(name, context)
            .map_err(|e| PipelineError::Internal(e.to_string()))
    }

    /// One completion call, then the sanitize-and-validate boundary
    async fn complete_structured(
        &self,
        system_prompt: String,
        user_prompt: String,
    ) -> Result<DraftEngineOutput, PipelineError> {
        let request = CompletionRequest {
            system_prompt,
            user_prompt,
            max_tokens: self.max_tokens,
            // lowest-variance decoding available
            temperature: 0.0,
            response_format: Some(response_schema()),
        };

        let response = self.llm.complete(request).await?;
        info!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "complete_structured: completion finished"
        );

        if response.stop_reason == StopReason::MaxTokens {
            warn!("complete_structured: completion truncated at max_tokens, payload is likely malformed");
        }

        let content = response.content.ok_or_else(|| PipelineError::MalformedGeneration {
            reason: "service returned an empty completion".to_string(),
            raw: String::new(),
        })?;

        parse_engine_output(&content)
    }
}

/// Parse raw completion content into a validated engine output
///
/// Sanitization (list clamps, mapping-key filtering) runs on the untyped
/// JSON first; mapping into the typed structure and validating it is the
/// hard boundary. Any failure carries the raw payload for diagnostics.
pub fn parse_engine_output(content: &str) -> Result<DraftEngineOutput, PipelineError> {
    debug!(content_len = content.len(), "parse_engine_output: called");
    let mut value: Value = serde_json::from_str(content).map_err(|e| PipelineError::MalformedGeneration {
        reason: format!("not valid JSON: {e}"),
        raw: content.to_string(),
    })?;

    crate::drafting::sanitize_engine_output(&mut value);

    let output: DraftEngineOutput =
        serde_json::from_value(value).map_err(|e| PipelineError::MalformedGeneration {
            reason: format!("schema mismatch: {e}"),
            raw: content.to_string(),
        })?;

    output.validate().map_err(|reason| PipelineError::MalformedGeneration {
        reason,
        raw: content.to_string(),
    })?;

    Ok(output)
}

/// JSON-schema `response_format` constraint sent with every structured call
fn response_schema() -> Value {
    json!({
        "type": "json_schema",
        "json_schema": {
            "name": "DraftEngineOutput",
            "strict": true,
            "schema": {
                "type": "object",
                "additionalProperties": false,
                "required": ["draft_lfo", "confidence", "open_questions", "mapping"],
                "properties": {
                    "draft_lfo": {
                        "type": "object",
                        "additionalProperties": false,
                        "required": ["goal", "purpose", "outcomes", "inputs"],
                        "properties": {
                            "goal": { "type": "string" },
                            "purpose": { "type": "string" },
                            "outcomes": {
                                "type": "array", "items": { "type": "string" },
                                "minItems": 1, "maxItems": 5
                            },
                            "inputs": {
                                "type": "array", "items": { "type": "string" },
                                "minItems": 1, "maxItems": 5
                            }
                        }
                    },
                    "confidence": { "type": "number", "minimum": 0.0, "maximum": 1.0 },
                    "open_questions": {
                        "type": "array", "items": { "type": "string" }, "maxItems": 5
                    },
                    "mapping": {
                        "type": "object",
                        "properties": {
                            "outcomes_support": {
                                "type": "object",
                                "additionalProperties": { "type": "array", "items": { "type": "string" } }
                            },
                            "inputs_support": {
                                "type": "object",
                                "additionalProperties": { "type": "array", "items": { "type": "string" } }
                            }
                        }
                    }
                }
            }
        }
    })
}

fn to_pretty_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, PipelineError> {
    serde_json::to_string_pretty(value).map_err(|e| PipelineError::Internal(format!("context serialization: {e}")))
}
