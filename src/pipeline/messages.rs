//! Wire request/response types for the three pipeline operations
//!
//! JSON shapes round-tripped by the caller; all pipeline "memory" lives in
//! these payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::clarify::{ClarificationOutput, ClarificationPolicy, ClarificationQuestion};
use crate::domain::{DraftEngineOutput, DraftLogFrame, PreprocessResult};

/// Input for the fresh-draft operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftRequest {
    /// Free-text project description
    pub text: String,
}

/// Output of the fresh-draft operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftResponse {
    pub preprocess: PreprocessResult,
    pub drafting: DraftEngineOutput,
    pub clarification: ClarificationOutput,
}

/// Input for the resume operation: a previously returned draft plus new answers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeRequest {
    pub draft_lfo: DraftLogFrame,

    /// The question set the caller was shown
    #[serde(default)]
    pub question_set: Vec<ClarificationQuestion>,

    /// New answers, keyed by question id
    #[serde(default)]
    pub answers: BTreeMap<String, String>,

    /// Policy for the recomputed decision; configured defaults when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<ClarificationPolicy>,
}

/// Output of the resume operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeResponse {
    /// Draft with the merged `user_answers`
    pub draft_lfo: DraftLogFrame,

    /// Echo of the answers applied in this call
    pub applied_answers: BTreeMap<String, String>,

    pub clarification: ClarificationOutput,
}

/// Input for the refine operation: re-draft with answers folded in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefineRequest {
    /// Original free-text description (re-preprocessed, not cached)
    pub raw_text: String,

    pub draft_lfo: DraftLogFrame,

    #[serde(default)]
    pub question_set: Vec<ClarificationQuestion>,

    #[serde(default)]
    pub answers: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<ClarificationPolicy>,
}

/// Output of the refine operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefineResponse {
    pub preprocess: PreprocessResult,
    pub drafting: DraftEngineOutput,
    pub clarification: ClarificationOutput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_request_shape() {
        let req: DraftRequest = serde_json::from_str(r#"{"text": "build a thing"}"#).unwrap();
        assert_eq!(req.text, "build a thing");
    }

    #[test]
    fn test_resume_request_defaults() {
        let req: ResumeRequest = serde_json::from_str(
            r#"{
                "draft_lfo": {
                    "goal": "g", "purpose": "p",
                    "outcomes": ["o"], "inputs": ["i"]
                }
            }"#,
        )
        .unwrap();

        assert!(req.question_set.is_empty());
        assert!(req.answers.is_empty());
        assert!(req.policy.is_none());
    }

    #[test]
    fn test_refine_request_round_trip() {
        let req = RefineRequest {
            raw_text: "the event".to_string(),
            draft_lfo: DraftLogFrame {
                goal: "g".to_string(),
                purpose: "p".to_string(),
                outcomes: vec!["o".to_string()],
                inputs: vec!["i".to_string()],
                user_answers: None,
            },
            question_set: vec![],
            answers: BTreeMap::from([("q0".to_string(), "Friday".to_string())]),
            policy: Some(ClarificationPolicy::default()),
        };

        let json = serde_json::to_string(&req).unwrap();
        let back: RefineRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.answers["q0"], "Friday");
        assert_eq!(back.policy.unwrap().max_questions, 3);
    }
}
