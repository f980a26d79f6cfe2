//! Clarification wire types

use serde::{Deserialize, Serialize};

/// Default cap on surfaced questions
pub const DEFAULT_MAX_QUESTIONS: usize = 3;

/// A question posed to the end user to resolve missing information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClarificationQuestion {
    /// Stable id, derived from position (`q0`, `q1`, ...)
    pub id: String,

    /// Question text as produced by the generation service
    pub question: String,

    /// Whether an answer is mandatory before proceeding without assumptions
    #[serde(default)]
    pub required: bool,

    /// Draft field names this question affects
    #[serde(default)]
    pub affects: Vec<String>,

    /// Assumption applied if the user never answers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_assumption: Option<String>,
}

/// Caller-supplied policy, immutable per call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClarificationPolicy {
    /// Cap on the surfaced question set
    pub max_questions: usize,

    /// Whether the pipeline may proceed when only optional questions remain
    pub allow_proceed_with_assumptions: bool,
}

impl Default for ClarificationPolicy {
    fn default() -> Self {
        Self {
            max_questions: DEFAULT_MAX_QUESTIONS,
            allow_proceed_with_assumptions: true,
        }
    }
}

/// What the caller should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextAction {
    /// Required (or non-skippable optional) questions remain unanswered
    WaitForUser,
    /// No blocking questions; the draft may be finalized with assumptions
    ProceedWithAssumptions,
}

/// Decision produced by the policy engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClarificationOutput {
    /// Questions to surface, required first, at most `max_questions`
    pub question_set: Vec<ClarificationQuestion>,

    /// Ids of ALL required questions, never truncated by `max_questions`.
    /// Required questions may be dropped from display by extreme clamping
    /// but never from the blocking signal.
    pub stop_condition: Vec<String>,

    /// Whether to wait for the user or proceed
    pub next_action: NextAction,
}
