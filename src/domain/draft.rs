//! Draft Logical Framework types and their validation boundary
//!
//! `DraftEngineOutput` is what the generation service must produce. The
//! sanitization clamps in [`crate::drafting`] run on raw JSON strictly
//! before these types are constructed; `validate` is the hard boundary
//! behind which every instance is well-formed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcomes and inputs must hold between 1 and 5 items
pub const MAX_LIST_ITEMS: usize = 5;

/// At most 5 open questions survive sanitization
pub const MAX_OPEN_QUESTIONS: usize = 5;

/// A draft Logical Framework: goal, purpose, outcomes, inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftLogFrame {
    /// High-level impact
    pub goal: String,

    /// Immediate objective
    pub purpose: String,

    /// Observable results, 1-5 items, order-preserving
    pub outcomes: Vec<String>,

    /// Resources and activities, 1-5 items, order-preserving
    pub inputs: Vec<String>,

    /// Clarification answers the caller has supplied so far (question id -> answer)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_answers: Option<BTreeMap<String, String>>,
}

impl DraftLogFrame {
    /// Non-mutating merge of new answers into `user_answers`
    ///
    /// Returns a copy; new answers override existing keys on conflict.
    pub fn with_answers(&self, answers: &BTreeMap<String, String>) -> Self {
        debug!(answer_count = answers.len(), "DraftLogFrame::with_answers: called");
        let mut merged = self.user_answers.clone().unwrap_or_default();
        for (id, answer) in answers {
            merged.insert(id.clone(), answer.clone());
        }
        Self {
            user_answers: Some(merged),
            ..self.clone()
        }
    }

    /// Ids of all answered questions
    pub fn answered_ids(&self) -> Vec<String> {
        debug!("DraftLogFrame::answered_ids: called");
        self.user_answers
            .as_ref()
            .map(|answers| answers.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Check shape invariants: non-empty goal/purpose, list counts in [1,5]
    pub fn validate(&self) -> Result<(), String> {
        debug!("DraftLogFrame::validate: called");
        if self.goal.trim().is_empty() {
            return Err("goal must not be empty".to_string());
        }
        if self.purpose.trim().is_empty() {
            return Err("purpose must not be empty".to_string());
        }
        if self.outcomes.is_empty() || self.outcomes.len() > MAX_LIST_ITEMS {
            return Err(format!(
                "outcomes must hold 1-{} items, got {}",
                MAX_LIST_ITEMS,
                self.outcomes.len()
            ));
        }
        if self.inputs.is_empty() || self.inputs.len() > MAX_LIST_ITEMS {
            return Err(format!(
                "inputs must hold 1-{} items, got {}",
                MAX_LIST_ITEMS,
                self.inputs.len()
            ));
        }
        Ok(())
    }
}

/// Traceability from draft fields back to supporting source phrases
///
/// Keys in both support maps must reference current outcomes/inputs; the
/// sanitization step drops stale keys after clamping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextMapping {
    /// Outcome text -> supporting phrases from the source
    pub outcomes_support: BTreeMap<String, Vec<String>>,

    /// Input text -> supporting phrases from the source
    pub inputs_support: BTreeMap<String, Vec<String>>,
}

/// One complete result from the generation or refinement service
///
/// Produced fresh per call and never mutated, only replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftEngineOutput {
    /// The drafted Logical Framework
    pub draft_lfo: DraftLogFrame,

    /// Service's own completeness estimate, in [0,1]
    pub confidence: f64,

    /// Questions the service could not answer from the text (at most 5)
    #[serde(default)]
    pub open_questions: Vec<String>,

    /// Field-to-source traceability
    #[serde(default)]
    pub mapping: TextMapping,
}

impl DraftEngineOutput {
    /// Hard schema validation, applied after sanitization
    ///
    /// Clamping has already bounded the lists; anything still out of shape
    /// here is a service contract violation, not something to repair.
    pub fn validate(&self) -> Result<(), String> {
        debug!(confidence = self.confidence, "DraftEngineOutput::validate: called");
        self.draft_lfo.validate()?;

        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(format!("confidence must be in [0,1], got {}", self.confidence));
        }
        if self.open_questions.len() > MAX_OPEN_QUESTIONS {
            return Err(format!(
                "open_questions must hold at most {} items, got {}",
                MAX_OPEN_QUESTIONS,
                self.open_questions.len()
            ));
        }

        for key in self.mapping.outcomes_support.keys() {
            if !self.draft_lfo.outcomes.contains(key) {
                return Err(format!("outcomes_support references unknown outcome: {key:?}"));
            }
        }
        for key in self.mapping.inputs_support.keys() {
            if !self.draft_lfo.inputs.contains(key) {
                return Err(format!("inputs_support references unknown input: {key:?}"));
            }
        }

        Ok(())
    }
}
