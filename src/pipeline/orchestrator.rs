//! Orchestrator: sequences extractor, adapters and clarification engine
//!
//! State machine per request:
//! `Start -> Preprocessed -> Drafted -> ClarificationDecided -> (Done | AwaitingUser)`.
//! The terminal states are implied by `next_action`; the caller decides
//! whether to come back through resume or refine.

use std::collections::HashSet;

use tracing::{debug, info};

use super::{DraftRequest, DraftResponse, RefineRequest, RefineResponse, ResumeRequest, ResumeResponse};
use crate::clarify::{self, ClarificationPolicy};
use crate::drafting::DraftEngine;
use crate::error::PipelineError;
use crate::intake;

/// Pipeline orchestrator with an injected drafting engine
///
/// Holds no per-request state; safe to share across concurrent requests at
/// the hosting layer.
pub struct Orchestrator {
    engine: DraftEngine,
    default_policy: ClarificationPolicy,
}

impl Orchestrator {
    /// Create an orchestrator around a drafting engine
    pub fn new(engine: DraftEngine, default_policy: ClarificationPolicy) -> Self {
        debug!(?default_policy, "Orchestrator::new: called");
        Self { engine, default_policy }
    }

    /// Fresh-draft flow: preprocess, generate, decide clarification
    pub async fn draft(&self, request: DraftRequest) -> Result<DraftResponse, PipelineError> {
        debug!(text_len = request.text.len(), "draft: called");
        let preprocess = intake::preprocess(&request.text);
        info!(
            raw_input_id = %preprocess.raw_input_id,
            intent = %preprocess.intent,
            "draft: preprocessed"
        );

        let drafting = self.engine.generate_draft(&preprocess.normalized_text).await?;

        let questions = clarify::build_questions(&drafting.open_questions);
        let clarification = clarify::decide(&questions, &self.default_policy);
        info!(
            surfaced = clarification.question_set.len(),
            blocking = clarification.stop_condition.len(),
            "draft: clarification decided"
        );

        Ok(DraftResponse {
            preprocess,
            drafting,
            clarification,
        })
    }

    /// Resume flow: merge answers, re-decide on residual required questions
    ///
    /// Pure recomputation, no external call.
    pub fn resume(&self, request: ResumeRequest) -> Result<ResumeResponse, PipelineError> {
        resume_with_answers(request, &self.default_policy)
    }

    /// Refine flow: re-preprocess, merge answers, one refinement call
    pub async fn refine(&self, request: RefineRequest) -> Result<RefineResponse, PipelineError> {
        debug!(
            text_len = request.raw_text.len(),
            answer_count = request.answers.len(),
            "refine: called"
        );
        // normalization and intent are recomputed, never cached
        let preprocess = intake::preprocess(&request.raw_text);

        request.draft_lfo.validate().map_err(PipelineError::Validation)?;
        let merged = request.draft_lfo.with_answers(&request.answers);

        let drafting = self
            .engine
            .refine_draft(&preprocess.normalized_text, &merged, &request.question_set, &request.answers)
            .await?;

        let questions = clarify::build_questions(&drafting.open_questions);
        let policy = request.policy.unwrap_or_else(|| self.default_policy.clone());
        let clarification = clarify::decide(&questions, &policy);
        info!(
            surfaced = clarification.question_set.len(),
            blocking = clarification.stop_condition.len(),
            "refine: clarification decided"
        );

        Ok(RefineResponse {
            preprocess,
            drafting,
            clarification,
        })
    }
}

/// Merge answers into a draft and recompute the clarification decision
///
/// Only required questions whose id is still unanswered block; the residual
/// list feeds the same decide algorithm. Questions beyond id-matching are
/// not re-validated against the draft.
pub fn resume_with_answers(
    request: ResumeRequest,
    default_policy: &ClarificationPolicy,
) -> Result<ResumeResponse, PipelineError> {
    debug!(
        question_count = request.question_set.len(),
        answer_count = request.answers.len(),
        "resume_with_answers: called"
    );
    request.draft_lfo.validate().map_err(PipelineError::Validation)?;

    let updated = request.draft_lfo.with_answers(&request.answers);
    let answered: HashSet<String> = updated.answered_ids().into_iter().collect();

    let residual: Vec<_> = request
        .question_set
        .iter()
        .filter(|q| q.required && !answered.contains(&q.id))
        .cloned()
        .collect();
    debug!(residual = residual.len(), "resume_with_answers: unanswered required questions");

    let policy = request.policy.unwrap_or_else(|| default_policy.clone());
    let clarification = clarify::decide(&residual, &policy);

    Ok(ResumeResponse {
        draft_lfo: updated,
        applied_answers: request.answers,
        clarification,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use super::*;
    use crate::clarify::{ClarificationQuestion, NextAction};
    use crate::domain::{DraftLogFrame, Intent};
    use crate::llm::client::mock::MockLlmClient;
    use crate::prompts::PromptLoader;

    const STEM_PAYLOAD: &str = r#"{
        "draft_lfo": {
            "goal": "Increase student interest in STEM careers",
            "purpose": "Deliver a one-day STEM event for high school students",
            "outcomes": ["Host hands-on science activities", "Match students with mentors"],
            "inputs": ["Prepare an event schedule", "Recruit scientist mentors", "Open registration"]
        },
        "confidence": 0.68,
        "open_questions": [
            "What is the timeframe for the event?",
            "Is there a preferred venue?"
        ],
        "mapping": {
            "outcomes_support": {
                "Host hands-on science activities": ["Scientists will host hands-on activities"]
            },
            "inputs_support": {
                "Open registration": ["We need a schedule, mentors, and registration"]
            }
        }
    }"#;

    fn orchestrator(client: Arc<MockLlmClient>) -> Orchestrator {
        let engine = DraftEngine::new(client, PromptLoader::embedded_only(), 4096);
        Orchestrator::new(engine, ClarificationPolicy::default())
    }

    fn frame() -> DraftLogFrame {
        DraftLogFrame {
            goal: "g".to_string(),
            purpose: "p".to_string(),
            outcomes: vec!["o".to_string()],
            inputs: vec!["i".to_string()],
            user_answers: None,
        }
    }

    fn question(id: &str, required: bool) -> ClarificationQuestion {
        ClarificationQuestion {
            id: id.to_string(),
            question: format!("question {id}"),
            required,
            affects: vec![],
            default_assumption: None,
        }
    }

    #[tokio::test]
    async fn test_draft_round_trip() {
        let client = Arc::new(MockLlmClient::with_payloads(vec![STEM_PAYLOAD]));
        let response = orchestrator(client)
            .draft(DraftRequest {
                text: "We want a one-day STEM event for high school students. \
                       Scientists will host hands-on activities. \
                       We need a schedule, mentors, and registration."
                    .to_string(),
            })
            .await
            .unwrap();

        // no strong cue words: defaults to create
        assert_eq!(response.preprocess.intent, Intent::Create);

        // positional ids; the timeframe question is blocking
        let q = &response.clarification.question_set;
        assert_eq!(q[0].id, "q0");
        assert!(q[0].required);
        assert_eq!(response.clarification.stop_condition, vec!["q0"]);
        assert_eq!(response.clarification.next_action, NextAction::WaitForUser);
    }

    #[test]
    fn test_resume_merges_answers_and_unblocks() {
        let client = Arc::new(MockLlmClient::new(vec![]));
        let orch = orchestrator(client.clone());

        let first = orch
            .resume(ResumeRequest {
                draft_lfo: frame(),
                question_set: vec![question("q0", true), question("q1", false)],
                answers: BTreeMap::from([("q0".to_string(), "Friday".to_string())]),
                policy: None,
            })
            .unwrap();

        assert_eq!(
            first.draft_lfo.user_answers,
            Some(BTreeMap::from([("q0".to_string(), "Friday".to_string())]))
        );
        // the only required question is answered
        assert!(first.clarification.stop_condition.is_empty());
        assert_eq!(first.clarification.next_action, NextAction::ProceedWithAssumptions);

        // second resume accumulates, does not replace
        let second = orch
            .resume(ResumeRequest {
                draft_lfo: first.draft_lfo,
                question_set: vec![],
                answers: BTreeMap::from([("q1".to_string(), "Bob".to_string())]),
                policy: None,
            })
            .unwrap();
        assert_eq!(
            second.draft_lfo.user_answers,
            Some(BTreeMap::from([
                ("q0".to_string(), "Friday".to_string()),
                ("q1".to_string(), "Bob".to_string()),
            ]))
        );

        // resume never touches the LLM
        assert_eq!(client.call_count(), 0);
    }

    #[test]
    fn test_resume_still_blocked_when_required_unanswered() {
        let client = Arc::new(MockLlmClient::new(vec![]));
        let response = orchestrator(client)
            .resume(ResumeRequest {
                draft_lfo: frame(),
                question_set: vec![question("q0", true), question("q1", true)],
                answers: BTreeMap::from([("q0".to_string(), "done".to_string())]),
                policy: None,
            })
            .unwrap();

        assert_eq!(response.clarification.stop_condition, vec!["q1"]);
        assert_eq!(response.clarification.next_action, NextAction::WaitForUser);
    }

    #[test]
    fn test_resume_rejects_malformed_draft() {
        let client = Arc::new(MockLlmClient::new(vec![]));
        let mut bad = frame();
        bad.outcomes = (0..6).map(|i| format!("outcome {i}")).collect();

        let err = orchestrator(client)
            .resume(ResumeRequest {
                draft_lfo: bad,
                question_set: vec![],
                answers: BTreeMap::new(),
                policy: None,
            })
            .unwrap_err();

        assert!(matches!(err, PipelineError::Validation(_)));
    }

    #[tokio::test]
    async fn test_refine_recomputes_preprocess_and_merges() {
        let client = Arc::new(MockLlmClient::with_payloads(vec![STEM_PAYLOAD]));
        let orch = orchestrator(client.clone());

        let response = orch
            .refine(RefineRequest {
                raw_text: "  We want   a one-day STEM event  ".to_string(),
                draft_lfo: frame(),
                question_set: vec![question("q0", true)],
                answers: BTreeMap::from([("q0".to_string(), "next spring".to_string())]),
                policy: Some(ClarificationPolicy {
                    max_questions: 1,
                    allow_proceed_with_assumptions: true,
                }),
            })
            .await
            .unwrap();

        // normalization recomputed from raw text
        assert_eq!(response.preprocess.normalized_text, "We want a one-day STEM event");

        // clarification rebuilt from the refinement's open questions under
        // the caller's policy
        assert_eq!(response.clarification.question_set.len(), 1);
        assert_eq!(response.clarification.stop_condition, vec!["q0"]);

        // the merged draft and answers went out in the prompt
        let requests = client.requests();
        assert!(requests[0].user_prompt.contains("next spring"));
    }
}
