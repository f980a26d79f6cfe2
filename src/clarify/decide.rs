//! Clarification decision algorithm and question construction

use tracing::debug;

use super::{ClarificationOutput, ClarificationPolicy, ClarificationQuestion, NextAction};

/// Keywords that make a question blocking (answer required before proceeding)
const BLOCKING_KEYWORDS: &[&str] = &["timeframe", "timeline", "by when", "measure", "metric", "who is responsible"];

/// Whether a question's answer is mandatory, by fixed keyword test
pub fn is_blocking_question(question: &str) -> bool {
    let lower = question.to_lowercase();
    BLOCKING_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Build positional clarification questions from the service's raw strings
///
/// Ids are assigned positionally (`q0`, `q1`, ...) so resume calls can match
/// answers back without any stored state.
pub fn build_questions(open_questions: &[String]) -> Vec<ClarificationQuestion> {
    debug!(count = open_questions.len(), "build_questions: called");
    open_questions
        .iter()
        .enumerate()
        .map(|(i, question)| ClarificationQuestion {
            id: format!("q{i}"),
            question: question.clone(),
            required: is_blocking_question(question),
            affects: Vec::new(),
            default_assumption: None,
        })
        .collect()
}

/// Decide which questions to surface and whether to wait for the user
///
/// Pure and total. Required questions always lead the surfaced set;
/// `stop_condition` carries every required id even when `max_questions`
/// clamps the display.
pub fn decide(open_questions: &[ClarificationQuestion], policy: &ClarificationPolicy) -> ClarificationOutput {
    debug!(
        question_count = open_questions.len(),
        max_questions = policy.max_questions,
        allow_proceed = policy.allow_proceed_with_assumptions,
        "decide: called"
    );

    if open_questions.is_empty() {
        debug!("decide: no open questions, proceeding with assumptions");
        return ClarificationOutput {
            question_set: Vec::new(),
            stop_condition: Vec::new(),
            next_action: NextAction::ProceedWithAssumptions,
        };
    }

    // Stable partition: original relative order survives within each side
    let required: Vec<&ClarificationQuestion> = open_questions.iter().filter(|q| q.required).collect();
    let optional: Vec<&ClarificationQuestion> = open_questions.iter().filter(|q| !q.required).collect();

    let mut question_set: Vec<ClarificationQuestion> = required.iter().map(|q| (*q).clone()).collect();
    let remaining_slots = policy.max_questions.saturating_sub(question_set.len());
    question_set.extend(optional.iter().take(remaining_slots).map(|q| (*q).clone()));
    question_set.truncate(policy.max_questions);

    let stop_condition: Vec<String> = required.iter().map(|q| q.id.clone()).collect();

    let next_action = if !stop_condition.is_empty() {
        debug!(blocking = stop_condition.len(), "decide: required questions unanswered");
        NextAction::WaitForUser
    } else if !question_set.is_empty() && !policy.allow_proceed_with_assumptions {
        debug!("decide: optional questions remain and assumptions are disallowed");
        NextAction::WaitForUser
    } else {
        debug!("decide: proceeding with assumptions");
        NextAction::ProceedWithAssumptions
    };

    ClarificationOutput {
        question_set,
        stop_condition,
        next_action,
    }
}
