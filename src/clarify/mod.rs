//! Clarification Policy Engine
//!
//! Pure decision logic: given open questions and a policy, pick which
//! questions to surface and whether the pipeline may proceed without user
//! input. Also owns question construction from the service's raw
//! `open_questions` strings.

mod decide;
mod types;

pub use decide::{build_questions, decide, is_blocking_question};
pub use types::{ClarificationOutput, ClarificationPolicy, ClarificationQuestion, NextAction};
