//! Pipeline orchestration
//!
//! Sequences extractor, drafting adapters and the clarification engine, and
//! defines the JSON wire contract for the three operations (draft, resume,
//! refine). Stateless: every call receives its full context from the caller
//! and returns everything the caller needs to continue.

mod messages;
mod orchestrator;

pub use messages::{
    DraftRequest, DraftResponse, RefineRequest, RefineResponse, ResumeRequest, ResumeResponse,
};
pub use orchestrator::{Orchestrator, resume_with_answers};
