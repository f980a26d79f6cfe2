//! lfdraft - Logical Framework drafting pipeline
//!
//! lfdraft turns free-text project descriptions into structured Logical
//! Framework objects (goal, purpose, outcomes, inputs) through a staged
//! pipeline: deterministic intake, one generation call, then a pure
//! clarification decision. The pipeline is stateless; callers round-trip
//! drafts, question sets and answers through the request/response payloads.
//!
//! # Core Concepts
//!
//! - **One Call Per Operation**: draft and refine each make exactly one
//!   completion call; resume makes none
//! - **State in Payloads**: every response carries everything needed to
//!   continue, nothing persists between calls
//! - **Hard Output Boundary**: service output is sanitized and validated
//!   before anything downstream sees it
//!
//! # Modules
//!
//! - [`intake`] - Normalization, intent classification, entity hints
//! - [`drafting`] - Generation and refinement adapters
//! - [`clarify`] - Clarification policy engine
//! - [`pipeline`] - Orchestrator and wire contract
//! - [`llm`] - Generation client trait and OpenAI implementation
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod clarify;
pub mod cli;
pub mod config;
pub mod domain;
pub mod drafting;
pub mod error;
pub mod intake;
pub mod llm;
pub mod pipeline;
pub mod prompts;

// Re-export commonly used types
pub use clarify::{ClarificationOutput, ClarificationPolicy, ClarificationQuestion, NextAction};
pub use config::{ClarificationConfig, Config, LlmConfig};
pub use domain::{DraftEngineOutput, DraftLogFrame, EntityHints, Intent, PreprocessResult, TextMapping};
pub use drafting::DraftEngine;
pub use error::PipelineError;
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, OpenAIClient, StopReason, TokenUsage};
pub use pipeline::{
    DraftRequest, DraftResponse, Orchestrator, RefineRequest, RefineResponse, ResumeRequest, ResumeResponse,
    resume_with_answers,
};
pub use prompts::{DraftContext, PromptLoader, RefineContext};
