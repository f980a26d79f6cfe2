//! Core value objects for the drafting pipeline
//!
//! Everything here is a request-scoped value: created once per request,
//! serialized into the response, never stored. Callers round-trip the draft
//! and question set themselves.

mod draft;
mod preprocess;

pub use draft::{DraftEngineOutput, DraftLogFrame, TextMapping, MAX_LIST_ITEMS, MAX_OPEN_QUESTIONS};
pub use preprocess::{EntityHints, Intent, PreprocessResult};
