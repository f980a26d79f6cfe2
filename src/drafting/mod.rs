//! Draft generation and refinement adapters
//!
//! Wraps the generation service: renders prompts, makes exactly one
//! completion call, then runs the sanitization clamp and the typed
//! validation boundary over the returned JSON.

mod engine;
mod sanitize;

pub use engine::{DraftEngine, parse_engine_output};
pub use sanitize::sanitize_engine_output;
