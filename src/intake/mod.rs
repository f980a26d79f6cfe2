//! Intent & Entity Extractor
//!
//! Normalizes raw text, classifies intent through an ordered rule table,
//! and extracts shallow entity hints. Total on any input: no validation
//! errors, no I/O beyond a fresh identifier.

mod preprocess;

pub use preprocess::preprocess;
