//! Intake output types: intent classification and shallow entity hints

use serde::{Deserialize, Serialize};
use tracing::debug;

/// What the user is asking the pipeline to do with their text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Draft a fresh Logical Framework (default when no cue matches)
    Create,
    /// Revise an existing draft the user pasted in
    Revise,
    /// Audit/critique an existing framework
    Audit,
    /// Export to a document format
    Export,
    /// Cross-project portfolio check
    PortfolioCheck,
}

impl Intent {
    /// Stable wire name for this intent
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Revise => "revise",
            Self::Audit => "audit",
            Self::Export => "export",
            Self::PortfolioCheck => "portfolio_check",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Heuristically extracted hints from the raw text
///
/// Bounded, deduplicated lists. Empty lists when nothing matched;
/// extraction never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityHints {
    /// Goal-like sentence fragments (at most 5)
    pub goals: Vec<String>,
    /// Measurement vocabulary hits (at most 10)
    pub measure_keywords: Vec<String>,
    /// Organizational vocabulary hits (at most 10)
    pub org_terms: Vec<String>,
}

impl EntityHints {
    /// True when no hint of any kind was found
    pub fn is_empty(&self) -> bool {
        debug!("EntityHints::is_empty: called");
        self.goals.is_empty() && self.measure_keywords.is_empty() && self.org_terms.is_empty()
    }
}

/// Result of intake preprocessing, read-only after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreprocessResult {
    /// Fresh identifier for this raw input (`RAW-{uuid}`)
    pub raw_input_id: String,

    /// Trimmed text with internal whitespace runs collapsed; no case folding
    pub normalized_text: String,

    /// Classified intent (first matching rule wins)
    pub intent: Intent,

    /// Shallow entity hints extracted from the original raw text
    pub entity_hints: EntityHints,
}
