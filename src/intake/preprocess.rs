//! Intake preprocessing: normalization, intent rules, entity hints

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{EntityHints, Intent, PreprocessResult};

/// At most this many goal fragments are captured
const MAX_GOAL_HINTS: usize = 5;

/// At most this many keyword hits per vocabulary
const MAX_VOCAB_HITS: usize = 10;

/// Export cues, checked first (strongest signal)
const EXPORT_CUES: &[&str] = &["export", "ppt", "pdf", "docx", "excel", "matrix"];

/// Audit cues
const AUDIT_CUES: &[&str] = &["audit", "review", "diagnose", "critique", "score"];

/// Portfolio cues
const PORTFOLIO_CUES: &[&str] = &["portfolio", "alignment", "across projects", "dependencies"];

/// Phrases signalling the user pasted an existing artifact to rework
const REVISION_CUES: &[&str] = &[
    "revise this",
    "edit this",
    "update this",
    "rewrite this",
    "refine this",
    "make this better",
    "make it less vague",
    "fix this logframe",
    "here is my logframe",
    "below is my logframe",
    "audit my logframe",
];

/// Measurement vocabulary for entity hints
const MEASURE_VOCAB: &[&str] = &[
    "increase", "decrease", "%", "percent", "reduce", "improve", "kpi", "metric", "measure", "baseline", "target",
];

/// Organizational vocabulary for entity hints
const ORG_VOCAB: &[&str] = &[
    "team",
    "department",
    "division",
    "stakeholder",
    "leadership",
    "client",
    "vendor",
    "partner",
    "lab",
];

static WHITESPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// A logframe label immediately followed by a colon or dash
static STRUCTURE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(goal|purpose|outcome|inputs?)\s*[:\-]").expect("structure label regex"));

/// The word "goal" followed by a 10-120 char fragment up to the next period
static GOAL_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)goal[:\-]?\s*([^.]{10,120})").expect("goal fragment regex"));

/// Preprocess raw user text into a normalized, classified, hinted result
///
/// Never fails: empty or nonsense input yields `Intent::Create` and empty
/// hint lists. Generates a fresh `RAW-{uuid}` identifier per call.
pub fn preprocess(raw_text: &str) -> PreprocessResult {
    debug!(raw_len = raw_text.len(), "preprocess: called");
    let raw_input_id = format!("RAW-{}", Uuid::new_v4());
    let normalized_text = normalize(raw_text);
    let intent = detect_intent(&normalized_text);
    // Entity extraction runs on the original raw text, not the normalized form
    let entity_hints = extract_entities(raw_text);

    debug!(%raw_input_id, %intent, "preprocess: done");
    PreprocessResult {
        raw_input_id,
        normalized_text,
        intent,
        entity_hints,
    }
}

/// Trim surrounding whitespace and collapse internal runs to single spaces
///
/// Case is preserved; matching below folds case internally instead.
fn normalize(text: &str) -> String {
    WHITESPACE_RUNS.replace_all(text.trim(), " ").into_owned()
}

/// Classify intent with an ordered rule table, first match wins
fn detect_intent(normalized: &str) -> Intent {
    debug!(normalized_len = normalized.len(), "detect_intent: called");
    let lower = normalized.to_lowercase();

    // Strong cues first; order is the priority contract
    let cue_rules: &[(&[&str], Intent)] = &[
        (EXPORT_CUES, Intent::Export),
        (AUDIT_CUES, Intent::Audit),
        (PORTFOLIO_CUES, Intent::PortfolioCheck),
    ];
    for (cues, intent) in cue_rules {
        if cues.iter().any(|cue| lower.contains(cue)) {
            debug!(%intent, "detect_intent: cue rule matched");
            return *intent;
        }
    }

    // Revise requires evidence of an existing artifact: a cue phrase or a
    // structural label like "Goal:" in the text
    if REVISION_CUES.iter().any(|cue| lower.contains(cue)) || STRUCTURE_LABEL.is_match(&lower) {
        debug!("detect_intent: revision evidence found");
        return Intent::Revise;
    }

    debug!("detect_intent: no cue matched, defaulting to create");
    Intent::Create
}

/// Extract bounded entity hints from the original raw text
fn extract_entities(raw_text: &str) -> EntityHints {
    debug!(raw_len = raw_text.len(), "extract_entities: called");
    let goals: Vec<String> = GOAL_FRAGMENT
        .captures_iter(raw_text)
        .take(MAX_GOAL_HINTS)
        .map(|cap| cap[1].trim().to_string())
        .collect();

    let lower = raw_text.to_lowercase();
    let measure_keywords = vocab_hits(&lower, MEASURE_VOCAB, MAX_VOCAB_HITS);
    let org_terms = vocab_hits(&lower, ORG_VOCAB, MAX_VOCAB_HITS);

    debug!(
        goal_count = goals.len(),
        measure_count = measure_keywords.len(),
        org_count = org_terms.len(),
        "extract_entities: done"
    );
    EntityHints {
        goals,
        measure_keywords,
        org_terms,
    }
}

/// Collect vocabulary hits in vocabulary order, deduped, capped
fn vocab_hits(text_lower: &str, vocab: &[&str], cap: usize) -> Vec<String> {
    let mut hits: Vec<String> = Vec::new();
    for keyword in vocab {
        if hits.len() == cap {
            break;
        }
        if text_lower.contains(keyword) && !hits.iter().any(|h| h == keyword) {
            hits.push((*keyword).to_string());
        }
    }
    hits
}
