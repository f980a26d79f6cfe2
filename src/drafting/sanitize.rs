//! Sanitization of raw generation output
//!
//! Runs on untyped JSON strictly before schema validation; must tolerate an
//! over-producing or malformed upstream. The only corrections made here are
//! list-length clamps and dropping mapping keys orphaned by those clamps.
//! Everything else (wrong types, missing fields) is left for the typed
//! boundary to reject.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use crate::domain::{MAX_LIST_ITEMS, MAX_OPEN_QUESTIONS};

/// Truncate a JSON array in place; non-arrays pass through unchanged so
/// downstream validation can reject them
fn clamp_list(value: &mut Value, max_items: usize) {
    if let Some(items) = value.as_array_mut()
        && items.len() > max_items
    {
        debug!(len = items.len(), max_items, "clamp_list: truncating");
        items.truncate(max_items);
    }
}

/// Collect the string items of a JSON array field
fn string_items(value: Option<&Value>) -> HashSet<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Drop keys of `mapping[field]` that are not in the kept set
fn retain_known_keys(mapping: &mut serde_json::Map<String, Value>, field: &str, kept: &HashSet<String>) {
    if let Some(support) = mapping.get_mut(field).and_then(Value::as_object_mut) {
        let before = support.len();
        support.retain(|key, _| kept.contains(key));
        if support.len() < before {
            debug!(field, dropped = before - support.len(), "retain_known_keys: dropped stale keys");
        }
    }
}

/// Sanitize a raw engine payload in place
///
/// Clamps `draft_lfo.outcomes`, `draft_lfo.inputs` and `open_questions` to
/// their maximum lengths, then filters `mapping.outcomes_support` and
/// `mapping.inputs_support` down to keys still present after clamping.
/// Stale keys are silently dropped, never an error.
pub fn sanitize_engine_output(data: &mut Value) {
    debug!("sanitize_engine_output: called");
    let Some(obj) = data.as_object_mut() else {
        debug!("sanitize_engine_output: payload is not an object, leaving untouched");
        return;
    };

    let (kept_outcomes, kept_inputs) = match obj.get_mut("draft_lfo").and_then(Value::as_object_mut) {
        Some(draft) => {
            if let Some(outcomes) = draft.get_mut("outcomes") {
                clamp_list(outcomes, MAX_LIST_ITEMS);
            }
            if let Some(inputs) = draft.get_mut("inputs") {
                clamp_list(inputs, MAX_LIST_ITEMS);
            }
            (string_items(draft.get("outcomes")), string_items(draft.get("inputs")))
        }
        None => (HashSet::new(), HashSet::new()),
    };

    if let Some(questions) = obj.get_mut("open_questions") {
        clamp_list(questions, MAX_OPEN_QUESTIONS);
    }

    if let Some(mapping) = obj.get_mut("mapping").and_then(Value::as_object_mut) {
        retain_known_keys(mapping, "outcomes_support", &kept_outcomes);
        retain_known_keys(mapping, "inputs_support", &kept_inputs);
    }
}
