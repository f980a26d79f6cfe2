//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// System instructions for a fresh draft
pub const DRAFT_SYSTEM: &str = include_str!("../../prompts/draft-system.pmt");

/// User content template for a fresh draft
pub const DRAFT_USER: &str = include_str!("../../prompts/draft-user.pmt");

/// System instructions for refinement
pub const REFINE_SYSTEM: &str = include_str!("../../prompts/refine-system.pmt");

/// User content template for refinement
pub const REFINE_USER: &str = include_str!("../../prompts/refine-user.pmt");

/// Get an embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "draft-system" => Some(DRAFT_SYSTEM),
        "draft-user" => Some(DRAFT_USER),
        "refine-system" => Some(REFINE_SYSTEM),
        "refine-user" => Some(REFINE_USER),
        _ => {
            debug!(%name, "get_embedded: no match found");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_embedded_draft() {
        let system = get_embedded("draft-system").unwrap();
        assert!(system.contains("Logical Framework"));
        assert!(system.contains("JSON"));

        let user = get_embedded("draft-user").unwrap();
        assert!(user.contains("{{{normalized_input}}}"));
    }

    #[test]
    fn test_get_embedded_refine() {
        let user = get_embedded("refine-user").unwrap();
        assert!(user.contains("{{{draft_json}}}"));
        assert!(user.contains("{{{questions_json}}}"));
        assert!(user.contains("{{{answers_json}}}"));
    }

    #[test]
    fn test_get_embedded_unknown() {
        assert!(get_embedded("unknown-template").is_none());
    }
}
