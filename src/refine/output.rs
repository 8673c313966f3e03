//! Output splitting
//!
//! The model is asked to separate refined prompts with a literal `---`.
//! Display works off that contract: split, trim, drop empty segments.

use crate::refine::SECTION_SEPARATOR;

/// Split raw model output into displayable sections.
///
/// Pure function; recomputed on every render pass.
pub fn split_sections(raw: &str) -> Vec<String> {
    raw.split(SECTION_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_drops_whitespace_segments() {
        let segments = split_sections("A\n---\nB\n---\n   \n");
        assert_eq!(segments, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_split_preserves_order() {
        let segments = split_sections("first\n---\nsecond\n---\nthird");
        assert_eq!(segments, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_text_without_separator_is_one_segment() {
        // Failure messages contain no separator and must stay intact.
        let message = "generation failed: failed to create inference context";
        let segments = split_sections(message);
        assert_eq!(segments, vec![message.to_string()]);
    }

    #[test]
    fn test_split_is_idempotent_per_render() {
        let raw = "### Refined Prompt 1\nbody\n---\n### Refined Prompt 2\nbody";
        assert_eq!(split_sections(raw), split_sections(raw));
    }

    #[test]
    fn test_empty_output_yields_no_segments() {
        assert!(split_sections("").is_empty());
        assert!(split_sections("   \n  ").is_empty());
    }
}
