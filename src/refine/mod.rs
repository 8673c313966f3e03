//! Prompt refinement
//!
//! The repository-authored core: composing the instruction template with the
//! user's input into a single model prompt, and splitting the model's answer
//! into displayable sections.

pub mod output;
pub mod template;

pub use output::split_sections;
pub use template::{TemplateVariant, ACTIVE_VARIANT, CHATML, ZEPHYR};

/// Literal separator between refined-prompt sections, both requested from
/// the model and used to split its output.
pub const SECTION_SEPARATOR: &str = "---";

#[cfg(test)]
mod tests {
    use super::*;

    // Full request path with a stubbed model: compose, pretend the model
    // answered, split for display.
    #[test]
    fn test_compose_then_split_roundtrip() {
        let blob = ACTIVE_VARIANT.compose("explain black holes", "");
        assert!(blob.contains("Initial Prompt: \"explain black holes\""));
        assert!(blob.contains("Optional Context: \"\""));

        let stub_output = "### Refined Prompt 1\nbody1\n---\n### Refined Prompt 2\nbody2";
        let segments = split_sections(stub_output);
        assert_eq!(segments.len(), 2);
        assert!(segments[0].starts_with("### Refined Prompt 1"));
        assert!(segments[1].starts_with("### Refined Prompt 2"));
    }
}
