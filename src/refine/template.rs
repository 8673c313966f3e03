//! Master prompt template
//!
//! A template variant bundles everything one model family needs: the
//! instruction text, the role-delimiter tokens marking the user and
//! assistant turns, and how many refined prompts to request. Supporting a
//! new model family means adding a variant, not another application.

use crate::refine::SECTION_SEPARATOR;

/// One model family's template convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateVariant {
    /// Short identifier used in logs
    pub name: &'static str,
    /// Opens the user turn
    pub user_prefix: &'static str,
    /// Closes the user turn
    pub user_suffix: &'static str,
    /// Opens the assistant turn the model is expected to continue
    pub assistant_prefix: &'static str,
    /// Number of refined prompts requested from the model
    pub section_count: usize,
}

/// ChatML convention used by TinyLlama chat models.
pub const CHATML: TemplateVariant = TemplateVariant {
    name: "chatml",
    user_prefix: "<|im_start|>user\n",
    user_suffix: "<|im_end|>\n",
    assistant_prefix: "<|im_start|>assistant\n",
    section_count: 3,
};

/// Zephyr convention used by StableLM/Zephyr chat models.
pub const ZEPHYR: TemplateVariant = TemplateVariant {
    name: "zephyr",
    user_prefix: "<|user|>\n",
    user_suffix: "</s>\n",
    assistant_prefix: "<|assistant|>\n",
    section_count: 2,
};

/// Variant matching the model in `types::config`.
pub const ACTIVE_VARIANT: &TemplateVariant = &CHATML;

fn count_word(n: usize) -> String {
    match n {
        2 => "two".to_string(),
        3 => "three".to_string(),
        n => n.to_string(),
    }
}

fn ordinal_word(n: usize) -> String {
    match n {
        1 => "first".to_string(),
        2 => "second".to_string(),
        3 => "third".to_string(),
        n => format!("{n}th"),
    }
}

impl TemplateVariant {
    /// The fixed instruction text: persona, the six prompting techniques,
    /// and the required output scaffold for this variant's section count.
    fn instructions(&self) -> String {
        let mut scaffold = String::new();
        for i in 1..=self.section_count {
            if i > 1 {
                scaffold.push_str(SECTION_SEPARATOR);
                scaffold.push('\n');
            }
            scaffold.push_str(&format!(
                "### Refined Prompt {i}\n\
                 **Techniques Used:** [List the techniques you applied]\n\
                 ```\n\
                 (Your {} refined prompt goes here)\n\
                 ```\n",
                ordinal_word(i)
            ));
        }

        format!(
            "You are 'PromptPerfect', an expert AI prompt engineer. Your task is to take a user's \
             simple prompt and rewrite it into {} distinct, high-quality, and detailed versions \
             to get the best possible response from a powerful AI model.\n\
             \n\
             For each refined prompt, apply a combination of these techniques:\n\
             - **Persona:** Assign a role to the AI (e.g., \"Act as a world-class chef...\").\n\
             - **Format:** Specify the desired output format (e.g., \"Provide the output in a JSON object...\").\n\
             - **Context:** Incorporate the user's provided context.\n\
             - **Examples (Few-shot):** Provide a clear example of the desired output.\n\
             - **Constraints:** Set rules or negative constraints (e.g., \"Do not use technical jargon.\").\n\
             - **Chain of Thought:** Instruct the AI to \"think step-by-step\".\n\
             \n\
             Structure your response as follows, using \"{SECTION_SEPARATOR}\" as a separator:\n\
             \n\
             {scaffold}",
            count_word(self.section_count),
        )
    }

    /// Compose the full model prompt for one request.
    ///
    /// User input is interpolated verbatim: no escaping, no truncation.
    /// The whole blob is wrapped as a single user turn followed by an open
    /// assistant turn.
    pub fn compose(&self, initial_prompt: &str, context: &str) -> String {
        let user_content =
            format!("Initial Prompt: \"{initial_prompt}\"\n\nOptional Context: \"{context}\"");

        format!(
            "{}{}\n\nHere is the user's request:\n{}{}{}",
            self.user_prefix,
            self.instructions(),
            user_content,
            self.user_suffix,
            self.assistant_prefix,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_contains_user_input_verbatim() {
        let blob = CHATML.compose("explain black holes", "for a 10-year-old");
        assert!(blob.contains("Initial Prompt: \"explain black holes\""));
        assert!(blob.contains("Optional Context: \"for a 10-year-old\""));
    }

    #[test]
    fn test_compose_does_not_escape_quotes() {
        let blob = CHATML.compose("say \"hello\"", "tone: \"warm\"");
        assert!(blob.contains("Initial Prompt: \"say \"hello\"\""));
        assert!(blob.contains("Optional Context: \"tone: \"warm\"\""));
    }

    #[test]
    fn test_compose_empty_context() {
        let blob = CHATML.compose("explain black holes", "");
        assert!(blob.contains("Optional Context: \"\""));
    }

    #[test]
    fn test_chatml_delimiters_wrap_blob() {
        let blob = CHATML.compose("p", "c");
        assert!(blob.starts_with("<|im_start|>user\n"));
        assert!(blob.ends_with("<|im_end|>\n<|im_start|>assistant\n"));
    }

    #[test]
    fn test_zephyr_delimiters_wrap_blob() {
        let blob = ZEPHYR.compose("p", "c");
        assert!(blob.starts_with("<|user|>\n"));
        assert!(blob.ends_with("</s>\n<|assistant|>\n"));
    }

    #[test]
    fn test_section_scaffold_counts() {
        let chatml = CHATML.compose("p", "c");
        assert!(chatml.contains("### Refined Prompt 3"));
        assert!(!chatml.contains("### Refined Prompt 4"));
        assert_eq!(chatml.matches("**Techniques Used:**").count(), 3);

        let zephyr = ZEPHYR.compose("p", "c");
        assert!(zephyr.contains("### Refined Prompt 2"));
        assert!(!zephyr.contains("### Refined Prompt 3"));
        assert_eq!(zephyr.matches("**Techniques Used:**").count(), 2);
    }

    #[test]
    fn test_instructions_name_all_six_techniques() {
        let blob = CHATML.compose("p", "c");
        for technique in [
            "**Persona:**",
            "**Format:**",
            "**Context:**",
            "**Examples (Few-shot):**",
            "**Constraints:**",
            "**Chain of Thought:**",
        ] {
            assert!(blob.contains(technique), "missing {technique}");
        }
    }
}
