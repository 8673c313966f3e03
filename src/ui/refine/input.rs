//! Idea form: prompt and context inputs plus the submit control

use dioxus::prelude::*;

/// Whether a prompt may be submitted. An empty prompt never reaches the
/// model; it surfaces a warning instead.
fn can_submit(initial_prompt: &str) -> bool {
    !initial_prompt.is_empty()
}

#[component]
pub fn PromptForm(
    on_refine: EventHandler<(String, String)>,
    is_refining: bool,
    model_ready: bool,
) -> Element {
    let mut initial_prompt = use_signal(String::new);
    let mut context = use_signal(String::new);
    let mut show_warning = use_signal(|| false);

    let handle_click = move |_| {
        if !can_submit(&initial_prompt()) {
            show_warning.set(true);
            return;
        }
        show_warning.set(false);
        on_refine.call((initial_prompt(), context()));
    };

    let disabled = is_refining || !model_ready;
    let button_label = if is_refining {
        "Refining..."
    } else {
        "Refine My Prompt"
    };

    rsx! {
        div { class: "prompt-form",
            label { class: "field-label", "Enter your basic prompt:" }
            textarea {
                class: "field-input prompt-input",
                placeholder: "e.g., explain black holes",
                rows: "3",
                value: "{initial_prompt}",
                oninput: move |evt| initial_prompt.set(evt.value()),
            }

            label { class: "field-label", "Optional: Add some context:" }
            textarea {
                class: "field-input context-input",
                placeholder: "e.g., explain it to a 10-year-old child",
                rows: "7",
                value: "{context}",
                oninput: move |evt| context.set(evt.value()),
            }

            if show_warning() {
                p { class: "warning-note", "Please enter a prompt to refine." }
            }

            button {
                class: "refine-button",
                disabled,
                onclick: handle_click,
                "{button_label}"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_prompt_is_rejected() {
        assert!(!can_submit(""));
    }

    #[test]
    fn test_nonempty_prompt_is_accepted() {
        assert!(can_submit("explain black holes"));
    }
}
