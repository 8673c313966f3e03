//! Refined prompt display
//!
//! Renders the stored outcome on every pass: a success is split into
//! sections and shown as markdown cards, a failure as an error card.

use crate::app::{AppState, RefineOutcome};
use crate::refine::split_sections;
use crate::ui::components::MarkdownContent;
use dioxus::prelude::*;

#[component]
pub fn RefinedOutput() -> Element {
    let app_state = use_context::<AppState>();
    let is_refining = (app_state.is_refining)();
    let outcome = app_state.refined.read().clone();

    rsx! {
        div { class: "output-area",
            if is_refining {
                ThinkingIndicator {}
            }

            match outcome {
                Some(RefineOutcome::Output(raw)) => rsx! {
                    for (idx, segment) in split_sections(&raw).into_iter().enumerate() {
                        div { key: "{idx}", class: "segment-card",
                            MarkdownContent { content: segment }
                        }
                    }
                },
                Some(RefineOutcome::Failed(message)) => rsx! {
                    div { class: "error-card",
                        span { class: "error-card-label", "Generation failed" }
                        p { class: "error-card-message", "{message}" }
                    }
                },
                None => rsx! {
                    if !is_refining {
                        p { class: "output-placeholder", "Refined prompts will appear here." }
                    }
                },
            }
        }
    }
}

/// Static indicator shown for the duration of the blocking generation call
#[component]
fn ThinkingIndicator() -> Element {
    rsx! {
        div { class: "thinking",
            div { class: "thinking-dot" }
            div { class: "thinking-dot delay-1" }
            div { class: "thinking-dot delay-2" }
            span { class: "thinking-text", "The AI Prompt Engineer is thinking..." }
        }
    }
}
