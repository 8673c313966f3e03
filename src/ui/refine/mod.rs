//! Prompt refinement view
//!
//! Two panes: the idea form on the left, refined prompts on the right.
//! Submission drives the linear request path: compose, invoke, store.

pub mod input;
pub mod output;

use crate::app::{AppState, ModelState, RefineOutcome};
use crate::inference::GenerationParams;
use crate::refine::template::ACTIVE_VARIANT;
use dioxus::prelude::*;
use input::PromptForm;
use output::RefinedOutput;

#[component]
pub fn RefineView() -> Element {
    let app_state = use_context::<AppState>();

    let model_ready = matches!(*app_state.model_state.read(), ModelState::Loaded(_));
    let is_refining = (app_state.is_refining)();

    let handle_refine = {
        let app_state = app_state.clone();
        move |(initial_prompt, context): (String, String)| {
            let engine = app_state.engine.clone();
            let mut refined = app_state.refined;
            let mut is_refining = app_state.is_refining;

            is_refining.set(true);
            spawn(async move {
                let blob = ACTIVE_VARIANT.compose(&initial_prompt, &context);
                let params = GenerationParams::default();
                tracing::debug!(
                    "Composed {} chars with the {} template",
                    blob.len(),
                    ACTIVE_VARIANT.name
                );

                // The engine lock is held for the whole call, serializing
                // requests; the UI thread only repaints the indicator.
                let result = tokio::task::spawn_blocking(move || {
                    let engine = engine.blocking_lock();
                    engine.generate(&blob, &params)
                })
                .await;

                let outcome = match result {
                    Ok(Ok(text)) => RefineOutcome::Output(text),
                    Ok(Err(e)) => {
                        tracing::error!("Generation failed: {}", e);
                        RefineOutcome::Failed(e.to_string())
                    }
                    Err(e) => {
                        tracing::error!("Generation task failed: {}", e);
                        RefineOutcome::Failed(format!("generation task failed: {e}"))
                    }
                };

                refined.set(Some(outcome));
                is_refining.set(false);
            });
        }
    };

    rsx! {
        div { class: "refine-columns",
            section { class: "refine-pane",
                h2 { class: "pane-title", "Your Idea" }
                PromptForm {
                    on_refine: handle_refine,
                    is_refining,
                    model_ready,
                }
            }

            section { class: "refine-pane refine-pane-wide",
                h2 { class: "pane-title", "Refined Prompts" }
                RefinedOutput {}
            }
        }
    }
}
