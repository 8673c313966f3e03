//! UI components for PromptSmith
//!
//! This module contains all user interface components built with Dioxus.

pub mod components;
pub mod refine;

use crate::app::{AppState, ModelState};
use dioxus::prelude::*;
use refine::RefineView;

#[component]
pub fn Layout() -> Element {
    rsx! {
        div { class: "app-shell",
            header { class: "app-header",
                h1 { class: "app-title", "PromptSmith" }
                p { class: "app-caption",
                    "Transform your simple ideas into powerful, high-quality prompts for any AI."
                }
            }

            ModelStatus {}
            RefineView {}

            p { class: "app-footer",
                "Runs a lightweight open-source model locally. The first launch downloads the weights and can take a while."
            }
        }
    }
}

/// Status banner reflecting the model lifecycle
#[component]
fn ModelStatus() -> Element {
    let app_state = use_context::<AppState>();
    let state = app_state.model_state.read().clone();

    let (class, text) = match state {
        ModelState::NotLoaded => (
            "status-banner",
            "Preparing the prompt engineer...".to_string(),
        ),
        ModelState::Downloading(pct) => (
            "status-banner",
            format!("Downloading model weights... {pct}%"),
        ),
        ModelState::Loading => (
            "status-banner",
            "Loading the prompt engineer (TinyLlama)...".to_string(),
        ),
        ModelState::Loaded(name) => ("status-banner status-ready", format!("Model ready: {name}")),
        ModelState::Error(msg) => (
            "status-banner status-error",
            format!("Model unavailable: {msg}"),
        ),
    };

    rsx! {
        div { class: "{class}", "{text}" }
    }
}
