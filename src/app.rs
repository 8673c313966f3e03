//! Root Dioxus application component
//!
//! Owns the engine and the per-session signals, and drives the one-time
//! model download + load at startup.

use crate::inference::RefinerEngine;
use crate::storage::huggingface::fetch_model;
use crate::types::config;
use crate::ui::Layout;
use dioxus::prelude::*;
use std::sync::Arc;
use tokio::sync::Mutex;

static CSS: Asset = asset!("/assets/main.css");

/// Represents the current state of the model
#[derive(Clone, PartialEq, Debug)]
pub enum ModelState {
    NotLoaded,
    /// Artifact download in progress, with percent complete
    Downloading(u8),
    Loading,
    Loaded(String),
    Error(String),
}

/// Result of one refinement request, as stored for rendering
#[derive(Clone, PartialEq, Debug)]
pub enum RefineOutcome {
    /// Raw model output; split into sections at render time
    Output(String),
    /// Engine failure, rendered distinctly from model output
    Failed(String),
}

/// Global application state shared across components
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Mutex<RefinerEngine>>,
    pub model_state: Signal<ModelState>,
    /// Most recent outcome; overwritten on every submission, read per render
    pub refined: Signal<Option<RefineOutcome>>,
    pub is_refining: Signal<bool>,
}

impl AppState {
    pub fn new() -> Self {
        tracing::info!("AppState initialized");
        Self {
            engine: Arc::new(Mutex::new(RefinerEngine::new())),
            model_state: Signal::new(ModelState::NotLoaded),
            refined: Signal::new(None),
            is_refining: Signal::new(false),
        }
    }
}

/// Fetch the fixed artifact and load it into the engine, reporting progress
/// through the model-state signal.
async fn initialize_model(app_state: AppState) {
    let mut model_state = app_state.model_state;

    model_state.set(ModelState::Downloading(0));
    let mut last_pct = 0u8;
    let progress = move |downloaded: u64, total: u64| {
        let pct = ((downloaded as f64 / total as f64) * 100.0) as u8;
        if pct != last_pct {
            last_pct = pct;
            model_state.set(ModelState::Downloading(pct));
        }
    };

    let path = match fetch_model(config::MODEL_REPO, config::MODEL_FILE, progress).await {
        Ok(path) => path,
        Err(e) => {
            tracing::error!("Model download failed: {}", e);
            model_state.set(ModelState::Error(e));
            return;
        }
    };

    model_state.set(ModelState::Loading);
    let engine = app_state.engine.clone();
    let load_result = tokio::task::spawn_blocking(move || {
        let mut engine = engine.blocking_lock();
        // Explicit one-shot guard: loading decodes hundreds of megabytes.
        match engine.loaded_info() {
            Some(info) => Ok(info.clone()),
            None => engine.load(&path),
        }
    })
    .await;

    match load_result {
        Ok(Ok(info)) => model_state.set(ModelState::Loaded(info.name)),
        Ok(Err(e)) => {
            tracing::error!("Model load failed: {}", e);
            model_state.set(ModelState::Error(e.to_string()));
        }
        Err(e) => {
            tracing::error!("Model load task failed: {}", e);
            model_state.set(ModelState::Error(format!("load task failed: {e}")));
        }
    }
}

#[component]
pub fn App() -> Element {
    let app_state = AppState::new();
    use_context_provider(|| app_state);

    {
        let app_state = use_context::<AppState>();
        use_effect(move || {
            let app_state = app_state.clone();
            spawn(async move {
                initialize_model(app_state).await;
            });
        });
    }

    rsx! {
        document::Stylesheet { href: CSS }
        Layout {}
    }
}
