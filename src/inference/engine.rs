//! llama.cpp inference engine
//!
//! Owns the loaded model handle and runs blocking, non-streaming generation.
//! The llama.cpp backend is process-global and can only be initialized once;
//! everything else lives on the engine instance.

use crate::inference::model::{validate_gguf, ModelError};
use crate::types::config;
use crate::types::model::ModelInfo;
use llama_cpp_2::context::params::LlamaContextParams;
use llama_cpp_2::llama_backend::LlamaBackend;
use llama_cpp_2::llama_batch::LlamaBatch;
use llama_cpp_2::model::params::LlamaModelParams;
use llama_cpp_2::model::{AddBos, LlamaModel, Special};
use llama_cpp_2::sampling::LlamaSampler;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::path::Path;
use thiserror::Error;

/// Global llama.cpp backend (can only be initialized once per process)
static LLAMA_BACKEND: OnceCell<Result<LlamaBackend, String>> = OnceCell::new();

/// Get or initialize the global llama.cpp backend
fn backend() -> Result<&'static LlamaBackend, EngineError> {
    let result = LLAMA_BACKEND.get_or_init(|| {
        let mut backend = LlamaBackend::init().map_err(|e| e.to_string())?;
        // llama.cpp logs straight to stderr otherwise
        backend.void_logs();
        Ok(backend)
    });
    match result {
        Ok(backend) => Ok(backend),
        Err(e) => Err(EngineError::Backend(e.clone())),
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to initialize llama backend: {0}")]
    Backend(String),
    #[error("no model is loaded")]
    ModelNotLoaded,
    #[error(transparent)]
    InvalidModel(#[from] ModelError),
    #[error("failed to load model: {0}")]
    ModelLoad(String),
    #[error("failed to create inference context: {0}")]
    Context(String),
    #[error("failed to tokenize prompt: {0}")]
    Tokenize(String),
    #[error("prompt of {prompt_tokens} tokens plus {budget} generated tokens exceeds the context window of {context}")]
    PromptTooLong {
        prompt_tokens: usize,
        budget: u32,
        context: u32,
    },
    #[error("decode failed: {0}")]
    Decode(String),
}

/// Generation parameters for a single request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Maximum number of new tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature; 0 falls back to greedy decoding
    pub temperature: f32,
    /// Context window size in tokens
    pub context_size: u32,
    /// RNG seed for sampling
    pub seed: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: config::MAX_NEW_TOKENS,
            temperature: config::TEMPERATURE,
            context_size: config::CONTEXT_SIZE,
            seed: 1234,
        }
    }
}

/// Inference engine holding the loaded model for the lifetime of the process
pub struct RefinerEngine {
    model: Option<LlamaModel>,
    info: Option<ModelInfo>,
}

impl RefinerEngine {
    pub fn new() -> Self {
        Self {
            model: None,
            info: None,
        }
    }

    /// Whether a model has been loaded into this engine
    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Metadata of the loaded model, if any
    pub fn loaded_info(&self) -> Option<&ModelInfo> {
        self.info.as_ref()
    }

    /// Load a GGUF model from disk.
    ///
    /// Expensive (decodes the full weight file); call at most once per
    /// process. A second call replaces the previously loaded model.
    pub fn load(&mut self, path: &Path) -> Result<ModelInfo, EngineError> {
        let metadata = validate_gguf(path)?;
        tracing::info!(
            "Loading GGUF v{} ({}): {:?}",
            metadata.version,
            crate::storage::huggingface::format_size(metadata.file_size),
            path
        );

        let backend = backend()?;
        let model_params = LlamaModelParams::default().with_n_gpu_layers(config::GPU_LAYERS);
        let model = LlamaModel::load_from_file(backend, path, &model_params)
            .map_err(|e| EngineError::ModelLoad(e.to_string()))?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let info = ModelInfo {
            name,
            path: path.display().to_string(),
            size_bytes: metadata.file_size,
            arch: config::MODEL_ARCH.to_string(),
        };

        tracing::info!("Model loaded: {}", info.name);
        self.model = Some(model);
        self.info = Some(info.clone());
        Ok(info)
    }

    /// Generate a continuation for the composed prompt.
    ///
    /// Blocking for the duration of generation; run on a worker thread.
    /// Stops at the model's end-of-generation token or at the token budget.
    pub fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, EngineError> {
        let model = self.model.as_ref().ok_or(EngineError::ModelNotLoaded)?;
        let backend = backend()?;

        let n_ctx = NonZeroU32::new(params.context_size)
            .ok_or_else(|| EngineError::Context("context size must be non-zero".to_string()))?;
        let ctx_params = LlamaContextParams::default().with_n_ctx(Some(n_ctx));
        let mut ctx = model
            .new_context(backend, ctx_params)
            .map_err(|e| EngineError::Context(e.to_string()))?;

        let tokens = model
            .str_to_token(prompt, AddBos::Always)
            .map_err(|e| EngineError::Tokenize(e.to_string()))?;

        // The KV cache must hold the prompt and every generated token.
        if tokens.len() + params.max_tokens as usize > params.context_size as usize {
            return Err(EngineError::PromptTooLong {
                prompt_tokens: tokens.len(),
                budget: params.max_tokens,
                context: params.context_size,
            });
        }

        let mut batch = LlamaBatch::new(params.context_size as usize, 1);
        let last_index = tokens.len() as i32 - 1;
        for (i, token) in (0_i32..).zip(tokens.iter()) {
            // Logits are only needed for the last prompt token.
            let is_last = i == last_index;
            batch
                .add(*token, i, &[0], is_last)
                .map_err(|e| EngineError::Decode(e.to_string()))?;
        }
        ctx.decode(&mut batch)
            .map_err(|e| EngineError::Decode(e.to_string()))?;

        let mut sampler = if params.temperature > 0.0 {
            LlamaSampler::chain_simple([
                LlamaSampler::temp(params.temperature),
                LlamaSampler::dist(params.seed),
            ])
        } else {
            LlamaSampler::greedy()
        };

        let mut output_bytes: Vec<u8> = Vec::new();
        let mut n_cur = tokens.len() as i32;

        for _ in 0..params.max_tokens {
            let new_token = sampler.sample(&ctx, -1);

            if model.is_eog_token(new_token) {
                break;
            }

            let piece = model
                .token_to_bytes(new_token, Special::Plaintext)
                .map_err(|e| EngineError::Decode(e.to_string()))?;
            output_bytes.extend_from_slice(&piece);

            batch.clear();
            batch
                .add(new_token, n_cur, &[0], true)
                .map_err(|e| EngineError::Decode(e.to_string()))?;
            ctx.decode(&mut batch)
                .map_err(|e| EngineError::Decode(e.to_string()))?;
            n_cur += 1;
        }

        // Token pieces can split multi-byte characters; decode once at the end.
        Ok(String::from_utf8_lossy(&output_bytes).into_owned())
    }
}

impl Default for RefinerEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_match_config() {
        let params = GenerationParams::default();
        assert_eq!(params.max_tokens, config::MAX_NEW_TOKENS);
        assert_eq!(params.temperature, config::TEMPERATURE);
        assert_eq!(params.context_size, config::CONTEXT_SIZE);
    }

    #[test]
    fn test_generate_without_model() {
        let engine = RefinerEngine::new();
        assert!(!engine.is_loaded());
        let result = engine.generate("hello", &GenerationParams::default());
        assert!(matches!(result, Err(EngineError::ModelNotLoaded)));
    }

    #[test]
    fn test_load_rejects_non_gguf() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"definitely not a model").expect("write");

        let mut engine = RefinerEngine::new();
        let result = engine.load(file.path());
        assert!(matches!(result, Err(EngineError::InvalidModel(_))));
        assert!(!engine.is_loaded());
    }
}
