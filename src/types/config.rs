//! Model configuration constants
//!
//! Everything about the served model is fixed at compile time: which
//! artifact to fetch, how large a context to allocate, and how to sample.

/// HuggingFace repository the weight artifact is fetched from.
pub const MODEL_REPO: &str = "TheBloke/TinyLlama-1.1B-Chat-v1.0-GGUF";

/// Quantized weight file inside the repository.
pub const MODEL_FILE: &str = "tinyllama-1.1b-chat-v1.0.Q4_K_M.gguf";

/// Architecture tag of the served model.
pub const MODEL_ARCH: &str = "llama";

/// Context window size in tokens. TinyLlama ships with 2048.
pub const CONTEXT_SIZE: u32 = 2048;

/// Number of layers offloaded to the GPU. 0 keeps inference on the CPU.
pub const GPU_LAYERS: u32 = 0;

/// Upper bound on generated tokens per request.
pub const MAX_NEW_TOKENS: u32 = 1500;

/// Sampling temperature for generation.
pub const TEMPERATURE: f32 = 0.8;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_fits_context() {
        // The context has to hold at least the generation budget.
        assert!(MAX_NEW_TOKENS < CONTEXT_SIZE);
    }

    #[test]
    fn test_artifact_is_gguf() {
        assert!(MODEL_FILE.ends_with(".gguf"));
        assert!(MODEL_REPO.contains('/'));
    }
}
