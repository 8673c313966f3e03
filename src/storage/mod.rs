//! Local storage
//!
//! Resolves the platform data directory where downloaded model artifacts are
//! cached. Nothing else is persisted across runs.

pub mod huggingface;

use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not determine a data directory for this platform")]
    NoDataDir,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Platform data directory for the application, created on first use.
pub fn get_data_dir() -> Result<PathBuf, StorageError> {
    let dirs =
        ProjectDirs::from("com", "promptsmith", "PromptSmith").ok_or(StorageError::NoDataDir)?;
    let dir = dirs.data_dir().to_path_buf();
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Directory where GGUF artifacts are cached, created on first use.
pub fn get_models_dir() -> Result<PathBuf, StorageError> {
    let dir = get_data_dir()?.join("models");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
