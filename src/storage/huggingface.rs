//! HuggingFace model downloader
//!
//! Fetches the fixed GGUF weight artifact from HuggingFace Hub on first run
//! and caches it under the models directory. Subsequent runs reuse the
//! cached file.

use crate::storage::get_models_dir;
use std::fs;
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Build the resolve URL for a file in a HuggingFace repository.
pub fn resolve_url(repo_id: &str, filename: &str) -> String {
    format!("https://huggingface.co/{repo_id}/resolve/main/{filename}")
}

/// Fetch a model artifact, reusing the cached copy when present.
///
/// The file is streamed to a `.tmp` sibling first and renamed into place
/// once the byte count matches `Content-Length`, so an interrupted download
/// never masquerades as a complete artifact.
pub async fn fetch_model(
    repo_id: &str,
    filename: &str,
    mut progress_callback: impl FnMut(u64, u64),
) -> Result<PathBuf, String> {
    let models_dir = get_models_dir().map_err(|e| format!("Failed to get models dir: {e}"))?;

    let output_path = models_dir.join(filename);
    let temp_path = models_dir.join(format!("{filename}.tmp"));

    if output_path.exists() {
        let metadata = fs::metadata(&output_path)
            .map_err(|e| format!("Failed to check existing file: {e}"))?;
        if metadata.len() > 0 {
            tracing::info!("Model already cached: {:?}", output_path);
            return Ok(output_path);
        }
    }

    let download_url = resolve_url(repo_id, filename);
    tracing::info!("Downloading from: {}", download_url);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(3600)) // 1 hour timeout for large models
        .build()
        .map_err(|e| format!("Failed to create HTTP client: {e}"))?;

    let response = client
        .get(&download_url)
        .header("User-Agent", "PromptSmith/0.1.0")
        .send()
        .await
        .map_err(|e| format!("Download failed: {e}"))?;

    if !response.status().is_success() {
        return Err(format!("Download failed with status: {}", response.status()));
    }

    let total_size = response
        .content_length()
        .ok_or("Could not determine file size")?;
    tracing::info!("File size: {}", format_size(total_size));

    let mut temp_file = File::create(&temp_path)
        .await
        .map_err(|e| format!("Failed to create temp file: {e}"))?;

    let mut response = response;
    let mut downloaded: u64 = 0;
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| format!("Download error: {e}"))?
    {
        temp_file
            .write_all(&chunk)
            .await
            .map_err(|e| format!("Write error: {e}"))?;
        downloaded += chunk.len() as u64;
        progress_callback(downloaded, total_size);
    }
    temp_file
        .flush()
        .await
        .map_err(|e| format!("Write error: {e}"))?;

    if downloaded != total_size {
        return Err(format!(
            "Download incomplete: got {downloaded} bytes, expected {total_size}"
        ));
    }

    // Rename temp file to final location (atomic operation)
    fs::rename(&temp_path, &output_path)
        .map_err(|e| format!("Failed to move downloaded file: {e}"))?;

    tracing::info!("Download complete: {:?}", output_path);
    Ok(output_path)
}

/// Get a human-readable size string
pub fn format_size(bytes: u64) -> String {
    let bytes = bytes as f64;
    if bytes < 1024.0 {
        format!("{} B", bytes as u64)
    } else if bytes < 1024.0 * 1024.0 {
        format!("{:.2} KB", bytes / 1024.0)
    } else if bytes < 1024.0 * 1024.0 * 1024.0 {
        format!("{:.2} MB", bytes / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes / (1024.0 * 1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let url = resolve_url(
            "TheBloke/TinyLlama-1.1B-Chat-v1.0-GGUF",
            "tinyllama-1.1b-chat-v1.0.Q4_K_M.gguf",
        );
        assert_eq!(
            url,
            "https://huggingface.co/TheBloke/TinyLlama-1.1B-Chat-v1.0-GGUF/resolve/main/tinyllama-1.1b-chat-v1.0.Q4_K_M.gguf"
        );
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(668_788_096), "637.81 MB");
    }
}
