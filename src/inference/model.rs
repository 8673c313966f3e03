//! GGUF container validation
//!
//! A truncated or mis-served download would otherwise only fail deep inside
//! the llama.cpp loader. Checking the container header first turns that into
//! a diagnosable error before the backend ever sees the file.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Magic bytes at the start of every GGUF file.
pub const GGUF_MAGIC: [u8; 4] = *b"GGUF";

/// GGUF container versions the llama.cpp backend accepts.
const SUPPORTED_VERSIONS: std::ops::RangeInclusive<u32> = 2..=3;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("io error reading model file: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a GGUF file (bad magic)")]
    BadMagic,
    #[error("unsupported GGUF version {0}")]
    UnsupportedVersion(u32),
}

/// Header fields read during validation.
#[derive(Debug, Clone)]
pub struct GgufMetadata {
    /// GGUF container version
    pub version: u32,
    /// Total file size in bytes
    pub file_size: u64,
}

/// Validate the GGUF magic and container version of a model file.
pub fn validate_gguf(path: &Path) -> Result<GgufMetadata, ModelError> {
    let mut file = File::open(path)?;
    let file_size = file.metadata()?.len();

    let mut header = [0u8; 8];
    file.read_exact(&mut header)?;

    if header[..4] != GGUF_MAGIC {
        return Err(ModelError::BadMagic);
    }

    // Version is a little-endian u32 right after the magic.
    let version = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
    if !SUPPORTED_VERSIONS.contains(&version) {
        return Err(ModelError::UnsupportedVersion(version));
    }

    Ok(GgufMetadata { version, file_size })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_header(magic: &[u8], version: u32) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(magic).expect("write magic");
        file.write_all(&version.to_le_bytes()).expect("write version");
        // A little padding so the file is not just the header.
        file.write_all(&[0u8; 16]).expect("write padding");
        file
    }

    #[test]
    fn test_valid_header() {
        let file = write_header(b"GGUF", 3);
        let meta = validate_gguf(file.path()).expect("should validate");
        assert_eq!(meta.version, 3);
        assert_eq!(meta.file_size, 24);
    }

    #[test]
    fn test_bad_magic() {
        let file = write_header(b"GGML", 3);
        assert!(matches!(
            validate_gguf(file.path()),
            Err(ModelError::BadMagic)
        ));
    }

    #[test]
    fn test_unsupported_version() {
        let file = write_header(b"GGUF", 99);
        assert!(matches!(
            validate_gguf(file.path()),
            Err(ModelError::UnsupportedVersion(99))
        ));
    }

    #[test]
    fn test_truncated_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"GG").expect("write");
        assert!(matches!(validate_gguf(file.path()), Err(ModelError::Io(_))));
    }
}
