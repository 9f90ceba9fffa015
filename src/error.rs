use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encode/decode error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("PNG optimization error: {0}")]
    PngOptimization(String),

    #[error("Invalid quality value: {0}. Must be between 1 and 100")]
    InvalidQuality(u8),

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error(
        "Cannot reach {target_kb} KB: smallest encoding at quality floor {floor} is {smallest_bytes} bytes"
    )]
    TargetUnreachable {
        target_kb: u32,
        floor: u8,
        smallest_bytes: usize,
    },

    #[error("Invalid image dimensions: {0}x{1}. Maximum allowed: {2}x{2}")]
    InvalidDimensions(u32, u32, u32),

    #[error("File too large: {0} bytes. Maximum allowed: {1} bytes")]
    FileTooLarge(u64, u64),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to create output directory: {0}")]
    DirectoryCreationFailed(PathBuf),

    #[error("Upload error: {0}")]
    Upload(String),
}

impl From<reqwest::Error> for CompressionError {
    fn from(err: reqwest::Error) -> Self {
        CompressionError::Upload(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CompressionError>;
