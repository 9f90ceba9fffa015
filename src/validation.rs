use crate::constants::{MAX_FILE_SIZE, MAX_IMAGE_DIMENSION};
use crate::error::{CompressionError, Result};
use std::fs;
use std::path::Path;

/// Validate input file path for accessibility and size.
pub fn validate_input_path(path: &Path) -> Result<u64> {
    if !path.exists() {
        return Err(CompressionError::FileNotFound(path.to_path_buf()));
    }

    if !path.is_file() {
        return Err(CompressionError::UnsupportedFormat(format!(
            "{} is not a file",
            path.display()
        )));
    }

    let metadata =
        fs::metadata(path).map_err(|_| CompressionError::FileNotFound(path.to_path_buf()))?;

    if metadata.len() > MAX_FILE_SIZE {
        return Err(CompressionError::FileTooLarge(metadata.len(), MAX_FILE_SIZE));
    }

    Ok(metadata.len())
}

/// Create the parent directory of an output path if it is missing.
pub fn ensure_output_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|_| CompressionError::DirectoryCreationFailed(parent.to_path_buf()))?;
    }
    Ok(())
}

pub fn validate_max_size_kb(max_size_kb: u32) -> Result<()> {
    if max_size_kb == 0 {
        return Err(CompressionError::InvalidTarget(
            "maximum size must be at least 1 KB".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_target_dimensions(width: f32, height: f32) -> Result<()> {
    for (name, value) in [("width", width), ("height", height)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(CompressionError::InvalidTarget(format!(
                "target {} must be a positive number, got {}",
                name, value
            )));
        }
    }
    Ok(())
}

/// Rejects pixel dimensions past [`MAX_IMAGE_DIMENSION`] on either axis.
pub fn validate_image_dimensions(width: u32, height: u32) -> Result<()> {
    if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
        return Err(CompressionError::InvalidDimensions(
            width,
            height,
            MAX_IMAGE_DIMENSION,
        ));
    }
    Ok(())
}
