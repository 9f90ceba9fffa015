//! Output formats the reducers can write.
//!
//! Quality reduction always produces JPEG. Thumbnails follow the output
//! extension, and lossless conversion always produces PNG.

use crate::error::{CompressionError, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossy, quality-controlled
    Jpeg,
    /// Lossless
    Png,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Png => "PNG",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for OutputFormat {
    type Err = CompressionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            _ => Err(CompressionError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Picks the format from the output extension, falling back to JPEG when
/// there is none. A known but unwritable extension is an error.
pub fn determine_output_format(output_path: &Path) -> Result<OutputFormat> {
    match output_path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            "webp" | "gif" | "bmp" | "tiff" | "avif" => Err(CompressionError::UnsupportedFormat(
                format!("cannot write .{} output, use .jpg or .png", ext),
            )),
            _ => Ok(OutputFormat::Jpeg),
        },
        None => Ok(OutputFormat::Jpeg),
    }
}

/// Guesses the MIME type of an upload from its file name.
pub fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .as_deref()
    {
        Some("png") => OutputFormat::Png.mime_type(),
        Some("webp") => "image/webp",
        _ => OutputFormat::Jpeg.mime_type(),
    }
}
