//! Helpers shared by the pipeline, the inspector and the CLI.

use crate::constants::{PROGRESS_SPINNER_TEMPLATE, SUPPORTED_IMAGE_EXTENSIONS};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Check if a file path has a supported image extension
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext_lower = ext.to_lowercase();
            SUPPORTED_IMAGE_EXTENSIONS.contains(&ext_lower.as_str())
        })
        .unwrap_or(false)
}

/// Create a progress spinner with consistent styling.
///
/// Returns a hidden bar in quiet mode so callers never branch on it.
pub fn create_progress_spinner(message: &str) -> ProgressBar {
    if crate::logger::is_quiet() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template(PROGRESS_SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Format file size in human-readable format
///
/// # Examples
/// ```
/// use facepic::utils::format_file_size;
///
/// assert_eq!(format_file_size(512), "512 B");
/// assert_eq!(format_file_size(1536), "1.5 KB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Compression ratio as a percentage; positive means the output shrank.
pub fn calculate_compression_ratio(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - compressed_size as f64) / original_size as f64) * 100.0
}

pub fn print_compression_result(original_size: u64, compressed_size: u64) {
    let ratio = calculate_compression_ratio(original_size, compressed_size);

    crate::info!(
        "📊 Original size: {} ({})",
        original_size,
        format_file_size(original_size)
    );
    crate::info!(
        "📈 Compressed size: {} ({})",
        compressed_size,
        format_file_size(compressed_size)
    );
    crate::info!("🎯 Compression ratio: {:.1}%", ratio);

    if ratio > 0.0 {
        crate::info!("✅ Successfully reduced file size by {:.1}%", ratio);
    } else {
        crate::warn!("File size increased by {:.1}%", ratio.abs());
    }
}
