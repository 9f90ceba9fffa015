use crate::constants::{BYTES_PER_KB, SKIP_THRESHOLD_BYTES};
use crate::error::Result;
use crate::sample::sample_factor;
use crate::utils::format_file_size;
use crate::validation::{validate_image_dimensions, validate_input_path};
use image::{ColorType, ImageDecoder, ImageFormat, ImageReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub file_size: u64,
    pub format: Option<ImageFormat>,
    pub color: ColorType,
}

impl ImageInfo {
    /// Size of the decoded pixel buffer in bytes.
    pub fn decoded_bytes(&self) -> u64 {
        self.width as u64 * self.height as u64 * self.color.bytes_per_pixel() as u64
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height.max(1) as f64
    }

    /// True when the thumbnailer would leave this image alone.
    pub fn below_skip_threshold(&self) -> bool {
        self.decoded_bytes() < SKIP_THRESHOLD_BYTES as u64
    }

    pub fn sample_factor_for(&self, target_width: f32, target_height: f32) -> u32 {
        sample_factor(self.width, self.height, target_width, target_height)
    }

    pub fn fits_in_kb(&self, max_size_kb: u32) -> bool {
        self.file_size <= max_size_kb as u64 * BYTES_PER_KB as u64
    }
}

/// Inspects an image file from its header alone; no pixels are decoded.
pub fn inspect_image(input_path: &Path) -> Result<ImageInfo> {
    let file_size = validate_input_path(input_path)?;

    let reader = ImageReader::open(input_path)?.with_guessed_format()?;
    let format = reader.format();
    let decoder = reader.into_decoder()?;
    let (width, height) = decoder.dimensions();
    validate_image_dimensions(width, height)?;

    Ok(ImageInfo {
        path: input_path.to_path_buf(),
        width,
        height,
        file_size,
        format,
        color: decoder.color_type(),
    })
}

pub fn print_image_info(
    info: &ImageInfo,
    target: Option<(f32, f32)>,
    max_size_kb: Option<u32>,
) {
    crate::info!("📋 Image: {:?}", info.path);
    crate::info!("  📏 Dimensions: {}x{} pixels", info.width, info.height);
    crate::info!(
        "  📦 File size: {} bytes ({})",
        info.file_size,
        format_file_size(info.file_size)
    );
    crate::info!("  🎨 Color type: {:?}", info.color);
    crate::info!("  🎭 Format: {:?}", info.format);
    crate::info!("  📐 Aspect ratio: {:.2}:1", info.aspect_ratio());
    crate::info!(
        "  💾 Decoded size: {}",
        format_file_size(info.decoded_bytes())
    );

    if let Some((width, height)) = target {
        if info.below_skip_threshold() {
            crate::info!("  ⏭️  Thumbnail: below skip threshold, would be left as is");
        } else {
            let factor = info.sample_factor_for(width, height);
            crate::info!(
                "  🔽 Thumbnail to {}x{}: factor {} -> {}x{}",
                width,
                height,
                factor,
                (info.width / factor).max(1),
                (info.height / factor).max(1)
            );
        }
    }

    if let Some(max_size_kb) = max_size_kb {
        if info.fits_in_kb(max_size_kb) {
            crate::info!("  ✅ Already within {} KB on disk", max_size_kb);
        } else {
            crate::info!(
                "  🎯 Over {} KB on disk, quality reduction needed",
                max_size_kb
            );
        }
    }
}
