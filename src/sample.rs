use crate::constants::SKIP_THRESHOLD_BYTES;
use crate::error::Result;
use crate::validation::validate_target_dimensions;
use image::{DynamicImage, ImageReader};
use std::path::Path;

/// Result of [`reduce_by_dimensions`].
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub image: DynamicImage,
    /// Integer divisor applied to both axes; 1 means untouched.
    pub factor: u32,
    /// True when the raster was below the skip threshold.
    pub skipped: bool,
}

/// Computes the integer down-sample factor for a source of `src_width` x
/// `src_height` pixels and a target box.
///
/// The longer axis drives the factor, and only when it exceeds its target.
/// Square images are driven by width. The result is never below 1. A target
/// that is not a positive finite number leaves its axis unconstrained;
/// callers taking user input go through `validate_target_dimensions` first.
///
/// # Example
/// ```
/// use facepic::sample_factor;
///
/// assert_eq!(sample_factor(4000, 3000, 1000.0, 750.0), 4);
/// assert_eq!(sample_factor(800, 600, 1000.0, 750.0), 1);
/// ```
pub fn sample_factor(src_width: u32, src_height: u32, target_width: f32, target_height: f32) -> u32 {
    let width = src_width as f64;
    let height = src_height as f64;
    let usable = |target: f32| target.is_finite() && target > 0.0;

    let width_driven = src_width >= src_height;
    let factor = if width_driven && usable(target_width) && width > target_width as f64 {
        (width / target_width as f64).floor()
    } else if !width_driven && usable(target_height) && height > target_height as f64 {
        (height / target_height as f64).floor()
    } else {
        1.0
    };

    (factor as u32).max(1)
}

/// Shrinks both axes by `factor`, keeping at least one pixel per axis.
pub fn downsample(img: DynamicImage, factor: u32) -> DynamicImage {
    if factor <= 1 {
        return img;
    }
    let width = (img.width() / factor).max(1);
    let height = (img.height() / factor).max(1);
    img.thumbnail_exact(width, height)
}

/// Thumbnails a decoded raster towards `target_width` x `target_height`.
///
/// Never upscales. Rasters whose pixel buffer is under the skip threshold
/// come back unchanged with `skipped` set.
pub fn reduce_by_dimensions(
    img: DynamicImage,
    target_width: f32,
    target_height: f32,
) -> Result<Thumbnail> {
    validate_target_dimensions(target_width, target_height)?;

    if img.as_bytes().len() < SKIP_THRESHOLD_BYTES {
        crate::verbose!(
            "raster is {} bytes, below skip threshold; leaving as is",
            img.as_bytes().len()
        );
        return Ok(Thumbnail {
            image: img,
            factor: 1,
            skipped: true,
        });
    }

    let factor = sample_factor(img.width(), img.height(), target_width, target_height);
    crate::verbose!(
        "{}x{} towards {}x{}: sample factor {}",
        img.width(),
        img.height(),
        target_width,
        target_height,
        factor
    );

    Ok(Thumbnail {
        image: downsample(img, factor),
        factor,
        skipped: false,
    })
}

/// Reads only the image header to get its dimensions.
pub fn probe_dimensions(path: &Path) -> Result<(u32, u32)> {
    let dimensions = ImageReader::open(path)?
        .with_guessed_format()?
        .into_dimensions()?;
    Ok(dimensions)
}
