use crate::constants::{MAX_PNG_OPTIMIZATION_LEVEL, ZOPFLI_ITERATIONS};
use crate::error::{CompressionError, Result};
use image::{DynamicImage, ImageFormat};
use oxipng::{Deflaters, Options};
use std::io::Cursor;
use std::num::NonZeroU8;

/// Serializes a raster to PNG bytes without resizing or loss.
pub fn to_png_bytes(img: &DynamicImage) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, ImageFormat::Png)?;
    Ok(cursor.into_inner())
}

/// Re-compresses PNG bytes with oxipng. The pixels are untouched.
///
/// `level` follows oxipng presets (0-6); the top level switches the
/// deflater to Zopfli.
pub fn optimize_png(png: &[u8], level: u8) -> Result<Vec<u8>> {
    if level > MAX_PNG_OPTIMIZATION_LEVEL {
        return Err(CompressionError::PngOptimization(format!(
            "optimization level {} is above the maximum of {}",
            level, MAX_PNG_OPTIMIZATION_LEVEL
        )));
    }

    let mut options = Options::from_preset(level);
    if level == MAX_PNG_OPTIMIZATION_LEVEL {
        if let Some(iterations) = NonZeroU8::new(ZOPFLI_ITERATIONS) {
            options.deflate = Deflaters::Zopfli { iterations };
        }
    }

    oxipng::optimize_from_memory(png, &options)
        .map_err(|e| CompressionError::PngOptimization(e.to_string()))
}

/// Lossless transport encoding: PNG, optionally passed through oxipng.
pub fn to_lossless_bytes(img: &DynamicImage, optimization: Option<u8>) -> Result<Vec<u8>> {
    let png = to_png_bytes(img)?;
    match optimization {
        Some(level) => {
            let optimized = optimize_png(&png, level)?;
            crate::verbose!(
                "oxipng level {}: {} -> {} bytes",
                level,
                png.len(),
                optimized.len()
            );
            Ok(optimized)
        }
        None => Ok(png),
    }
}
