use crate::config::ReducerConfig;
use crate::constants::BYTES_PER_KB;
use crate::error::{CompressionError, Result};
use crate::validation::validate_max_size_kb;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, RgbImage};

/// JPEG bytes produced by [`reduce_by_quality`].
#[derive(Debug, Clone)]
pub struct QualityOutcome {
    pub bytes: Vec<u8>,
    /// Quality of the accepted encoding.
    pub quality: u8,
    /// Number of encodings performed, including the accepted one.
    pub attempts: usize,
}

/// Encodes an RGB raster as JPEG into `buf`, replacing its contents.
pub fn encode_jpeg_into(rgb: &RgbImage, quality: u8, buf: &mut Vec<u8>) -> Result<()> {
    buf.clear();
    let mut encoder = JpegEncoder::new_with_quality(&mut *buf, quality);
    encoder.encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)?;
    Ok(())
}

/// Encodes any raster as JPEG at a fixed quality. Alpha is dropped.
pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let rgb = img.to_rgb8();
    let mut buf = Vec::new();
    encode_jpeg_into(&rgb, quality, &mut buf)?;
    Ok(buf)
}

/// Re-encodes `img` as JPEG at decreasing quality until the output fits in
/// `max_size_kb` kilobytes.
///
/// Qualities follow [`ReducerConfig::quality_ladder`]: start quality, minus
/// the step each round, ending exactly at the floor. If even the floor is too
/// large the call fails with [`CompressionError::TargetUnreachable`].
///
/// # Example
/// ```
/// use image::DynamicImage;
/// use facepic::{reduce_by_quality, ReducerConfig};
///
/// let img = DynamicImage::new_rgb8(64, 64);
/// let outcome = reduce_by_quality(&img, 50, &ReducerConfig::default()).unwrap();
/// assert!(outcome.bytes.len() <= 50 * 1024);
/// assert_eq!(outcome.quality, 100);
/// ```
pub fn reduce_by_quality(
    img: &DynamicImage,
    max_size_kb: u32,
    config: &ReducerConfig,
) -> Result<QualityOutcome> {
    validate_max_size_kb(max_size_kb)?;
    let ceiling = max_size_kb as usize * BYTES_PER_KB;

    let rgb = img.to_rgb8();
    let mut buf = Vec::new();
    let mut attempts = 0;

    for quality in config.quality_ladder() {
        encode_jpeg_into(&rgb, quality, &mut buf)?;
        attempts += 1;
        crate::verbose!(
            "quality {:>3} -> {} bytes (ceiling {} bytes)",
            quality,
            buf.len(),
            ceiling
        );

        if buf.len() <= ceiling {
            return Ok(QualityOutcome {
                bytes: buf,
                quality,
                attempts,
            });
        }
    }

    Err(CompressionError::TargetUnreachable {
        target_kb: max_size_kb,
        floor: config.min_quality,
        smallest_bytes: buf.len(),
    })
}
