use crate::config::ReducerConfig;
use crate::constants::{OUTPUT_SUFFIX, THUMBNAIL_JPEG_QUALITY};
use crate::convert::to_lossless_bytes;
use crate::error::{CompressionError, Result};
use crate::formats::{determine_output_format, OutputFormat};
use crate::quality::{encode_jpeg, reduce_by_quality};
use crate::sample::{probe_dimensions, reduce_by_dimensions};
use crate::utils::{create_progress_spinner, print_compression_result};
use crate::validation::{ensure_output_parent, validate_image_dimensions, validate_input_path};
use image::{DynamicImage, ImageReader};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Where the encoded input comes from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// What the reduction has to achieve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReductionTarget {
    /// Encoded JPEG must fit in this many kilobytes.
    MaxSizeKb(u32),
    /// Down-sample towards this pixel box.
    Dimensions { width: f32, height: f32 },
    /// Re-encode as PNG, optionally oxipng-optimized at the given level.
    Lossless { optimization: Option<u8> },
}

/// One reduction call. Nothing about it outlives [`process_request`].
#[derive(Debug, Clone)]
pub struct CompressionRequest {
    pub source: ImageSource,
    pub target: ReductionTarget,
    pub output: Option<PathBuf>,
}

impl CompressionRequest {
    pub fn from_path(
        input: impl Into<PathBuf>,
        target: ReductionTarget,
        output: Option<PathBuf>,
    ) -> Self {
        Self {
            source: ImageSource::Path(input.into()),
            target,
            output,
        }
    }

    pub fn from_bytes(bytes: Vec<u8>, target: ReductionTarget) -> Self {
        Self {
            source: ImageSource::Bytes(bytes),
            target,
            output: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompressionResult {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    /// JPEG quality chosen by the quality reducer.
    pub quality: Option<u8>,
    /// Down-sample factor chosen by the dimension reducer.
    pub sample_factor: Option<u32>,
    /// Encoded size of the source in bytes.
    pub original_size: u64,
    pub skipped: bool,
    pub written_to: Option<PathBuf>,
    pub source_deleted: bool,
}

struct Reduced {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
    quality: Option<u8>,
    sample_factor: Option<u32>,
    skipped: bool,
}

/// Loads an image file and returns it along with its size on disk.
///
/// The header is probed first so oversized images are rejected before any
/// pixel buffer is allocated.
pub fn load_image_with_metadata(input_path: &Path) -> Result<(DynamicImage, u64)> {
    let file_size = validate_input_path(input_path)?;

    let (width, height) = probe_dimensions(input_path)?;
    validate_image_dimensions(width, height)?;

    let img = ImageReader::open(input_path)?
        .with_guessed_format()?
        .decode()?;

    Ok((img, file_size))
}

/// Decodes an in-memory encoded image with the same limits as files.
pub fn load_image_from_bytes(bytes: &[u8]) -> Result<DynamicImage> {
    let (width, height) = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_dimensions()?;
    validate_image_dimensions(width, height)?;

    let img = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?;
    Ok(img)
}

/// Encodes a raster in `format`. JPEG uses the thumbnail quality.
pub fn encode_image(img: &DynamicImage, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Jpeg => encode_jpeg(img, THUMBNAIL_JPEG_QUALITY),
        OutputFormat::Png => to_lossless_bytes(img, None),
    }
}

/// `<dir>/<stem>_compressed.<ext>` next to the input.
pub fn default_output_path(input_path: &Path, format: OutputFormat) -> Result<PathBuf> {
    let file_stem = input_path
        .file_stem()
        .ok_or_else(|| CompressionError::UnsupportedFormat("Invalid file name".to_string()))?;

    let file_name = format!(
        "{}{}.{}",
        file_stem.to_string_lossy(),
        OUTPUT_SUFFIX,
        format.extension()
    );
    Ok(input_path.with_file_name(file_name))
}

/// Format the request will produce. Quality reduction only writes JPEG and
/// lossless conversion only writes PNG, so a conflicting output extension is
/// rejected up front.
pub fn resolve_output_format(request: &CompressionRequest) -> Result<OutputFormat> {
    let from_path = match &request.output {
        Some(path) => Some(determine_output_format(path)?),
        None => None,
    };

    match (request.target, from_path) {
        (ReductionTarget::MaxSizeKb(_), Some(OutputFormat::Png)) => Err(
            CompressionError::UnsupportedFormat(
                "quality reduction writes JPEG, use a .jpg output".to_string(),
            ),
        ),
        (ReductionTarget::MaxSizeKb(_), _) => Ok(OutputFormat::Jpeg),
        (ReductionTarget::Lossless { .. }, Some(OutputFormat::Jpeg)) => Err(
            CompressionError::UnsupportedFormat(
                "lossless conversion writes PNG, use a .png output".to_string(),
            ),
        ),
        (ReductionTarget::Lossless { .. }, _) => Ok(OutputFormat::Png),
        (ReductionTarget::Dimensions { .. }, format) => Ok(format.unwrap_or(OutputFormat::Jpeg)),
    }
}

// Takes the raster by value so it is dropped as soon as encoding is done,
// on success and on error alike.
fn reduce(
    img: DynamicImage,
    target: ReductionTarget,
    format: OutputFormat,
    config: &ReducerConfig,
) -> Result<Reduced> {
    match target {
        ReductionTarget::MaxSizeKb(max_size_kb) => {
            let outcome = reduce_by_quality(&img, max_size_kb, config)?;
            Ok(Reduced {
                bytes: outcome.bytes,
                width: img.width(),
                height: img.height(),
                quality: Some(outcome.quality),
                sample_factor: None,
                skipped: false,
            })
        }
        ReductionTarget::Dimensions { width, height } => {
            let thumb = reduce_by_dimensions(img, width, height)?;
            let bytes = encode_image(&thumb.image, format)?;
            Ok(Reduced {
                bytes,
                width: thumb.image.width(),
                height: thumb.image.height(),
                quality: None,
                sample_factor: Some(thumb.factor),
                skipped: thumb.skipped,
            })
        }
        ReductionTarget::Lossless { optimization } => Ok(Reduced {
            bytes: to_lossless_bytes(&img, optimization)?,
            width: img.width(),
            height: img.height(),
            quality: None,
            sample_factor: None,
            skipped: false,
        }),
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Runs one request: load, reduce, optionally write, optionally delete the
/// source.
///
/// The source file is removed only after the output was written to disk, and
/// never when the output path is the source itself. Without an output path
/// the source is always kept.
pub fn process_request(
    request: &CompressionRequest,
    config: &ReducerConfig,
) -> Result<CompressionResult> {
    let format = resolve_output_format(request)?;

    let (img, original_size) = match &request.source {
        ImageSource::Path(path) => load_image_with_metadata(path)?,
        ImageSource::Bytes(bytes) => (load_image_from_bytes(bytes)?, bytes.len() as u64),
    };

    let reduced = reduce(img, request.target, format, config)?;

    let written_to = match &request.output {
        Some(output) => {
            ensure_output_parent(output)?;
            fs::write(output, &reduced.bytes)?;
            crate::verbose!("wrote {} bytes to {:?}", reduced.bytes.len(), output);
            Some(output.clone())
        }
        None => None,
    };

    let mut source_deleted = false;
    if config.delete_source_after {
        match (&request.source, &written_to) {
            (ImageSource::Path(source), Some(output)) => {
                if same_file(source, output) {
                    crate::warn!("Output replaced the source {:?}; not deleting it", source);
                } else if source.exists() {
                    fs::remove_file(source)?;
                    source_deleted = true;
                }
            }
            (ImageSource::Path(source), None) => {
                crate::warn!("No output written; keeping the source {:?}", source);
            }
            (ImageSource::Bytes(_), _) => {}
        }
    }

    Ok(CompressionResult {
        bytes: reduced.bytes,
        format,
        width: reduced.width,
        height: reduced.height,
        quality: reduced.quality,
        sample_factor: reduced.sample_factor,
        original_size,
        skipped: reduced.skipped,
        written_to,
        source_deleted,
    })
}

/// CLI front for [`process_request`]: spinner plus a size report.
pub fn compress_with_report(
    request: &CompressionRequest,
    config: &ReducerConfig,
) -> Result<CompressionResult> {
    if let ImageSource::Path(input) = &request.source {
        crate::info!("🗜️  Compressing image: {:?}", input);
    }
    if let Some(output) = &request.output {
        crate::info!("📁 Output: {:?}", output);
    }

    let pb = create_progress_spinner("Reducing image...");
    let result = process_request(request, config);
    pb.finish_and_clear();
    let result = result?;

    crate::info!(
        "📏 Output: {}x{} {}",
        result.width,
        result.height,
        result.format
    );
    if let Some(quality) = result.quality {
        crate::info!("🎚️  JPEG quality: {}", quality);
    }
    if let Some(factor) = result.sample_factor {
        if result.skipped {
            crate::info!("⏭️  Image below skip threshold, not resampled");
        } else {
            crate::info!("🔽 Sample factor: {}", factor);
        }
    }
    print_compression_result(result.original_size, result.bytes.len() as u64);
    if result.source_deleted {
        crate::info!("🗑️  Source file deleted");
    }

    Ok(result)
}
