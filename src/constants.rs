pub const START_QUALITY: u8 = 100;
pub const DEFAULT_QUALITY_STEP: u8 = 10;
pub const DEFAULT_MIN_QUALITY: u8 = 10;
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

/// Quality used when a thumbnail is written as JPEG.
pub const THUMBNAIL_JPEG_QUALITY: u8 = 100;

pub const BYTES_PER_KB: usize = 1024;

/// Decoded rasters smaller than this many bytes are not worth resampling.
pub const SKIP_THRESHOLD_BYTES: usize = 512;

pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;
pub const MAX_IMAGE_DIMENSION: u32 = 20_000;

pub const MAX_PNG_OPTIMIZATION_LEVEL: u8 = 6;
pub const ZOPFLI_ITERATIONS: u8 = 15;

pub const UPLOAD_ENDPOINT_ENV: &str = "FACEPIC_UPLOAD_URL";
pub const UPLOAD_FORM_FIELD: &str = "file";
pub const UPLOAD_TIMEOUT_SECS: u64 = 30;

pub const OUTPUT_SUFFIX: &str = "_compressed";

pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
