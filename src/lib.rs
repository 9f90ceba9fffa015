pub mod cli;
pub mod config;
pub mod constants;
pub mod convert;
pub mod error;
pub mod formats;
pub mod info;
pub mod logger;
pub mod processing;
pub mod quality;
pub mod sample;
pub mod upload;
pub mod utils;
pub mod validation;

pub use config::ReducerConfig;
pub use convert::{optimize_png, to_lossless_bytes, to_png_bytes};
pub use error::{CompressionError, Result};
pub use formats::OutputFormat;
pub use info::{inspect_image, print_image_info, ImageInfo};
pub use processing::{
    compress_with_report, default_output_path, load_image_from_bytes, load_image_with_metadata,
    process_request, CompressionRequest, CompressionResult, ImageSource, ReductionTarget,
};
pub use quality::{encode_jpeg, reduce_by_quality, QualityOutcome};
pub use sample::{downsample, reduce_by_dimensions, sample_factor, Thumbnail};
pub use upload::{send_image, upload_image, UploadOptions, UploadReceipt};
