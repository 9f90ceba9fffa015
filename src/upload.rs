use crate::config::ReducerConfig;
use crate::constants::{UPLOAD_ENDPOINT_ENV, UPLOAD_FORM_FIELD, UPLOAD_TIMEOUT_SECS};
use crate::error::{CompressionError, Result};
use crate::formats::{mime_for_path, OutputFormat};
use crate::processing::{process_request, CompressionRequest, ReductionTarget};
use crate::utils::{create_progress_spinner, format_file_size, is_image_file};
use crate::validation::{validate_input_path, validate_max_size_kb};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use reqwest::Url;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub endpoint: Url,
    /// Run the quality reducer before sending.
    pub max_size_kb: Option<u32>,
    pub timeout: Duration,
}

impl UploadOptions {
    /// There is no default endpoint: callers must supply one.
    pub fn new(endpoint: Option<String>, max_size_kb: Option<u32>) -> Result<Self> {
        let endpoint = endpoint
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| {
                CompressionError::Upload(format!(
                    "no upload endpoint configured, pass --endpoint or set {}",
                    UPLOAD_ENDPOINT_ENV
                ))
            })?;

        let url = Url::parse(endpoint.trim()).map_err(|e| {
            CompressionError::Upload(format!("invalid endpoint {:?}: {}", endpoint, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CompressionError::Upload(format!(
                "unsupported endpoint scheme: {}",
                url.scheme()
            )));
        }

        if let Some(max_size_kb) = max_size_kb {
            validate_max_size_kb(max_size_kb)?;
        }

        Ok(Self {
            endpoint: url,
            max_size_kb,
            timeout: Duration::from_secs(UPLOAD_TIMEOUT_SECS),
        })
    }
}

#[derive(Debug, Clone)]
pub struct UploadReceipt {
    pub status: u16,
    pub body: String,
    pub bytes_sent: usize,
}

struct Payload {
    bytes: Vec<u8>,
    file_name: String,
    mime: &'static str,
}

fn prepare_payload(
    input_path: &Path,
    options: &UploadOptions,
    config: &ReducerConfig,
) -> Result<Payload> {
    let stem = input_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    match options.max_size_kb {
        Some(max_size_kb) => {
            // Never delete the user's photo as a side effect of uploading it
            let config = ReducerConfig {
                delete_source_after: false,
                ..config.clone()
            };
            let request = CompressionRequest::from_path(
                input_path,
                ReductionTarget::MaxSizeKb(max_size_kb),
                None,
            );
            let result = process_request(&request, &config)?;
            Ok(Payload {
                bytes: result.bytes,
                file_name: format!("{}.{}", stem, OutputFormat::Jpeg.extension()),
                mime: OutputFormat::Jpeg.mime_type(),
            })
        }
        None => {
            let file_name = input_path
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or(stem);
            Ok(Payload {
                bytes: fs::read(input_path)?,
                file_name,
                mime: mime_for_path(input_path),
            })
        }
    }
}

/// Sends one image as `multipart/form-data` to the configured endpoint.
pub fn send_image(
    input_path: &Path,
    options: &UploadOptions,
    config: &ReducerConfig,
) -> Result<UploadReceipt> {
    validate_input_path(input_path)?;

    let payload = prepare_payload(input_path, options, config)?;
    let bytes_sent = payload.bytes.len();

    let part = Part::bytes(payload.bytes)
        .file_name(payload.file_name)
        .mime_str(payload.mime)?;
    let form = Form::new().part(UPLOAD_FORM_FIELD, part);

    let client = Client::builder().timeout(options.timeout).build()?;
    let response = client
        .post(options.endpoint.clone())
        .multipart(form)
        .send()?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .unwrap_or_else(|e| format!("<response body could not be read: {}>", e));
        return Err(CompressionError::Upload(format!(
            "server returned {}: {}",
            status, body
        )));
    }
    let body = response.text()?;

    Ok(UploadReceipt {
        status: status.as_u16(),
        body,
        bytes_sent,
    })
}

/// Handles uploading an image with console output.
pub fn upload_image(
    input_path: &Path,
    options: &UploadOptions,
    config: &ReducerConfig,
) -> Result<UploadReceipt> {
    crate::info!("📤 Uploading: {:?}", input_path);
    crate::info!("🔗 Endpoint: {}", options.endpoint);
    if !is_image_file(input_path) {
        crate::warn!("{:?} does not look like an image file", input_path);
    }
    if let Some(max_size_kb) = options.max_size_kb {
        crate::info!("🎯 Reducing to at most {} KB first", max_size_kb);
    }

    let pb = create_progress_spinner("Uploading...");
    let receipt = send_image(input_path, options, config);
    pb.finish_and_clear();
    let receipt = receipt?;

    crate::info!("✅ Upload successful (HTTP {})", receipt.status);
    crate::info!("📊 Sent: {}", format_file_size(receipt.bytes_sent as u64));
    if !receipt.body.is_empty() {
        crate::info!("💬 Response: {}", receipt.body);
    }

    Ok(receipt)
}
