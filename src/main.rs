use clap::Parser;
use facepic::cli::{Args, Commands};
use facepic::error::Result;
use facepic::formats::{determine_output_format, OutputFormat};
use facepic::logger::{set_verbosity, Verbosity};
use facepic::validation::{validate_max_size_kb, validate_target_dimensions};
use facepic::{
    compress_with_report, default_output_path, inspect_image, print_image_info, upload_image,
    CompressionRequest, ReducerConfig, ReductionTarget, UploadOptions,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    set_verbosity(Verbosity::from_flags(args.quiet, args.verbose));

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            facepic::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Quality {
            input,
            output,
            max_kb,
            step,
            floor,
            delete_source,
        } => {
            validate_max_size_kb(max_kb)?;
            let config = ReducerConfig::new(step, floor, delete_source)?;
            let output = resolve_output(&input, output, OutputFormat::Jpeg)?;
            let request =
                CompressionRequest::from_path(input, ReductionTarget::MaxSizeKb(max_kb), Some(output));
            compress_with_report(&request, &config)?;
        }
        Commands::Thumbnail {
            input,
            output,
            width,
            height,
            delete_source,
        } => {
            validate_target_dimensions(width, height)?;
            let config = ReducerConfig::new(None, None, delete_source)?;
            let output = resolve_output(&input, output, OutputFormat::Jpeg)?;
            let request = CompressionRequest::from_path(
                input,
                ReductionTarget::Dimensions { width, height },
                Some(output),
            );
            compress_with_report(&request, &config)?;
        }
        Commands::Convert {
            input,
            output,
            optimize,
        } => {
            let request = CompressionRequest::from_path(
                input,
                ReductionTarget::Lossless {
                    optimization: optimize,
                },
                Some(output),
            );
            compress_with_report(&request, &ReducerConfig::default())?;
        }
        Commands::Upload {
            input,
            endpoint,
            max_kb,
        } => {
            let options = UploadOptions::new(endpoint, max_kb)?;
            upload_image(&input, &options, &ReducerConfig::default())?;
        }
        Commands::Info {
            input,
            width,
            height,
            max_kb,
        } => {
            let info = inspect_image(&input)?;
            let target = width.zip(height);
            if let Some((width, height)) = target {
                validate_target_dimensions(width, height)?;
            }
            print_image_info(&info, target, max_kb);
        }
    }

    Ok(())
}

fn resolve_output(input: &Path, output: Option<PathBuf>, fallback: OutputFormat) -> Result<PathBuf> {
    match output {
        Some(path) => {
            determine_output_format(&path)?;
            Ok(path)
        }
        None => default_output_path(input, fallback),
    }
}
