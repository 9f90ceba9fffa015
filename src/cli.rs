use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "facepic",
    about = "Shrink photos to a size or pixel budget before sending them to a face-recognition server",
    long_about = "facepic reduces photos either by lowering JPEG quality until the file fits a \
                  kilobyte ceiling, or by down-sampling with an integer factor towards a target \
                  width and height. It can also convert to lossless PNG and upload the result \
                  to an HTTP endpoint you configure.",
    version,
    after_help = "EXAMPLES:\n  \
    facepic quality photo.jpg small.jpg --max-kb 500\n  \
    facepic thumbnail photo.jpg thumb.jpg -w 540 -H 960 --delete-source\n  \
    facepic convert photo.jpg photo.png --optimize 4\n  \
    facepic upload photo.jpg --endpoint http://192.168.1.20:8000/upload --max-kb 300\n  \
    facepic info photo.jpg -w 540 -H 960"
)]
pub struct Args {
    #[arg(short = 'q', long, global = true, help = "Only print errors")]
    pub quiet: bool,

    #[arg(short = 'v', long, global = true, help = "Print every reduction step")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Lower JPEG quality until the file fits a size ceiling",
        long_about = "Re-encode the image as JPEG starting at quality 100 and stepping down until \
                      the output is at most --max-kb kilobytes. Fails instead of going below the \
                      quality floor."
    )]
    Quality {
        #[arg(help = "Input image file path")]
        input: PathBuf,

        #[arg(help = "Output JPEG path (default: <input>_compressed.jpg)")]
        output: Option<PathBuf>,

        #[arg(short = 'm', long, help = "Maximum output size in kilobytes")]
        max_kb: u32,

        #[arg(
            short = 's',
            long,
            help = "Quality decrement per attempt (default: 10)",
            long_help = "Amount subtracted from the JPEG quality after each attempt that is \
                         still too large. 5 gives finer control, 10 is faster."
        )]
        step: Option<u8>,

        #[arg(
            short = 'f',
            long,
            help = "Lowest quality to try (default: 10)",
            long_help = "The reducer tries this quality last. If the output is still too large \
                         the command fails."
        )]
        floor: Option<u8>,

        #[arg(short = 'd', long, help = "Delete the input after writing the output")]
        delete_source: bool,
    },

    #[command(
        about = "Down-sample by an integer factor towards a target size",
        long_about = "Compute factor = floor(longer side / its target) and shrink both axes by \
                      it. Images already within the target are never upscaled."
    )]
    Thumbnail {
        #[arg(help = "Input image file path")]
        input: PathBuf,

        #[arg(help = "Output path, .jpg or .png (default: <input>_compressed.jpg)")]
        output: Option<PathBuf>,

        #[arg(short = 'w', long, help = "Target width in pixels")]
        width: f32,

        #[arg(short = 'H', long, help = "Target height in pixels")]
        height: f32,

        #[arg(short = 'd', long, help = "Delete the input after writing the output")]
        delete_source: bool,
    },

    #[command(about = "Convert to lossless PNG without resizing")]
    Convert {
        #[arg(help = "Input image file path")]
        input: PathBuf,

        #[arg(help = "Output PNG path")]
        output: PathBuf,

        #[arg(
            short = 'o',
            long,
            help = "oxipng optimization level (0-6)",
            long_help = "Run the PNG through oxipng at this preset. Level 6 uses Zopfli and is \
                         slow. Omit to skip optimization."
        )]
        optimize: Option<u8>,
    },

    #[command(
        about = "Upload an image to a face-recognition server",
        long_about = "POST the image as multipart/form-data (field \"file\") to the given \
                      endpoint. There is no built-in endpoint."
    )]
    Upload {
        #[arg(help = "Image file path to upload")]
        input: PathBuf,

        #[arg(
            short = 'e',
            long,
            env = "FACEPIC_UPLOAD_URL",
            help = "Upload endpoint URL"
        )]
        endpoint: Option<String>,

        #[arg(short = 'm', long, help = "Reduce to at most this many kilobytes first")]
        max_kb: Option<u32>,
    },

    #[command(about = "Show image details and what each reducer would do")]
    Info {
        #[arg(help = "Image file path to analyze")]
        input: PathBuf,

        #[arg(short = 'w', long, requires = "height", help = "Target width to evaluate")]
        width: Option<f32>,

        #[arg(short = 'H', long, requires = "width", help = "Target height to evaluate")]
        height: Option<f32>,

        #[arg(short = 'm', long, help = "Size ceiling in kilobytes to evaluate")]
        max_kb: Option<u32>,
    },
}
