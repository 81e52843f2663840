//! Rasterlit CLI - Command-line interface
//!
//! Converts a batch of images into array-literal declarations. stdout
//! carries the generated code; diagnostics go to stderr.

mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::info;

use rasterlit::config::PixelEncoding;
use rasterlit::logging::init_logging;
use rasterlit::scheduler::DEFAULT_WORKERS;

use error::CliError;

#[derive(Debug, Clone, ValueEnum)]
pub enum EncodingArg {
    /// 1-bit packed grayscale for monochrome OLEDs
    Grayscale,
    /// 16-bit RGB565
    Rgb565,
    /// 24-bit RGB888 in 32-bit words
    Rgb888,
    /// 32-bit RGBA8888
    Rgba8888,
}

impl From<EncodingArg> for PixelEncoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Grayscale => PixelEncoding::Grayscale1Bit,
            EncodingArg::Rgb565 => PixelEncoding::Rgb565,
            EncodingArg::Rgb888 => PixelEncoding::Rgb888,
            EncodingArg::Rgba8888 => PixelEncoding::Rgba8888,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "rasterlit")]
#[command(about = "Convert images into embedded-display array literals", long_about = None)]
#[command(version)]
pub struct Args {
    /// Image files to convert (PNG, JPEG, GIF, BMP)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Pixel encoding for the whole batch
    #[arg(long, value_enum, default_value = "grayscale")]
    pub format: EncodingArg,

    /// Target width in pixels (0 keeps the source width, or derives it
    /// from --height preserving aspect ratio)
    #[arg(long, default_value_t = 0)]
    pub width: u32,

    /// Target height in pixels (0 keeps the source height, or derives it
    /// from --width preserving aspect ratio)
    #[arg(long, default_value_t = 0)]
    pub height: u32,

    /// Background fill as #rgb, #rrggbb or #rrggbbaa
    #[arg(long, default_value = "#ffffff")]
    pub background: String,

    /// Invert R, G and B after the transform
    #[arg(long)]
    pub invert: bool,

    /// 1-bit darkness threshold (accepted for compatibility; the 1-bit
    /// format applies its fixed cutoff)
    #[arg(long, default_value_t = 128)]
    pub threshold: u8,

    /// Clockwise rotation in degrees
    #[arg(long, default_value_t = 0)]
    pub rotate: i32,

    /// Mirror across the vertical axis
    #[arg(long)]
    pub flip_horizontal: bool,

    /// Mirror across the horizontal axis
    #[arg(long)]
    pub flip_vertical: bool,

    /// Worker pool size
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Output file (stdout when omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Re-sort literals into input order before writing; the default order
    /// is completion order, which varies run to run
    #[arg(long)]
    pub stable_order: bool,

    /// Mirror log lines into a file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let _logging_guard = match init_logging(args.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(err) => CliError::LoggingInit(err.to_string()).exit(),
    };

    info!("rasterlit v{}", rasterlit::VERSION);

    match runner::run(args).await {
        Ok(summary) => {
            info!(
                succeeded = summary.succeeded,
                failed = summary.failed,
                "Generation finished"
            );
            if summary.failed > 0 {
                std::process::exit(2);
            }
        }
        Err(err) => err.exit(),
    }
}
