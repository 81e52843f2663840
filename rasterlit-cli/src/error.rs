//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::path::PathBuf;
use std::process;

use rasterlit::color::ColorParseError;
use rasterlit::error::PoolExhaustedError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// The --background value could not be parsed
    InvalidBackground(ColorParseError),
    /// An input file could not be read
    ReadInput { path: PathBuf, error: std::io::Error },
    /// The worker pool could not be started
    Pool(PoolExhaustedError),
    /// Every submitted image failed to convert
    AllJobsFailed { failed: usize },
    /// The output file could not be written
    WriteOutput { path: PathBuf, error: std::io::Error },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        if let CliError::AllJobsFailed { .. } = self {
            eprintln!();
            eprintln!("Check that the inputs are valid PNG, JPEG, GIF or BMP files;");
            eprintln!("per-image failures are listed above.");
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::InvalidBackground(err) => write!(f, "Invalid background color: {}", err),
            CliError::ReadInput { path, error } => {
                write!(f, "Failed to read {}: {}", path.display(), error)
            }
            CliError::Pool(err) => write!(f, "Failed to start worker pool: {}", err),
            CliError::AllJobsFailed { failed } => {
                write!(f, "All {} images failed to convert", failed)
            }
            CliError::WriteOutput { path, error } => {
                write!(f, "Failed to write {}: {}", path.display(), error)
            }
        }
    }
}
