//! CLI runner: read inputs, drive the scheduler, write the artifact.
//!
//! Failures of individual images are reported to stderr as they complete
//! and excluded from the artifact; the run only errors out when nothing
//! converts or the output cannot be written.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use rasterlit::color::Color;
use rasterlit::config::ImageConfig;
use rasterlit::pipeline::ImagePipeline;
use rasterlit::scheduler::{JobOutcome, Scheduler, SchedulerConfig};
use rasterlit::source::SourceImage;

use crate::error::CliError;
use crate::Args;

/// Counts reported after a run.
#[derive(Debug)]
pub struct RunSummary {
    /// Images that produced a literal.
    pub succeeded: usize,
    /// Images that settled with an error.
    pub failed: usize,
}

/// Runs one generate action: one batch, one combined artifact.
pub async fn run(args: Args) -> Result<RunSummary, CliError> {
    let background =
        Color::from_hex(&args.background).map_err(CliError::InvalidBackground)?;

    let template = ImageConfig {
        canvas_width: args.width,
        canvas_height: args.height,
        background_color: background,
        invert_colors: args.invert,
        pixel_encoding: args.format.clone().into(),
        threshold: args.threshold,
        rotation_degrees: args.rotate,
        flip_horizontal: args.flip_horizontal,
        flip_vertical: args.flip_vertical,
    };

    let mut batch = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        let data = std::fs::read(path).map_err(|error| CliError::ReadInput {
            path: path.clone(),
            error,
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        batch.push((SourceImage::from_filename(&filename, data), template.clone()));
    }
    let submitted = batch.len();

    let (scheduler, mut client) = Scheduler::new(
        SchedulerConfig::with_workers(args.workers),
        Arc::new(ImagePipeline::new()),
    )
    .map_err(CliError::Pool)?;

    let shutdown = CancellationToken::new();
    let scheduler_handle = tokio::spawn(scheduler.run(shutdown.clone()));

    let ids = client.submit(batch).await;
    debug!(jobs = ids.len(), workers = args.workers, "Batch submitted");

    let mut outcomes: Vec<JobOutcome> = Vec::with_capacity(submitted);
    while outcomes.len() < submitted {
        let Some(outcome) = client.recv().await else {
            break;
        };
        if let Err(error) = &outcome.result {
            warn!(name = %error.name, error = %error.message, "Image failed");
        }
        outcomes.push(outcome);
    }

    shutdown.cancel();
    let _ = scheduler_handle.await;

    // Outcomes arrive in completion order; --stable-order restores the
    // input order via the job sequence numbers.
    if args.stable_order {
        outcomes.sort_by_key(|outcome| outcome.job.sequence());
    }

    let literals: Vec<&str> = outcomes
        .iter()
        .filter_map(|outcome| outcome.result.as_ref().ok())
        .map(|result| result.literal_text.as_str())
        .collect();

    let succeeded = literals.len();
    let failed = submitted - succeeded;
    if succeeded == 0 && failed > 0 {
        return Err(CliError::AllJobsFailed { failed });
    }

    let code = literals.join("\n");
    match &args.output {
        Some(path) => {
            let mut contents = code;
            contents.push('\n');
            std::fs::write(path, contents).map_err(|error| CliError::WriteOutput {
                path: path.clone(),
                error,
            })?;
        }
        None => println!("{}", code),
    }

    Ok(RunSummary { succeeded, failed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn png_file(dir: &std::path::Path, name: &str, pixel: [u8; 4]) -> std::path::PathBuf {
        let img = image::RgbaImage::from_pixel(1, 1, image::Rgba(pixel));
        let path = dir.join(name);
        img.save_with_format(&path, image::ImageFormat::Png)
            .expect("failed to write test PNG");
        path
    }

    fn args_for(inputs: &[&std::path::Path], extra: &[&str]) -> Args {
        let mut argv: Vec<String> = vec!["rasterlit".into()];
        argv.extend(inputs.iter().map(|p| p.to_string_lossy().into_owned()));
        argv.extend(extra.iter().map(|s| s.to_string()));
        Args::parse_from(argv)
    }

    #[tokio::test]
    async fn test_run_writes_literal_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = png_file(dir.path(), "red.png", [255, 0, 0, 255]);
        let output = dir.path().join("out.h");

        let args = args_for(
            &[input.as_path()],
            &[
                "--format",
                "rgb565",
                "--output",
                output.to_str().unwrap(),
            ],
        );

        let summary = run(args).await.unwrap();
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 0);

        let contents = std::fs::read_to_string(&output).unwrap();
        assert_eq!(contents, "const uint16_t red[] = {\n  0xf800\n};\n");
    }

    #[tokio::test]
    async fn test_run_stable_order_matches_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = png_file(dir.path(), "alpha.png", [255, 0, 0, 255]);
        let b = png_file(dir.path(), "beta.png", [0, 0, 255, 255]);
        let output = dir.path().join("out.h");

        let args = args_for(
            &[a.as_path(), b.as_path()],
            &[
                "--format",
                "rgb565",
                "--stable-order",
                "--output",
                output.to_str().unwrap(),
            ],
        );

        let summary = run(args).await.unwrap();
        assert_eq!(summary.succeeded, 2);

        let contents = std::fs::read_to_string(&output).unwrap();
        let alpha_at = contents.find("alpha").unwrap();
        let beta_at = contents.find("beta").unwrap();
        assert!(alpha_at < beta_at);
    }

    #[tokio::test]
    async fn test_run_isolates_corrupt_input() {
        let dir = tempfile::tempdir().unwrap();
        let good = png_file(dir.path(), "good.png", [0, 0, 0, 255]);
        let bad = dir.path().join("bad.png");
        std::fs::write(&bad, b"not an image").unwrap();
        let output = dir.path().join("out.h");

        let args = args_for(&[good.as_path(), bad.as_path()], &["--output", output.to_str().unwrap()]);

        let summary = run(args).await.unwrap();
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);

        let contents = std::fs::read_to_string(&output).unwrap();
        assert!(contents.contains("const uint8_t good[] PROGMEM"));
        assert!(!contents.contains("bad"));
    }

    #[tokio::test]
    async fn test_run_all_failures_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.png");
        std::fs::write(&bad, b"junk").unwrap();

        let args = args_for(&[bad.as_path()], &[]);
        let err = run(args).await.unwrap_err();
        assert!(matches!(err, CliError::AllJobsFailed { failed: 1 }));
    }

    #[tokio::test]
    async fn test_run_missing_input_is_an_error() {
        let args = args_for(&[std::path::Path::new("/nonexistent/x.png")], &[]);
        let err = run(args).await.unwrap_err();
        assert!(matches!(err, CliError::ReadInput { .. }));
    }

    #[tokio::test]
    async fn test_run_rejects_bad_background() {
        let dir = tempfile::tempdir().unwrap();
        let input = png_file(dir.path(), "x.png", [0, 0, 0, 255]);

        let args = args_for(&[input.as_path()], &["--background", "red"]);
        let err = run(args).await.unwrap_err();
        assert!(matches!(err, CliError::InvalidBackground(_)));
    }
}
