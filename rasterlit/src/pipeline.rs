//! Composition root: decode, transform, encode.
//!
//! [`ImagePipeline`] is the production [`JobProcessor`]. It runs the three
//! stages for one job and folds any stage failure into the job's
//! [`TaskError`], carrying the image name for the caller's error listing.

use tracing::debug;

use crate::encode;
use crate::scheduler::{EncodedResult, Job, JobProcessor, TaskError};
use crate::transform;

/// Converts one job's image into its literal declaration.
#[derive(Debug, Default, Clone)]
pub struct ImagePipeline;

impl ImagePipeline {
    /// Creates the pipeline.
    pub fn new() -> Self {
        Self
    }
}

impl JobProcessor for ImagePipeline {
    fn process(&self, job: &Job) -> Result<EncodedResult, TaskError> {
        let name = &job.image.name;

        let source = job.image.decode().map_err(|err| {
            TaskError::new(name.clone(), format!("Failed to process image: {}", err))
        })?;

        let buffer = transform::transform(&source, &job.config);
        let literal_text = encode::encode(&buffer, name, job.config.pixel_encoding);

        debug!(
            job = %job.id,
            name = %name,
            encoding = %job.config.pixel_encoding,
            width = buffer.width(),
            height = buffer.height(),
            "Encoded literal"
        );

        Ok(EncodedResult {
            name: name.clone(),
            encoding: job.config.pixel_encoding,
            width: buffer.width(),
            height: buffer.height(),
            literal_text,
        })
    }
}
