//! Job identity and the unit of scheduling.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::ImageConfig;
use crate::source::SourceImage;

/// Global counter for generating job IDs.
static JOB_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Unique identifier for a job.
///
/// IDs are assigned in submission order from a monotonic counter, so the
/// sequence number doubles as the submission index a consumer needs to
/// re-sort completion-ordered outcomes.
#[derive(Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct JobId(u64);

impl JobId {
    /// Allocates the next job ID.
    pub(crate) fn next() -> Self {
        Self(JOB_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the monotonic sequence number.
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JobId(job-{})", self.0)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job-{}", self.0)
    }
}

/// One (image, configuration) unit of work.
///
/// Jobs are created at submission time, are immutable, and are consumed by
/// exactly one worker. The configuration is the caller's copy; nothing in
/// the pool mutates it.
#[derive(Debug, Clone)]
pub struct Job {
    /// Submission-ordered identifier.
    pub id: JobId,

    /// The image to convert.
    pub image: SourceImage,

    /// Transform and encoding parameters.
    pub config: ImageConfig,
}

impl Job {
    /// Creates a job with a freshly allocated ID.
    pub fn new(image: SourceImage, config: ImageConfig) -> Self {
        Self {
            id: JobId::next(),
            image,
            config,
        }
    }
}
