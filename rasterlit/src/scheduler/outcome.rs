//! Job outcomes: the encoded literal or the error that replaced it.
//!
//! Exactly one outcome exists per submitted job. Outcomes flow to the
//! caller in completion order, which for a multi-worker pool is not
//! submission order; [`JobOutcome::job`] carries the sequence number needed
//! to re-sort when a stable artifact is required.

use std::fmt;

use crate::config::PixelEncoding;

use super::job::JobId;

/// The successful product of one job.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedResult {
    /// Image name (pre-sanitization).
    pub name: String,

    /// Encoding the literal was produced with.
    pub encoding: PixelEncoding,

    /// Post-transform width, not the source width.
    pub width: u32,

    /// Post-transform height.
    pub height: u32,

    /// The generated array declaration.
    pub literal_text: String,
}

/// Terminal failure of one job. Does not affect sibling jobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskError {
    /// Image name the failure belongs to.
    pub name: String,

    /// Human-readable cause.
    pub message: String,
}

impl TaskError {
    /// Creates a task error.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

impl std::error::Error for TaskError {}

/// One completed job, success or failure.
#[derive(Debug, Clone)]
pub struct JobOutcome {
    /// The job this outcome settles.
    pub job: JobId,

    /// The literal, or the error that replaced it.
    pub result: Result<EncodedResult, TaskError>,
}

impl JobOutcome {
    /// Image name, regardless of outcome.
    pub fn name(&self) -> &str {
        match &self.result {
            Ok(result) => &result.name,
            Err(error) => &error.name,
        }
    }

    /// True when the job produced a literal.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Internal completion message from a worker slot to the coordinator.
pub(crate) struct SlotCompletion {
    /// Index of the reporting slot.
    pub slot: usize,

    /// The settled outcome.
    pub outcome: JobOutcome,
}
