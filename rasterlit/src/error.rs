//! Error types for the conversion pipeline and worker pool.
//!
//! Errors are categorized by stage. Every stage failure is captured at the
//! job boundary and surfaced as a `TaskError` in the outcome stream; nothing
//! propagates past the scheduler or aborts sibling jobs.

use thiserror::Error;

/// Errors from individual pipeline stages.
#[derive(Debug, Error)]
pub enum StageError {
    /// The source bytes could not be decoded into a bitmap.
    #[error("image decode failed: {0}")]
    DecodeFailed(String),

    /// Literal encoding failed. Encoding is total on a well-formed buffer,
    /// so this is a defensive case (e.g. a worker panic captured mid-encode).
    #[error("literal encoding failed: {0}")]
    EncodeFailed(String),
}

impl From<image::ImageError> for StageError {
    fn from(err: image::ImageError) -> Self {
        StageError::DecodeFailed(err.to_string())
    }
}

/// A pool slot failed to start its worker.
///
/// Construction drops the slot and continues with a smaller pool; this
/// error only surfaces per-slot in logs, or as [`PoolExhaustedError`]
/// when every slot fails.
#[derive(Debug, Clone, Error)]
#[error("worker {slot} failed to initialize: {message}")]
pub struct WorkerInitError {
    /// Index of the slot that failed.
    pub slot: usize,
    /// Human-readable cause.
    pub message: String,
}

impl WorkerInitError {
    /// Creates a new worker init error for the given slot.
    pub fn new(slot: usize, message: impl Into<String>) -> Self {
        Self {
            slot,
            message: message.into(),
        }
    }
}

/// No worker in the pool could be started.
#[derive(Debug, Clone, Error)]
#[error("no workers could be started ({failed} of {failed} slots failed)")]
pub struct PoolExhaustedError {
    /// Number of slots that failed to initialize.
    pub failed: usize,
}
