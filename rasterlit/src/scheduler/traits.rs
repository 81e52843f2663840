//! Processing traits the pool is generic over.
//!
//! The scheduler knows nothing about images; it dispatches jobs to a
//! [`JobProcessor`] and collects outcomes. The production processor is
//! `pipeline::ImagePipeline`; tests substitute counting, delaying or
//! failing processors.

use std::sync::Arc;

use crate::error::WorkerInitError;

use super::job::Job;
use super::outcome::{EncodedResult, TaskError};

/// Converts one job into its outcome.
///
/// Called on a blocking thread; implementations are free to burn CPU.
/// Must not panic for expected failures - those are the `Err` arm.
pub trait JobProcessor: Send + Sync + 'static {
    /// Processes a single job to completion.
    fn process(&self, job: &Job) -> Result<EncodedResult, TaskError>;
}

impl<P: JobProcessor> JobProcessor for Arc<P> {
    fn process(&self, job: &Job) -> Result<EncodedResult, TaskError> {
        (**self).process(job)
    }
}

/// Creates one processor per pool slot at construction time.
///
/// A factory that returns `Err` for a slot drops that slot from the pool;
/// the pool degrades to fewer workers instead of failing outright. Any
/// `Fn(usize) -> Result<P, WorkerInitError>` closure is a factory.
pub trait ProcessorFactory {
    /// The processor type produced for each slot.
    type Processor: JobProcessor;

    /// Creates the processor for `slot`.
    fn create(&self, slot: usize) -> Result<Self::Processor, WorkerInitError>;
}

impl<P, F> ProcessorFactory for F
where
    P: JobProcessor,
    F: Fn(usize) -> Result<P, WorkerInitError>,
{
    type Processor = P;

    fn create(&self, slot: usize) -> Result<P, WorkerInitError> {
        self(slot)
    }
}
