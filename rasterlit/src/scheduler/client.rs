//! The caller-facing surface of a running scheduler.
//!
//! A [`SchedulerClient`] bundles the three things a consumer needs: the
//! batch submitter, the live outcome stream (completion order), and the
//! drained flag that says when a batch has fully settled.

use tokio::sync::{mpsc, watch};

use crate::config::ImageConfig;
use crate::source::SourceImage;

use super::job::JobId;
use super::outcome::JobOutcome;
use super::submitter::BatchSubmitter;

/// Client half returned by `Scheduler::new`.
#[derive(Debug)]
pub struct SchedulerClient {
    submitter: BatchSubmitter,
    outcomes: mpsc::UnboundedReceiver<JobOutcome>,
    drained: watch::Receiver<bool>,
}

impl SchedulerClient {
    pub(crate) fn new(
        submitter: BatchSubmitter,
        outcomes: mpsc::UnboundedReceiver<JobOutcome>,
        drained: watch::Receiver<bool>,
    ) -> Self {
        Self {
            submitter,
            outcomes,
            drained,
        }
    }

    /// Returns a cloneable submitter for this scheduler.
    pub fn submitter(&self) -> BatchSubmitter {
        self.submitter.clone()
    }

    /// Submits a batch; see [`BatchSubmitter::submit`].
    pub async fn submit(&self, images: Vec<(SourceImage, ImageConfig)>) -> Vec<JobId> {
        self.submitter.submit(images).await
    }

    /// Receives the next outcome, in completion order.
    ///
    /// Returns `None` once the scheduler has shut down and all buffered
    /// outcomes have been read.
    pub async fn recv(&mut self) -> Option<JobOutcome> {
        self.outcomes.recv().await
    }

    /// Non-blocking variant of [`recv`](Self::recv).
    pub fn try_recv(&mut self) -> Option<JobOutcome> {
        self.outcomes.try_recv().ok()
    }

    /// True when no jobs are queued or in flight.
    pub fn is_drained(&self) -> bool {
        *self.drained.borrow()
    }

    /// Returns a watch on the drained flag, e.g. for a UI's processing
    /// indicator.
    pub fn drained_watch(&self) -> watch::Receiver<bool> {
        self.drained.clone()
    }

    /// Waits until the scheduler is drained.
    ///
    /// Authoritative once the corresponding `submit` call has returned:
    /// submission is acknowledged by the coordinator, so a non-empty batch
    /// has already lowered the flag by then. Returns immediately when the
    /// pool is already drained.
    pub async fn wait_drained(&mut self) {
        loop {
            if *self.drained.borrow_and_update() {
                return;
            }
            if self.drained.changed().await.is_err() {
                // Coordinator gone; nothing further will complete.
                return;
            }
        }
    }
}
