//! Batch submission interface.
//!
//! [`BatchSubmitter`] is the write half of the caller surface. It turns
//! (image, config) pairs into jobs, ships them to the coordinator and waits
//! for the enqueue acknowledgement - not for completion. Once `submit`
//! returns, the drained flag is authoritative for the new batch.

use tokio::sync::{mpsc, oneshot};

use crate::config::ImageConfig;
use crate::source::SourceImage;

use super::job::{Job, JobId};

/// A batch on its way to the coordinator.
pub(crate) struct SubmittedBatch {
    /// Jobs in submission order.
    pub jobs: Vec<Job>,

    /// Acknowledged once the coordinator has enqueued the jobs.
    pub ack: oneshot::Sender<()>,
}

/// Handle for submitting batches to a running scheduler.
///
/// Cloneable; clones share the same queue.
#[derive(Clone, Debug)]
pub struct BatchSubmitter {
    sender: mpsc::Sender<SubmittedBatch>,
}

impl BatchSubmitter {
    pub(crate) fn new(sender: mpsc::Sender<SubmittedBatch>) -> Self {
        Self { sender }
    }

    /// Submits a batch and returns the assigned job IDs in submission order.
    ///
    /// # Panics
    ///
    /// Panics if the scheduler has been dropped (channel closed).
    pub async fn submit(&self, images: Vec<(SourceImage, ImageConfig)>) -> Vec<JobId> {
        self.try_submit(images)
            .await
            .expect("Scheduler channel closed")
    }

    /// Attempts to submit a batch.
    ///
    /// Returns `None` if the scheduler has been dropped.
    pub async fn try_submit(
        &self,
        images: Vec<(SourceImage, ImageConfig)>,
    ) -> Option<Vec<JobId>> {
        let jobs: Vec<Job> = images
            .into_iter()
            .map(|(image, config)| Job::new(image, config))
            .collect();
        let ids: Vec<JobId> = jobs.iter().map(|job| job.id).collect();

        let (ack_tx, ack_rx) = oneshot::channel();
        self.sender
            .send(SubmittedBatch { jobs, ack: ack_tx })
            .await
            .ok()?;
        ack_rx.await.ok()?;

        Some(ids)
    }
}
