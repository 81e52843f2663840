//! Worker slots and the per-worker run loop.
//!
//! Each slot owns a capacity-1 job channel to a spawned worker task. The
//! capacity bound makes double assignment impossible: an idle slot's
//! channel is always empty, and the coordinator only assigns to idle slots.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::job::Job;
use super::outcome::{JobOutcome, SlotCompletion};
use super::traits::JobProcessor;

/// Lifecycle state of a pool slot, tracked by the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlotState {
    /// Free to take the next queued job.
    Idle,
    /// Processing an assigned job.
    Busy,
    /// Worker task is gone; slot no longer participates in dispatch.
    Retired,
}

/// Coordinator-side handle to one worker.
pub(crate) struct WorkerSlot {
    /// Slot index, used in completion messages.
    pub id: usize,

    /// Current state; only the coordinator reads or writes this.
    pub state: SlotState,

    sender: mpsc::Sender<Job>,
}

impl WorkerSlot {
    /// Spawns the worker task for this slot.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn<P: JobProcessor>(
        id: usize,
        processor: P,
        completions: mpsc::UnboundedSender<SlotCompletion>,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(1);
        tokio::spawn(run_worker(id, processor, receiver, completions));

        Self {
            id,
            state: SlotState::Idle,
            sender,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == SlotState::Idle
    }

    /// Hands a job to the worker and marks the slot busy.
    ///
    /// Returns the job back if the worker is unreachable; the slot retires
    /// and the coordinator requeues the job for another slot.
    pub fn try_assign(&mut self, job: Job) -> Result<(), Job> {
        match self.sender.try_send(job) {
            Ok(()) => {
                self.state = SlotState::Busy;
                Ok(())
            }
            Err(mpsc::error::TrySendError::Closed(job)) => {
                warn!(slot = self.id, "Worker channel closed, retiring slot");
                self.state = SlotState::Retired;
                Err(job)
            }
            Err(mpsc::error::TrySendError::Full(job)) => {
                // An idle slot's channel is empty; a full channel means the
                // state table is out of sync. Keep the job queued.
                warn!(slot = self.id, "Assigned to a non-empty worker channel");
                Err(job)
            }
        }
    }
}

/// Per-worker loop: receive a job, process it off the async runtime,
/// report the outcome, repeat until the channel closes.
async fn run_worker<P: JobProcessor>(
    slot: usize,
    processor: P,
    mut jobs: mpsc::Receiver<Job>,
    completions: mpsc::UnboundedSender<SlotCompletion>,
) {
    let processor = Arc::new(processor);

    while let Some(job) = jobs.recv().await {
        let job_id = job.id;
        let name = job.image.name.clone();
        let processor = Arc::clone(&processor);

        // Decode, transform and encode are CPU-bound; keep them off the
        // async worker threads.
        let result = tokio::task::spawn_blocking(move || processor.process(&job)).await;

        let outcome = match result {
            Ok(result) => JobOutcome {
                job: job_id,
                result,
            },
            Err(join_error) => JobOutcome {
                job: job_id,
                result: Err(super::outcome::TaskError::new(
                    name,
                    format!("worker panicked: {}", join_error),
                )),
            },
        };

        if completions.send(SlotCompletion { slot, outcome }).is_err() {
            break;
        }
    }

    debug!(slot, "Worker stopped");
}
