//! Scheduler core - coordinator state and event loop.
//!
//! The [`Scheduler`] owns the FIFO job queue and the slot table, and is the
//! only writer of either. Workers and submitters reach it exclusively
//! through channels, so queue and slot mutations are short, non-interleaved
//! critical sections by construction.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::PoolExhaustedError;

use super::client::SchedulerClient;
use super::config::SchedulerConfig;
use super::outcome::{JobOutcome, SlotCompletion};
use super::submitter::{BatchSubmitter, SubmittedBatch};
use super::traits::{JobProcessor, ProcessorFactory};
use super::worker::WorkerSlot;
use super::Job;

/// Bounded-concurrency dispatcher for image conversion jobs.
///
/// Dispatch policy is strict FIFO: jobs are assigned to idle slots in
/// queue order, and a completing worker immediately picks up the queue
/// head (dispatch-on-completion). Completion order across workers is
/// unordered relative to submission order.
pub struct Scheduler {
    slots: Vec<WorkerSlot>,
    queue: VecDeque<Job>,
    busy: usize,
    batch_rx: mpsc::Receiver<SubmittedBatch>,
    completion_rx: mpsc::UnboundedReceiver<SlotCompletion>,
    outcome_tx: mpsc::UnboundedSender<JobOutcome>,
    drained_tx: watch::Sender<bool>,
}

impl Scheduler {
    /// Creates a scheduler whose slots share one processor.
    ///
    /// Must be called from within a Tokio runtime; worker tasks are spawned
    /// immediately.
    ///
    /// # Errors
    ///
    /// Returns [`PoolExhaustedError`] when no worker slot could be started.
    pub fn new<P: JobProcessor>(
        config: SchedulerConfig,
        processor: Arc<P>,
    ) -> Result<(Self, SchedulerClient), PoolExhaustedError> {
        let factory = move |_slot: usize| -> Result<Arc<P>, crate::error::WorkerInitError> {
            Ok(Arc::clone(&processor))
        };
        Self::with_factory(config, factory)
    }

    /// Creates a scheduler with a per-slot processor factory.
    ///
    /// Slots whose factory call fails are dropped from the pool with a
    /// warning; the pool degrades to fewer workers rather than failing for
    /// one bad slot.
    ///
    /// # Errors
    ///
    /// Returns [`PoolExhaustedError`] when every slot fails (or the
    /// configured pool size is zero).
    pub fn with_factory<F: ProcessorFactory>(
        config: SchedulerConfig,
        factory: F,
    ) -> Result<(Self, SchedulerClient), PoolExhaustedError> {
        let (batch_tx, batch_rx) = mpsc::channel(config.batch_channel_capacity);
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let (drained_tx, drained_rx) = watch::channel(true);

        let mut slots = Vec::with_capacity(config.workers);
        let mut failed = 0;

        for slot_index in 0..config.workers {
            // Slot IDs index into the final table, so they only advance for
            // slots that actually started.
            let slot_id = slots.len();
            match factory.create(slot_index) {
                Ok(processor) => {
                    slots.push(WorkerSlot::spawn(
                        slot_id,
                        processor,
                        completion_tx.clone(),
                    ));
                }
                Err(err) => {
                    warn!(slot = slot_index, error = %err, "Dropping pool slot");
                    failed += 1;
                }
            }
        }

        if slots.is_empty() {
            return Err(PoolExhaustedError { failed });
        }

        if failed > 0 {
            info!(
                requested = config.workers,
                started = slots.len(),
                "Pool started degraded"
            );
        }

        let scheduler = Self {
            slots,
            queue: VecDeque::new(),
            busy: 0,
            batch_rx,
            completion_rx,
            outcome_tx,
            drained_tx,
        };

        let client = SchedulerClient::new(BatchSubmitter::new(batch_tx), outcome_rx, drained_rx);
        Ok((scheduler, client))
    }

    /// Runs the coordinator until shutdown is signalled.
    ///
    /// In-flight jobs are not torn down on shutdown; workers finish their
    /// current job and exit when their channels close.
    pub async fn run(mut self, shutdown: CancellationToken) {
        info!(workers = self.slots.len(), "Scheduler started");

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    info!(
                        queued = self.queue.len(),
                        busy = self.busy,
                        "Scheduler shutting down"
                    );
                    break;
                }

                Some(batch) = self.batch_rx.recv() => {
                    self.handle_submission(batch);
                }

                Some(completion) = self.completion_rx.recv() => {
                    self.handle_completion(completion);
                }

                else => break,
            }
        }
    }

    /// Appends a batch to the queue and saturates idle slots.
    fn handle_submission(&mut self, batch: SubmittedBatch) {
        let SubmittedBatch { jobs, ack } = batch;

        debug!(
            count = jobs.len(),
            queued = self.queue.len(),
            "Batch submitted"
        );

        self.queue.extend(jobs);
        self.update_drained();
        self.dispatch();

        // Ack after the queue and drained flag reflect the batch, so a
        // caller returning from submit() observes consistent state.
        let _ = ack.send(());
    }

    /// Records an outcome, frees the slot and dispatches the queue head.
    fn handle_completion(&mut self, completion: SlotCompletion) {
        let SlotCompletion { slot, outcome } = completion;

        if let Some(worker) = self.slots.get_mut(slot) {
            if !worker.is_idle() {
                worker.state = super::worker::SlotState::Idle;
                self.busy = self.busy.saturating_sub(1);
            }
        }

        match &outcome.result {
            Ok(result) => debug!(job = %outcome.job, name = %result.name, "Job completed"),
            Err(error) => warn!(
                job = %outcome.job,
                name = %error.name,
                error = %error.message,
                "Job failed"
            ),
        }

        // The receiver may be gone if the caller abandoned the batch;
        // remaining jobs still run to completion.
        let _ = self.outcome_tx.send(outcome);

        self.dispatch();
        self.update_drained();
    }

    /// Assigns queued jobs to idle slots, FIFO.
    fn dispatch(&mut self) {
        for slot in &mut self.slots {
            if !slot.is_idle() {
                continue;
            }
            let Some(job) = self.queue.pop_front() else {
                break;
            };

            let job_id = job.id;
            match slot.try_assign(job) {
                Ok(()) => {
                    self.busy += 1;
                    debug!(slot = slot.id, job = %job_id, "Job assigned");
                }
                Err(job) => {
                    // Slot retired itself; put the job back for another.
                    self.queue.push_front(job);
                }
            }
        }
    }

    /// Publishes the drained flag when it changes.
    fn update_drained(&self) {
        let drained = self.queue.is_empty() && self.busy == 0;
        if *self.drained_tx.borrow() != drained {
            self.drained_tx.send_replace(drained);
            if drained {
                info!("All jobs drained");
            }
        }
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("slots", &self.slots.len())
            .field("queued", &self.queue.len())
            .field("busy", &self.busy)
            .finish_non_exhaustive()
    }
}
