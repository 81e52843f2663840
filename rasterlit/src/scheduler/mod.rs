//! Bounded concurrent task scheduling.
//!
//! This module drives conversion jobs through a fixed-size worker pool:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     BatchSubmitter                       │
//! │  submit (image, config) batches, get job IDs back       │
//! ├─────────────────────────────────────────────────────────┤
//! │                      Scheduler                           │
//! │  event loop: FIFO queue + slot table, single writer     │
//! ├─────────────────────────────────────────────────────────┤
//! │   worker 0    worker 1    ...    worker W-1              │
//! │   decode → transform → encode, one job at a time        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Guarantees
//!
//! - Every submitted job settles into exactly one [`JobOutcome`]; none is
//!   dropped or processed twice.
//! - Assignment is strict FIFO; completion order across workers is not
//!   submission order. Re-sort by [`JobId::sequence`] for a stable artifact.
//! - One failing job never aborts its siblings; the slot returns to the
//!   pool and keeps dispatching.
//! - [`SchedulerClient::is_drained`] is the sole batch-completion signal.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use rasterlit::pipeline::ImagePipeline;
//! use rasterlit::scheduler::{Scheduler, SchedulerConfig};
//!
//! let (scheduler, mut client) =
//!     Scheduler::new(SchedulerConfig::default(), Arc::new(ImagePipeline::new()))?;
//! tokio::spawn(scheduler.run(shutdown_token));
//!
//! client.submit(batch).await;
//! while let Some(outcome) = client.recv().await {
//!     // render results as they arrive
//!     if client.is_drained() { break; }
//! }
//! ```

mod client;
mod config;
mod core;
mod job;
mod outcome;
mod submitter;
mod traits;
mod worker;

pub use client::SchedulerClient;
pub use config::{SchedulerConfig, DEFAULT_BATCH_CHANNEL_CAPACITY, DEFAULT_WORKERS};
pub use core::Scheduler;
pub use job::{Job, JobId};
pub use outcome::{EncodedResult, JobOutcome, TaskError};
pub use submitter::BatchSubmitter;
pub use traits::{JobProcessor, ProcessorFactory};
