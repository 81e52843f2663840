//! Rasterlit - raster images to source-level array literals.
//!
//! This library converts decoded bitmaps into the byte/word array
//! declarations embedded displays are fed from, and schedules that
//! conversion across a bounded worker pool so a batch of images is
//! processed concurrently with per-image failure isolation.
//!
//! # High-Level API
//!
//! ```ignore
//! use std::sync::Arc;
//! use rasterlit::config::ImageConfig;
//! use rasterlit::pipeline::ImagePipeline;
//! use rasterlit::scheduler::{Scheduler, SchedulerConfig};
//! use rasterlit::source::SourceImage;
//!
//! let (scheduler, mut client) =
//!     Scheduler::new(SchedulerConfig::default(), Arc::new(ImagePipeline::new()))?;
//! tokio::spawn(scheduler.run(shutdown));
//!
//! let image = SourceImage::from_filename("logo.png", bytes);
//! client.submit(vec![(image, ImageConfig::default())]).await;
//!
//! while let Some(outcome) = client.recv().await {
//!     match outcome.result {
//!         Ok(result) => println!("{}", result.literal_text),
//!         Err(error) => eprintln!("{}", error),
//!     }
//!     if client.is_drained() { break; }
//! }
//! ```

pub mod color;
pub mod config;
pub mod encode;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod scheduler;
pub mod source;
pub mod transform;

/// Version of the rasterlit library and CLI.
///
/// Synchronized across the workspace; injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
