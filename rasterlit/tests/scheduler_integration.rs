//! Integration tests for the worker-pool scheduler.
//!
//! These tests verify the complete scheduling workflow:
//! - Batch submission and outcome delivery
//! - Concurrency bounded by the pool size
//! - Per-job failure isolation
//! - Pool degradation when slots fail to initialize
//! - Drained signalling and graceful shutdown

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use rasterlit::config::{ImageConfig, PixelEncoding};
use rasterlit::error::WorkerInitError;
use rasterlit::scheduler::{
    EncodedResult, Job, JobOutcome, JobProcessor, Scheduler, SchedulerClient, SchedulerConfig,
    TaskError,
};
use rasterlit::source::SourceImage;

// =============================================================================
// Test Helpers
// =============================================================================

fn dummy_result(name: &str) -> EncodedResult {
    EncodedResult {
        name: name.to_string(),
        encoding: PixelEncoding::Rgb565,
        width: 1,
        height: 1,
        literal_text: format!("const uint16_t {}[] = {{\n  0x0000\n}};", name),
    }
}

fn batch(names: &[&str]) -> Vec<(SourceImage, ImageConfig)> {
    names
        .iter()
        .map(|name| (SourceImage::new(*name, vec![]), ImageConfig::default()))
        .collect()
}

async fn collect_outcomes(client: &mut SchedulerClient, count: usize) -> Vec<JobOutcome> {
    let mut outcomes = Vec::with_capacity(count);
    for _ in 0..count {
        let outcome = tokio::time::timeout(Duration::from_secs(5), client.recv())
            .await
            .expect("timed out waiting for outcome")
            .expect("outcome stream closed early");
        outcomes.push(outcome);
    }
    outcomes
}

/// Processor that sleeps per job and tracks concurrent entries.
struct DelayProcessor {
    delay: Duration,
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl DelayProcessor {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }
}

impl JobProcessor for DelayProcessor {
    fn process(&self, job: &Job) -> Result<EncodedResult, TaskError> {
        let running = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(running, Ordering::SeqCst);

        std::thread::sleep(self.delay);

        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(dummy_result(&job.image.name))
    }
}

/// Processor that fails jobs whose image name starts with "bad".
struct FlakyProcessor;

impl JobProcessor for FlakyProcessor {
    fn process(&self, job: &Job) -> Result<EncodedResult, TaskError> {
        if job.image.name.starts_with("bad") {
            Err(TaskError::new(
                job.image.name.clone(),
                "Failed to process image: unreadable bytes",
            ))
        } else {
            Ok(dummy_result(&job.image.name))
        }
    }
}

/// Processor whose delay depends on the image name, to skew completion order.
struct NamedDelayProcessor;

impl JobProcessor for NamedDelayProcessor {
    fn process(&self, job: &Job) -> Result<EncodedResult, TaskError> {
        if job.image.name == "slow" {
            std::thread::sleep(Duration::from_millis(150));
        }
        Ok(dummy_result(&job.image.name))
    }
}

// =============================================================================
// Integration Tests
// =============================================================================

#[tokio::test]
async fn test_every_job_settles_exactly_once() {
    let (scheduler, mut client) = Scheduler::new(
        SchedulerConfig::with_workers(4),
        Arc::new(DelayProcessor::new(Duration::from_millis(5))),
    )
    .unwrap();
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(scheduler.run(shutdown.clone()));

    let names: Vec<String> = (0..12).map(|i| format!("img-{}", i)).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let ids = client.submit(batch(&name_refs)).await;
    assert_eq!(ids.len(), 12);

    let outcomes = collect_outcomes(&mut client, 12).await;

    // One outcome per job, no duplicates.
    let seen: HashSet<u64> = outcomes.iter().map(|o| o.job.sequence()).collect();
    assert_eq!(seen.len(), 12);
    let expected: HashSet<u64> = ids.iter().map(|id| id.sequence()).collect();
    assert_eq!(seen, expected);

    client.wait_drained().await;
    assert!(client.is_drained());

    shutdown.cancel();
    let _ = handle.await;
}

#[tokio::test]
async fn test_concurrency_bounded_by_pool_size() {
    let processor = Arc::new(DelayProcessor::new(Duration::from_millis(100)));
    let (scheduler, mut client) =
        Scheduler::new(SchedulerConfig::with_workers(3), Arc::clone(&processor)).unwrap();
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(scheduler.run(shutdown.clone()));

    let names: Vec<String> = (0..10).map(|i| format!("img-{}", i)).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    client.submit(batch(&name_refs)).await;

    let _ = collect_outcomes(&mut client, 10).await;

    // All three slots saturate, and never more than three jobs run at once.
    assert_eq!(processor.peak.load(Ordering::SeqCst), 3);
    assert_eq!(processor.active.load(Ordering::SeqCst), 0);

    shutdown.cancel();
    let _ = handle.await;
}

#[tokio::test]
async fn test_failure_isolation() {
    let (scheduler, mut client) =
        Scheduler::new(SchedulerConfig::with_workers(2), Arc::new(FlakyProcessor)).unwrap();
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(scheduler.run(shutdown.clone()));

    client
        .submit(batch(&["ok-1", "ok-2", "bad-3", "ok-4", "ok-5", "ok-6"]))
        .await;

    let outcomes = collect_outcomes(&mut client, 6).await;

    let failures: Vec<&JobOutcome> = outcomes.iter().filter(|o| !o.is_success()).collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].name(), "bad-3");

    let successes = outcomes.iter().filter(|o| o.is_success()).count();
    assert_eq!(successes, 5);

    client.wait_drained().await;
    assert!(client.is_drained());

    shutdown.cancel();
    let _ = handle.await;
}

#[tokio::test]
async fn test_degraded_pool_still_drains() {
    // Two of three slots refuse to start; the survivor handles everything.
    let factory = |slot: usize| -> Result<FlakyProcessor, WorkerInitError> {
        if slot < 2 {
            Err(WorkerInitError::new(slot, "init refused"))
        } else {
            Ok(FlakyProcessor)
        }
    };
    let (scheduler, mut client) =
        Scheduler::with_factory(SchedulerConfig::with_workers(3), factory).unwrap();
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(scheduler.run(shutdown.clone()));

    client.submit(batch(&["a", "b", "c", "d"])).await;

    let outcomes = collect_outcomes(&mut client, 4).await;
    assert!(outcomes.iter().all(|o| o.is_success()));

    client.wait_drained().await;

    shutdown.cancel();
    let _ = handle.await;
}

#[tokio::test]
async fn test_resort_by_sequence_restores_submission_order() {
    let (scheduler, mut client) = Scheduler::new(
        SchedulerConfig::with_workers(2),
        Arc::new(NamedDelayProcessor),
    )
    .unwrap();
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(scheduler.run(shutdown.clone()));

    // "slow" is submitted first but finishes last.
    let ids = client.submit(batch(&["slow", "q1", "q2", "q3", "q4"])).await;

    let mut outcomes = collect_outcomes(&mut client, 5).await;
    assert_ne!(
        outcomes.first().map(|o| o.job),
        Some(ids[0]),
        "slow job should not complete first"
    );

    outcomes.sort_by_key(|o| o.job.sequence());
    let resorted: Vec<_> = outcomes.iter().map(|o| o.job).collect();
    assert_eq!(resorted, ids);

    shutdown.cancel();
    let _ = handle.await;
}

#[tokio::test]
async fn test_multiple_batches_share_the_pool() {
    let (scheduler, mut client) = Scheduler::new(
        SchedulerConfig::with_workers(2),
        Arc::new(DelayProcessor::new(Duration::from_millis(5))),
    )
    .unwrap();
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(scheduler.run(shutdown.clone()));

    client.submit(batch(&["a", "b", "c"])).await;
    client.submit(batch(&["d", "e"])).await;

    let outcomes = collect_outcomes(&mut client, 5).await;
    let names: HashSet<String> = outcomes.iter().map(|o| o.name().to_string()).collect();
    assert_eq!(names.len(), 5);

    client.wait_drained().await;

    shutdown.cancel();
    let _ = handle.await;
}

#[tokio::test]
async fn test_drained_flag_lifecycle() {
    let (scheduler, mut client) = Scheduler::new(
        SchedulerConfig::with_workers(2),
        Arc::new(DelayProcessor::new(Duration::from_millis(30))),
    )
    .unwrap();
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(scheduler.run(shutdown.clone()));

    // Idle pool reports drained.
    assert!(client.is_drained());

    // A submitted batch lowers the flag before submit() returns.
    client.submit(batch(&["a", "b", "c", "d"])).await;
    assert!(!client.is_drained());

    let _ = collect_outcomes(&mut client, 4).await;
    client.wait_drained().await;
    assert!(client.is_drained());

    shutdown.cancel();
    let _ = handle.await;
}

#[tokio::test]
async fn test_graceful_shutdown_with_jobs_in_flight() {
    let (scheduler, client) = Scheduler::new(
        SchedulerConfig::with_workers(2),
        Arc::new(DelayProcessor::new(Duration::from_millis(100))),
    )
    .unwrap();
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(scheduler.run(shutdown.clone()));

    client.submit(batch(&["a", "b", "c", "d", "e", "f"])).await;

    tokio::time::sleep(Duration::from_millis(20)).await;
    shutdown.cancel();

    let result = tokio::time::timeout(Duration::from_secs(2), handle).await;
    assert!(result.is_ok(), "Scheduler should shut down gracefully");
}

#[tokio::test]
async fn test_duplicate_names_pass_through() {
    let (scheduler, mut client) =
        Scheduler::new(SchedulerConfig::with_workers(2), Arc::new(FlakyProcessor)).unwrap();
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(scheduler.run(shutdown.clone()));

    let ids = client.submit(batch(&["logo", "logo", "logo"])).await;
    assert_eq!(ids.len(), 3);

    let outcomes = collect_outcomes(&mut client, 3).await;
    assert!(outcomes.iter().all(|o| o.name() == "logo"));
    // Distinct jobs despite identical names.
    let seen: HashSet<u64> = outcomes.iter().map(|o| o.job.sequence()).collect();
    assert_eq!(seen.len(), 3);

    shutdown.cancel();
    let _ = handle.await;
}
