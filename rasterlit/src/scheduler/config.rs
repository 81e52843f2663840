//! Scheduler configuration.

/// Default worker pool size.
pub const DEFAULT_WORKERS: usize = 4;

/// Default batch submission channel capacity.
pub const DEFAULT_BATCH_CHANNEL_CAPACITY: usize = 16;

/// Configuration for the worker pool.
#[derive(Clone, Debug)]
pub struct SchedulerConfig {
    /// Number of worker slots to start.
    pub workers: usize,

    /// Capacity of the batch submission channel.
    pub batch_channel_capacity: usize,
}

impl SchedulerConfig {
    /// Configuration with a specific pool size.
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers,
            ..Self::default()
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            batch_channel_capacity: DEFAULT_BATCH_CHANNEL_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SchedulerConfig::default();
        assert_eq!(config.workers, DEFAULT_WORKERS);
        assert_eq!(config.batch_channel_capacity, DEFAULT_BATCH_CHANNEL_CAPACITY);
    }

    #[test]
    fn test_with_workers() {
        let config = SchedulerConfig::with_workers(2);
        assert_eq!(config.workers, 2);
        assert_eq!(config.batch_channel_capacity, DEFAULT_BATCH_CHANNEL_CAPACITY);
    }
}
