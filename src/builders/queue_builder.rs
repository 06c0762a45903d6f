//! Build a queue from configuration.

use std::time::Duration;

use crate::config::TickedQueueConfig;
use crate::core::{SchedulerError, TickedQueue};

/// Build a [`TickedQueue`] from validated configuration.
///
/// # Errors
///
/// Returns [`SchedulerError::InvalidConfig`] when validation fails.
pub fn build_queue(cfg: &TickedQueueConfig) -> Result<TickedQueue, SchedulerError> {
    cfg.validate().map_err(SchedulerError::InvalidConfig)?;

    let queue = TickedQueue::new();
    queue.set_loop_by_default(cfg.loop_by_default);
    queue.set_max_processed_per_update(cfg.max_processed_per_update);
    queue.set_max_processing_time_per_update(Duration::from_secs_f64(
        cfg.max_processing_time_secs,
    ));
    queue.set_paused(cfg.start_paused);
    Ok(queue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_applies_config() {
        let cfg = TickedQueueConfig::new()
            .with_loop_by_default(false)
            .with_max_processed_per_update(3)
            .with_max_processing_time_secs(0.5)
            .with_start_paused(true);

        let queue = build_queue(&cfg).unwrap();
        assert!(!queue.loop_by_default());
        assert_eq!(queue.max_processed_per_update(), 3);
        assert_eq!(
            queue.max_processing_time_per_update(),
            Duration::from_millis(500)
        );
        assert!(queue.is_paused());
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let cfg = TickedQueueConfig::new().with_max_processed_per_update(0);
        let result = build_queue(&cfg);
        assert!(matches!(result, Err(SchedulerError::InvalidConfig(_))));
    }
}
