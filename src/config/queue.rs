//! Queue configuration structure.

use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_MAX_PROCESSED_PER_UPDATE, DEFAULT_MAX_PROCESSING_TIME_PER_UPDATE};

/// Queue configuration.
///
/// A declarative counterpart to the setters on
/// [`TickedQueue`](crate::core::TickedQueue), suitable for loading from a
/// host's settings file. Turn a validated config into a queue with
/// [`build_queue`](crate::builders::build_queue).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickedQueueConfig {
    /// Whether items added without an explicit loop flag will loop.
    pub loop_by_default: bool,
    /// Max callbacks fired in a single update call.
    pub max_processed_per_update: usize,
    /// Real-time budget for a single update call, in seconds.
    pub max_processing_time_secs: f64,
    /// Whether the queue starts paused.
    pub start_paused: bool,
}

impl Default for TickedQueueConfig {
    fn default() -> Self {
        Self {
            loop_by_default: true,
            max_processed_per_update: DEFAULT_MAX_PROCESSED_PER_UPDATE,
            max_processing_time_secs: DEFAULT_MAX_PROCESSING_TIME_PER_UPDATE.as_secs_f64(),
            start_paused: false,
        }
    }
}

impl TickedQueueConfig {
    /// Create a configuration with the default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default loop behavior.
    #[must_use]
    pub const fn with_loop_by_default(mut self, loop_by_default: bool) -> Self {
        self.loop_by_default = loop_by_default;
        self
    }

    /// Set the max callbacks fired per update call.
    #[must_use]
    pub const fn with_max_processed_per_update(mut self, max: usize) -> Self {
        self.max_processed_per_update = max;
        self
    }

    /// Set the per-update real-time budget, in seconds.
    #[must_use]
    pub const fn with_max_processing_time_secs(mut self, secs: f64) -> Self {
        self.max_processing_time_secs = secs;
        self
    }

    /// Set whether the queue starts paused.
    #[must_use]
    pub const fn with_start_paused(mut self, start_paused: bool) -> Self {
        self.start_paused = start_paused;
        self
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_processed_per_update == 0 {
            return Err("max_processed_per_update must be greater than 0".into());
        }
        if !self.max_processing_time_secs.is_finite() || self.max_processing_time_secs <= 0.0 {
            return Err("max_processing_time_secs must be a positive number".into());
        }
        Ok(())
    }

    /// Parse a configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// Returns a parse or validation error description.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(TickedQueueConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_max_processed() {
        let cfg = TickedQueueConfig::new().with_max_processed_per_update(0);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_non_positive_budget() {
        let cfg = TickedQueueConfig::new().with_max_processing_time_secs(0.0);
        assert!(cfg.validate().is_err());

        let cfg = TickedQueueConfig::new().with_max_processing_time_secs(-1.0);
        assert!(cfg.validate().is_err());

        let cfg = TickedQueueConfig::new().with_max_processing_time_secs(f64::NAN);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_from_json_str() {
        let cfg = TickedQueueConfig::from_json_str(
            r#"{
                "loop_by_default": false,
                "max_processed_per_update": 4,
                "max_processing_time_secs": 0.016,
                "start_paused": true
            }"#,
        )
        .unwrap();

        assert!(!cfg.loop_by_default);
        assert_eq!(cfg.max_processed_per_update, 4);
        assert!(cfg.start_paused);
    }

    #[test]
    fn test_from_json_str_rejects_invalid() {
        let result = TickedQueueConfig::from_json_str(
            r#"{
                "loop_by_default": true,
                "max_processed_per_update": 0,
                "max_processing_time_secs": 0.1,
                "start_paused": false
            }"#,
        );
        assert!(result.is_err());
    }
}
