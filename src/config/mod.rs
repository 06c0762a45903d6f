//! Configuration models for queue limits and defaults.

/// Queue configuration structure.
pub mod queue;

pub use queue::TickedQueueConfig;
