//! Builders to construct a configured queue.

/// Build a queue from configuration.
pub mod queue_builder;

pub use queue_builder::build_queue;
