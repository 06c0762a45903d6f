//! Core scheduling engine: capability contract, queue entries, and the queue.

/// Error types for scheduler operations.
pub mod error;
/// The capability contract for schedulable work items.
pub mod ticked;
/// Closure-backed default implementation of the capability contract.
pub mod ticked_object;
mod queue_item;
/// The ticked priority queue and its update pass.
pub mod queue;

pub use error::{AppResult, SchedulerError};
pub use queue::{
    ExceptionHandler, TickedQueue, DEFAULT_MAX_PROCESSED_PER_UPDATE,
    DEFAULT_MAX_PROCESSING_TIME_PER_UPDATE,
};
pub use ticked::{Ticked, DEFAULT_PRIORITY, DEFAULT_TICK_LENGTH};
pub use ticked_object::TickedObject;
