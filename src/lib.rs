//! # Ticked Scheduler
//!
//! A cooperative, time-sliced priority scheduler for poll-driven applications.
//!
//! This library provides a scheduling layer for hosts that own their own main
//! loop — game engines, simulations, editors — and want periodic work spread
//! across frames without threads or timers. Work items are registered with a
//! priority and a tick interval; every frame the host calls [`TickedQueue::update`]
//! once and the queue fires the callbacks that have come due, highest priority
//! first, under a per-call budget.
//!
//! ## Core Problem Solved
//!
//! Frame-driven programs have scheduling constraints that timer wheels and
//! async executors don't address:
//!
//! - **No spare threads**: all work must run synchronously inside the host's
//!   update call, on the host's thread
//! - **Bounded frames**: a single update may only spend so much time and fire
//!   so many callbacks before the frame budget is blown
//! - **Caller-owned time**: the host supplies the clock, so slow motion,
//!   pausing, and deterministic testing come for free
//! - **Self-modifying work**: a callback may deregister other work, or its
//!   own, while the queue is mid-pass
//!
//! ## Key Features
//!
//! - **Priority ordering**: lower priority values fire first; equal priorities
//!   fire in due-time order
//! - **Per-call saturation guards**: both a max callback count and a real-time
//!   budget bound every [`TickedQueue::update`] call; deferred work is never
//!   skipped, only delayed
//! - **Looping or one-shot registration**: items re-arm themselves after
//!   firing, or fire once and drop out
//! - **Re-entrancy safe**: callbacks may call `add`, `remove`, and `items` on
//!   the queue that is firing them
//! - **Failure isolation**: an optional handler absorbs callback errors so one
//!   failing item cannot abort the pass
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::{Duration, Instant};
//! use ticked_scheduler::core::{Ticked, TickedObject, TickedQueue};
//!
//! let queue = TickedQueue::new();
//!
//! let heartbeat: Arc<dyn Ticked> = Arc::new(
//!     TickedObject::new(|| {
//!         println!("tick");
//!         Ok(())
//!     })
//!     .with_priority(0)
//!     .with_tick_length(Duration::from_millis(500)),
//! );
//! queue.add(heartbeat.clone());
//!
//! // Host loop: one update per frame, host-supplied time.
//! loop {
//!     queue.update_at(Instant::now())?;
//!     # break;
//! }
//! ```
//!
//! For complete examples, see the integration tests in `tests/`.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core scheduling engine: the capability contract, queue entries, and the
/// ticked priority queue.
pub mod core;
/// Configuration models for queue limits and defaults.
pub mod config;
/// Builders to construct a configured queue.
pub mod builders;
/// Shared utilities.
pub mod util;

pub use crate::config::TickedQueueConfig;
pub use crate::core::{
    AppResult, SchedulerError, Ticked, TickedObject, TickedQueue, DEFAULT_PRIORITY,
    DEFAULT_TICK_LENGTH,
};
