//! Closure-backed default implementation of the [`Ticked`] contract.

use std::sync::atomic::{AtomicI32, AtomicU64, Ordering};
use std::time::Duration;

use super::ticked::{Ticked, DEFAULT_PRIORITY, DEFAULT_TICK_LENGTH};
use super::AppResult;

/// A ready-made [`Ticked`] implementation wrapping a callback closure.
///
/// Covers the common case where the scheduled work is a function rather than
/// a type of its own. Anything the callback needs — counters, channels, game
/// state handles — is moved into the closure. Priority and tick length are
/// stored behind atomics so the owner can retune an object it has already
/// registered; the new tick length takes effect the next time the item is
/// re-armed.
///
/// # Example
///
/// ```rust,ignore
/// use std::time::Duration;
/// use ticked_scheduler::core::TickedObject;
///
/// let poll = TickedObject::new(|| {
///     poll_network()?;
///     Ok(())
/// })
/// .with_priority(0)
/// .with_tick_length(Duration::from_millis(50));
/// ```
pub struct TickedObject {
    priority: AtomicI32,
    tick_length_nanos: AtomicU64,
    callback: Box<dyn Fn() -> AppResult<()> + Send + Sync>,
}

impl TickedObject {
    /// Create an object firing `callback`, with the default priority and
    /// tick length.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn() -> AppResult<()> + Send + Sync + 'static,
    {
        Self {
            priority: AtomicI32::new(DEFAULT_PRIORITY),
            tick_length_nanos: AtomicU64::new(duration_to_nanos(DEFAULT_TICK_LENGTH)),
            callback: Box::new(callback),
        }
    }

    /// Set the priority. Lower values are fired earlier.
    #[must_use]
    pub fn with_priority(self, priority: i32) -> Self {
        self.set_priority(priority);
        self
    }

    /// Set the interval between successive firings.
    #[must_use]
    pub fn with_tick_length(self, tick_length: Duration) -> Self {
        self.set_tick_length(tick_length);
        self
    }

    /// Change the priority. Affects future registrations only; an entry
    /// already in a queue keeps the priority it was inserted with.
    pub fn set_priority(&self, priority: i32) {
        self.priority.store(priority, Ordering::Release);
    }

    /// Change the tick interval. Takes effect the next time the item is
    /// re-armed after firing.
    pub fn set_tick_length(&self, tick_length: Duration) {
        self.tick_length_nanos
            .store(duration_to_nanos(tick_length), Ordering::Release);
    }
}

impl Ticked for TickedObject {
    fn priority(&self) -> i32 {
        self.priority.load(Ordering::Acquire)
    }

    fn tick_length(&self) -> Duration {
        Duration::from_nanos(self.tick_length_nanos.load(Ordering::Acquire))
    }

    fn on_ticked(&self) -> AppResult<()> {
        (self.callback)()
    }
}

impl std::fmt::Debug for TickedObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickedObject")
            .field("priority", &self.priority())
            .field("tick_length", &self.tick_length())
            .finish_non_exhaustive()
    }
}

fn duration_to_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}
