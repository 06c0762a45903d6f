//! The ticked priority queue: sorted registration and the bounded update pass.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use super::queue_item::{insertion_order, TickedQueueItem};
use super::ticked::Ticked;
use super::SchedulerError;

/// Default max callbacks fired in a single update call.
pub const DEFAULT_MAX_PROCESSED_PER_UPDATE: usize = 10;

/// Default real-time budget for a single update call.
pub const DEFAULT_MAX_PROCESSING_TIME_PER_UPDATE: Duration = Duration::from_millis(100);

/// Callback invoked with a failed item's error and the capability that raised
/// it. Installing one keeps a failing callback from aborting the update pass.
pub type ExceptionHandler = Box<dyn FnMut(anyhow::Error, &Arc<dyn Ticked>) + Send>;

/// A queue of [`Ticked`] capabilities, fired in priority order as their tick
/// intervals elapse.
///
/// The queue never spawns threads or timers; the host drives it by calling
/// [`update`](Self::update) (or [`update_at`](Self::update_at) with its own
/// clock) once per frame. Each call fires the due items in sorted order,
/// bounded by [`max_processed_per_update`](Self::max_processed_per_update)
/// and [`max_processing_time_per_update`](Self::max_processing_time_per_update);
/// items the budget doesn't reach stay queued and fire on a later call, so
/// saturation defers work but never drops it.
///
/// All methods take `&self`: internal state sits behind short-lived
/// `parking_lot` locks, none of which are held while a callback runs, so a
/// callback may call `add`, `remove`, and `items` on the queue that is firing
/// it. Safety under that kind of mid-pass mutation comes from walking a
/// snapshot of the entries and gating each one on a liveness flag that
/// removal clears, not from holding a lock across the pass.
pub struct TickedQueue {
    /// Live entries, kept sorted by [`insertion_order`].
    entries: Mutex<Vec<Arc<TickedQueueItem>>>,
    loop_by_default: AtomicBool,
    paused: AtomicBool,
    max_processed_per_update: AtomicUsize,
    max_processing_time: Mutex<Duration>,
    exception_handler: Mutex<Option<ExceptionHandler>>,
}

impl TickedQueue {
    /// Create an empty queue with default limits. New items loop by default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            loop_by_default: AtomicBool::new(true),
            paused: AtomicBool::new(false),
            max_processed_per_update: AtomicUsize::new(DEFAULT_MAX_PROCESSED_PER_UPDATE),
            max_processing_time: Mutex::new(DEFAULT_MAX_PROCESSING_TIME_PER_UPDATE),
            exception_handler: Mutex::new(None),
        }
    }

    /// Register `ticked`, due one tick length from now, looping per
    /// [`loop_by_default`](Self::loop_by_default).
    pub fn add(&self, ticked: Arc<dyn Ticked>) {
        self.add_looped_at(ticked, Instant::now(), self.loop_by_default());
    }

    /// Register `ticked` with an explicit loop flag.
    pub fn add_looped(&self, ticked: Arc<dyn Ticked>, looped: bool) {
        self.add_looped_at(ticked, Instant::now(), looped);
    }

    /// Register `ticked` using `current_time` as the reference the first due
    /// time is computed from. The time doesn't have to be the real time.
    pub fn add_at(&self, ticked: Arc<dyn Ticked>, current_time: Instant) {
        self.add_looped_at(ticked, current_time, self.loop_by_default());
    }

    /// Register `ticked` with an explicit reference time and loop flag.
    ///
    /// A capability already in the queue is not registered twice; the
    /// duplicate call is logged and ignored.
    pub fn add_looped_at(&self, ticked: Arc<dyn Ticked>, current_time: Instant, looped: bool) {
        let mut entries = self.entries.lock();
        if entries.iter().any(|entry| entry.wraps(ticked.as_ref())) {
            tracing::warn!(
                priority = ticked.priority(),
                "capability already scheduled, ignoring duplicate add"
            );
            return;
        }
        let item = Arc::new(TickedQueueItem::new(ticked, current_time, looped));
        tracing::trace!(priority = item.priority(), looped, "scheduled item");
        Self::insert_sorted(&mut entries, item);
    }

    /// Deregister the entry wrapping `ticked`.
    ///
    /// Returns whether a match was found; removing a capability that isn't
    /// scheduled is not an error. A removed entry is deactivated immediately,
    /// so it will not fire even if an in-flight update pass had already
    /// snapshotted it.
    pub fn remove(&self, ticked: &dyn Ticked) -> bool {
        let mut entries = self.entries.lock();
        if let Some(index) = entries.iter().position(|entry| entry.wraps(ticked)) {
            let item = entries.remove(index);
            item.deactivate();
            tracing::trace!(priority = item.priority(), "removed item");
            true
        } else {
            false
        }
    }

    /// Fire due items using the real current time.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::Callback`] when a fired callback fails and no
    /// exception handler is installed; remaining due items stay queued for the
    /// next call.
    pub fn update(&self) -> Result<(), SchedulerError> {
        self.update_at(Instant::now())
    }

    /// Fire due items as of the caller-supplied `current_time`.
    ///
    /// Supplying a logical time decouples scheduling from the wall clock —
    /// pause, slow motion, and deterministic tests all drive this directly.
    /// The processing-time budget is still measured against real elapsed
    /// time, independent of `current_time`.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::Callback`] when a fired callback fails and no
    /// exception handler is installed; remaining due items stay queued for the
    /// next call.
    pub fn update_at(&self, current_time: Instant) -> Result<(), SchedulerError> {
        if self.is_paused() {
            return Ok(());
        }

        let pass_start = Instant::now();
        let max_processed = self.max_processed_per_update.load(Ordering::Acquire);
        let max_elapsed = *self.max_processing_time.lock();
        let snapshot: Vec<Arc<TickedQueueItem>> = self.entries.lock().clone();
        let mut fired = 0_usize;

        for item in &snapshot {
            if fired >= max_processed {
                tracing::debug!(fired, "update saturated by count, deferring remaining items");
                break;
            }

            // Entries removed since the snapshot was taken (including by an
            // earlier callback in this same pass) are inert.
            if item.is_active() && item.is_due(current_time) {
                {
                    let mut entries = self.entries.lock();
                    if let Some(index) = entries.iter().position(|entry| Arc::ptr_eq(entry, item))
                    {
                        entries.remove(index);
                    }
                    if item.is_looped() {
                        // Re-arm and re-insert before firing so a callback
                        // that inspects the queue sees the entry in place.
                        item.reset_next_tick(current_time);
                        Self::insert_sorted(&mut entries, Arc::clone(item));
                    } else {
                        item.deactivate();
                    }
                }

                fired += 1;
                if let Err(error) = item.fire(current_time) {
                    let mut handler = self.exception_handler.lock();
                    if let Some(handler) = handler.as_mut() {
                        tracing::warn!(
                            priority = item.priority(),
                            "ticked callback failed, routing to exception handler"
                        );
                        handler(error, item.ticked());
                    } else {
                        return Err(SchedulerError::Callback(error));
                    }
                }
            }

            if pass_start.elapsed() > max_elapsed {
                tracing::debug!(
                    fired,
                    "update saturated by processing time, deferring remaining items"
                );
                break;
            }
        }

        Ok(())
    }

    /// The currently scheduled capabilities, in firing order.
    ///
    /// This is a snapshot of live state: entries removed mid-pass are absent
    /// even if an in-flight update still holds them.
    #[must_use]
    pub fn items(&self) -> Vec<Arc<dyn Ticked>> {
        self.entries
            .lock()
            .iter()
            .map(|entry| Arc::clone(entry.ticked()))
            .collect()
    }

    /// Number of currently scheduled capabilities.
    #[must_use]
    pub fn queue_count(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the queue has no scheduled capabilities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Whether items added without an explicit loop flag will loop.
    #[must_use]
    pub fn loop_by_default(&self) -> bool {
        self.loop_by_default.load(Ordering::Acquire)
    }

    /// Set the loop behavior for `add` calls that omit the flag.
    pub fn set_loop_by_default(&self, loop_by_default: bool) {
        self.loop_by_default.store(loop_by_default, Ordering::Release);
    }

    /// Whether updates are currently no-ops.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Pause or resume the queue. While paused, `update` fires nothing and
    /// due times are left untouched.
    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Release);
    }

    /// Max callbacks fired in a single update call.
    #[must_use]
    pub fn max_processed_per_update(&self) -> usize {
        self.max_processed_per_update.load(Ordering::Acquire)
    }

    /// Set the max callbacks fired in a single update call.
    pub fn set_max_processed_per_update(&self, max: usize) {
        self.max_processed_per_update.store(max, Ordering::Release);
    }

    /// Real-time budget for a single update call.
    #[must_use]
    pub fn max_processing_time_per_update(&self) -> Duration {
        *self.max_processing_time.lock()
    }

    /// Set the real-time budget for a single update call. This is wall-clock
    /// time; supplying custom update times does not affect it.
    pub fn set_max_processing_time_per_update(&self, budget: Duration) {
        *self.max_processing_time.lock() = budget;
    }

    /// Install a handler for callback failures. With a handler in place a
    /// failing item is reported and the update pass continues.
    pub fn set_exception_handler<F>(&self, handler: F)
    where
        F: FnMut(anyhow::Error, &Arc<dyn Ticked>) + Send + 'static,
    {
        *self.exception_handler.lock() = Some(Box::new(handler));
    }

    /// Remove the exception handler; callback failures propagate out of
    /// `update` again.
    pub fn clear_exception_handler(&self) {
        *self.exception_handler.lock() = None;
    }

    /// Insert `item` at its sorted position. The comparator never reports
    /// equality for distinct entries, so the search always misses and hands
    /// back the insertion index.
    fn insert_sorted(entries: &mut Vec<Arc<TickedQueueItem>>, item: Arc<TickedQueueItem>) {
        let index = entries
            .binary_search_by(|probe| insertion_order(probe, &item))
            .unwrap_or_else(|index| index);
        entries.insert(index, item);
    }
}

impl Default for TickedQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TickedQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickedQueue")
            .field("queue_count", &self.queue_count())
            .field("paused", &self.is_paused())
            .field("loop_by_default", &self.loop_by_default())
            .field("max_processed_per_update", &self.max_processed_per_update())
            .field(
                "max_processing_time_per_update",
                &self.max_processing_time_per_update(),
            )
            .finish_non_exhaustive()
    }
}
