//! Queue entry bookkeeping: due times, liveness, and the insertion order.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

use super::ticked::Ticked;
use super::AppResult;

/// A registered work item together with its scheduling state.
///
/// The entry owns everything the queue needs to decide when and in what order
/// the wrapped capability fires, so the capability itself stays stateless with
/// respect to timing. Entries are shared (`Arc`) between the live collection
/// and the snapshot an in-flight update pass walks; the `active` flag is what
/// keeps a removed-but-still-snapshotted entry from being actionable.
pub(crate) struct TickedQueueItem {
    ticked: Arc<dyn Ticked>,
    /// Priority snapshotted at insertion. A later change to the capability's
    /// priority must not re-sort an entry that is already in the queue.
    priority: i32,
    next_tick: Mutex<Instant>,
    looped: bool,
    active: AtomicBool,
}

impl TickedQueueItem {
    /// Wrap `ticked` with a due time computed from `reference_time` plus the
    /// capability's current tick length.
    pub(crate) fn new(ticked: Arc<dyn Ticked>, reference_time: Instant, looped: bool) -> Self {
        let next_tick = reference_time + ticked.tick_length();
        let priority = ticked.priority();
        Self {
            ticked,
            priority,
            next_tick: Mutex::new(next_tick),
            looped,
            active: AtomicBool::new(true),
        }
    }

    pub(crate) fn ticked(&self) -> &Arc<dyn Ticked> {
        &self.ticked
    }

    pub(crate) fn priority(&self) -> i32 {
        self.priority
    }

    pub(crate) fn next_tick(&self) -> Instant {
        *self.next_tick.lock()
    }

    pub(crate) const fn is_looped(&self) -> bool {
        self.looped
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active.load(AtomicOrdering::Acquire)
    }

    /// Mark the entry inert. Any snapshot still holding it will skip it.
    pub(crate) fn deactivate(&self) {
        self.active.store(false, AtomicOrdering::Release);
    }

    /// Recompute the due time from `reference_time`. The tick length is
    /// re-read from the capability, so a retuned interval takes effect here.
    pub(crate) fn reset_next_tick(&self, reference_time: Instant) {
        *self.next_tick.lock() = reference_time + self.ticked.tick_length();
    }

    /// Whether the entry's tick has elapsed. Strictly after: an entry whose
    /// due time equals `current_time` is not yet due.
    pub(crate) fn is_due(&self, current_time: Instant) -> bool {
        current_time > *self.next_tick.lock()
    }

    /// Reset the due time from `current_time`, then invoke the callback.
    pub(crate) fn fire(&self, current_time: Instant) -> AppResult<()> {
        self.reset_next_tick(current_time);
        self.ticked.on_ticked()
    }

    /// Whether this entry wraps the given capability, by allocation address.
    pub(crate) fn wraps(&self, ticked: &dyn Ticked) -> bool {
        Arc::as_ptr(&self.ticked).cast::<()>() == (ticked as *const dyn Ticked).cast::<()>()
    }
}

impl std::fmt::Debug for TickedQueueItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickedQueueItem")
            .field("priority", &self.priority)
            .field("looped", &self.looped)
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

/// Queue order: priority ascending, then due time ascending.
///
/// Exact ties resolve to `Less` — the left operand always sorts first — so a
/// binary search for a new entry lands after every existing equal entry and
/// insertion order is preserved among duplicates. That branch makes the
/// function non-antisymmetric: it is only valid for the binary-search
/// insertion path and must not back an `Ord` impl or a general-purpose sort.
pub(crate) fn insertion_order(a: &TickedQueueItem, b: &TickedQueueItem) -> Ordering {
    match a.priority.cmp(&b.priority) {
        Ordering::Equal => match a.next_tick().cmp(&b.next_tick()) {
            Ordering::Equal => Ordering::Less,
            unequal => unequal,
        },
        unequal => unequal,
    }
}
