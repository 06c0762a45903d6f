//! The capability contract for schedulable work items.

use std::time::Duration;

use super::AppResult;

/// Default priority assigned by convenience constructors.
pub const DEFAULT_PRIORITY: i32 = 1;

/// Default tick length assigned by convenience constructors.
pub const DEFAULT_TICK_LENGTH: Duration = Duration::from_millis(250);

/// Contract for anything the queue can schedule.
///
/// An implementor exposes a priority, a tick interval, and a callback. The
/// queue re-reads `tick_length` every time it re-arms an item, so an owner may
/// retune the interval of work that is already registered; `priority` is
/// snapshotted when the item is added and a later change only affects future
/// registrations.
///
/// Identity matters: the queue tracks items by the address of their
/// `Arc<dyn Ticked>` allocation, so the handle used for [`add`] is the handle
/// that [`remove`] must be given.
///
/// [`add`]: super::TickedQueue::add
/// [`remove`]: super::TickedQueue::remove
///
/// # Example
///
/// ```rust,ignore
/// use std::time::Duration;
/// use ticked_scheduler::core::{AppResult, Ticked};
///
/// struct Autosave;
///
/// impl Ticked for Autosave {
///     fn priority(&self) -> i32 {
///         5
///     }
///
///     fn tick_length(&self) -> Duration {
///         Duration::from_secs(30)
///     }
///
///     fn on_ticked(&self) -> AppResult<()> {
///         save_to_disk()
///     }
/// }
/// ```
pub trait Ticked: Send + Sync {
    /// Scheduling priority. Lower values are fired earlier.
    fn priority(&self) -> i32;

    /// Interval between successive firings.
    fn tick_length(&self) -> Duration;

    /// Invoked when the tick length has elapsed.
    ///
    /// Runs synchronously on the thread driving the queue. An `Err` is routed
    /// to the queue's exception handler if one is installed, otherwise it
    /// aborts the remainder of the update pass.
    fn on_ticked(&self) -> AppResult<()>;
}
