//! Integration tests for the per-update saturation guards.
//!
//! These tests validate:
//! 1. `max_processed_per_update` caps fires per call, in priority order
//! 2. The wall-clock budget stops a pass without dropping deferred items
//! 3. Saturated items are deferred, never starved, even under heavy churn

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use ticked_scheduler::core::{Ticked, TickedObject, TickedQueue};

#[test]
fn test_max_processed_caps_fires_in_priority_order() {
    let queue = TickedQueue::new();
    queue.set_max_processed_per_update(1);
    let log = Arc::new(Mutex::new(Vec::new()));
    let base = Instant::now();

    for priority in [2, 0, 1] {
        let log = Arc::clone(&log);
        let item: Arc<dyn Ticked> = Arc::new(
            TickedObject::new(move || {
                log.lock().push(priority);
                Ok(())
            })
            .with_priority(priority)
            .with_tick_length(Duration::ZERO),
        );
        queue.add_looped_at(item, base, false);
    }

    // Three equally-due one-shot entries, one fire per call, highest
    // priority first; the rest are deferred, not dropped.
    queue.update_at(base + Duration::from_secs(1)).unwrap();
    assert_eq!(*log.lock(), vec![0]);

    queue.update_at(base + Duration::from_secs(2)).unwrap();
    assert_eq!(*log.lock(), vec![0, 1]);

    queue.update_at(base + Duration::from_secs(3)).unwrap();
    assert_eq!(*log.lock(), vec![0, 1, 2]);
    assert!(queue.is_empty());
}

#[test]
fn test_wall_time_budget_caps_a_pass() {
    let queue = TickedQueue::new();
    queue.set_max_processed_per_update(100);
    queue.set_max_processing_time_per_update(Duration::from_millis(1));
    let count = Arc::new(AtomicUsize::new(0));
    let base = Instant::now();

    // Each callback costs well over the whole budget, so every pass fires
    // exactly one item before the time check trips.
    for _ in 0..5 {
        let count = Arc::clone(&count);
        let item: Arc<dyn Ticked> = Arc::new(
            TickedObject::new(move || {
                std::thread::sleep(Duration::from_millis(5));
                count.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .with_tick_length(Duration::ZERO),
        );
        queue.add_looped_at(item, base, false);
    }

    let mut expected = 0_usize;
    for pass in 1..=5_u64 {
        queue.update_at(base + Duration::from_secs(pass)).unwrap();
        expected += 1;
        assert_eq!(count.load(Ordering::SeqCst), expected);
    }
    assert!(queue.is_empty());
}

#[test]
fn test_saturated_queue_does_not_starve_late_items() {
    const POPULATION: usize = 2_000;
    const PER_UPDATE: usize = 100;

    let queue = TickedQueue::new();
    queue.set_max_processed_per_update(PER_UPDATE);
    // The count cap is under test here, not the time budget.
    queue.set_max_processing_time_per_update(Duration::from_secs(60));

    let base = Instant::now();
    let ignored = Arc::new(AtomicUsize::new(0));
    let last_item_fires = Arc::new(AtomicUsize::new(0));

    for index in 0..POPULATION {
        let count = if index == POPULATION - 1 {
            Arc::clone(&last_item_fires)
        } else {
            Arc::clone(&ignored)
        };
        let item: Arc<dyn Ticked> = Arc::new(
            TickedObject::new(move || {
                count.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .with_tick_length(Duration::from_millis(500)),
        );
        queue.add_looped_at(item, base, true);
    }

    // Everything shares one priority and stays permanently due, so only the
    // due-time tie-break keeps fired items cycling behind unfired ones.
    let mut now = base;
    for _ in 0..(POPULATION / PER_UPDATE) + 5 {
        now += Duration::from_secs(1);
        queue.update_at(now).unwrap();
    }

    assert!(
        last_item_fires.load(Ordering::SeqCst) >= 1,
        "the last-registered item was starved by earlier registrations"
    );
    assert_eq!(queue.queue_count(), POPULATION);
}
