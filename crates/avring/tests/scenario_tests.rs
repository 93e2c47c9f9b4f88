//! Scenario tests for avring.
//!
//! These tests walk writer/reader sequences step by step on a single thread,
//! checking publication order, view independence and lossy-latest behavior.

use std::thread;
use std::time::Duration;

use avring::{CancelSignal, RingResult, SlotPosition, ValueRing};

/// Longest a single-threaded blocking read may wait before the test fails.
const READ_DEADLINE: Duration = Duration::from_secs(5);

/// Signal that fires on its own after [`READ_DEADLINE`], so a read on a slot
/// that never becomes ready returns `None` instead of spinning forever.
fn guarded_signal() -> CancelSignal {
    let signal = CancelSignal::new();
    let guard = signal.clone();
    thread::spawn(move || {
        thread::sleep(READ_DEADLINE);
        guard.cancel();
    });
    signal
}

fn writer(n: usize) -> ValueRing<&'static str> {
    ValueRing::new(guarded_signal(), n)
}

#[test]
fn test_lock_step_reader_sees_every_value() {
    let mut writer = writer(3);
    let mut reader = writer.clone();

    writer.write("A");
    assert_eq!(reader.read(), Some("A"));
    writer.step();

    writer.write("B");
    assert_eq!(reader.next_read(), Some("B"));
    writer.step();

    writer.write("C");
    assert_eq!(reader.next_read(), Some("C"));
    writer.step();

    writer.write("D");
    assert_eq!(reader.next_read(), Some("D"));
}

#[test]
fn test_idle_reader_sees_latest_lap() {
    let mut writer = writer(3);
    let reader = writer.clone();

    for value in ["A", "B", "C"] {
        writer.write(value);
        writer.step();
    }
    writer.write("D");

    assert_eq!(reader.read(), Some("D"));
}

#[test]
fn test_reader_ahead_of_writer_is_not_ready() {
    let mut writer = writer(3);
    let mut reader = writer.clone();

    writer.write("A");
    reader.move_next();

    assert_eq!(reader.try_read(), None);

    writer.step();
    writer.write("B");
    assert_eq!(reader.try_read(), Some("B"));
}

#[test]
fn test_slot_waiting_for_next_lap_is_not_stale() {
    let mut writer = writer(2);
    let mut reader = writer.clone();

    writer.write("A");
    writer.step();
    writer.write("B");
    writer.step();

    // Writer is back on slot 0. A reader waiting on slot 1 must not see "B"
    // again once the writer starts the next lap.
    reader.move_next();
    assert_eq!(reader.try_read(), Some("B"));

    writer.write("C");
    assert_eq!(reader.try_read(), None);

    writer.step();
    writer.write("D");
    assert_eq!(reader.try_read(), Some("D"));
}

#[test]
fn test_clone_cursor_independence() {
    let mut writer = writer(4);
    for value in ["A", "B", "C"] {
        writer.write(value);
        writer.step();
    }

    let mut original = writer.clone();
    for _ in 0..writer.len() - 3 {
        original.move_next();
    }
    // `original` now sits on slot 0.
    let mut clone = original.clone();

    assert_eq!(clone.next_read(), Some("B"));
    assert_eq!(clone.next_read(), Some("C"));
    assert_eq!(original.read(), Some("A"));

    assert_eq!(original.next_read(), Some("B"));
    assert_eq!(clone.current_value(), "C");
}

#[test]
fn test_sub_rings_fan_out_at_offsets() -> RingResult {
    let mut writer = writer(4);
    for value in ["A", "B", "C", "D"] {
        writer.write(value);
        writer.step();
    }
    writer.write("E");

    // Writing "E" into slot 0 withdrew slot 1 ahead of the next lap.
    let third = writer.sub_ring(SlotPosition::new(2))?;
    let last = writer.sub_ring(SlotPosition::new(3))?;
    let second = writer.sub_ring(SlotPosition::new(1))?;

    assert_eq!(third.read(), Some("C"));
    assert_eq!(last.read(), Some("D"));
    assert_eq!(writer.read(), Some("E"));
    assert_eq!(second.try_read(), None);
    assert_eq!(second.current_value(), "B");
    Ok(())
}

#[test]
fn test_wrap_around_returns_to_start() {
    for n in 1..=16 {
        let mut view = writer(n);
        let start = view.position();
        for _ in 0..n {
            view.move_next();
        }
        assert_eq!(view.position(), start, "ring of {n} slots");
    }
}

#[test]
fn test_cancelled_views_stop_reading() {
    let writer = writer(3);
    let mut reader = writer.clone();

    writer.write("A");
    writer.cancel_signal().cancel();

    // A slot published before cancellation still reads.
    assert_eq!(reader.read(), Some("A"));
    assert!(reader.err().is_err());

    // Waiting on an unpublished slot ends immediately.
    assert_eq!(reader.next_read(), None);

    writer.write("B");
    assert_eq!(reader.read(), None);
}
