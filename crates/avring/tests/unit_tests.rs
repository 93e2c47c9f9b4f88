//! Unit tests for avring.
//!
//! These tests cover the public API surface of every module.

use std::time::Duration;

use avring::prelude::*;
use avring::{DEFAULT_SLOT_COUNT, RingCursor, Slot};

/// Signal that fires on its own after a deadline, so a blocking read on a
/// slot that never becomes ready returns `None` instead of spinning forever.
fn guarded_signal() -> CancelSignal {
    let signal = CancelSignal::new();
    let guard = signal.clone();
    std::thread::spawn(move || {
        std::thread::sleep(Duration::from_secs(5));
        guard.cancel();
    });
    signal
}

#[test]
fn test_cursor_over_plain_values() {
    let mut labels = ["left", "centre", "right"].into_iter();
    let mut cursor = RingCursor::new(CancelSignal::new(), 3, || labels.next().unwrap_or(""));

    assert_eq!(*cursor.current(), "left");
    cursor.move_next();
    assert_eq!(*cursor.current(), "centre");
    assert_eq!(*cursor.peek_next(), "right");
    cursor.move_next();
    cursor.move_next();
    assert_eq!(*cursor.current(), "left");
}

#[test]
fn test_cursor_debug_reports_shape() {
    let cursor = RingCursor::new(CancelSignal::new(), 2, || 0u8);
    let debug = format!("{cursor:?}");
    assert!(debug.contains("len: 2"));
    assert!(debug.contains("cancelled: false"));
}

#[test]
fn test_slot_position_display() {
    assert_eq!(SlotPosition::new(4).to_string(), "slot 4");
    assert_eq!(SlotPosition::new(4).index(), 4);
}

#[test]
fn test_default_ring_from_config() -> RingResult {
    let ring = ValueRing::<u8>::from_config(CancelSignal::new(), &RingConfig::default())?;
    assert_eq!(ring.len(), DEFAULT_SLOT_COUNT);
    assert!(!ring.is_empty());
    assert_eq!(ring.poll_strategy(), PollStrategy::Yield);
    Ok(())
}

#[test]
fn test_with_poll_interval_zero_yields() {
    let ring = ValueRing::<u8>::new(CancelSignal::new(), 2).with_poll_interval(Duration::ZERO);
    assert_eq!(ring.poll_strategy(), PollStrategy::Yield);
}

#[test]
fn test_views_share_cancellation() -> RingResult {
    let ring = ValueRing::<u8>::new(CancelSignal::new(), 3);
    let clone = ring.clone();
    let sub = ring.sub_ring(SlotPosition::new(2))?;

    sub.cancel_signal().cancel();

    assert!(ring.is_cancelled());
    assert!(clone.is_cancelled());
    assert_eq!(ring.err(), Err(RingError::Cancelled));
    Ok(())
}

#[test]
fn test_sub_ring_out_of_range() {
    let ring = ValueRing::<u8>::new(CancelSignal::new(), 3);
    let result = ring.sub_ring(SlotPosition::new(3));
    assert!(matches!(
        result,
        Err(RingError::PositionOutOfRange { index: 3, len: 3 })
    ));
}

#[test]
fn test_non_copy_payloads() {
    let mut writer = ValueRing::<Vec<u8>>::new(guarded_signal(), 3);
    let reader = writer.clone();

    writer.write(vec![1, 2, 3]);
    writer.step();
    writer.write(vec![4]);

    assert_eq!(reader.read(), Some(vec![1, 2, 3]));
    assert_eq!(reader.next_value(), vec![4]);
    assert_eq!(reader.current_slot().load_arc().len(), 3);
}

#[test]
fn test_two_slot_ring_withdraws_previous_slot() {
    let mut writer = ValueRing::<Vec<u8>>::new(guarded_signal(), 2);
    let reader = writer.clone();

    writer.write(vec![1]);
    writer.step();
    assert_eq!(reader.try_read(), Some(vec![1]));

    // Publishing slot 1 clears slot 0 ahead of the next lap.
    writer.write(vec![2]);
    assert_eq!(reader.try_read(), None);
    assert_eq!(reader.current_value(), vec![1]);
}

#[test]
fn test_slot_load_ignores_readiness() {
    let slot = Slot::new(9u16);
    slot.store(10);
    assert!(!slot.is_readable());
    assert_eq!(slot.load(), 10);
}

#[test]
fn test_read_loop_into_channel_with_sleep_poll() -> RingResult {
    let mut writer = ValueRing::<u32>::new(CancelSignal::new(), 4)
        .with_poll_interval(Duration::from_millis(1));
    let mut reader = writer.clone();
    let (tx, rx) = crossbeam::channel::bounded::<u32>(8);

    writer.write(1);
    writer.step();
    writer.write(2);

    let cancel = writer.cancel_signal().clone();
    let handle = std::thread::spawn(move || reader.read_loop(tx.into()));

    assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(1));
    assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(2));
    cancel.cancel();

    let summary = match handle.join() {
        Ok(result) => result?,
        Err(_) => panic!("read loop thread panicked"),
    };
    assert_eq!(summary, LoopSummary { delivered: 2 });
    Ok(())
}

#[test]
fn test_sink_debug_names_shape() {
    let sink: Sink<'_, u8> = Sink::callback(|_| {});
    assert_eq!(format!("{sink:?}"), r#"Sink("callback")"#);
}
