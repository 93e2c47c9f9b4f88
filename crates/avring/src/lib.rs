//! # avring
//!
//! Single-writer "latest frame" ring buffer with independently paced readers.
//!
//! A writer overwrites a fixed ring of slots as fast as it produces data.
//! Readers trail behind on their own views of the same slots, each waiting
//! on a per-slot readiness flag until the slot it wants has been published.
//! A reader never observes a slot that is mid-write or not yet written; a
//! reader that falls a lap behind silently skips values.
//!
//! ## Architecture
//!
//! - [`cursor`] - Base circular cursor: fixed slot cycle, position, liveness
//! - [`slot`] - One payload plus its readiness flag
//! - [`ring`] - Value ring: write/step publication and blocking reads
//! - [`sink`] - Read loop feeding a channel or a callback
//! - [`cancel`] - Shared one-shot cancellation signal
//! - [`config`] - Slot count and spin-wait polling configuration
//! - [`error`] - Ring error types
//!
//! ## Waiting
//!
//! Blocking reads poll; they never park on an OS primitive. Between checks a
//! reader yields its time slice or sleeps for the configured poll interval,
//! and every wait ends within one interval of the cancellation signal firing.
//!
//! ## Usage
//!
//! ```rust
//! use avring::prelude::*;
//!
//! let mut writer = ValueRing::<u64>::new(CancelSignal::new(), 8);
//! let mut reader = writer.clone();
//!
//! let consumer = std::thread::spawn(move || {
//!     let stop = reader.cancel_signal().clone();
//!     let mut frames = Vec::new();
//!     let _ = reader.read_loop(Sink::callback(|frame| {
//!         frames.push(frame);
//!         if frames.len() == 4 {
//!             stop.cancel();
//!         }
//!     }));
//!     frames
//! });
//!
//! for frame in 0..4 {
//!     writer.write(frame);
//!     writer.step();
//! }
//!
//! let frames = consumer.join().unwrap_or_default();
//! assert_eq!(frames, vec![0, 1, 2, 3]);
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    missing_docs,
    missing_debug_implementations
)]
#![warn(clippy::pedantic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cancel;
pub mod config;
pub mod cursor;
pub mod error;
pub mod ring;
pub mod sink;
pub mod slot;

pub mod prelude;

pub use cancel::CancelSignal;
pub use config::{DEFAULT_SLOT_COUNT, PollStrategy, RingConfig, RingConfigBuilder};
pub use cursor::{RingCursor, SlotPosition};
pub use error::{RingError, RingResult};
pub use ring::ValueRing;
pub use sink::{LoopSummary, Sink};
pub use slot::Slot;
