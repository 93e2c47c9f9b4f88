//! Prelude for avring.
//!
//! This module re-exports the most commonly used types for convenient importing.
//!
//! # Example
//!
//! ```rust
//! use avring::prelude::*;
//!
//! let ring = ValueRing::<u32>::new(CancelSignal::new(), 4);
//! ring.write(1);
//! assert_eq!(ring.try_read(), Some(1));
//! ```

pub use crate::cancel::CancelSignal;
pub use crate::config::{PollStrategy, RingConfig};
pub use crate::cursor::SlotPosition;
pub use crate::error::{RingError, RingResult};
pub use crate::ring::ValueRing;
pub use crate::sink::{LoopSummary, Sink};
