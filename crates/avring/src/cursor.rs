//! Base circular cursor.
//!
//! A [`RingCursor`] is a position in a fixed-size cycle of slots plus the
//! cancellation signal that bounds every wait on it. Slot storage is shared
//! between every cursor cloned or rooted from the same ring; each cursor only
//! ever mutates its own position, so independent cursors can move concurrently
//! without locking.

use std::fmt;
use std::sync::Arc;

use crate::cancel::CancelSignal;
use crate::error::{RingError, RingResult};

/// Opaque index of a slot within a ring.
///
/// Obtained from [`RingCursor::position`] and used to root new views with
/// [`RingCursor::rooted_at`]. The absolute value carries no meaning beyond
/// the ring it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotPosition(usize);

impl SlotPosition {
    /// Position of the slot at `index`.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SlotPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot {}", self.0)
    }
}

/// Position into a shared, fixed-size cycle of slots.
pub struct RingCursor<S> {
    slots: Arc<[S]>,
    position: usize,
    cancel: CancelSignal,
}

impl<S> RingCursor<S> {
    /// Allocate `n` slots arranged in a cycle and position the cursor on the
    /// first one.
    ///
    /// # Panics
    ///
    /// Panics if `n` is 0. A ring without slots has no current slot.
    pub fn new(cancel: CancelSignal, n: usize, init: impl FnMut() -> S) -> Self {
        assert!(n >= 1, "ring must have at least one slot");

        Self {
            slots: std::iter::repeat_with(init).take(n).collect(),
            position: 0,
            cancel,
        }
    }

    /// Slot under the cursor.
    #[inline]
    #[must_use]
    pub fn current(&self) -> &S {
        &self.slots[self.position]
    }

    /// Slot one step ahead of the cursor. Does not move the cursor.
    #[inline]
    #[must_use]
    pub fn peek_next(&self) -> &S {
        &self.slots[self.next_index()]
    }

    /// Advance one slot, wrapping from the last slot to the first.
    #[inline]
    pub fn move_next(&mut self) {
        self.position = self.next_index();
    }

    /// Report whether the bound cancellation signal has fired.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::Cancelled`] once the signal has fired.
    #[inline]
    pub fn err(&self) -> RingResult {
        self.cancel.err()
    }

    /// Check whether the bound cancellation signal has fired.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Cancellation signal shared by this cursor and its relatives.
    #[must_use]
    pub fn cancel_signal(&self) -> &CancelSignal {
        &self.cancel
    }

    /// Number of slots in the ring.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always `false`; a ring has at least one slot.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current position of the cursor.
    #[inline]
    #[must_use]
    pub fn position(&self) -> SlotPosition {
        SlotPosition(self.position)
    }

    /// New cursor over the same slots and signal, positioned at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::PositionOutOfRange`] if the ring has no such slot.
    pub fn rooted_at(&self, position: SlotPosition) -> RingResult<Self> {
        if position.0 >= self.slots.len() {
            return Err(RingError::PositionOutOfRange {
                index: position.0,
                len: self.slots.len(),
            });
        }

        Ok(Self {
            slots: Arc::clone(&self.slots),
            position: position.0,
            cancel: self.cancel.clone(),
        })
    }

    /// Check whether two cursors walk the same slot storage.
    #[must_use]
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.slots, &other.slots)
    }

    #[inline]
    fn next_index(&self) -> usize {
        let next = self.position + 1;
        if next == self.slots.len() { 0 } else { next }
    }
}

impl<S> Clone for RingCursor<S> {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
            position: self.position,
            cancel: self.cancel.clone(),
        }
    }
}

impl<S> fmt::Debug for RingCursor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingCursor")
            .field("len", &self.slots.len())
            .field("position", &self.position)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}
