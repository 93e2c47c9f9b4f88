//! Value ring: payload and readiness semantics over a [`RingCursor`].
//!
//! One view is the writer. It stores into its current slot with
//! [`ValueRing::write`] and moves on with [`ValueRing::step`]. Any number of
//! reader views, obtained with `clone` or [`ValueRing::sub_ring`], walk the
//! same slots at their own pace and spin-wait on each slot's readiness flag.
//!
//! # Publication order
//!
//! Every publish clears the readiness of the slot after the current one
//! before setting the current slot readable. The writer therefore always
//! enters a slot that readers already treat as unpublished, and a reader
//! parked one slot ahead of the writer keeps waiting for the next lap's value
//! instead of consuming the previous lap's.
//!
//! # Loss
//!
//! The writer never waits for readers. A reader that falls a full lap behind
//! finds slots holding the most recent value written to them; intermediate
//! values are gone.

use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::cancel::CancelSignal;
use crate::config::{PollStrategy, RingConfig};
use crate::cursor::{RingCursor, SlotPosition};
use crate::error::RingResult;
use crate::slot::Slot;

/// A view into a shared ring of published values.
///
/// # Example
///
/// ```rust
/// use avring::{CancelSignal, ValueRing};
///
/// let mut writer = ValueRing::<u32>::new(CancelSignal::new(), 4);
/// let mut reader = writer.clone();
///
/// writer.write(1);
/// writer.step();
/// writer.write(2);
///
/// assert_eq!(reader.read(), Some(1));
/// assert_eq!(reader.next_read(), Some(2));
/// ```
pub struct ValueRing<T> {
    cursor: RingCursor<Slot<T>>,
    poll: PollStrategy,
}

impl<T: Default> ValueRing<T> {
    /// Create a ring of `n` unreadable slots holding `T::default()`.
    ///
    /// Readers poll with [`PollStrategy::Yield`] until configured otherwise.
    ///
    /// # Panics
    ///
    /// Panics if `n` is 0.
    #[must_use]
    pub fn new(cancel: CancelSignal, n: usize) -> Self {
        Self::with_initial(cancel, n, T::default)
    }

    /// Create a ring from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::InvalidConfig`](crate::RingError::InvalidConfig)
    /// if the configuration fails validation.
    pub fn from_config(cancel: CancelSignal, config: &RingConfig) -> RingResult<Self> {
        config.validate()?;
        let cursor = RingCursor::new(cancel, config.slots, || Slot::new(T::default()));
        Ok(Self::assemble(cursor, config.poll_strategy()))
    }
}

impl<T> ValueRing<T> {
    /// Create a ring of `n` unreadable slots, each holding a value from `init`.
    ///
    /// # Panics
    ///
    /// Panics if `n` is 0.
    #[must_use]
    pub fn with_initial(cancel: CancelSignal, n: usize, mut init: impl FnMut() -> T) -> Self {
        let cursor = RingCursor::new(cancel, n, || Slot::new(init()));
        Self::assemble(cursor, PollStrategy::default())
    }

    fn assemble(cursor: RingCursor<Slot<T>>, poll: PollStrategy) -> Self {
        debug!(slots = cursor.len(), poll = ?poll, "value ring initialized");
        Self { cursor, poll }
    }

    /// Set the spin-wait poll interval. Zero yields between checks.
    #[must_use]
    pub fn with_poll_interval(self, interval: Duration) -> Self {
        self.with_poll_strategy(PollStrategy::from_interval(interval))
    }

    /// Set the spin-wait strategy.
    #[must_use]
    pub fn with_poll_strategy(mut self, poll: PollStrategy) -> Self {
        self.poll = poll;
        self
    }

    /// Spin-wait strategy used by blocking reads on this view.
    #[must_use]
    pub fn poll_strategy(&self) -> PollStrategy {
        self.poll
    }

    /// Store `value` in the current slot and publish it.
    ///
    /// The cursor does not move: calling `write` twice overwrites the same
    /// slot. Use [`step`](Self::step) to move on.
    pub fn write(&self, value: T) {
        self.cursor.current().store(value);
        self.publish_current();
    }

    /// Publish the current slot as it stands and advance to the next one.
    ///
    /// The slot being entered is already unreadable, so the writer can fill
    /// it with [`write`](Self::write) without readers seeing the old lap.
    pub fn step(&mut self) {
        self.publish_current();
        self.cursor.move_next();
    }

    /// Advance one slot and return it.
    pub fn get_next(&mut self) -> &Slot<T> {
        self.cursor.move_next();
        self.cursor.current()
    }

    /// Slot under the cursor.
    #[must_use]
    pub fn current_slot(&self) -> &Slot<T> {
        self.cursor.current()
    }

    /// Advance one slot without reading.
    pub fn move_next(&mut self) {
        self.cursor.move_next();
    }

    /// Current position of this view.
    #[must_use]
    pub fn position(&self) -> SlotPosition {
        self.cursor.position()
    }

    /// Number of slots in the ring.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cursor.len()
    }

    /// Always `false`; a ring has at least one slot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cursor.is_empty()
    }

    /// Report whether the shared cancellation signal has fired.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::Cancelled`](crate::RingError::Cancelled) once the
    /// signal has fired.
    pub fn err(&self) -> RingResult {
        self.cursor.err()
    }

    /// Check whether the shared cancellation signal has fired.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cursor.is_cancelled()
    }

    /// Cancellation signal shared by every view of this ring.
    #[must_use]
    pub fn cancel_signal(&self) -> &CancelSignal {
        self.cursor.cancel_signal()
    }

    /// New view over the same slots and signal, rooted at `position`.
    ///
    /// The view inherits this view's poll strategy.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::PositionOutOfRange`](crate::RingError::PositionOutOfRange)
    /// if the ring has no such slot.
    pub fn sub_ring(&self, position: SlotPosition) -> RingResult<Self> {
        Ok(Self {
            cursor: self.cursor.rooted_at(position)?,
            poll: self.poll,
        })
    }

    /// Check whether two views walk the same slot storage.
    #[must_use]
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        self.cursor.shares_storage_with(&other.cursor)
    }

    /// Spin until the current slot is readable.
    ///
    /// An already published slot is reported readable even after
    /// cancellation. Returns `false` if cancellation is observed while still
    /// waiting.
    pub(crate) fn wait_readable(&self) -> bool {
        let slot = self.cursor.current();
        loop {
            if slot.is_readable() {
                return true;
            }
            if self.cursor.is_cancelled() {
                return false;
            }
            self.poll.pause();
        }
    }

    fn publish_current(&self) {
        self.cursor.peek_next().mark_unreadable();
        self.cursor.current().mark_readable();
    }
}

impl<T: Clone> ValueRing<T> {
    /// Wait for the current slot to be published and return its value.
    ///
    /// Returns immediately if the slot is already readable, whether or not
    /// the cancellation signal has fired. Returns `None` if the signal fires
    /// while waiting; inspect [`err`](Self::err) for the reason.
    #[must_use]
    pub fn read(&self) -> Option<T> {
        self.wait_readable().then(|| self.cursor.current().load())
    }

    /// Advance one slot, then [`read`](Self::read) it.
    pub fn next_read(&mut self) -> Option<T> {
        self.cursor.move_next();
        self.read()
    }

    /// Return the current slot's value if it is published, without waiting.
    #[must_use]
    pub fn try_read(&self) -> Option<T> {
        let slot = self.cursor.current();
        slot.is_readable().then(|| slot.load())
    }

    /// Value of the slot one step ahead, ignoring readiness.
    ///
    /// May be stale or about to be overwritten.
    #[must_use]
    pub fn next_value(&self) -> T {
        self.cursor.peek_next().load()
    }

    /// Value of the current slot, ignoring readiness.
    ///
    /// May be stale or about to be overwritten.
    #[must_use]
    pub fn current_value(&self) -> T {
        self.cursor.current().load()
    }
}

impl<T> Clone for ValueRing<T> {
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor.clone(),
            poll: self.poll,
        }
    }
}

impl<T> fmt::Debug for ValueRing<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueRing")
            .field("cursor", &self.cursor)
            .field("poll", &self.poll)
            .finish()
    }
}
