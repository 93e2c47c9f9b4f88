//! Ring slot: one payload plus its readiness flag.

use arc_swap::ArcSwap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// One storage cell of a value ring.
///
/// The payload is an atomically swapped `Arc`, so the writer replaces it
/// without waiting on readers and readers only ever see a whole value.
/// Readiness is published with `Release` and observed with `Acquire`: a
/// reader that sees the flag set also sees the payload stored before it was
/// set.
pub struct Slot<T> {
    value: ArcSwap<T>,
    can_read: AtomicBool,
}

impl<T> Slot<T> {
    /// Create an unreadable slot holding `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            value: ArcSwap::from_pointee(value),
            can_read: AtomicBool::new(false),
        }
    }

    /// Check whether the writer has published this slot.
    #[inline]
    #[must_use]
    pub fn is_readable(&self) -> bool {
        self.can_read.load(Ordering::Acquire)
    }

    /// Replace the payload without touching readiness.
    #[inline]
    pub fn store(&self, value: T) {
        self.value.store(Arc::new(value));
    }

    /// Shared handle to the payload, ignoring readiness.
    ///
    /// Holding the handle never delays the writer; a later
    /// [`store`](Self::store) swaps in a new value and leaves this one alive
    /// until the handle is dropped.
    #[inline]
    #[must_use]
    pub fn load_arc(&self) -> Arc<T> {
        self.value.load_full()
    }

    #[inline]
    pub(crate) fn mark_readable(&self) {
        self.can_read.store(true, Ordering::Release);
    }

    #[inline]
    pub(crate) fn mark_unreadable(&self) {
        self.can_read.store(false, Ordering::Release);
    }
}

impl<T: Clone> Slot<T> {
    /// Copy the payload out, ignoring readiness.
    #[inline]
    #[must_use]
    pub fn load(&self) -> T {
        T::clone(&self.value.load())
    }
}

impl<T: Default> Default for Slot<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("value", &**self.value.load())
            .field("can_read", &self.is_readable())
            .finish()
    }
}
