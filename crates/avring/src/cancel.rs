//! Cooperative, one-shot cancellation shared by a ring and all of its views.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{RingError, RingResult};

/// Shared stop condition observed by every blocking ring operation.
///
/// Cloning the signal produces another handle to the same flag. Once
/// [`cancel`](Self::cancel) has been called on any handle, every handle
/// reports cancellation forever; there is no way to reset it.
///
/// # Example
///
/// ```rust
/// use avring::CancelSignal;
///
/// let signal = CancelSignal::new();
/// let observer = signal.clone();
/// assert!(observer.err().is_ok());
///
/// signal.cancel();
/// assert!(observer.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    cancelled: Arc<AtomicBool>,
}

impl CancelSignal {
    /// Create a signal that has not fired.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the signal. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Check whether the signal has fired.
    ///
    /// A single atomic load, cheap enough for spin loops.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Report the signal state as a result.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::Cancelled`] once the signal has fired.
    #[inline]
    pub fn err(&self) -> RingResult {
        if self.is_cancelled() {
            Err(RingError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Check whether two handles observe the same flag.
    #[must_use]
    pub fn same_signal(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}

#[cfg(test)]
impl CancelSignal {
    /// Signal that fires on its own after `deadline`. Bounds blocking reads in
    /// single-threaded tests.
    pub(crate) fn with_deadline(deadline: std::time::Duration) -> Self {
        let signal = Self::new();
        let guard = signal.clone();
        std::thread::spawn(move || {
            std::thread::sleep(deadline);
            guard.cancel();
        });
        signal
    }
}
