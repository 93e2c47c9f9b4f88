//! Read-loop adapter: push every value a reader observes into a sink.
//!
//! The loop reads the view's current slot first, then alternates advance and
//! read, and stops only when the shared cancellation signal fires (or when a
//! channel sink loses its receiver). The sink's shape is matched once at
//! entry; each shape runs its own loop.

use crossbeam::channel::{SendTimeoutError, Sender, TrySendError};
use std::fmt;
use tracing::{debug, warn};

use crate::cancel::CancelSignal;
use crate::config::PollStrategy;
use crate::error::{RingError, RingResult};
use crate::ring::ValueRing;

/// Destination for values produced by [`ValueRing::read_loop`].
pub enum Sink<'a, T> {
    /// Send each value into a channel, waiting while it is full.
    Channel(Sender<T>),
    /// Invoke a callback once per value on the loop's own thread.
    Callback(Box<dyn FnMut(T) + 'a>),
}

impl<'a, T> Sink<'a, T> {
    /// Channel-backed sink.
    #[must_use]
    pub fn channel(tx: Sender<T>) -> Self {
        Self::Channel(tx)
    }

    /// Callback-backed sink.
    #[must_use]
    pub fn callback(f: impl FnMut(T) + 'a) -> Self {
        Self::Callback(Box::new(f))
    }

    /// Short name of the sink shape, for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Channel(_) => "channel",
            Self::Callback(_) => "callback",
        }
    }
}

impl<T> From<Sender<T>> for Sink<'_, T> {
    fn from(tx: Sender<T>) -> Self {
        Self::Channel(tx)
    }
}

impl<T> fmt::Debug for Sink<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Sink").field(&self.kind()).finish()
    }
}

/// Outcome of a read loop that ended on cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[must_use]
pub struct LoopSummary {
    /// Number of values handed to the sink.
    pub delivered: u64,
}

enum Delivery {
    Delivered,
    Cancelled,
    Disconnected,
}

/// Send one value, re-checking cancellation at every poll step.
fn send_polling<T>(
    tx: &Sender<T>,
    mut value: T,
    poll: PollStrategy,
    cancel: &CancelSignal,
) -> Delivery {
    loop {
        if cancel.is_cancelled() {
            return Delivery::Cancelled;
        }
        match poll {
            PollStrategy::Yield => match tx.try_send(value) {
                Ok(()) => return Delivery::Delivered,
                Err(TrySendError::Full(v)) => {
                    value = v;
                    std::thread::yield_now();
                }
                Err(TrySendError::Disconnected(_)) => return Delivery::Disconnected,
            },
            PollStrategy::Sleep(interval) => match tx.send_timeout(value, interval) {
                Ok(()) => return Delivery::Delivered,
                Err(SendTimeoutError::Timeout(v)) => value = v,
                Err(SendTimeoutError::Disconnected(_)) => return Delivery::Disconnected,
            },
        }
    }
}

impl<T: Clone> ValueRing<T> {
    /// Deliver every value this view reads to `sink` until cancellation.
    ///
    /// The first value is the current slot's; every later value comes from
    /// advancing one slot and waiting for it. The view's position is left on
    /// the last slot read.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::SinkDisconnected`] if a channel sink's receiver
    /// is dropped while the loop runs.
    pub fn read_loop(&mut self, sink: Sink<'_, T>) -> RingResult<LoopSummary> {
        debug!(
            sink = sink.kind(),
            position = self.position().index(),
            "read loop started"
        );

        let result = match sink {
            Sink::Channel(tx) => {
                let poll = self.poll_strategy();
                let cancel = self.cancel_signal().clone();
                self.drive(|value| send_polling(&tx, value, poll, &cancel))
            }
            Sink::Callback(mut f) => self.drive(|value| {
                f(value);
                Delivery::Delivered
            }),
        };

        match &result {
            Ok(summary) => debug!(
                delivered = summary.delivered,
                reason = "cancelled",
                "read loop stopped"
            ),
            Err(RingError::SinkDisconnected { delivered }) => {
                warn!(
                    delivered,
                    reason = "sink disconnected",
                    "read loop sink disconnected"
                );
            }
            Err(e) => warn!(error = %e, reason = "error", "read loop stopped"),
        }
        result
    }

    fn drive(&mut self, mut deliver: impl FnMut(T) -> Delivery) -> RingResult<LoopSummary> {
        let mut summary = LoopSummary::default();
        if self.is_cancelled() {
            return Ok(summary);
        }
        let mut next = self.read();

        while let Some(value) = next {
            match deliver(value) {
                Delivery::Delivered => summary.delivered += 1,
                Delivery::Cancelled => break,
                Delivery::Disconnected => {
                    return Err(RingError::SinkDisconnected {
                        delivered: summary.delivered,
                    });
                }
            }
            // Published slots stay readable after cancellation; stop here.
            if self.is_cancelled() {
                break;
            }
            next = self.next_read();
        }

        Ok(summary)
    }
}
