//! Error types for the ring.
//!
//! Cancellation is the only condition a blocking operation ever stops on, and
//! blocking reads report it as `None` rather than through this type. `RingError`
//! covers the remaining recoverable failures: configuration, sub-ring rooting,
//! and a read loop whose channel lost its receiver.

use thiserror::Error;

/// Errors that can occur during ring operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RingError {
    /// The shared cancellation signal has fired.
    #[error("ring cancelled")]
    Cancelled,

    /// The receiving side of a channel sink was dropped during a read loop.
    #[error("sink disconnected after {delivered} values")]
    SinkDisconnected {
        /// Values delivered before the disconnect was observed.
        delivered: u64,
    },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A sub-ring was requested at a slot the ring does not have.
    #[error("slot {index} out of range for ring of {len} slots")]
    PositionOutOfRange {
        /// Requested slot index.
        index: usize,
        /// Number of slots in the ring.
        len: usize,
    },
}

impl RingError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }

    /// Check if this error only reports cancellation.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// A specialized `Result` type for ring operations.
pub type RingResult<T = ()> = std::result::Result<T, RingError>;
