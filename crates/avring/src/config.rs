//! Ring configuration and the spin-wait polling strategy.
//!
//! Readers never block on an OS primitive. A reader whose slot is not yet
//! published performs one [`PollStrategy::pause`] and re-checks, so the poll
//! interval trades CPU for latency: `0` yields the thread between checks,
//! anything larger sleeps that long.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{RingError, RingResult};

/// Default number of slots in a ring.
pub const DEFAULT_SLOT_COUNT: usize = 256;

/// How a spin-waiting reader spends the time between readiness checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollStrategy {
    /// Give up the rest of the thread's time slice.
    #[default]
    Yield,
    /// Sleep for a fixed interval.
    Sleep(Duration),
}

impl PollStrategy {
    /// Map a poll interval onto a strategy. Zero means [`PollStrategy::Yield`].
    #[must_use]
    pub fn from_interval(interval: Duration) -> Self {
        if interval.is_zero() {
            Self::Yield
        } else {
            Self::Sleep(interval)
        }
    }

    /// Upper bound on how long one [`pause`](Self::pause) takes to return.
    #[must_use]
    pub fn interval(&self) -> Duration {
        match self {
            Self::Yield => Duration::ZERO,
            Self::Sleep(interval) => *interval,
        }
    }

    /// Perform one wait step.
    #[inline]
    pub fn pause(&self) {
        match self {
            Self::Yield => std::thread::yield_now(),
            Self::Sleep(interval) => std::thread::sleep(*interval),
        }
    }
}

/// Ring configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Number of slots. Fixed for the lifetime of the ring.
    pub slots: usize,
    /// Spin-wait poll interval (microseconds). `0` yields instead of sleeping.
    pub poll_interval_us: u64,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            slots: DEFAULT_SLOT_COUNT,
            poll_interval_us: 0,
        }
    }
}

impl RingConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot count is zero.
    pub fn validate(&self) -> RingResult {
        if self.slots == 0 {
            return Err(RingError::invalid_config("slots must be greater than 0"));
        }
        Ok(())
    }

    /// Parse and validate a configuration from JSON.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::InvalidConfig`] if the JSON is malformed or the
    /// resulting configuration fails validation.
    pub fn from_json_str(json: &str) -> RingResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| RingError::invalid_config(format!("malformed JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Poll interval as a duration.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_micros(self.poll_interval_us)
    }

    /// Polling strategy derived from the poll interval.
    #[must_use]
    pub fn poll_strategy(&self) -> PollStrategy {
        PollStrategy::from_interval(self.poll_interval())
    }

    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> RingConfigBuilder {
        RingConfigBuilder::default()
    }
}

/// Builder for `RingConfig`.
#[derive(Debug, Default)]
pub struct RingConfigBuilder {
    config: RingConfig,
}

impl RingConfigBuilder {
    /// Set the slot count.
    #[must_use]
    pub fn slots(mut self, slots: usize) -> Self {
        self.config.slots = slots;
        self
    }

    /// Set the poll interval. Sub-microsecond precision is truncated.
    #[must_use]
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval_us = u64::try_from(interval.as_micros()).unwrap_or(u64::MAX);
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> RingResult<RingConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
