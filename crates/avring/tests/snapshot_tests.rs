//! Snapshot tests for avring.
//!
//! These pin error messages and the serialized configuration format.

use avring::{RingConfig, RingError};
use insta::assert_snapshot;

#[test]
fn snapshot_error_messages() {
    assert_snapshot!(RingError::Cancelled.to_string(), @"ring cancelled");
    assert_snapshot!(
        RingError::SinkDisconnected { delivered: 12 }.to_string(),
        @"sink disconnected after 12 values"
    );
    assert_snapshot!(
        RingError::invalid_config("slots must be greater than 0").to_string(),
        @"Invalid configuration: slots must be greater than 0"
    );
    assert_snapshot!(
        RingError::PositionOutOfRange { index: 8, len: 4 }.to_string(),
        @"slot 8 out of range for ring of 4 slots"
    );
}

#[test]
fn snapshot_default_config_json() {
    let json = serde_json::to_string(&RingConfig::default()).unwrap_or_default();
    assert_snapshot!(json, @r#"{"slots":256,"poll_interval_us":0}"#);
}
