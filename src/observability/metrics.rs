//! Metrics collection.
//!
//! # Metrics
//! - `deeplink_received_total` (counter): raw payloads by source
//! - `deeplink_parse_failures_total` (counter): malformed payloads by reason
//! - `deeplink_dispatch_total` (counter): dispatches by result
//! - `deeplink_unhandled_total` (counter): mapping gaps by intent
//! - `deeplink_fetch_total` (counter): entity fetches by kind and status
//! - `navigation_root_activations_total` (counter): tab switches by root
//!
//! # Design Decisions
//! - Uses the `metrics` facade; the host picks the exporter
//! - Labels are static strings to keep cardinality bounded

use crate::data::{EntityKind, FetchError};
use crate::deeplink::IntentKind;
use crate::navigation::RootId;

pub fn record_received(source: &'static str) {
    metrics::counter!("deeplink_received_total", "source" => source).increment(1);
}

pub fn record_parse_failure(reason: &'static str) {
    metrics::counter!("deeplink_parse_failures_total", "reason" => reason).increment(1);
}

pub fn record_dispatch(result: &'static str) {
    metrics::counter!("deeplink_dispatch_total", "result" => result).increment(1);
}

pub fn record_unhandled(intent: IntentKind) {
    metrics::counter!("deeplink_unhandled_total", "intent" => intent.as_str()).increment(1);
}

pub fn record_fetch(kind: EntityKind, error: Option<&FetchError>) {
    let status = error.map(FetchError::label).unwrap_or("ok");
    metrics::counter!("deeplink_fetch_total", "kind" => kind.as_str(), "status" => status).increment(1);
}

pub fn record_activation(root: RootId) {
    metrics::counter!("navigation_root_activations_total", "root" => root.as_str()).increment(1);
}
