//! API client metrics.
//!
//! Provides standardized metrics for monitoring backend calls:
//! - Request counters by operation and status
//! - Latency histograms
//! - Session expiry counter

use metrics::{counter, histogram};

// =============================================================================
// Metric Names
// =============================================================================

/// Metric name constants for consistency.
pub mod names {
    /// Total API requests by operation and status.
    pub const REQUESTS_TOTAL: &str = "jobboard_api_requests_total";

    /// Request latency in seconds by operation.
    pub const LATENCY_SECONDS: &str = "jobboard_api_latency_seconds";

    /// Sessions ended by a 401 from the backend.
    pub const SESSION_EXPIRED_TOTAL: &str = "jobboard_session_expired_total";
}

// =============================================================================
// Recording Functions
// =============================================================================

/// Record metrics for a completed API request.
///
/// `status` is 0 when no response was received.
pub fn record_request(operation: &str, status: u16, latency_ms: f64) {
    counter!(
        names::REQUESTS_TOTAL,
        "operation" => operation.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        names::LATENCY_SECONDS,
        "operation" => operation.to_string()
    )
    .record(latency_ms / 1000.0);
}

/// Record a session ended by the transport's 401 handling.
pub fn record_session_expired(operation: &str) {
    counter!(
        names::SESSION_EXPIRED_TOTAL,
        "operation" => operation.to_string()
    )
    .increment(1);
}
