//! # Sensor Reading
//!
//! Normalized view of one sensor's telemetry, derived from the raw feed.

use chrono::{DateTime, Utc};

/// One sensor's current telemetry plus its display label.
///
/// Built fresh from every successful fetch and replaced wholesale on the
/// next one; only the numeric `id` is stable across refreshes. It doubles
/// as the notification key and the list identity in the rendered grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    /// Unique numeric identifier, parsed from the feed key
    pub id: i64,
    /// Human-readable name resolved from the feed's metadata section
    pub label: String,
    /// Primary measurement; absent when the sensor skipped this refresh
    pub temperature: Option<f64>,
    /// Battery measurement; absent when the sensor does not report one
    pub battery: Option<f64>,
    /// When the sensor last reported
    pub last_update: Option<DateTime<Utc>>,
}
