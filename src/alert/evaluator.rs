//! # Battery Alert Evaluator
//!
//! Pure predicate over a single reading, independent of any notification
//! side effects so it stays unit-testable on its own.

use crate::feed::reading::SensorReading;

/// Whether a reading's battery is at or below the low-battery threshold
///
/// Policy for an absent battery field: no alert. Missing data cannot be
/// evaluated as low.
pub fn needs_recharge(reading: &SensorReading, threshold: f64) -> bool {
    matches!(reading.battery, Some(level) if level <= threshold)
}
