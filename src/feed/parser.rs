//! # Feed Parser
//!
//! Converts a raw feed document into a sequence of [`SensorReading`] values.
//!
//! The document carries two parallel keyed sections joined on the sensor
//! identifier: a readings section (key -> measurement payload) and a sensors
//! section (key -> metadata including the display label). Output order
//! follows the readings section's insertion order, which `serde_json`
//! preserves via the `preserve_order` feature.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use super::reading::SensorReading;
use crate::config::FieldConfig;
use crate::error::{Result, SensorBoardError};

/// Parse a feed document into an ordered sequence of sensor readings
///
/// # Arguments
///
/// * `document` - Raw JSON feed document
/// * `fields` - Configured names of the document's sections and fields
///
/// # Returns
///
/// * `Result<Vec<SensorReading>>` - One reading per entry in the readings
///   section, in that section's iteration order
///
/// # Errors
///
/// Returns `MalformedFeed` if:
/// - The readings section is missing or not an object
/// - A reading key has no matching metadata entry, or that entry lacks a
///   string label
/// - A reading key is not numeric
/// - A measurement field is present but not numeric
pub fn parse_feed(document: &Value, fields: &FieldConfig) -> Result<Vec<SensorReading>> {
    let readings = document
        .get(&fields.readings_section)
        .and_then(Value::as_object)
        .ok_or_else(|| SensorBoardError::MalformedFeed(
            format!("missing '{}' section", fields.readings_section)
        ))?;

    let mut result = Vec::with_capacity(readings.len());

    for (key, payload) in readings {
        let id: i64 = key.parse().map_err(|_| SensorBoardError::MalformedFeed(
            format!("reading key '{}' is not a numeric sensor id", key)
        ))?;

        let payload = payload.as_object().ok_or_else(|| SensorBoardError::MalformedFeed(
            format!("reading payload for sensor {} is not an object", key)
        ))?;

        result.push(SensorReading {
            id,
            label: resolve_label(document, fields, key)?,
            temperature: numeric_field(payload, &fields.temperature_field, key)?,
            battery: numeric_field(payload, &fields.battery_field, key)?,
            last_update: timestamp_field(payload, &fields.last_update_field, key)?,
        });
    }

    Ok(result)
}

/// Resolve a sensor's display label from the document's metadata section
///
/// Structured field access only: a missing metadata entry or a non-string
/// label fails with `MalformedFeed` citing the key, rather than defaulting.
fn resolve_label(document: &Value, fields: &FieldConfig, key: &str) -> Result<String> {
    let metadata = document
        .get(&fields.sensors_section)
        .and_then(|section| section.get(key))
        .ok_or_else(|| SensorBoardError::MalformedFeed(
            format!("no '{}' entry for sensor {}", fields.sensors_section, key)
        ))?;

    metadata
        .get(&fields.label_field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| SensorBoardError::MalformedFeed(
            format!("sensor {} has no '{}' field", key, fields.label_field)
        ))
}

/// Extract an optional numeric measurement field
///
/// Absent or null fields are fine; a present non-numeric value is a
/// malformed payload, never silently coerced.
fn numeric_field(
    payload: &serde_json::Map<String, Value>,
    field: &str,
    key: &str,
) -> Result<Option<f64>> {
    match payload.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_f64().map(Some).ok_or_else(|| {
            SensorBoardError::MalformedFeed(
                format!("field '{}' of sensor {} is not numeric", field, key)
            )
        }),
    }
}

/// Extract an optional timestamp field
///
/// Accepts epoch seconds or an RFC 3339 string; anything else is malformed.
fn timestamp_field(
    payload: &serde_json::Map<String, Value>,
    field: &str,
    key: &str,
) -> Result<Option<DateTime<Utc>>> {
    let malformed = || SensorBoardError::MalformedFeed(
        format!("field '{}' of sensor {} is not a valid timestamp", field, key)
    );

    match payload.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => {
            let secs = n.as_i64().ok_or_else(malformed)?;
            match Utc.timestamp_opt(secs, 0) {
                chrono::LocalResult::Single(ts) => Ok(Some(ts)),
                _ => Err(malformed()),
            }
        }
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(|ts| Some(ts.with_timezone(&Utc)))
            .map_err(|_| malformed()),
        Some(_) => Err(malformed()),
    }
}
