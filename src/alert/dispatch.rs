//! # Alert Dispatch
//!
//! Walks the parsed readings in order and emits one alert request per
//! reading flagged by the evaluator.

use tracing::debug;

use super::evaluator::needs_recharge;
use super::notifier::Notifier;
use crate::error::Result;
use crate::feed::reading::SensorReading;

/// Dispatch low-battery alerts for a refresh's readings
///
/// # Arguments
///
/// * `readings` - Parsed readings in the parser's output order
/// * `threshold` - Inclusive low-battery threshold
/// * `message` - Fixed alert text appended after the sensor label
/// * `notifier` - Alert sink; idempotent by sensor id
///
/// # Returns
///
/// * `Result<usize>` - Number of alerts dispatched
///
/// # Errors
///
/// Propagates the first notifier failure.
pub async fn dispatch_alerts(
    readings: &[SensorReading],
    threshold: f64,
    message: &str,
    notifier: &mut dyn Notifier,
) -> Result<usize> {
    let mut dispatched = 0;

    for reading in readings {
        if needs_recharge(reading, threshold) {
            debug!(sensor_id = reading.id, battery = reading.battery,
                "Dispatching low battery alert for {}", reading.label);
            notifier.notify(reading.id, &reading.label, message).await?;
            dispatched += 1;
        }
    }

    Ok(dispatched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::notifier::mocks::MockNotifier;

    fn reading(id: i64, label: &str, battery: Option<f64>) -> SensorReading {
        SensorReading {
            id,
            label: label.to_string(),
            temperature: None,
            battery,
            last_update: None,
        }
    }

    #[tokio::test]
    async fn test_one_alert_per_flagged_reading() {
        let readings = vec![
            reading(1, "Garden", Some(5.0)),
            reading(2, "Attic", Some(80.0)),
            reading(3, "Cellar", Some(12.0)),
            reading(4, "Porch", None),
        ];
        let mut notifier = MockNotifier::new();

        let dispatched = dispatch_alerts(&readings, 15.0, "needs recharging", &mut notifier)
            .await
            .unwrap();

        assert_eq!(dispatched, 2);
        let requests = notifier.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0], (1, "Garden".to_string(), "needs recharging".to_string()));
        assert_eq!(requests[1], (3, "Cellar".to_string(), "needs recharging".to_string()));
    }

    #[tokio::test]
    async fn test_dispatch_follows_parser_order() {
        let readings = vec![
            reading(9, "Porch", Some(1.0)),
            reading(2, "Shed", Some(2.0)),
            reading(5, "Roof", Some(3.0)),
        ];
        let mut notifier = MockNotifier::new();

        dispatch_alerts(&readings, 15.0, "m", &mut notifier).await.unwrap();

        let ids: Vec<i64> = notifier.requests().iter().map(|(id, _, _)| *id).collect();
        assert_eq!(ids, vec![9, 2, 5]);
    }

    #[tokio::test]
    async fn test_no_duplicate_ids_across_refreshes() {
        let readings = vec![reading(1, "Garden", Some(5.0))];
        let mut notifier = MockNotifier::new();

        // Two refreshes flag the same sensor
        dispatch_alerts(&readings, 15.0, "m", &mut notifier).await.unwrap();
        dispatch_alerts(&readings, 15.0, "m", &mut notifier).await.unwrap();

        // Two requests were sent, but the notifier keeps a single alert
        assert_eq!(notifier.requests().len(), 2);
        assert_eq!(notifier.active_alerts(), 1);
    }

    #[tokio::test]
    async fn test_empty_readings_dispatch_nothing() {
        let mut notifier = MockNotifier::new();
        let dispatched = dispatch_alerts(&[], 15.0, "m", &mut notifier).await.unwrap();
        assert_eq!(dispatched, 0);
        assert!(notifier.requests().is_empty());
    }

    #[tokio::test]
    async fn test_scenario_garden_battery_five() {
        let readings = vec![reading(1, "Garden", Some(5.0))];
        let mut notifier = MockNotifier::new();

        let dispatched =
            dispatch_alerts(&readings, 15.0, "battery is low and needs recharging", &mut notifier)
                .await
                .unwrap();

        assert_eq!(dispatched, 1);
        assert_eq!(
            notifier.requests(),
            vec![(1, "Garden".to_string(), "battery is low and needs recharging".to_string())]
        );
    }
}
