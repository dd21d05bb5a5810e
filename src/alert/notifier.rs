//! Trait abstraction for surfacing low-battery alerts.
//!
//! The contract is idempotence by id: re-notifying an id replaces the alert
//! already surfaced for that sensor, it never stacks a second one. The core
//! relies on this and does not re-derive it.

use async_trait::async_trait;
use std::collections::HashMap;
use tracing::warn;

use crate::error::Result;

/// Trait for posting a low-battery alert
#[async_trait]
pub trait Notifier: Send {
    /// Surface an alert for the given sensor, replacing any prior alert
    /// with the same id
    async fn notify(&mut self, id: i64, label: &str, message: &str) -> Result<()>;
}

/// Notifier that keeps the latest alert per sensor and logs it
///
/// The headless stand-in for a desktop notification surface: the per-id map
/// makes the replace-by-id semantics observable.
#[derive(Debug, Default)]
pub struct LogNotifier {
    active: HashMap<i64, String>,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sensors with an outstanding alert
    pub fn active_alerts(&self) -> usize {
        self.active.len()
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&mut self, id: i64, label: &str, message: &str) -> Result<()> {
        let text = format!("{} {}", label, message);
        let replaced = self.active.insert(id, text.clone()).is_some();
        warn!(sensor_id = id, replaced, "Low battery alert: {}", text);
        Ok(())
    }
}
