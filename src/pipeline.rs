//! # Refresh Pipeline
//!
//! Orchestrates one refresh: fetch the feed, parse it, render the grid and
//! dispatch low-battery alerts.
//!
//! A failed refresh leaves the previously rendered grid untouched; the error
//! is reported to the caller as a transient condition, never a crash. At
//! most one fetch is in flight at a time: a refresh requested while one is
//! outstanding is coalesced instead of launching a second request.

use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::alert::dispatch::dispatch_alerts;
use crate::alert::notifier::Notifier;
use crate::config::{AlertConfig, FieldConfig};
use crate::error::Result;
use crate::feed::client::FeedClient;
use crate::feed::parser::parse_feed;
use crate::presenter::Presenter;

/// What a refresh request resulted in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The grid was re-rendered with this many readings, and this many
    /// low-battery alerts were dispatched
    Rendered { readings: usize, alerts: usize },
    /// A fetch was already in flight; this request was dropped in its favor
    Coalesced,
}

/// Fetch-parse-render-alert pipeline
pub struct Pipeline<C, P, N> {
    client: C,
    presenter: Mutex<P>,
    notifier: Mutex<N>,
    fields: FieldConfig,
    alerts: AlertConfig,
    in_flight: AtomicBool,
}

impl<C, P, N> Pipeline<C, P, N>
where
    C: FeedClient,
    P: Presenter,
    N: Notifier,
{
    pub fn new(client: C, presenter: P, notifier: N, fields: FieldConfig, alerts: AlertConfig) -> Self {
        Self {
            client,
            presenter: Mutex::new(presenter),
            notifier: Mutex::new(notifier),
            fields,
            alerts,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Run one refresh, coalescing with any refresh already in flight
    ///
    /// # Returns
    ///
    /// * `Result<RefreshOutcome>` - What happened, or the stage that failed
    ///
    /// # Errors
    ///
    /// Returns `Network` if the fetch fails, `MalformedFeed` if the document
    /// cannot be parsed. Neither renders nor dispatches anything.
    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Refresh already in flight, coalescing request");
            return Ok(RefreshOutcome::Coalesced);
        }

        let outcome = self.run_refresh().await;
        self.in_flight.store(false, Ordering::SeqCst);
        outcome
    }

    async fn run_refresh(&self) -> Result<RefreshOutcome> {
        let document = self.client.fetch().await?;
        let readings = parse_feed(&document, &self.fields)?;

        self.presenter.lock().await.render(&readings);

        let mut notifier = self.notifier.lock().await;
        let alerts = dispatch_alerts(
            &readings,
            self.alerts.battery_threshold,
            &self.alerts.message,
            &mut *notifier,
        )
        .await?;

        info!(readings = readings.len(), alerts, "Refresh complete");
        Ok(RefreshOutcome::Rendered {
            readings: readings.len(),
            alerts,
        })
    }
}
