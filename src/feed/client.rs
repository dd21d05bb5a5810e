//! Trait abstraction for the feed endpoint, plus the HTTP implementation.
//!
//! One operation, one fixed endpoint, a single attempt per call: transport
//! problems surface as `Network`, an unparseable body as `MalformedFeed`.
//! Retry policy is the caller's business (there is none).

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::config::FeedConfig;
use crate::error::{Result, SensorBoardError};

/// Trait for fetching the raw feed document
#[async_trait]
pub trait FeedClient: Send + Sync {
    /// Fetch the feed document from the remote endpoint
    async fn fetch(&self) -> Result<Value>;
}

/// HTTP feed client backed by `reqwest`
pub struct HttpFeedClient {
    client: reqwest::Client,
    url: String,
}

impl std::fmt::Debug for HttpFeedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFeedClient")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl HttpFeedClient {
    /// Build an HTTP client for the configured endpoint
    ///
    /// # Arguments
    ///
    /// * `config` - Feed endpoint configuration (url, timeout, user agent)
    ///
    /// # Errors
    ///
    /// Returns `Network` if the underlying HTTP client cannot be constructed
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SensorBoardError::Network(
                format!("failed to build HTTP client: {}", e)
            ))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// Endpoint URL this client fetches from
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FeedClient for HttpFeedClient {
    async fn fetch(&self) -> Result<Value> {
        debug!("Fetching feed from {}", self.url);

        let response = self.client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SensorBoardError::Network(
                format!("request to {} failed: {}", self.url, e)
            ))?;

        if !response.status().is_success() {
            return Err(SensorBoardError::Network(
                format!("feed endpoint returned status {}", response.status())
            ));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SensorBoardError::MalformedFeed(
                format!("feed body is not valid JSON: {}", e)
            ))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_construction_from_config() {
        let config = FeedConfig {
            url: "http://sensors.example.com/feed.json".to_string(),
            timeout_ms: 5000,
            refresh_interval_s: 300,
            user_agent: "sensor-board/test".to_string(),
        };

        let client = HttpFeedClient::new(&config).unwrap();
        assert_eq!(client.url(), "http://sensors.example.com/feed.json");
    }

    #[tokio::test]
    async fn test_fetch_unreachable_endpoint_is_network_error() {
        // Nothing listens on this port; the request fails at transport level
        let config = FeedConfig {
            url: "http://127.0.0.1:1/feed.json".to_string(),
            timeout_ms: 1000,
            refresh_interval_s: 300,
            user_agent: "sensor-board/test".to_string(),
        };

        let client = HttpFeedClient::new(&config).unwrap();
        let err = client.fetch().await.unwrap_err();
        match err {
            SensorBoardError::Network(msg) => {
                assert!(msg.contains("127.0.0.1"), "cause should name the endpoint: {}", msg);
            }
            other => panic!("Expected Network error, got: {:?}", other),
        }
    }
}
