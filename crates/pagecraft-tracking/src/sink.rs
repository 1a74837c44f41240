//! Event delivery sinks

use crate::event::TrackedEvent;
use std::fmt::Debug;

/// Delivery failures
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Transport-level failure (connect, DNS, TLS)
    #[error("delivery transport failed: {0}")]
    Transport(String),

    /// Endpoint answered with a non-success status
    #[error("endpoint rejected event: status {status}")]
    Rejected { status: u16 },
}

/// Where tracked events are delivered
#[async_trait::async_trait]
pub trait EventSink: Send + Sync + Debug {
    /// Deliver one event
    ///
    /// # Errors
    /// Returns error when delivery did not succeed; the caller parks the
    /// event for retry.
    async fn deliver(&self, event: &TrackedEvent) -> Result<(), SinkError>;
}

/// HTTP sink posting events to the tracking endpoint
#[derive(Debug, Clone)]
pub struct HttpEventSink {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpEventSink {
    /// Sink for a server base URL (`{base}/track-product-click`)
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/track-product-click", base_url.trim_end_matches('/')),
        }
    }

    /// Sink with a caller-configured client (timeouts, proxies)
    #[must_use]
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint: format!("{}/track-product-click", base_url.trim_end_matches('/')),
        }
    }

    /// The resolved endpoint
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl EventSink for HttpEventSink {
    async fn deliver(&self, event: &TrackedEvent) -> Result<(), SinkError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(event)
            .send()
            .await
            .map_err(|e| SinkError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(product = %event.product_name, "event delivered");
            Ok(())
        } else {
            Err(SinkError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_handles_trailing_slash() {
        assert_eq!(
            HttpEventSink::new("https://api.example.com/").endpoint(),
            "https://api.example.com/track-product-click"
        );
        assert_eq!(
            HttpEventSink::new("https://api.example.com").endpoint(),
            "https://api.example.com/track-product-click"
        );
    }
}
