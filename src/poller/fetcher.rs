//! Upstream HTTP client.

use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;

use crate::config::UpstreamConfig;

/// Errors that can occur while fetching the upstream document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("failed to build upstream client: {0}")]
    Client(#[source] reqwest::Error),

    /// DNS, connect, TLS or other transport failure.
    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The fetch did not finish within the configured deadline.
    #[error("upstream request timed out after {0} seconds")]
    Timeout(u64),

    /// Upstream answered with a non-success status and
    /// `reject_error_status` is set.
    #[error("upstream returned status {0}")]
    Status(u16),

    /// The response body could not be read to the end.
    #[error("failed to read upstream body: {0}")]
    Body(#[source] reqwest::Error),
}

impl FetchError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Client(_) => "client",
            FetchError::Transport(_) => "transport",
            FetchError::Timeout(_) => "timeout",
            FetchError::Status(_) => "status",
            FetchError::Body(_) => "body",
        }
    }
}

/// Fetches the upstream document with a fixed User-Agent and deadline.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    url: String,
    timeout_secs: u64,
    reject_error_status: bool,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs));
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(FetchError::Client)?;

        Ok(Self {
            client,
            url: config.url.clone(),
            timeout_secs: config.timeout_secs,
            reject_error_status: config.reject_error_status,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// GET the document and read the whole body into memory.
    ///
    /// Any completed response counts, whatever its status, unless the client
    /// was configured to reject error statuses.
    pub async fn fetch(&self) -> Result<Bytes, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.classify(e, FetchError::Transport))?;

        let status = response.status();
        if !status.is_success() {
            if self.reject_error_status {
                return Err(FetchError::Status(status.as_u16()));
            }
            tracing::warn!(
                url = %self.url,
                status = %status,
                "Upstream answered with error status, caching body anyway"
            );
        }

        response
            .bytes()
            .await
            .map_err(|e| self.classify(e, FetchError::Body))
    }

    fn classify(
        &self,
        e: reqwest::Error,
        otherwise: fn(reqwest::Error) -> FetchError,
    ) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout_secs)
        } else {
            otherwise(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            FetchError::Timeout(10).to_string(),
            "upstream request timed out after 10 seconds"
        );
        assert_eq!(FetchError::Status(503).to_string(), "upstream returned status 503");
        assert_eq!(FetchError::Status(503).kind(), "status");
    }

    #[test]
    fn test_client_keeps_configured_url() {
        let config = UpstreamConfig {
            url: "http://127.0.0.1:1/inventory".into(),
            ..UpstreamConfig::default()
        };
        let client = UpstreamClient::new(&config).unwrap();
        assert_eq!(client.url(), "http://127.0.0.1:1/inventory");
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Port 1 is reserved and nothing listens on it in test environments.
        let config = UpstreamConfig {
            url: "http://127.0.0.1:1/".into(),
            timeout_secs: 2,
            system_proxy: false,
            ..UpstreamConfig::default()
        };
        let client = UpstreamClient::new(&config).unwrap();
        let err = client.fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)), "got {err:?}");
    }
}
