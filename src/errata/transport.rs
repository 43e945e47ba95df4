//! Transport trait for fetching documents from the release-tracking service

use std::time::Duration;

#[cfg(test)]
use mockall::automock;
use reqwest::StatusCode;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::config::FETCH_TIMEOUT_MS;
use crate::errata::error::ErrataError;

/// Fetches raw response bodies (HTML or JSON text) by URL
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Performs a GET request and returns the body
    ///
    /// # Returns
    /// * `Ok(String)` - Response body of a successful request
    /// * `Err(ErrataError::NotFound)` - The document does not exist
    /// * `Err(ErrataError::Authentication)` - The service rejected the caller
    /// * `Err(ErrataError::Status)` - Any other unsuccessful HTTP status
    /// * `Err(ErrataError::Network)` - The request itself failed
    async fn fetch_text(&self, url: &str) -> Result<String, ErrataError>;
}

/// Transport over HTTP with a bounded number of requests in flight
pub struct HttpTransport {
    client: reqwest::Client,
    permits: Semaphore,
}

impl HttpTransport {
    pub fn new(max_concurrent_requests: usize) -> Result<Self, ErrataError> {
        let client = reqwest::Client::builder()
            .user_agent("errata-check")
            .timeout(Duration::from_millis(FETCH_TIMEOUT_MS))
            .build()?;

        Ok(Self {
            client,
            permits: Semaphore::new(max_concurrent_requests.max(1)),
        })
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn fetch_text(&self, url: &str) -> Result<String, ErrataError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| ErrataError::Closed)?;

        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ErrataError::Authentication {
                url: url.to_string(),
            });
        }

        if status == StatusCode::NOT_FOUND {
            return Err(ErrataError::NotFound(url.to_string()));
        }

        if !status.is_success() {
            warn!("Errata service returned status {}: {}", status, url);
            return Err(ErrataError::Status {
                status,
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}
