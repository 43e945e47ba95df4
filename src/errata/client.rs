//! Release-tracking service client
//!
//! Builds the service URLs and rejects responses that carry the
//! authentication failure marker. Everything else is left to the transport.

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info};

use crate::config::ServiceConfig;
use crate::errata::error::ErrataError;
use crate::errata::transport::Transport;

#[derive(Clone)]
pub struct ErrataClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    auth_failure_marker: String,
}

impl ErrataClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        base_url: &str,
        auth_failure_marker: &str,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_failure_marker: auth_failure_marker.to_string(),
        }
    }

    pub fn from_config(transport: Arc<dyn Transport>, config: &ServiceConfig) -> Self {
        Self::new(transport, &config.errata_url, &config.auth_failure_marker)
    }

    /// Advisory listing page of a package
    pub fn package_listing_url(&self, package_name: &str) -> String {
        format!("{}/package/show/{}", self.base_url, package_name)
    }

    /// Structured advisory record
    pub fn advisory_json_url(&self, advisory_id: &str) -> String {
        format!("{}/advisory/{}.json", self.base_url, advisory_id)
    }

    /// Advisory detail page
    pub fn advisory_page_url(&self, advisory_id: &str) -> String {
        format!("{}/advisory/{}", self.base_url, advisory_id)
    }

    /// Structured release record
    pub fn release_json_url(&self, release_id: &str) -> String {
        format!("{}/api/v1/releases/{}", self.base_url, release_id)
    }

    pub async fn fetch_package_listing(&self, package_name: &str) -> Result<String, ErrataError> {
        info!("Querying errata for package {}", package_name);
        self.fetch(&self.package_listing_url(package_name)).await
    }

    pub async fn fetch_advisory(&self, advisory_id: &str) -> Result<Value, ErrataError> {
        self.fetch_json(&self.advisory_json_url(advisory_id)).await
    }

    pub async fn fetch_advisory_page(&self, advisory_id: &str) -> Result<String, ErrataError> {
        self.fetch(&self.advisory_page_url(advisory_id)).await
    }

    pub async fn fetch_release(&self, release_id: &str) -> Result<Value, ErrataError> {
        self.fetch_json(&self.release_json_url(release_id)).await
    }

    async fn fetch_json(&self, url: &str) -> Result<Value, ErrataError> {
        let body = self.fetch(url).await?;
        serde_json::from_str(&body)
            .map_err(|e| ErrataError::InvalidResponse(format!("{}: {}", url, e)))
    }

    async fn fetch(&self, url: &str) -> Result<String, ErrataError> {
        let body = self.transport.fetch_text(url).await?;

        if !self.auth_failure_marker.is_empty() && body.contains(&self.auth_failure_marker) {
            error!("Not authenticated against {}", url);
            return Err(ErrataError::Authentication {
                url: url.to_string(),
            });
        }

        Ok(body)
    }
}
