//! Transport test utilities

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use errata_check::errata::{ErrataClient, ErrataError, ResolutionEngine, Transport};

#[allow(dead_code)]
pub const BASE_URL: &str = "https://errata.example.com";
#[allow(dead_code)]
pub const AUTH_MARKER: &str = "401 Unauthorized";

/// Transport serving canned bodies by path and recording every request
#[allow(dead_code)]
#[derive(Default)]
pub struct StubTransport {
    bodies: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, path: &str, body: &str) -> Self {
        self.bodies
            .insert(format!("{BASE_URL}{path}"), body.to_string());
        self
    }

    /// Paths requested so far, in order
    pub fn requested_paths(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|url| url.trim_start_matches(BASE_URL).to_string())
            .collect()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn fetch_text(&self, url: &str) -> Result<String, ErrataError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| ErrataError::NotFound(url.to_string()))
    }
}

/// Create an engine on top of the given transport
#[allow(dead_code)]
pub fn create_test_engine(transport: Arc<StubTransport>, concurrency: usize) -> ResolutionEngine {
    let client = ErrataClient::new(transport, BASE_URL, AUTH_MARKER);
    ResolutionEngine::new(client, concurrency)
}
