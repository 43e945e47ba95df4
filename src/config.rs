use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Deserialize;
use tracing::info;

// =============================================================================
// Defaults
// =============================================================================

/// Base URL of the release-tracking service
pub const DEFAULT_ERRATA_URL: &str = "https://errata.devel.redhat.com";

/// Body marker the service returns when the caller is not authenticated
pub const DEFAULT_AUTH_FAILURE_MARKER: &str = "401 Unauthorized";

/// Timeout for a single fetch in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Requests in flight at once; 1 resolves advisories one after another
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 1;

pub const DEFAULT_CONFIG_FILE: &str = "config.yml";
pub const DEFAULT_LOG_FILE: &str = "details.log";
pub const DEFAULT_MANIFEST_FILE: &str = "manifest-rpm.txt";

/// Location of the package manifest inside a mounted image
pub const IMAGE_MANIFEST_PATH: &str = "isolinux/manifest-rpm.txt";

static RELEASE_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Date should match format `YYYY-MM-DD`, got `{0}`")]
    InvalidReleaseDate(String),
}

/// A package to check and the release its advisories are filed against.
///
/// Written in YAML as a two-element list: `[rhev-hypervisor, RHEV-3.6]`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PackageCheck(pub String, pub String);

impl PackageCheck {
    pub fn package(&self) -> &str {
        &self.0
    }

    pub fn release(&self) -> &str {
        &self.1
    }
}

/// Run configuration loaded from `config.yml`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    #[serde(rename = "competent_need_to_check")]
    pub packages: Vec<PackageCheck>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default = "default_manifest_path")]
    pub manifest_path: PathBuf,
}

/// Connection settings for the release-tracking service
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    pub errata_url: String,
    pub auth_failure_marker: String,
    pub max_concurrent_requests: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            errata_url: DEFAULT_ERRATA_URL.to_string(),
            auth_failure_marker: DEFAULT_AUTH_FAILURE_MARKER.to_string(),
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }
}

impl ServiceConfig {
    /// Concurrency limit, never below one
    pub fn concurrency(&self) -> usize {
        self.max_concurrent_requests.max(1)
    }
}

fn default_manifest_path() -> PathBuf {
    PathBuf::from(DEFAULT_MANIFEST_FILE)
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!("Loading config from {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Path of the package manifest for the given image.
    ///
    /// A directory is treated as an already mounted image; anything else
    /// falls back to the configured manifest path.
    pub fn manifest_for_image(&self, image: &Path) -> PathBuf {
        if image.is_dir() {
            image.join(IMAGE_MANIFEST_PATH)
        } else {
            self.manifest_path.clone()
        }
    }
}

/// Parses a `--release-date` value in `YYYY-MM-DD` form
pub fn parse_release_date(value: &str) -> Result<NaiveDate, ConfigError> {
    if !RELEASE_DATE_RE.is_match(value) {
        return Err(ConfigError::InvalidReleaseDate(value.to_string()));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ConfigError::InvalidReleaseDate(value.to_string()))
}
