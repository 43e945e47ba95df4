//! Errata resolution layer
//!
//! Fetches advisory data from the release-tracking service and turns it into
//! dated advisory rows per package.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Transport  │────▶│   Client    │────▶│   Engine    │
//! │  (fetch)    │     │ (urls,auth) │     │ (per pkg)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   │
//!                            ▼                   ▼
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │DateResolver │     │   Matcher   │
//!                     │  (3 tiers)  │     │(installed?) │
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`transport`]: Transport trait and the HTTP implementation
//! - [`client`]: Service URLs and authentication failure detection
//! - [`date_resolver`]: Release date fallback chain for one advisory
//! - [`engine`]: Listing fetch, classification and date attachment
//! - [`matcher`]: Installed version matching for reports
//! - [`checker`]: Runs the engine for every configured package
//! - [`error`]: Error type for service operations

pub mod checker;
pub mod client;
pub mod date_resolver;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod transport;

pub use checker::{PackageReport, check_packages};
pub use client::ErrataClient;
pub use date_resolver::DateResolver;
pub use engine::{Dated, ResolutionEngine, ResultSet};
pub use error::ErrataError;
pub use matcher::{VersionMatches, matches_installed};
pub use transport::{HttpTransport, Transport};
