//! Errata coverage checks for packages installed on a built image
//!
//! Given a package name and a target release, the resolution engine fetches
//! the package's advisory listing from the release-tracking service, splits
//! it into active and shipped advisories for that release, and attaches a
//! release date to every advisory.
//!
//! # Modules
//!
//! - [`config`]: YAML configuration and shared constants
//! - [`errata`]: Transport, date resolution and the resolution engine
//! - [`logging`]: Console plus run-log file logging context
//! - [`parser`]: Network-free parsing of listing pages, advisory pages and manifests
//! - [`report`]: Text and JSON rendering of check results

pub mod config;
pub mod errata;
pub mod logging;
pub mod parser;
pub mod report;
