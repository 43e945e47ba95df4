//! Errata check for every configured package

use serde::Serialize;
use tracing::{error, info};

use crate::config::PackageCheck;
use crate::errata::engine::{ResolutionEngine, ResultSet};
use crate::errata::error::ErrataError;
use crate::errata::matcher::VersionMatches;
use crate::parser::manifest::InstalledPackages;

/// Outcome of checking one package against one release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageReport {
    pub package: String,
    pub release: String,
    /// Version found in the image manifest, if any
    pub installed_version: Option<String>,
    pub result: ResultSet,
}

impl PackageReport {
    /// Rows referring to the installed version
    pub fn matches(&self) -> VersionMatches {
        VersionMatches::new(&self.result, self.installed_version.as_deref())
    }
}

/// Resolves the advisories of each package in turn
///
/// The first failing package aborts the whole check.
pub async fn check_packages(
    engine: &ResolutionEngine,
    installed: &InstalledPackages,
    packages: &[PackageCheck],
) -> Result<Vec<PackageReport>, ErrataError> {
    let mut reports = Vec::with_capacity(packages.len());

    for check in packages {
        info!("Checking {} against {}", check.package(), check.release());

        let result = engine
            .resolve(check.release(), check.package())
            .await
            .inspect_err(|e| error!("Failed to check {}: {}", check.package(), e))?;

        reports.push(PackageReport {
            package: check.package().to_string(),
            release: check.release().to_string(),
            installed_version: installed.version(check.package()).map(str::to_string),
            result,
        });
    }

    Ok(reports)
}
