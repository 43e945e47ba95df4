//! Matching advisory rows against the version installed on the image
//!
//! A row matches when its release/build column contains the installed
//! version string. The flags only drive highlighting in reports.

use crate::errata::engine::ResultSet;
use crate::parser::types::AdvisoryRow;

/// Whether `row` refers to `installed_version`
pub fn matches_installed<R: AdvisoryRow + ?Sized>(row: &R, installed_version: &str) -> bool {
    !installed_version.is_empty() && row.version_column().contains(installed_version)
}

/// Match flags for every row of a [`ResultSet`], in the same order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionMatches {
    pub active: Vec<bool>,
    pub shipped: Vec<bool>,
}

impl VersionMatches {
    /// Flags each row; nothing matches when no version is installed
    pub fn new(result: &ResultSet, installed_version: Option<&str>) -> Self {
        let flag = |row: &dyn AdvisoryRow| {
            installed_version.is_some_and(|version| matches_installed(row, version))
        };

        Self {
            active: result.active.iter().map(|dated| flag(&dated.row)).collect(),
            shipped: result.shipped.iter().map(|dated| flag(&dated.row)).collect(),
        }
    }

    pub fn any(&self) -> bool {
        self.active.iter().chain(&self.shipped).any(|m| *m)
    }
}
