//! Common types for parsers

use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Release date attached to an advisory once resolution has run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseDate {
    /// A fixed calendar date
    Date(NaiveDate),
    /// Advisory ships as soon as possible, no fixed date assigned
    Asap,
    /// No source knew a date
    Unknown,
}

impl ReleaseDate {
    pub fn is_known(&self) -> bool {
        !matches!(self, ReleaseDate::Unknown)
    }
}

impl fmt::Display for ReleaseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseDate::Date(date) => f.pad(&date.format("%Y-%m-%d").to_string()),
            ReleaseDate::Asap => f.pad("ASAP"),
            ReleaseDate::Unknown => f.pad("unknown"),
        }
    }
}

impl Serialize for ReleaseDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ReleaseDate::Unknown => serializer.serialize_none(),
            other => serializer.collect_str(other),
        }
    }
}

/// Access shared by both advisory table layouts
pub trait AdvisoryRow {
    /// Advisory identifier, e.g. `RHBA-2021:1234`
    fn advisory_id(&self) -> &str;

    /// Column carrying the release name and build version
    fn version_column(&self) -> &str;
}

/// Row of the first table body on a listing page (advisories still in flight)
///
/// Columns: `0` advisory, `1` synopsis, `2` builds, `3..` anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveRow {
    pub advisory_id: String,
    pub synopsis: String,
    pub builds: String,
    pub extra: Vec<String>,
}

impl ActiveRow {
    /// Builds a row from cells in page order; `None` when the builds column is absent
    pub fn from_cells(advisory_id: String, mut cells: Vec<String>) -> Option<Self> {
        if cells.len() < 2 {
            return None;
        }
        let extra = cells.split_off(2);
        let mut cells = cells.into_iter();
        Some(Self {
            advisory_id,
            synopsis: cells.next()?,
            builds: cells.next()?,
            extra,
        })
    }
}

impl AdvisoryRow for ActiveRow {
    fn advisory_id(&self) -> &str {
        &self.advisory_id
    }

    fn version_column(&self) -> &str {
        &self.builds
    }
}

/// Row of any later table body on a listing page (advisories already shipped)
///
/// Columns: `0` advisory, `1` synopsis, `2` status, `3` builds, `4..` anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippedRow {
    pub advisory_id: String,
    pub synopsis: String,
    pub status: String,
    pub builds: String,
    pub extra: Vec<String>,
}

impl ShippedRow {
    /// Builds a row from cells in page order; `None` when the builds column is absent
    pub fn from_cells(advisory_id: String, mut cells: Vec<String>) -> Option<Self> {
        if cells.len() < 3 {
            return None;
        }
        let extra = cells.split_off(3);
        let mut cells = cells.into_iter();
        Some(Self {
            advisory_id,
            synopsis: cells.next()?,
            status: cells.next()?,
            builds: cells.next()?,
            extra,
        })
    }
}

impl AdvisoryRow for ShippedRow {
    fn advisory_id(&self) -> &str {
        &self.advisory_id
    }

    fn version_column(&self) -> &str {
        &self.builds
    }
}

/// Listing rows split by table position, before any date is known
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedRows {
    pub active: Vec<ActiveRow>,
    pub shipped: Vec<ShippedRow>,
}

impl ClassifiedRows {
    pub fn len(&self) -> usize {
        self.active.len() + self.shipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
