//! Release date resolution for a single advisory
//!
//! Sources are tried in order and the first one that knows a date wins:
//!
//! 1. `timestamps.release_date` of the advisory JSON record
//! 2. `ship_date` of the advisory's parent release JSON record
//! 3. The `Release date` cell of the advisory HTML page
//!
//! Shipped advisories nearly always have the first; pending ones usually
//! only carry the release window of their parent release. Finding nothing
//! is a valid outcome and yields [`ReleaseDate::Unknown`].

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errata::client::ErrataClient;
use crate::errata::error::ErrataError;
use crate::parser::advisory_page::AdvisoryPageParser;
use crate::parser::types::ReleaseDate;

/// What the advisory JSON record says about dates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvisoryDetails {
    pub release_date: Option<NaiveDate>,
    pub release_id: Option<String>,
}

impl AdvisoryDetails {
    pub fn from_json(value: &Value) -> Self {
        let release_date = value
            .pointer("/timestamps/release_date")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .and_then(calendar_date);

        // Newer records nest the release, older ones only carry a group id
        let release_id = value
            .pointer("/release/id")
            .or_else(|| {
                value
                    .get("errata")
                    .and_then(Value::as_object)
                    .and_then(|types| types.values().find_map(|e| e.get("group_id")))
            })
            .and_then(id_string);

        Self {
            release_date,
            release_id,
        }
    }
}

/// Reads `ship_date` from a release JSON record
pub fn ship_date(value: &Value) -> Option<NaiveDate> {
    value
        .get("ship_date")
        .or_else(|| value.pointer("/data/attributes/ship_date"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .and_then(calendar_date)
}

/// Calendar part of a timestamp such as `2021-05-04T00:00:00Z`
fn calendar_date(timestamp: &str) -> Option<NaiveDate> {
    let date = timestamp.split(['T', ' ']).next().unwrap_or(timestamp);
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .inspect_err(|e| warn!("Unparseable date {:?}: {}", timestamp, e))
        .ok()
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Turns "document missing or not valid JSON" into `None`.
///
/// Transport failures and unexpected HTTP statuses are kept: an outage must
/// not pass for a missing date.
fn optional<T>(result: Result<T, ErrataError>) -> Result<Option<T>, ErrataError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ErrataError::NotFound(url)) => {
            debug!("No document at {}", url);
            Ok(None)
        }
        Err(ErrataError::InvalidResponse(msg)) => {
            warn!("Ignoring unusable response: {}", msg);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

pub struct DateResolver {
    client: ErrataClient,
    page_parser: AdvisoryPageParser,
}

impl DateResolver {
    pub fn new(client: ErrataClient) -> Self {
        Self {
            client,
            page_parser: AdvisoryPageParser::new(),
        }
    }

    /// Resolves the release date of one advisory
    ///
    /// Fails when any fetch fails for a reason other than the document
    /// being absent or undecodable.
    pub async fn resolve_date(&self, advisory_id: &str) -> Result<ReleaseDate, ErrataError> {
        let details = optional(self.client.fetch_advisory(advisory_id).await)?
            .map(|json| AdvisoryDetails::from_json(&json))
            .unwrap_or_default();

        if let Some(date) = details.release_date {
            debug!("{}: release date {} from advisory record", advisory_id, date);
            return Ok(ReleaseDate::Date(date));
        }

        if let Some(release_id) = &details.release_id {
            let release = optional(self.client.fetch_release(release_id).await)?;
            if let Some(date) = release.as_ref().and_then(ship_date) {
                debug!(
                    "{}: release date {} from release {}",
                    advisory_id, date, release_id
                );
                return Ok(ReleaseDate::Date(date));
            }
        }

        let page = optional(self.client.fetch_advisory_page(advisory_id).await)?;
        let date = page
            .map(|html| self.page_parser.parse(&html))
            .unwrap_or(ReleaseDate::Unknown);

        if date.is_known() {
            debug!("{}: release date {} from advisory page", advisory_id, date);
        } else {
            warn!("{}: no release date found", advisory_id);
        }

        Ok(date)
    }
}
