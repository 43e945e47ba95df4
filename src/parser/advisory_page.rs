//! Advisory detail page scrape
//!
//! Older advisories only expose their release date on the HTML detail page,
//! in the cell next to a `Release date` label:
//! ```text
//! <tr><td>Release date</td><td>2016-Jun-20</td></tr>
//! ```

use chrono::NaiveDate;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::parser::types::ReleaseDate;

const RELEASE_DATE_LABEL: &str = "Release date";
const ASAP_MARKER: &str = "ASAP";

/// Extracts the release date from an advisory detail page
pub struct AdvisoryPageParser {
    cell: Selector,
    /// Matches `2016-Jun-20`
    date_re: Regex,
}

impl AdvisoryPageParser {
    pub fn new() -> Self {
        Self {
            cell: Selector::parse("td").unwrap(),
            date_re: Regex::new(r"\d{4}-[a-zA-Z]{3}-\d{2}").unwrap(),
        }
    }

    /// Reads the cells following the `Release date` label
    ///
    /// Returns [`ReleaseDate::Unknown`] when no label is present or none of
    /// its siblings holds a date or the `ASAP` marker.
    pub fn parse(&self, html: &str) -> ReleaseDate {
        let document = Html::parse_document(html);

        let siblings = document
            .select(&self.cell)
            .filter(|td| td.text().collect::<String>().trim() == RELEASE_DATE_LABEL)
            .flat_map(|td| td.next_siblings().filter_map(ElementRef::wrap));

        for sibling in siblings {
            let text = sibling.text().collect::<String>();
            let text = text.trim();

            if let Some(date) = self.parse_date(text) {
                return ReleaseDate::Date(date);
            }
            if text.eq_ignore_ascii_case(ASAP_MARKER) {
                return ReleaseDate::Asap;
            }
            debug!("Ignoring release date cell {:?}", text);
        }

        ReleaseDate::Unknown
    }

    fn parse_date(&self, text: &str) -> Option<NaiveDate> {
        let found = self.date_re.find(text)?;
        NaiveDate::parse_from_str(found.as_str(), "%Y-%b-%d").ok()
    }
}

impl Default for AdvisoryPageParser {
    fn default() -> Self {
        Self::new()
    }
}
