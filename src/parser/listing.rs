//! Advisory listing page parser
//!
//! A package page lists advisories in several table bodies. The first body
//! holds advisories still in flight, every later body holds shipped ones.
//! The two layouts differ: the release/build column is column 2 in the first
//! body and column 3 in the others.
//!
//! Example row:
//! ```text
//! <tr>
//!   <td><a class="advisory_link" href="/advisory/RHBA-2016:1234">RHBA-2016:1234</a></td>
//!   <td>rhev-hypervisor bug fix update</td>
//!   <td>RHEV-3.6 rhev-hypervisor7-7.2-20160613.0.el7ev</td>
//! </tr>
//! ```

use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, warn};

use crate::parser::traits::RowError;
use crate::parser::types::{ActiveRow, AdvisoryRow, ClassifiedRows, ShippedRow};

/// Class carried by the link wrapping an advisory id
const ADVISORY_LINK_CLASS: &str = "advisory_link";

/// Column index the release filter reads in the first table body
const ACTIVE_VERSION_COLUMN: usize = 2;
/// Column index the release filter reads in later table bodies
const SHIPPED_VERSION_COLUMN: usize = 3;

/// Parser for advisory listing pages
pub struct ListingParser {
    tbody: Selector,
    row: Selector,
}

impl ListingParser {
    pub fn new() -> Self {
        Self {
            tbody: Selector::parse("tbody").unwrap(),
            row: Selector::parse("tr").unwrap(),
        }
    }

    /// Splits the page into active and shipped rows mentioning `release_name`
    ///
    /// Malformed rows are logged and skipped.
    pub fn parse(&self, html: &str, release_name: &str) -> ClassifiedRows {
        let document = Html::parse_document(html);
        let mut results = ClassifiedRows::default();

        for (index, tbody) in document.select(&self.tbody).enumerate() {
            debug!("Parsing errata table body {}", index);

            for (row_num, tr) in tbody.select(&self.row).enumerate() {
                let parsed = if index == 0 {
                    parse_active_row(tr).map(|row| {
                        if row.version_column().contains(release_name) {
                            results.active.push(row);
                        }
                    })
                } else {
                    parse_shipped_row(tr).map(|row| {
                        if row.version_column().contains(release_name) {
                            results.shipped.push(row);
                        }
                    })
                };

                if let Err(e) = parsed {
                    warn!(
                        "Skipping malformed row {} in errata table {}: {}",
                        row_num, index, e
                    );
                }
            }
        }

        debug!(
            "Found {} active and {} shipped advisories for {}",
            results.active.len(),
            results.shipped.len(),
            release_name
        );

        results
    }
}

impl Default for ListingParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_active_row(tr: ElementRef<'_>) -> Result<ActiveRow, RowError> {
    let (advisory_id, cells) = split_row(tr)?;
    ActiveRow::from_cells(advisory_id, cells).ok_or(RowError::MissingColumn {
        index: ACTIVE_VERSION_COLUMN,
    })
}

fn parse_shipped_row(tr: ElementRef<'_>) -> Result<ShippedRow, RowError> {
    let (advisory_id, cells) = split_row(tr)?;
    ShippedRow::from_cells(advisory_id, cells).ok_or(RowError::MissingColumn {
        index: SHIPPED_VERSION_COLUMN,
    })
}

/// Returns the advisory id and the text of every remaining cell
fn split_row(tr: ElementRef<'_>) -> Result<(String, Vec<String>), RowError> {
    let mut cells = tr
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "td");

    let first = cells.next().ok_or(RowError::EmptyFirstCell)?;
    let advisory_id = advisory_id(first)?;
    let rest = cells.map(cell_text).collect();

    Ok((advisory_id, rest))
}

/// Extracts the advisory id from the first cell of a row
///
/// If the cell content is an advisory link the id is the last segment of the
/// link target, otherwise it is the cell text.
pub fn advisory_id(cell: ElementRef<'_>) -> Result<String, RowError> {
    let content = cell
        .children()
        .find(|node| match node.value() {
            Node::Text(text) => !text.trim().is_empty(),
            Node::Element(_) => true,
            _ => false,
        })
        .ok_or(RowError::EmptyFirstCell)?;

    match ElementRef::wrap(content) {
        Some(link) if link.value().classes().any(|c| c == ADVISORY_LINK_CLASS) => {
            let href = link.value().attr("href").ok_or(RowError::MissingHref)?;
            last_path_segment(href)
                .map(str::to_string)
                .ok_or(RowError::MissingHref)
        }
        _ => Ok(cell_text(cell)),
    }
}

fn last_path_segment(href: &str) -> Option<&str> {
    href.split(['?', '#'])
        .next()?
        .rsplit('/')
        .find(|segment| !segment.is_empty())
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn page(bodies: &[&str]) -> String {
        let tables: String = bodies
            .iter()
            .map(|rows| format!("<table><tbody>{rows}</tbody></table>"))
            .collect();
        format!("<html><body>{tables}</body></html>")
    }

    const ACTIVE_ROWS: &str = r#"
        <tr>
          <td><a class="advisory_link" href="https://errata.example.com/advisory/RHBA-2016:1234">RHBA-2016:1234</a></td>
          <td>rhev-hypervisor bug fix update</td>
          <td>RHEV-3.6 rhev-hypervisor7-7.2-20160613.0.el6ev</td>
          <td>QE</td>
        </tr>
        <tr>
          <td><a class="advisory_link" href="/advisory/RHBA-2016:2000">RHBA-2016:2000</a></td>
          <td>rhev-hypervisor for 4.0</td>
          <td>RHEV-4.0 rhev-hypervisor7-7.2-20160711.0.el7ev</td>
          <td>NEW_FILES</td>
        </tr>
    "#;

    const SHIPPED_ROWS: &str = r#"
        <tr>
          <td>RHSA-2016:0001</td>
          <td>security update</td>
          <td>SHIPPED_LIVE</td>
          <td>RHEV-3.6 rhev-hypervisor7-7.2-20160105.0.el6ev</td>
        </tr>
        <tr>
          <td>RHSA-2015:0042</td>
          <td>older update</td>
          <td>SHIPPED_LIVE</td>
          <td>RHEV-3.5 rhev-hypervisor6-6.7-20150828.0.el6ev</td>
        </tr>
    "#;

    #[test]
    fn parse_splits_first_body_into_active_and_rest_into_shipped() {
        let html = page(&[ACTIVE_ROWS, SHIPPED_ROWS, SHIPPED_ROWS]);

        let result = ListingParser::new().parse(&html, "RHEV-3.6");

        assert_eq!(result.active.len(), 1);
        assert_eq!(result.active[0].advisory_id, "RHBA-2016:1234");
        assert_eq!(result.active[0].extra, vec!["QE".to_string()]);
        assert_eq!(result.shipped.len(), 2);
        assert!(
            result
                .shipped
                .iter()
                .all(|row| row.advisory_id == "RHSA-2016:0001")
        );
    }

    #[test]
    fn parse_keeps_only_rows_whose_filter_column_mentions_release() {
        let html = page(&[ACTIVE_ROWS, SHIPPED_ROWS]);

        let result = ListingParser::new().parse(&html, "RHEV-4.0");

        assert_eq!(result.active.len(), 1);
        assert_eq!(result.active[0].advisory_id, "RHBA-2016:2000");
        assert!(result.shipped.is_empty());
        assert!(
            result
                .active
                .iter()
                .all(|row| row.builds.contains("RHEV-4.0"))
        );
    }

    #[test]
    fn parse_filters_shipped_rows_on_column_three_not_two() {
        // Release name only in column 2 of a shipped row must not match
        let shipped = r#"
            <tr>
              <td>RHSA-2016:0009</td>
              <td>update</td>
              <td>RHEV-3.6</td>
              <td>rhev-hypervisor7-7.2-20160105.0.el6ev</td>
            </tr>
        "#;
        let html = page(&["", shipped]);

        let result = ListingParser::new().parse(&html, "RHEV-3.6");

        assert!(result.is_empty());
    }

    #[test]
    fn parse_returns_empty_for_page_without_tables() {
        let result = ListingParser::new().parse("<html><body>nothing</body></html>", "RHEV-3.6");
        assert!(result.is_empty());
    }

    #[test]
    fn parse_skips_malformed_rows_and_keeps_the_rest() {
        let active = r#"
            <tr><td></td><td>no id</td><td>RHEV-3.6</td></tr>
            <tr><td>RHBA-2016:0002</td><td>too short</td></tr>
            <tr><td>RHBA-2016:0003</td><td>fine</td><td>RHEV-3.6 build</td></tr>
        "#;
        let html = page(&[active]);

        let result = ListingParser::new().parse(&html, "RHEV-3.6");

        assert_eq!(result.active.len(), 1);
        assert_eq!(result.active[0].advisory_id, "RHBA-2016:0003");
    }

    #[rstest]
    #[case(
        r#"<td><a class="advisory_link" href=".../advisory/RHBA-2021:1234">RHBA-2021:1234</a></td>"#,
        Ok("RHBA-2021:1234")
    )]
    #[case(
        r#"<td><a class="advisory_link" href="/advisory/24012/">shown text</a></td>"#,
        Ok("24012")
    )]
    #[case(
        r#"<td><a class="other" href="/advisory/24012">RHBA-2021:1234</a></td>"#,
        Ok("RHBA-2021:1234")
    )]
    #[case(r#"<td>  RHSA-2020:5555 </td>"#, Ok("RHSA-2020:5555"))]
    #[case(r#"<td><a class="advisory_link">RHBA-2021:1234</a></td>"#, Err(RowError::MissingHref))]
    #[case(r#"<td>   </td>"#, Err(RowError::EmptyFirstCell))]
    fn advisory_id_extraction(#[case] cell: &str, #[case] expected: Result<&str, RowError>) {
        let html = format!("<table><tbody><tr>{cell}</tr></tbody></table>");
        let document = Html::parse_document(&html);
        let selector = Selector::parse("td").unwrap();
        let td = document.select(&selector).next().unwrap();

        assert_eq!(advisory_id(td), expected.map(str::to_string));
    }
}
