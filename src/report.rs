//! Check report rendering
//!
//! Rows referring to the installed version are flagged with `*`.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::errata::checker::PackageReport;
use crate::errata::engine::Dated;
use crate::parser::types::AdvisoryRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Date the image is expected to be released
    pub release_date: Option<NaiveDate>,
    pub packages: Vec<PackageReport>,
}

impl Report {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.release_date {
            Some(date) => writeln!(f, "Expected release date: {}", date)?,
            None => writeln!(f, "Expected release date: not set")?,
        }

        for package in &self.packages {
            let matches = package.matches();

            writeln!(f)?;
            writeln!(
                f,
                "{} ({}) installed: {}",
                package.package,
                package.release,
                package.installed_version.as_deref().unwrap_or("not found")
            )?;
            write_section(f, "Active errata", &package.result.active, &matches.active)?;
            write_section(f, "Shipped errata", &package.result.shipped, &matches.shipped)?;
        }

        Ok(())
    }
}

fn write_section<R: AdvisoryRow>(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    rows: &[Dated<R>],
    matches: &[bool],
) -> fmt::Result {
    writeln!(f, "  {}:", title)?;

    if rows.is_empty() {
        return writeln!(f, "      (none)");
    }

    for (dated, matched) in rows.iter().zip(matches) {
        writeln!(
            f,
            "  {} {:<16} {:<10}  {}",
            if *matched { '*' } else { ' ' },
            dated.row.advisory_id(),
            dated.release_date,
            dated.row.version_column()
        )?;
    }

    Ok(())
}
