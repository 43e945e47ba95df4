//! Parser layer
//! - traits.rs: Row-level parse errors
//! - types.rs: Common types (ActiveRow, ShippedRow, ReleaseDate)
//! - listing.rs: Advisory listing page parser
//! - advisory_page.rs: Advisory detail page release date scrape
//! - manifest.rs: Installed package manifest parser

pub mod advisory_page;
pub mod listing;
pub mod manifest;
pub mod traits;
pub mod types;

pub use advisory_page::AdvisoryPageParser;
pub use listing::ListingParser;
pub use manifest::{InstalledPackages, ManifestError};
pub use traits::RowError;
pub use types::{ActiveRow, AdvisoryRow, ClassifiedRows, ReleaseDate, ShippedRow};
