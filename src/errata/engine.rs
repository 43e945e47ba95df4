//! Resolution engine: listing page to dated advisories for one package

use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Serialize;
use tracing::info;

use crate::errata::client::ErrataClient;
use crate::errata::date_resolver::DateResolver;
use crate::errata::error::ErrataError;
use crate::parser::listing::ListingParser;
use crate::parser::types::{ActiveRow, AdvisoryRow, ReleaseDate, ShippedRow};

/// A listing row together with its resolved release date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dated<R> {
    #[serde(flatten)]
    pub row: R,
    pub release_date: ReleaseDate,
}

/// Advisories of one package for one release, each with its release date
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    pub active: Vec<Dated<ActiveRow>>,
    pub shipped: Vec<Dated<ShippedRow>>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.active.len() + self.shipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct ResolutionEngine {
    client: ErrataClient,
    listing_parser: ListingParser,
    date_resolver: DateResolver,
    concurrency: usize,
}

impl ResolutionEngine {
    /// Creates an engine resolving up to `concurrency` advisory dates at once
    pub fn new(client: ErrataClient, concurrency: usize) -> Self {
        Self {
            date_resolver: DateResolver::new(client.clone()),
            client,
            listing_parser: ListingParser::new(),
            concurrency: concurrency.max(1),
        }
    }

    /// Fetches the advisories of `package_name` filed against `release_name`
    /// and attaches a release date to each of them
    pub async fn resolve(
        &self,
        release_name: &str,
        package_name: &str,
    ) -> Result<ResultSet, ErrataError> {
        let html = self.client.fetch_package_listing(package_name).await?;

        let rows = self.listing_parser.parse(&html, release_name);
        info!(
            "{}: {} active and {} shipped advisories for {}",
            package_name,
            rows.active.len(),
            rows.shipped.len(),
            release_name
        );

        let active = self.attach_dates(rows.active).await?;
        let shipped = self.attach_dates(rows.shipped).await?;

        Ok(ResultSet { active, shipped })
    }

    /// Resolves dates with bounded concurrency, keeping the input order
    async fn attach_dates<R: AdvisoryRow>(
        &self,
        rows: Vec<R>,
    ) -> Result<Vec<Dated<R>>, ErrataError> {
        stream::iter(rows)
            .map(|row| async move {
                let release_date = self.date_resolver.resolve_date(row.advisory_id()).await?;
                Ok::<_, ErrataError>(Dated { row, release_date })
            })
            .buffered(self.concurrency)
            .try_collect()
            .await
    }
}
