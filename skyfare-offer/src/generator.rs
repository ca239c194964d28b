use serde::{Deserialize, Serialize};
use skyfare_catalog::PricingEngine;
use skyfare_core::repository::CatalogReader;
use skyfare_core::search::{SearchRequest, Sector};
use skyfare_core::CoreResult;
use std::sync::Arc;
use tracing::info;

use crate::adapter::{adapt_one_way, adapt_round_trip_leg, pair_international};
use crate::filter::{filter_rows, ApplyTo};
use crate::meta::{summarize, DatasetMeta};
use crate::models::{Direction, IntlPairRow, OneWayRow, ResultRow, RoundTripLegRow};
use crate::scope::RoundTripFilters;
use crate::sort::{sort_rows, SortKey};

/// Result rows plus the facet summary of the unfiltered list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowSet<R> {
    pub rows: Vec<R>,
    pub meta: DatasetMeta,
}

impl<R: ResultRow> RowSet<R> {
    pub fn new(rows: Vec<R>) -> Self {
        let meta = summarize(&rows);
        Self { rows, meta }
    }
}

/// The three result-page layouts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchResults {
    OneWay(RowSet<OneWayRow>),
    RoundTrip {
        outbound: RowSet<RoundTripLegRow>,
        inbound: RowSet<RoundTripLegRow>,
    },
    InternationalPairs(RowSet<IntlPairRow>),
}

/// Builds the result lists for a search
pub struct ResultsGenerator {
    catalog: Arc<dyn CatalogReader>,
    pricing: PricingEngine,
}

impl ResultsGenerator {
    pub fn new(catalog: Arc<dyn CatalogReader>, pricing: PricingEngine) -> Self {
        Self { catalog, pricing }
    }

    pub async fn search(&self, request: &SearchRequest) -> CoreResult<SearchResults> {
        request.validate()?;

        let origin = request.origin();
        let destination = request.destination();
        let cabin = request.cabin.as_deref();

        if !request.is_round_trip() {
            let records = self
                .catalog
                .search(&origin, &destination, request.date.as_deref(), cabin)
                .await?;
            let rows: Vec<OneWayRow> = records.iter().map(adapt_one_way).collect();

            info!("One-way search {}->{}: {} flights", origin, destination, rows.len());
            return Ok(SearchResults::OneWay(RowSet::new(rows)));
        }

        let candidates = self
            .catalog
            .search_round_trip(
                &origin,
                &destination,
                request.date.as_deref(),
                request.ret.as_deref(),
                cabin,
            )
            .await?;

        if request.sector == Sector::Intl && request.is_special_fare() {
            let rows = pair_international(&candidates.outbound, &candidates.inbound, &self.pricing);
            info!(
                "International special search {}<->{}: {} outbound x {} inbound = {} pairs",
                origin,
                destination,
                candidates.outbound.len(),
                candidates.inbound.len(),
                rows.len()
            );
            return Ok(SearchResults::InternationalPairs(RowSet::new(rows)));
        }

        let outbound: Vec<RoundTripLegRow> = candidates
            .outbound
            .iter()
            .map(|r| adapt_round_trip_leg(r, Direction::Outbound))
            .collect();
        let inbound: Vec<RoundTripLegRow> = candidates
            .inbound
            .iter()
            .map(|r| adapt_round_trip_leg(r, Direction::Inbound))
            .collect();

        info!(
            "Round-trip search {}<->{}: {} outbound, {} inbound",
            origin,
            destination,
            outbound.len(),
            inbound.len()
        );

        Ok(SearchResults::RoundTrip {
            outbound: RowSet::new(outbound),
            inbound: RowSet::new(inbound),
        })
    }
}

/// Apply filters and a sort order to generated results.
///
/// One-way and pair lists use the active panel state, pairs scoped by
/// `apply_to`. Split round-trip lists use each side's state. Facet summaries
/// keep describing the unfiltered rows.
pub fn refine(results: SearchResults, filters: &RoundTripFilters, sort: SortKey) -> SearchResults {
    match results {
        SearchResults::OneWay(set) => {
            let rows = filter_rows(&set.rows, filters.active(), ApplyTo::Both);
            SearchResults::OneWay(sorted(rows, set.meta, sort))
        }
        SearchResults::RoundTrip { outbound, inbound } => SearchResults::RoundTrip {
            outbound: sorted(filters.filter_outbound(&outbound.rows), outbound.meta, sort),
            inbound: sorted(filters.filter_inbound(&inbound.rows), inbound.meta, sort),
        },
        SearchResults::InternationalPairs(set) => {
            let rows = filter_rows(&set.rows, filters.active(), filters.apply_to());
            SearchResults::InternationalPairs(sorted(rows, set.meta, sort))
        }
    }
}

fn sorted<R: ResultRow>(mut rows: Vec<R>, meta: DatasetMeta, sort: SortKey) -> RowSet<R> {
    sort_rows(&mut rows, sort);
    RowSet { rows, meta }
}
