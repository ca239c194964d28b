pub mod models;
pub mod adapter;
pub mod meta;
pub mod filter;
pub mod scope;
pub mod sort;
pub mod selection;
pub mod generator;

pub use models::{
    BaggageSummary, Direction, FareBadge, FareDisplay, FlightLeg, IntlPairRow, OneWayRow, ResultRow,
    RoundTripLegRow, ViewFare,
};
pub use meta::{summarize, AirportFacet, DatasetMeta};
pub use filter::{filter_rows, ApplyTo, FilterState, RefundChoice, StopsChoice};
pub use scope::RoundTripFilters;
pub use sort::{sort_rows, SortKey};
pub use selection::{AgentEarnings, FareSelector, SelectionError};
pub use generator::{ResultsGenerator, RowSet, SearchResults};

#[cfg(test)]
pub(crate) mod fixtures;
