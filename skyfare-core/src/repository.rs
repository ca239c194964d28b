use async_trait::async_trait;
use skyfare_shared::FlightRecord;

use crate::CoreResult;

/// Both directions of a round-trip search, queried independently.
#[derive(Debug, Clone, Default)]
pub struct RoundTripCandidates {
    pub outbound: Vec<FlightRecord>,
    pub inbound: Vec<FlightRecord>,
}

/// Read-only access to flight records
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// Flights for one origin/destination pair, cheapest first.
    ///
    /// `date` may be a full ISO timestamp; only its first 10 characters are
    /// compared. Omitting it returns every date on the route. With a cabin,
    /// each record keeps only fares of that cabin and records left without
    /// fares are dropped. No match is an empty list, never an error.
    async fn search(
        &self,
        origin: &str,
        destination: &str,
        date: Option<&str>,
        cabin: Option<&str>,
    ) -> CoreResult<Vec<FlightRecord>>;

    /// Two single-leg searches, one per direction. No joint availability or pricing.
    async fn search_round_trip(
        &self,
        origin: &str,
        destination: &str,
        depart_date: Option<&str>,
        return_date: Option<&str>,
        cabin: Option<&str>,
    ) -> CoreResult<RoundTripCandidates> {
        let outbound = self.search(origin, destination, depart_date, cabin).await?;
        let inbound = self.search(destination, origin, return_date, cabin).await?;
        Ok(RoundTripCandidates { outbound, inbound })
    }
}

/// String key/value storage with session or local scope. Last write wins.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> CoreResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> CoreResult<()>;

    async fn remove(&self, key: &str) -> CoreResult<()>;
}
