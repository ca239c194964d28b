use async_trait::async_trait;
use skyfare_core::repository::CatalogReader;
use skyfare_core::search::{normalize_code, normalize_date};
use skyfare_core::CoreResult;
use skyfare_shared::{CabinClass, FlightRecord};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// In-memory flight catalog, read-only once loaded
#[derive(Clone)]
pub struct InMemoryCatalog {
    records: Arc<Vec<FlightRecord>>,
}

impl InMemoryCatalog {
    pub fn new(records: Vec<FlightRecord>) -> Result<Self, CatalogError> {
        if let Some(empty) = records.iter().find(|r| r.fares.is_empty()) {
            return Err(CatalogError::NoFares(empty.id.clone()));
        }

        Ok(Self {
            records: Arc::new(records),
        })
    }

    /// Load a JSON array of flight records
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<FlightRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Synchronous form of [`CatalogReader::search`].
    pub fn query(
        &self,
        origin: &str,
        destination: &str,
        date: Option<&str>,
        cabin: Option<&str>,
    ) -> Vec<FlightRecord> {
        let origin = normalize_code(origin);
        let destination = normalize_code(destination);

        // A supplied but unreadable date matches nothing
        let date = match date.map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => match normalize_date(raw) {
                Some(day) => Some(day),
                None => {
                    debug!("Unreadable search date {:?}, no flights match", raw);
                    return Vec::new();
                }
            },
            None => None,
        };

        let cabin = match cabin.map(str::trim).filter(|c| !c.is_empty()) {
            Some(raw) => match CabinClass::parse(raw) {
                Some(cabin) => Some(cabin),
                None => {
                    debug!("Unknown cabin {:?}, no flights match", raw);
                    return Vec::new();
                }
            },
            None => None,
        };

        let mut results: Vec<FlightRecord> = self
            .records
            .iter()
            .filter(|r| r.origin.code == origin && r.destination.code == destination)
            .filter(|r| date.map_or(true, |d| r.depart_date == d))
            .filter_map(|r| match cabin {
                Some(cabin) => {
                    let fares: Vec<_> = r.fares.iter().filter(|f| f.cabin == cabin).cloned().collect();
                    if fares.is_empty() {
                        None
                    } else {
                        Some(FlightRecord { fares, ..r.clone() })
                    }
                }
                None => Some(r.clone()),
            })
            .collect();

        results.sort_by_key(|r| r.min_fare().unwrap_or(i64::MAX));

        debug!(
            "Catalog search {}->{} date={:?} cabin={:?}: {} flights",
            origin,
            destination,
            date,
            cabin,
            results.len()
        );

        results
    }
}

#[async_trait]
impl CatalogReader for InMemoryCatalog {
    async fn search(
        &self,
        origin: &str,
        destination: &str,
        date: Option<&str>,
        cabin: Option<&str>,
    ) -> CoreResult<Vec<FlightRecord>> {
        Ok(self.query(origin, destination, date, cabin))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed catalog data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Flight record {0} has no fares")]
    NoFares(String),
}
