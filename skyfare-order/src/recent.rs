use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use skyfare_core::repository::KeyValueStore;
use skyfare_core::search::{SearchRequest, Sector, Travellers, TripType};
use skyfare_core::{CoreError, CoreResult};
use std::sync::Arc;
use tracing::warn;

pub const RECENT_SEARCHES_KEY: &str = "flight_recent_searches";
pub const MAX_RECENT_SEARCHES: usize = 5;

/// Summary of a past search, enough to re-run it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecentSearch {
    pub from: String,
    pub to: String,
    /// "28 Nov 2025", or "28 Nov 2025 - 02 Dec 2025" for round trips
    pub date_label: String,
    pub trip: TripType,
    pub sector: Sector,
    #[serde(default)]
    pub cabin: Option<String>,
    pub travellers: Travellers,
    pub searched_at: DateTime<Utc>,
}

impl RecentSearch {
    pub fn from_request(request: &SearchRequest) -> Self {
        let mut date_label = request.depart_date().map(format_day).unwrap_or_default();
        if request.is_round_trip() {
            if let Some(ret) = request.return_date() {
                date_label = format!("{} - {}", date_label, format_day(ret));
            }
        }

        Self {
            from: request.origin(),
            to: request.destination(),
            date_label,
            trip: request.trip,
            sector: request.sector,
            cabin: request.cabin_class().map(|c| c.as_str().to_string()),
            travellers: request.travellers(),
            searched_at: Utc::now(),
        }
    }

    fn same_search(&self, other: &RecentSearch) -> bool {
        self.from == other.from && self.to == other.to && self.date_label == other.date_label && self.trip == other.trip
    }
}

fn format_day(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

/// Most-recent-first search history kept in local storage
#[derive(Clone)]
pub struct RecentSearches {
    storage: Arc<dyn KeyValueStore>,
}

impl RecentSearches {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Unreadable history is treated as empty.
    pub async fn list(&self) -> Vec<RecentSearch> {
        let raw = match self.storage.get(RECENT_SEARCHES_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read recent searches: {}", e);
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Discarding malformed recent searches: {}", e);
            Vec::new()
        })
    }

    /// Push to the front, dropping an older copy of the same search and anything past the cap.
    pub async fn record(&self, entry: RecentSearch) -> CoreResult<Vec<RecentSearch>> {
        let mut history = self.list().await;
        history.retain(|s| !s.same_search(&entry));
        history.insert(0, entry);
        history.truncate(MAX_RECENT_SEARCHES);

        let payload = serde_json::to_string(&history)
            .map_err(|e| CoreError::InternalError(e.to_string()))?;
        self.storage.set(RECENT_SEARCHES_KEY, &payload).await?;

        Ok(history)
    }
}
