use skyfare_catalog::PricingEngine;
use skyfare_core::repository::{CatalogReader, KeyValueStore};
use skyfare_offer::ResultsGenerator;
use skyfare_order::{BookingDraftStore, RecentSearches};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<ResultsGenerator>,
    pub drafts: BookingDraftStore,
    pub recent: RecentSearches,
}

impl AppState {
    /// `session` holds booking drafts; `local` holds the recent-search history.
    pub fn new(
        catalog: Arc<dyn CatalogReader>,
        pricing: PricingEngine,
        session: Arc<dyn KeyValueStore>,
        local: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            generator: Arc::new(ResultsGenerator::new(catalog, pricing)),
            drafts: BookingDraftStore::new(session),
            recent: RecentSearches::new(local),
        }
    }
}
