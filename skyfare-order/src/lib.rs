pub mod draft;
pub mod store;
pub mod recent;

pub use draft::{BookingDraft, DraftError, DraftPricing, DraftSelection};
pub use store::BookingDraftStore;
pub use recent::{RecentSearch, RecentSearches};

#[cfg(test)]
pub(crate) mod fixtures;
