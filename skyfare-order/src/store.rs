use rand::distributions::Alphanumeric;
use rand::Rng;
use skyfare_core::repository::KeyValueStore;
use std::sync::Arc;
use tracing::{info, warn};

use crate::draft::{BookingDraft, DraftError};

pub const DRAFT_KEY_PREFIX: &str = "BOOKING_DRAFT:";
const DRAFT_ID_LEN: usize = 8;

/// Write-once, read-once handoff of booking drafts through session storage.
///
/// Every `create` mints a fresh id; there is no update in place. Ids are short
/// random tokens and collisions are not checked.
#[derive(Clone)]
pub struct BookingDraftStore {
    storage: Arc<dyn KeyValueStore>,
}

impl BookingDraftStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    pub async fn create(&self, draft: &BookingDraft) -> Result<String, DraftError> {
        let draft_id = new_draft_id();
        let payload = serde_json::to_string(draft)?;

        self.storage.set(&draft_key(&draft_id), &payload).await?;

        info!("Created booking draft {} (total {})", draft_id, draft.pricing().total);
        Ok(draft_id)
    }

    /// Missing, unreadable or malformed drafts all load as `None`.
    pub async fn load(&self, draft_id: &str) -> Option<BookingDraft> {
        let raw = match self.storage.get(&draft_key(draft_id)).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read booking draft {}: {}", draft_id, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(draft) => Some(draft),
            Err(e) => {
                warn!("Discarding malformed booking draft {}: {}", draft_id, e);
                None
            }
        }
    }

    pub async fn clear(&self, draft_id: &str) -> Result<(), DraftError> {
        self.storage.remove(&draft_key(draft_id)).await?;
        info!("Cleared booking draft {}", draft_id);
        Ok(())
    }
}

fn draft_key(draft_id: &str) -> String {
    format!("{}{}", DRAFT_KEY_PREFIX, draft_id)
}

fn new_draft_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(DRAFT_ID_LEN)
        .map(char::from)
        .collect()
}
