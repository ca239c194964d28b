use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::models::{ResultRow, ViewFare};

/// Per-row fare choice for the rows currently on screen.
///
/// A row without an explicit choice reports its cheapest fare. Choices for
/// rows that drop out of view are evicted, so a row that comes back starts
/// again from its cheapest fare.
#[derive(Debug, Default)]
pub struct FareSelector {
    visible: HashMap<String, Vec<ViewFare>>,
    chosen: HashMap<String, ViewFare>,
}

impl FareSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the visible row set after a filter/sort pass.
    pub fn sync_visible<R: ResultRow>(&mut self, rows: &[R]) {
        self.visible = rows
            .iter()
            .map(|r| (r.row_id().to_string(), r.fares().to_vec()))
            .collect();

        let before = self.chosen.len();
        let visible = &self.visible;
        self.chosen.retain(|row_id, _| visible.contains_key(row_id));

        let evicted = before - self.chosen.len();
        if evicted > 0 {
            debug!("Evicted {} fare selections for hidden rows", evicted);
        }
    }

    pub fn get_selected(&self, row_id: &str) -> Option<&ViewFare> {
        self.chosen
            .get(row_id)
            .or_else(|| self.visible.get(row_id).and_then(|fares| default_fare(fares)))
    }

    pub fn select(&mut self, row_id: &str, fare_id: &str) -> Result<&ViewFare, SelectionError> {
        let fares = self
            .visible
            .get(row_id)
            .ok_or_else(|| SelectionError::RowNotVisible(row_id.to_string()))?;

        let fare = fares
            .iter()
            .find(|f| f.id == fare_id)
            .cloned()
            .ok_or_else(|| SelectionError::UnknownFare {
                row_id: row_id.to_string(),
                fare_id: fare_id.to_string(),
            })?;

        self.chosen.insert(row_id.to_string(), fare);
        self.chosen
            .get(row_id)
            .ok_or_else(|| SelectionError::RowNotVisible(row_id.to_string()))
    }

    /// True once the user picked a fare on this row
    pub fn is_explicit(&self, row_id: &str) -> bool {
        self.chosen.contains_key(row_id)
    }
}

/// Cheapest fare; the first one wins a tie.
pub fn default_fare(fares: &[ViewFare]) -> Option<&ViewFare> {
    fares.iter().min_by_key(|f| f.price)
}

#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("Row is not in the current result view: {0}")]
    RowNotVisible(String),

    #[error("Fare {fare_id} is not offered on row {row_id}")]
    UnknownFare {
        row_id: String,
        fare_id: String,
    },
}

/// Agent net fare and commission as displayed for a fare.
///
/// Whichever of the two a fare supplies, the other is derived from the price.
/// `None` means "not available" and is never shown as zero.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct AgentEarnings {
    pub agent_net_fare: Option<i64>,
    pub commission: Option<i64>,
}

impl AgentEarnings {
    pub fn derive(fare: &ViewFare) -> Self {
        Self::resolve(&fare.id, fare.price, fare.agent_net_fare, fare.commission)
    }

    pub fn resolve(fare_id: &str, price: i64, agent_net_fare: Option<i64>, commission: Option<i64>) -> Self {
        match (agent_net_fare, commission) {
            (Some(net), Some(commission)) => {
                // Explicit values are kept even when they disagree with the price
                if net + commission != price {
                    warn!(
                        "Fare {} has inconsistent agent net {} + commission {} != price {}",
                        fare_id, net, commission, price
                    );
                }
                Self {
                    agent_net_fare: Some(net),
                    commission: Some(commission),
                }
            }
            (Some(net), None) => Self {
                agent_net_fare: Some(net),
                commission: Some(price - net),
            },
            (None, Some(commission)) => Self {
                agent_net_fare: Some(price - commission),
                commission: Some(commission),
            },
            (None, None) => Self {
                agent_net_fare: None,
                commission: None,
            },
        }
    }

    pub fn net_label(&self) -> String {
        amount_label(self.agent_net_fare)
    }

    pub fn commission_label(&self) -> String {
        amount_label(self.commission)
    }
}

pub(crate) fn amount_label(amount: Option<i64>) -> String {
    match amount {
        Some(value) => format!("INR {}", value),
        None => "Not available".to_string(),
    }
}
