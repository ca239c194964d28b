use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::ResultRow;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    PriceLow,
    PriceHigh,
    Duration,
    DepartEarly,
    ArriveLate,
}

/// Stable in-place sort. Rows with an unreadable clock time sort last on the time keys.
pub fn sort_rows<R: ResultRow>(rows: &mut [R], key: SortKey) {
    rows.sort_by(|a, b| compare(a, b, key));
}

fn compare<R: ResultRow>(a: &R, b: &R, key: SortKey) -> Ordering {
    match key {
        SortKey::PriceLow => a
            .total_fare_inr()
            .cmp(&b.total_fare_inr())
            .then_with(|| a.duration_min().cmp(&b.duration_min())),
        SortKey::PriceHigh => b
            .total_fare_inr()
            .cmp(&a.total_fare_inr())
            .then_with(|| a.duration_min().cmp(&b.duration_min())),
        SortKey::Duration => a
            .duration_min()
            .cmp(&b.duration_min())
            .then_with(|| a.total_fare_inr().cmp(&b.total_fare_inr())),
        SortKey::DepartEarly => {
            let minutes = |r: &R| r.departure_minutes().unwrap_or(u32::MAX);
            minutes(a).cmp(&minutes(b))
        }
        // None < Some, so descending order leaves unreadable times at the end
        SortKey::ArriveLate => b.arrival_minutes().cmp(&a.arrival_minutes()),
    }
}
