use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

use super::flight::Airport;

/// One flown segment of an itinerary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Segment {
    pub from: Airport,
    pub to: Airport,
    pub depart_time: String,
    pub arrive_time: String,
    pub depart_date: NaiveDate,
    pub arrive_date: NaiveDate,
    pub airline: String,
    pub flight_number: String,
    pub duration_min: u32,
    #[serde(default)]
    pub aircraft_layout: String,
    #[serde(default)]
    pub beverages: String,
    #[serde(default)]
    pub seat_pitch: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeeRule {
    /// Human window, e.g. "Before departure"
    pub window: String,
    pub fee_inr: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CancellationPolicy {
    pub refund: Vec<FeeRule>,
    pub change: Vec<FeeRule>,
    pub no_show_fee_inr: i64,
}
