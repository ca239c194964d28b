use serde::{Deserialize, Deserializer, Serialize, Serializer};
use skyfare_core::time_of_day::{time_of_day, TimeOfDay};
use skyfare_shared::Refundability;
use std::collections::BTreeSet;
use tracing::debug;

use crate::meta::DatasetMeta;
use crate::models::{FareDisplay, FlightLeg, ResultRow};

/// Stop-count filter: "any" or an exact count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopsChoice {
    #[default]
    Any,
    Exactly(u8),
}

impl Serialize for StopsChoice {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            StopsChoice::Any => serializer.serialize_str("any"),
            StopsChoice::Exactly(n) => serializer.serialize_u8(*n),
        }
    }
}

impl<'de> Deserialize<'de> for StopsChoice {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Count(u8),
            Label(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Count(n) => Ok(StopsChoice::Exactly(n)),
            Raw::Label(label) if label.trim().eq_ignore_ascii_case("any") => Ok(StopsChoice::Any),
            Raw::Label(label) => label
                .trim()
                .parse()
                .map(StopsChoice::Exactly)
                .map_err(|_| serde::de::Error::custom(format!("invalid stops choice: {}", label))),
        }
    }
}

/// Refundability filter, matched case- and hyphen-insensitively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefundChoice {
    #[default]
    Any,
    Only(Refundability),
}

impl RefundChoice {
    /// "any", "Refundable", "non-refundable", "NON_REFUNDABLE", ...
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().eq_ignore_ascii_case("any") {
            return Some(RefundChoice::Any);
        }
        Refundability::parse(raw).map(RefundChoice::Only)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RefundChoice::Any => "any",
            RefundChoice::Only(r) => r.as_str(),
        }
    }

    pub fn accepts(self, refundability: Refundability) -> bool {
        match self {
            RefundChoice::Any => true,
            RefundChoice::Only(wanted) => wanted == refundability,
        }
    }
}

impl Serialize for RefundChoice {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RefundChoice {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        RefundChoice::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid refundability choice: {}", raw)))
    }
}

/// Which leg(s) of a round trip a filter state governs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApplyTo {
    #[default]
    Both,
    Out,
    In,
}

/// Filter-panel state. Empty sets and `Any` choices are vacuously true.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct FilterState {
    pub airlines: BTreeSet<String>,
    pub stops: StopsChoice,
    pub refundability: RefundChoice,
    pub payment_tags: BTreeSet<String>,
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
    /// Overrides `stops` when set
    pub nonstop_only: bool,
    /// Display-only: enforcing it needs a nearby-airport grouping table the catalog does not have
    pub hide_nearby_airports: bool,
    pub depart_airports: BTreeSet<String>,
    pub arrive_airports: BTreeSet<String>,
    pub depart_times: BTreeSet<TimeOfDay>,
    pub arrive_times: BTreeSet<TimeOfDay>,
    pub apply_to: ApplyTo,
    pub fare_display: FareDisplay,
}

impl FilterState {
    /// Fresh state with the price band opened to the dataset bounds
    pub fn for_meta(meta: &DatasetMeta) -> Self {
        Self {
            price_min: Some(meta.min_price),
            price_max: Some(meta.max_price),
            ..Default::default()
        }
    }
}

/// Rows passing every active predicate, in input order.
pub fn filter_rows<R: ResultRow + Clone>(rows: &[R], state: &FilterState, scope: ApplyTo) -> Vec<R> {
    let kept: Vec<R> = rows
        .iter()
        .filter(|row| matches(*row, state, scope))
        .cloned()
        .collect();

    debug!("Filter kept {} of {} rows", kept.len(), rows.len());
    kept
}

pub fn matches<R: ResultRow>(row: &R, state: &FilterState, scope: ApplyTo) -> bool {
    let legs = row.legs();

    airline_matches(&legs, state)
        && stops_match(row.stops(), state)
        && state.refundability.accepts(Refundability::from_flag(row.is_refundable()))
        && tags_match(&legs, state)
        && price_matches(row.total_fare_inr(), state)
        && airports_match(&legs, state)
        && times_match(&legs, state, scope)
}

fn airline_matches(legs: &[&FlightLeg], state: &FilterState) -> bool {
    state.airlines.is_empty() || legs.iter().any(|l| state.airlines.contains(&l.airline))
}

fn stops_match(stops: u8, state: &FilterState) -> bool {
    if state.nonstop_only {
        return stops == 0;
    }
    match state.stops {
        StopsChoice::Any => true,
        StopsChoice::Exactly(n) => stops == n,
    }
}

fn tags_match(legs: &[&FlightLeg], state: &FilterState) -> bool {
    state.payment_tags.is_empty()
        || legs
            .iter()
            .flat_map(|l| l.extras.iter())
            .any(|tag| state.payment_tags.contains(tag))
}

fn price_matches(price: i64, state: &FilterState) -> bool {
    state.price_min.map_or(true, |min| price >= min) && state.price_max.map_or(true, |max| price <= max)
}

fn airports_match(legs: &[&FlightLeg], state: &FilterState) -> bool {
    let depart_ok = state.depart_airports.is_empty()
        || legs.iter().any(|l| state.depart_airports.contains(&l.origin.code));
    let arrive_ok = state.arrive_airports.is_empty()
        || legs.iter().any(|l| state.arrive_airports.contains(&l.destination.code));
    depart_ok && arrive_ok
}

/// Legs a time-of-day predicate looks at. Single-leg rows always use their only leg.
fn scoped_legs<'a>(legs: &[&'a FlightLeg], scope: ApplyTo) -> Vec<&'a FlightLeg> {
    if legs.len() < 2 {
        return legs.to_vec();
    }
    match scope {
        ApplyTo::Out => vec![legs[0]],
        ApplyTo::In => vec![legs[1]],
        ApplyTo::Both => legs.to_vec(),
    }
}

fn times_match(legs: &[&FlightLeg], state: &FilterState, scope: ApplyTo) -> bool {
    if state.depart_times.is_empty() && state.arrive_times.is_empty() {
        return true;
    }
    let scoped = scoped_legs(legs, scope);

    let in_bucket = |set: &BTreeSet<TimeOfDay>, clock: &str| {
        time_of_day(clock).map_or(false, |bucket| set.contains(&bucket))
    };

    let depart_ok = state.depart_times.is_empty()
        || scoped.iter().any(|l| in_bucket(&state.depart_times, &l.depart_time));
    let arrive_ok = state.arrive_times.is_empty()
        || scoped.iter().any(|l| in_bucket(&state.arrive_times, &l.arrive_time));
    depart_ok && arrive_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{adapt_one_way, pair_international};
    use crate::fixtures::record;
    use crate::models::{IntlPairRow, OneWayRow};
    use skyfare_catalog::PricingEngine;
    use skyfare_shared::Airport;

    fn rows() -> Vec<OneWayRow> {
        let mut refundable = record("R", "Vistara", 0, "19:30", &[9100]);
        refundable.refundable = true;
        refundable.extras = vec!["UPI".to_string()];

        [
            record("A", "IndiGo", 0, "07:00", &[5600]),
            record("B", "IndiGo", 1, "13:15", &[4800]),
            record("C", "Air India", 0, "05:40", &[6400]),
            refundable,
        ]
        .iter()
        .map(adapt_one_way)
        .collect()
    }

    fn ids<R: ResultRow>(rows: &[R]) -> Vec<&str> {
        rows.iter().map(|r| r.row_id()).collect()
    }

    #[test]
    fn test_default_state_keeps_everything() {
        let rows = rows();
        let kept = filter_rows(&rows, &FilterState::default(), ApplyTo::Both);
        assert_eq!(kept.len(), rows.len());
    }

    #[test]
    fn test_nonstop_only_overrides_stops() {
        let state = FilterState {
            stops: StopsChoice::Exactly(1),
            nonstop_only: true,
            ..Default::default()
        };
        let data: Vec<OneWayRow> = [
            record("A", "IndiGo", 0, "07:00", &[5600]),
            record("B", "IndiGo", 1, "13:15", &[4800]),
            record("C", "Air India", 0, "05:40", &[6400]),
        ]
        .iter()
        .map(adapt_one_way)
        .collect();

        let kept = filter_rows(&data, &state, ApplyTo::Both);
        assert_eq!(ids(&kept), vec!["A", "C"]);
    }

    #[test]
    fn test_explicit_stops() {
        let state = FilterState {
            stops: StopsChoice::Exactly(1),
            ..Default::default()
        };
        assert_eq!(ids(&filter_rows(&rows(), &state, ApplyTo::Both)), vec!["B"]);
    }

    #[test]
    fn test_airline_and_refundability() {
        let state = FilterState {
            airlines: ["IndiGo".to_string(), "Vistara".to_string()].into(),
            refundability: RefundChoice::parse("REFUNDABLE").unwrap(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_rows(&rows(), &state, ApplyTo::Both)), vec!["R"]);

        let state = FilterState {
            refundability: RefundChoice::parse("non_refundable").unwrap(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_rows(&rows(), &state, ApplyTo::Both)), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_payment_tags_and_price_band() {
        let state = FilterState {
            payment_tags: ["UPI".to_string()].into(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_rows(&rows(), &state, ApplyTo::Both)), vec!["R"]);

        let state = FilterState {
            price_min: Some(4800),
            price_max: Some(6400),
            ..Default::default()
        };
        assert_eq!(ids(&filter_rows(&rows(), &state, ApplyTo::Both)), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_time_buckets() {
        let state = FilterState {
            depart_times: [TimeOfDay::EarlyMorning, TimeOfDay::Evening].into(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_rows(&rows(), &state, ApplyTo::Both)), vec!["C", "R"]);
    }

    #[test]
    fn test_arrive_time_buckets() {
        let mut rows = rows();
        rows[0].flight.arrive_time = "09:10".to_string();
        rows[1].flight.arrive_time = "15:45".to_string();
        rows[2].flight.arrive_time = "07:50".to_string();

        let state = FilterState {
            arrive_times: [TimeOfDay::Morning].into(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_rows(&rows, &state, ApplyTo::Both)), vec!["A", "C"]);

        let state = FilterState {
            depart_times: [TimeOfDay::Evening].into(),
            arrive_times: [TimeOfDay::Evening].into(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_rows(&rows, &state, ApplyTo::Both)), vec!["R"]);

        let state = FilterState {
            arrive_times: [TimeOfDay::EarlyMorning].into(),
            ..Default::default()
        };
        assert!(filter_rows(&rows, &state, ApplyTo::Both).is_empty());
    }

    fn assert_relaxation_widens(rows: &[OneWayRow], strict: &FilterState, relaxed: &FilterState) {
        let strict_ids: BTreeSet<String> = ids(&filter_rows(rows, strict, ApplyTo::Both))
            .into_iter()
            .map(String::from)
            .collect();
        let relaxed_ids: BTreeSet<String> = ids(&filter_rows(rows, relaxed, ApplyTo::Both))
            .into_iter()
            .map(String::from)
            .collect();

        assert!(strict_ids.is_subset(&relaxed_ids), "{:?} not within {:?}", strict_ids, relaxed_ids);
        assert!(relaxed_ids.len() > strict_ids.len());
    }

    #[test]
    fn test_relaxation_is_monotonic() {
        let mut rows = rows();
        rows[3].flight.origin = Airport::new("BLR", "Bengaluru");

        let strict = FilterState {
            airlines: ["IndiGo".to_string()].into(),
            ..Default::default()
        };
        let mut relaxed = strict.clone();
        relaxed.airlines.insert("Air India".to_string());
        assert_relaxation_widens(&rows, &strict, &relaxed);

        let strict = FilterState {
            stops: StopsChoice::Exactly(0),
            ..Default::default()
        };
        let relaxed = FilterState {
            stops: StopsChoice::Any,
            ..Default::default()
        };
        assert_relaxation_widens(&rows, &strict, &relaxed);

        let strict = FilterState {
            price_min: Some(5000),
            price_max: Some(6000),
            ..Default::default()
        };
        let relaxed = FilterState {
            price_min: Some(4000),
            price_max: Some(7000),
            ..Default::default()
        };
        assert_relaxation_widens(&rows, &strict, &relaxed);

        let strict = FilterState {
            depart_airports: ["BLR".to_string()].into(),
            ..Default::default()
        };
        let mut relaxed = strict.clone();
        relaxed.depart_airports.insert("DEL".to_string());
        assert_relaxation_widens(&rows, &strict, &relaxed);
    }

    fn pairs() -> Vec<IntlPairRow> {
        let outbound = vec![
            record("O1", "Emirates", 1, "03:10", &[21000]),
            record("O2", "Air India", 0, "14:00", &[24500]),
        ];
        let mut inbound = record("I1", "Emirates", 1, "20:30", &[19500]);
        inbound.origin = Airport::new("DXB", "Dubai");
        pair_international(&outbound, &[inbound], &PricingEngine::default())
    }

    #[test]
    fn test_pair_time_scope() {
        let pairs = pairs();
        let state = FilterState {
            depart_times: [TimeOfDay::Evening].into(),
            ..Default::default()
        };

        // Only the inbound leg departs in the evening
        assert!(filter_rows(&pairs, &state, ApplyTo::Out).is_empty());
        assert_eq!(filter_rows(&pairs, &state, ApplyTo::In).len(), 2);
        assert_eq!(filter_rows(&pairs, &state, ApplyTo::Both).len(), 2);

        let state = FilterState {
            depart_times: [TimeOfDay::EarlyMorning].into(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_rows(&pairs, &state, ApplyTo::Out)), vec!["O1__I1"]);
    }

    #[test]
    fn test_pair_airports_match_either_leg() {
        let state = FilterState {
            depart_airports: ["DXB".to_string()].into(),
            ..Default::default()
        };
        assert_eq!(filter_rows(&pairs(), &state, ApplyTo::Both).len(), 2);
    }

    #[test]
    fn test_filter_state_wire_format() {
        let state: FilterState = serde_json::from_value(serde_json::json!({
            "stops": "any",
            "refundability": "Non-Refundable",
            "depart_times": ["morning"],
            "apply_to": "out",
            "fare_display": "FULL"
        }))
        .unwrap();
        assert_eq!(state.stops, StopsChoice::Any);
        assert_eq!(state.refundability, RefundChoice::Only(Refundability::NonRefundable));
        assert_eq!(state.apply_to, ApplyTo::Out);
        assert_eq!(state.fare_display, FareDisplay::Full);

        let state: FilterState = serde_json::from_value(serde_json::json!({ "stops": 1 })).unwrap();
        assert_eq!(state.stops, StopsChoice::Exactly(1));
        let state: FilterState = serde_json::from_value(serde_json::json!({ "stops": "2" })).unwrap();
        assert_eq!(state.stops, StopsChoice::Exactly(2));
    }
}
