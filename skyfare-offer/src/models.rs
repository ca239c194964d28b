use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use skyfare_core::search::Travellers;
use skyfare_core::time_of_day::clock_minutes;
use skyfare_shared::{Airport, CabinClass, CancellationPolicy, Refundability, Segment};

/// Fare badge shown next to the price
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FareBadge {
    #[serde(rename = "Published")]
    Published,
    #[serde(rename = "Offer Fare")]
    OfferFare,
}

impl FareBadge {
    /// Published when changes are free, otherwise an offer fare
    pub fn for_change_fee(change_fee: i64) -> Self {
        if change_fee == 0 {
            FareBadge::Published
        } else {
            FareBadge::OfferFare
        }
    }
}

/// Presentation-ready fare option
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewFare {
    pub id: String,
    pub code: String,
    pub brand: String,
    pub cabin: CabinClass,
    pub refundability: Refundability,
    pub badge: FareBadge,
    pub cabin_baggage_kg: u32,
    pub checked_baggage_kg: u32,
    pub seat_selection: String,
    pub meal_included: bool,
    pub change_fee: i64,
    pub base: i64,
    pub tax: i64,
    pub price: i64,
    pub agent_net_fare: Option<i64>,
    pub commission: Option<i64>,
    /// "INR 5350" or "Not available"
    pub agent_net_fare_label: String,
    pub commission_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BaggageSummary {
    pub cabin_kg: u32,
    pub checked_kg: u32,
    pub policy: String,
}

/// One adapted flight. `total_fare_inr` is always the cheapest fare price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlightLeg {
    pub id: String,
    pub airline: String,
    pub flight_number: String,
    pub logo: Option<String>,
    pub origin: Airport,
    pub destination: Airport,
    pub depart_time: String,
    pub arrive_time: String,
    pub depart_date: NaiveDate,
    pub arrive_date: NaiveDate,
    pub stops: u8,
    pub stop_label: String,
    pub duration_min: u32,
    pub refundable: bool,
    pub extras: Vec<String>,
    pub segments: Vec<Segment>,
    pub baggage: BaggageSummary,
    pub cancellation: CancellationPolicy,
    pub fares: Vec<ViewFare>,
    pub total_fare_inr: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Outbound,
    Inbound,
}

/// Row of a one-way result list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OneWayRow {
    #[serde(flatten)]
    pub flight: FlightLeg,
}

/// Row of one side of a domestic round-trip result list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundTripLegRow {
    pub direction: Direction,
    #[serde(flatten)]
    pub flight: FlightLeg,
}

/// Outbound+inbound pair sold as one international "special" itinerary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntlPairRow {
    /// `{outbound_id}__{inbound_id}`
    pub id: String,
    pub outbound: FlightLeg,
    pub inbound: FlightLeg,
    pub fares: Vec<ViewFare>,
    pub total_fare_inr: i64,
}

/// Common view over the row shapes, used by meta, filtering, sorting and selection.
pub trait ResultRow {
    fn row_id(&self) -> &str;

    /// Flights in travel order (outbound first)
    fn legs(&self) -> Vec<&FlightLeg>;

    fn fares(&self) -> &[ViewFare];

    fn total_fare_inr(&self) -> i64;

    /// Worst stop count across legs
    fn stops(&self) -> u8 {
        self.legs().iter().map(|l| l.stops).max().unwrap_or(0)
    }

    /// Refundable only if every leg is
    fn is_refundable(&self) -> bool {
        self.legs().iter().all(|l| l.refundable)
    }

    /// Combined flying time
    fn duration_min(&self) -> u32 {
        self.legs().iter().map(|l| l.duration_min).sum()
    }

    fn departure_minutes(&self) -> Option<u32> {
        self.legs().first().and_then(|l| clock_minutes(&l.depart_time))
    }

    fn arrival_minutes(&self) -> Option<u32> {
        self.legs().first().and_then(|l| clock_minutes(&l.arrive_time))
    }
}

impl ResultRow for OneWayRow {
    fn row_id(&self) -> &str {
        &self.flight.id
    }

    fn legs(&self) -> Vec<&FlightLeg> {
        vec![&self.flight]
    }

    fn fares(&self) -> &[ViewFare] {
        &self.flight.fares
    }

    fn total_fare_inr(&self) -> i64 {
        self.flight.total_fare_inr
    }
}

impl ResultRow for RoundTripLegRow {
    fn row_id(&self) -> &str {
        &self.flight.id
    }

    fn legs(&self) -> Vec<&FlightLeg> {
        vec![&self.flight]
    }

    fn fares(&self) -> &[ViewFare] {
        &self.flight.fares
    }

    fn total_fare_inr(&self) -> i64 {
        self.flight.total_fare_inr
    }
}

impl ResultRow for IntlPairRow {
    fn row_id(&self) -> &str {
        &self.id
    }

    fn legs(&self) -> Vec<&FlightLeg> {
        vec![&self.outbound, &self.inbound]
    }

    fn fares(&self) -> &[ViewFare] {
        &self.fares
    }

    fn total_fare_inr(&self) -> i64 {
        self.total_fare_inr
    }
}

/// Whether prices are shown per traveller or for the whole party
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FareDisplay {
    #[default]
    Single,
    Full,
}

impl FareDisplay {
    pub fn amount(self, per_traveller: i64, travellers: &Travellers) -> i64 {
        match self {
            FareDisplay::Single => per_traveller,
            FareDisplay::Full => per_traveller * travellers.fare_paying() as i64,
        }
    }
}
