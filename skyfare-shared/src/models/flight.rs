use serde::{Deserialize, Deserializer, Serialize};
use chrono::NaiveDate;
use std::fmt;

use super::policy::{CancellationPolicy, Segment};

/// Cabin a fare is sold in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CabinClass {
    #[serde(rename = "Economy")]
    Economy,
    #[serde(rename = "Premium Economy", alias = "PremiumEconomy")]
    PremiumEconomy,
    #[serde(rename = "Business")]
    Business,
    #[serde(rename = "First")]
    First,
}

impl CabinClass {
    /// Resolve a cabin name through the synonym table ("eco", "biz", "j", ...).
    pub fn parse(raw: &str) -> Option<Self> {
        let key: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match key.as_str() {
            "economy" | "eco" | "econ" | "y" => Some(CabinClass::Economy),
            "premiumeconomy" | "premium" | "prem" | "pe" | "w" => Some(CabinClass::PremiumEconomy),
            "business" | "biz" | "bus" | "j" | "c" => Some(CabinClass::Business),
            "first" | "fst" | "f" => Some(CabinClass::First),
            _ => None,
        }
    }

    /// One-letter booking cabin code
    pub fn code(self) -> &'static str {
        match self {
            CabinClass::Economy => "Y",
            CabinClass::PremiumEconomy => "W",
            CabinClass::Business => "J",
            CabinClass::First => "F",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CabinClass::Economy => "Economy",
            CabinClass::PremiumEconomy => "Premium Economy",
            CabinClass::Business => "Business",
            CabinClass::First => "First",
        }
    }
}

impl fmt::Display for CabinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Refund status of a fare or a flight.
///
/// Upstream feeds disagree on the representation (`true`, `"refundable"`,
/// `"NON_REFUNDABLE"`, `"Non-Refundable"`...), so deserialization accepts a
/// boolean or any casing/hyphenation of the two labels.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum Refundability {
    #[serde(rename = "Refundable")]
    Refundable,
    #[serde(rename = "Non-Refundable")]
    NonRefundable,
}

impl Refundability {
    pub fn from_flag(refundable: bool) -> Self {
        if refundable {
            Refundability::Refundable
        } else {
            Refundability::NonRefundable
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let key: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match key.as_str() {
            "refundable" | "true" | "yes" => Some(Refundability::Refundable),
            "nonrefundable" | "notrefundable" | "false" | "no" => Some(Refundability::NonRefundable),
            _ => None,
        }
    }

    pub fn is_refundable(self) -> bool {
        self == Refundability::Refundable
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Refundability::Refundable => "Refundable",
            Refundability::NonRefundable => "Non-Refundable",
        }
    }
}

impl fmt::Display for Refundability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Refundability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Label(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(flag) => Ok(Refundability::from_flag(flag)),
            Raw::Label(label) => Refundability::parse(&label)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown refundability: {}", label))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Airport {
    pub code: String,
    pub city: String,
}

impl Airport {
    pub fn new(code: &str, city: &str) -> Self {
        Self {
            code: code.to_string(),
            city: city.to_string(),
        }
    }

    /// Facet label, e.g. "Delhi (DEL)"
    pub fn label(&self) -> String {
        format!("{} ({})", self.city, self.code)
    }
}

/// One purchasable price point on a flight. Amounts are whole rupees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlightFare {
    pub id: String,
    pub brand: String,
    pub cabin: CabinClass,
    #[serde(default)]
    pub fare_basis: Option<String>,
    pub cabin_baggage_kg: u32,
    pub checked_baggage_kg: u32,
    pub refundable: Refundability,
    pub change_fee: i64,
    #[serde(default)]
    pub meal_included: bool,
    #[serde(default)]
    pub seat_selection: bool,
    pub base: i64,
    pub tax: i64,
    pub total: i64,
    #[serde(default)]
    pub agent_net_fare: Option<i64>,
    #[serde(default)]
    pub commission: Option<i64>,
}

/// One operated flight as loaded from the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlightRecord {
    pub id: String,
    pub airline: String,
    pub flight_number: String,
    #[serde(default)]
    pub logo: Option<String>,
    pub origin: Airport,
    pub destination: Airport,
    /// Local time of day, "HH:MM"
    pub depart_time: String,
    pub arrive_time: String,
    pub depart_date: NaiveDate,
    pub arrive_date: NaiveDate,
    pub stops: u8,
    pub stop_label: String,
    pub duration_min: u32,
    pub refundable: bool,
    #[serde(default)]
    pub extras: Vec<String>,
    #[serde(default)]
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub cancellation: Option<CancellationPolicy>,
    pub fares: Vec<FlightFare>,
}

impl FlightRecord {
    /// Cheapest fare total on this record, if it has any fares.
    pub fn min_fare(&self) -> Option<i64> {
        self.fares.iter().map(|f| f.total).min()
    }
}
