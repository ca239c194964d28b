use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use skyfare_shared::CabinClass;

pub const MAX_TRAVELLERS: u32 = 9;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TripType {
    #[default]
    #[serde(rename = "oneway", alias = "one_way")]
    OneWay,
    #[serde(rename = "roundtrip", alias = "round_trip")]
    RoundTrip,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
    #[default]
    Dom,
    Intl,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Travellers {
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
}

impl Default for Travellers {
    fn default() -> Self {
        Self {
            adults: 1,
            children: 0,
            infants: 0,
        }
    }
}

impl Travellers {
    /// Saturates, so absurd counts still fail the cap instead of wrapping
    pub fn total(&self) -> u32 {
        self.adults.saturating_add(self.children).saturating_add(self.infants)
    }

    /// Travellers occupying a seat and paying the fare (lap infants excluded)
    pub fn fare_paying(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.adults == 0 {
            return Err(ValidationError::NoAdults);
        }
        if self.infants > self.adults {
            return Err(ValidationError::InfantsExceedAdults);
        }
        if self.total() > MAX_TRAVELLERS {
            return Err(ValidationError::TooManyTravellers { max: MAX_TRAVELLERS });
        }
        Ok(())
    }
}

/// Trip-search preconditions checked before the results page is opened
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select both origin and destination")]
    MissingRoute,
    #[error("Origin and destination cannot be the same")]
    SameOriginDestination,
    #[error("Please select a departure date")]
    MissingDepartDate,
    #[error("Please select a return date")]
    MissingReturnDate,
    #[error("Return date cannot be before departure date")]
    ReturnBeforeDeparture,
    #[error("At least one adult is required")]
    NoAdults,
    #[error("Infants cannot exceed adults")]
    InfantsExceedAdults,
    #[error("A maximum of {max} travellers is allowed")]
    TooManyTravellers { max: u32 },
}

/// Results-page query parameters.
///
/// Field aliases mirror the long/short parameter names links are built with
/// (`date`/`depart`, `ret`/`return`, `adt`/`adults`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchRequest {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default, alias = "depart")]
    pub date: Option<String>,
    #[serde(default, alias = "return")]
    pub ret: Option<String>,
    #[serde(default)]
    pub trip: TripType,
    #[serde(default)]
    pub sector: Sector,
    #[serde(default)]
    pub cabin: Option<String>,
    #[serde(default = "default_adults", alias = "adults")]
    pub adt: u32,
    #[serde(default, alias = "children")]
    pub chd: u32,
    #[serde(default, alias = "infants")]
    pub inf: u32,
    #[serde(default)]
    pub fare: Option<String>,
}

fn default_adults() -> u32 { 1 }

impl SearchRequest {
    pub fn origin(&self) -> String {
        normalize_code(&self.from)
    }

    pub fn destination(&self) -> String {
        normalize_code(&self.to)
    }

    pub fn depart_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(normalize_date)
    }

    pub fn return_date(&self) -> Option<NaiveDate> {
        self.ret.as_deref().and_then(normalize_date)
    }

    pub fn cabin_class(&self) -> Option<CabinClass> {
        self.cabin.as_deref().and_then(CabinClass::parse)
    }

    pub fn travellers(&self) -> Travellers {
        Travellers {
            adults: self.adt,
            children: self.chd,
            infants: self.inf,
        }
    }

    pub fn is_round_trip(&self) -> bool {
        self.trip == TripType::RoundTrip
    }

    /// International bundled ("special") fares requested
    pub fn is_special_fare(&self) -> bool {
        self.fare
            .as_deref()
            .map(|f| f.trim().eq_ignore_ascii_case("special"))
            .unwrap_or(false)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let origin = self.origin();
        let destination = self.destination();

        if origin.is_empty() || destination.is_empty() {
            return Err(ValidationError::MissingRoute);
        }
        if origin == destination {
            return Err(ValidationError::SameOriginDestination);
        }

        let depart = self.depart_date().ok_or(ValidationError::MissingDepartDate)?;
        if self.is_round_trip() {
            let ret = self.return_date().ok_or(ValidationError::MissingReturnDate)?;
            if ret < depart {
                return Err(ValidationError::ReturnBeforeDeparture);
            }
        }

        self.travellers().validate()
    }
}

/// Upper-cased, trimmed airport code
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// Calendar date from the first 10 characters, so full ISO timestamps are tolerated.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}
