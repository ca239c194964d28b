use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skyfare_core::search::{Travellers, ValidationError};
use skyfare_core::CoreError;
use skyfare_offer::{
    FareSelector, FlightLeg, IntlPairRow, OneWayRow, ResultRow, RoundTripLegRow, SearchResults, SelectionError,
    ViewFare,
};

pub const CURRENCY: &str = "INR";

/// Price block carried by every draft
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DraftPricing {
    pub currency: String,
    pub per_traveller: i64,
    pub total: i64,
    pub travellers: Travellers,
}

impl DraftPricing {
    /// Total covers fare-paying travellers only; lap infants are not charged here.
    pub fn new(per_traveller: i64, travellers: Travellers) -> Self {
        Self {
            currency: CURRENCY.to_string(),
            per_traveller,
            total: per_traveller * travellers.fare_paying() as i64,
            travellers,
        }
    }
}

/// Rows and fares picked on the results page. Without a fare id the row's
/// cheapest fare is booked.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DraftSelection {
    pub row_id: String,
    #[serde(default)]
    pub fare_id: Option<String>,
    /// Second list of a split round trip
    #[serde(default)]
    pub inbound_row_id: Option<String>,
    #[serde(default)]
    pub inbound_fare_id: Option<String>,
}

/// Flight + fare + party captured at "Book" time for the passenger-details page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BookingDraft {
    OneWay {
        flight: FlightLeg,
        fare: ViewFare,
        pricing: DraftPricing,
        created_at: DateTime<Utc>,
    },
    DomesticRoundTrip {
        outbound: FlightLeg,
        outbound_fare: ViewFare,
        inbound: FlightLeg,
        inbound_fare: ViewFare,
        pricing: DraftPricing,
        created_at: DateTime<Utc>,
    },
    InternationalRoundTrip {
        itinerary_id: String,
        outbound: FlightLeg,
        inbound: FlightLeg,
        fare: ViewFare,
        pricing: DraftPricing,
        created_at: DateTime<Utc>,
    },
}

impl BookingDraft {
    pub fn one_way(row: &OneWayRow, fare_id: &str, travellers: Travellers) -> Result<Self, DraftError> {
        let fare = fare_on_row(row, fare_id)?;
        Ok(BookingDraft::OneWay {
            flight: row.flight.clone(),
            pricing: DraftPricing::new(fare.price, travellers),
            fare,
            created_at: Utc::now(),
        })
    }

    /// Both legs priced together: per-traveller is the sum of the two chosen fares.
    pub fn domestic_round_trip(
        outbound: (&RoundTripLegRow, &str),
        inbound: (&RoundTripLegRow, &str),
        travellers: Travellers,
    ) -> Result<Self, DraftError> {
        let outbound_fare = fare_on_row(outbound.0, outbound.1)?;
        let inbound_fare = fare_on_row(inbound.0, inbound.1)?;

        Ok(BookingDraft::DomesticRoundTrip {
            outbound: outbound.0.flight.clone(),
            inbound: inbound.0.flight.clone(),
            pricing: DraftPricing::new(outbound_fare.price + inbound_fare.price, travellers),
            outbound_fare,
            inbound_fare,
            created_at: Utc::now(),
        })
    }

    pub fn international_round_trip(row: &IntlPairRow, fare_id: &str, travellers: Travellers) -> Result<Self, DraftError> {
        let fare = fare_on_row(row, fare_id)?;
        Ok(BookingDraft::InternationalRoundTrip {
            itinerary_id: row.id.clone(),
            outbound: row.outbound.clone(),
            inbound: row.inbound.clone(),
            pricing: DraftPricing::new(fare.price, travellers),
            fare,
            created_at: Utc::now(),
        })
    }

    /// Build a draft from server-side results, never from client-priced payloads.
    pub fn from_results(
        results: &SearchResults,
        selection: &DraftSelection,
        travellers: Travellers,
    ) -> Result<Self, DraftError> {
        travellers.validate()?;

        match results {
            SearchResults::OneWay(set) => {
                let fare_id = chosen_fare(&set.rows, &selection.row_id, selection.fare_id.as_deref())?;
                Self::one_way(find_row(&set.rows, &selection.row_id)?, &fare_id, travellers)
            }
            SearchResults::RoundTrip { outbound, inbound } => {
                let inbound_row_id = selection
                    .inbound_row_id
                    .as_deref()
                    .ok_or(DraftError::MissingInboundRow)?;
                let outbound_fare = chosen_fare(&outbound.rows, &selection.row_id, selection.fare_id.as_deref())?;
                let inbound_fare = chosen_fare(&inbound.rows, inbound_row_id, selection.inbound_fare_id.as_deref())?;

                Self::domestic_round_trip(
                    (find_row(&outbound.rows, &selection.row_id)?, &outbound_fare),
                    (find_row(&inbound.rows, inbound_row_id)?, &inbound_fare),
                    travellers,
                )
            }
            SearchResults::InternationalPairs(set) => {
                let fare_id = chosen_fare(&set.rows, &selection.row_id, selection.fare_id.as_deref())?;
                Self::international_round_trip(find_row(&set.rows, &selection.row_id)?, &fare_id, travellers)
            }
        }
    }

    pub fn pricing(&self) -> &DraftPricing {
        match self {
            BookingDraft::OneWay { pricing, .. }
            | BookingDraft::DomesticRoundTrip { pricing, .. }
            | BookingDraft::InternationalRoundTrip { pricing, .. } => pricing,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            BookingDraft::OneWay { created_at, .. }
            | BookingDraft::DomesticRoundTrip { created_at, .. }
            | BookingDraft::InternationalRoundTrip { created_at, .. } => *created_at,
        }
    }
}

/// Explicit fare if given, else the row's default through the fare selector
fn chosen_fare<R: ResultRow>(rows: &[R], row_id: &str, fare_id: Option<&str>) -> Result<String, DraftError> {
    let mut selector = FareSelector::new();
    selector.sync_visible(rows);

    let fare = match fare_id {
        Some(fare_id) => selector.select(row_id, fare_id)?,
        None => selector
            .get_selected(row_id)
            .ok_or_else(|| SelectionError::RowNotVisible(row_id.to_string()))?,
    };
    Ok(fare.id.clone())
}

fn find_row<'a, R: ResultRow>(rows: &'a [R], row_id: &str) -> Result<&'a R, DraftError> {
    rows.iter()
        .find(|r| r.row_id() == row_id)
        .ok_or_else(|| DraftError::Selection(SelectionError::RowNotVisible(row_id.to_string())))
}

fn fare_on_row<R: ResultRow>(row: &R, fare_id: &str) -> Result<ViewFare, DraftError> {
    row.fares()
        .iter()
        .find(|f| f.id == fare_id)
        .cloned()
        .ok_or_else(|| DraftError::FareNotOnRow {
            row_id: row.row_id().to_string(),
            fare_id: fare_id.to_string(),
        })
}

#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("Fare {fare_id} is not offered on row {row_id}")]
    FareNotOnRow {
        row_id: String,
        fare_id: String,
    },

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("An inbound flight must be selected for a round trip")]
    MissingInboundRow,

    #[error(transparent)]
    InvalidTravellers(#[from] ValidationError),

    #[error("Failed to encode draft: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Draft storage failed: {0}")]
    Storage(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{leg_rows, one_way_row, pair_row};
    use skyfare_offer::RowSet;

    fn party() -> Travellers {
        Travellers { adults: 2, children: 1, infants: 1 }
    }

    #[test]
    fn test_one_way_pricing() {
        let draft = BookingDraft::one_way(&one_way_row(), "6E-201-2", party()).unwrap();
        let pricing = draft.pricing();
        assert_eq!(pricing.currency, "INR");
        assert_eq!(pricing.per_traveller, 5600);
        assert_eq!(pricing.total, 16800);
    }

    #[test]
    fn test_domestic_round_trip_sums_legs() {
        let (outbound, inbound) = leg_rows();
        let draft = BookingDraft::domestic_round_trip(
            (&outbound, "6E-201-1"),
            (&inbound, "6E-202-1"),
            Travellers::default(),
        )
        .unwrap();
        assert_eq!(draft.pricing().per_traveller, 11500);
        assert_eq!(draft.pricing().total, 11500);
    }

    #[test]
    fn test_international_uses_bundle_fare() {
        let row = pair_row();
        let saver = row.fares[0].id.clone();
        let draft = BookingDraft::international_round_trip(&row, &saver, Travellers::default()).unwrap();

        let BookingDraft::InternationalRoundTrip { itinerary_id, fare, .. } = &draft else {
            panic!("Expected international draft");
        };
        assert_eq!(itinerary_id, "EK-511__EK-512");
        assert_eq!(fare.price, draft.pricing().per_traveller);
    }

    #[test]
    fn test_unknown_fare_rejected() {
        let err = BookingDraft::one_way(&one_way_row(), "nope", party()).unwrap_err();
        assert!(matches!(err, DraftError::FareNotOnRow { .. }));
    }

    #[test]
    fn test_draft_tagged_by_kind() {
        let draft = BookingDraft::one_way(&one_way_row(), "6E-201-1", party()).unwrap();
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["kind"], "one_way");
        assert_eq!(json["pricing"]["travellers"]["adults"], 2);
    }

    fn one_way_results() -> SearchResults {
        SearchResults::OneWay(RowSet::new(vec![one_way_row()]))
    }

    fn pick(row_id: &str, fare_id: Option<&str>) -> DraftSelection {
        DraftSelection {
            row_id: row_id.to_string(),
            fare_id: fare_id.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_from_results_defaults_to_cheapest() {
        let draft = BookingDraft::from_results(&one_way_results(), &pick("6E-201", None), party()).unwrap();

        let BookingDraft::OneWay { fare, pricing, .. } = &draft else {
            panic!("Expected one-way draft");
        };
        assert_eq!(fare.id, "6E-201-2");
        assert_eq!(pricing.per_traveller, 5600);
        assert_eq!(pricing.total, 16800);
    }

    #[test]
    fn test_from_results_prices_server_side() {
        let draft = BookingDraft::from_results(&one_way_results(), &pick("6E-201", Some("6E-201-1")), party()).unwrap();
        assert_eq!(draft.pricing().per_traveller, 6400);
        assert_eq!(draft.pricing().total, 19200);
    }

    #[test]
    fn test_from_results_rejects_bad_selection() {
        let results = one_way_results();

        let err = BookingDraft::from_results(&results, &pick("6E-201", Some("6E-202-1")), party()).unwrap_err();
        assert!(matches!(err, DraftError::Selection(SelectionError::UnknownFare { .. })));

        let err = BookingDraft::from_results(&results, &pick("AI-865", None), party()).unwrap_err();
        assert!(matches!(err, DraftError::Selection(SelectionError::RowNotVisible(_))));

        let crowded = Travellers { adults: 5, children: 0, infants: 7 };
        let err = BookingDraft::from_results(&results, &pick("6E-201", None), crowded).unwrap_err();
        assert!(matches!(err, DraftError::InvalidTravellers(ValidationError::InfantsExceedAdults)));
    }

    #[test]
    fn test_from_results_round_trip_needs_inbound() {
        let (outbound, inbound) = leg_rows();
        let results = SearchResults::RoundTrip {
            outbound: RowSet::new(vec![outbound]),
            inbound: RowSet::new(vec![inbound]),
        };

        let err = BookingDraft::from_results(&results, &pick("6E-201", None), Travellers::default()).unwrap_err();
        assert!(matches!(err, DraftError::MissingInboundRow));

        let selection = DraftSelection {
            inbound_row_id: Some("6E-202".to_string()),
            ..pick("6E-201", None)
        };
        let draft = BookingDraft::from_results(&results, &selection, Travellers::default()).unwrap();
        assert_eq!(draft.pricing().per_traveller, 11500);
    }
}
