//! Reshapes catalog records into the row shapes of the result lists.

use skyfare_catalog::PricingEngine;
use skyfare_shared::{
    CancellationPolicy, FeeRule, FlightFare, FlightRecord, Refundability, Segment,
};

use crate::models::{
    BaggageSummary, Direction, FareBadge, FlightLeg, IntlPairRow, OneWayRow, RoundTripLegRow, ViewFare,
};
use crate::selection::{amount_label, AgentEarnings};

const BAGGAGE_POLICY: &str = "1 piece only";
const FEE_WINDOW: &str = "Before departure";

// Flat fees shown when the catalog has no cancellation data
const REFUND_FEE_INR: i64 = 3500;
const CHANGE_FEE_INR: i64 = 2500;
const NO_SHOW_FEE_INR: i64 = 1500;

// Amenity placeholders for synthesized segments
const AIRCRAFT_LAYOUT: &str = "3-3 Layout";
const BEVERAGES: &str = "Beverages available";
const SEAT_PITCH: &str = "Standard Recliner (29\" pitch)";

pub fn adapt_one_way(record: &FlightRecord) -> OneWayRow {
    OneWayRow {
        flight: project_leg(record),
    }
}

pub fn adapt_round_trip_leg(record: &FlightRecord, direction: Direction) -> RoundTripLegRow {
    RoundTripLegRow {
        direction,
        flight: project_leg(record),
    }
}

/// Project a record into a leg, filling in itinerary, baggage and policy defaults.
pub fn project_leg(record: &FlightRecord) -> FlightLeg {
    let fares: Vec<ViewFare> = record.fares.iter().map(adapt_fare).collect();
    let total_fare_inr = fares.iter().map(|f| f.price).min().unwrap_or(0);

    // TODO: drop the synthetic segment once the catalog feed carries per-segment data
    let segments = if record.segments.is_empty() {
        vec![synthesize_segment(record)]
    } else {
        record.segments.clone()
    };

    let cancellation = record
        .cancellation
        .clone()
        .unwrap_or_else(|| synthesize_cancellation(&record.fares));

    FlightLeg {
        id: record.id.clone(),
        airline: record.airline.clone(),
        flight_number: record.flight_number.clone(),
        logo: record.logo.clone(),
        origin: record.origin.clone(),
        destination: record.destination.clone(),
        depart_time: record.depart_time.clone(),
        arrive_time: record.arrive_time.clone(),
        depart_date: record.depart_date,
        arrive_date: record.arrive_date,
        stops: record.stops,
        stop_label: record.stop_label.clone(),
        duration_min: record.duration_min,
        refundable: record.refundable,
        extras: record.extras.clone(),
        segments,
        baggage: baggage_summary(&record.fares),
        cancellation,
        fares,
        total_fare_inr,
    }
}

/// Agent net fare and commission are completed from each other where only one is supplied.
pub fn adapt_fare(fare: &FlightFare) -> ViewFare {
    let earnings = AgentEarnings::resolve(&fare.id, fare.total, fare.agent_net_fare, fare.commission);

    ViewFare {
        id: fare.id.clone(),
        code: fare_code(fare),
        brand: fare.brand.clone(),
        cabin: fare.cabin,
        refundability: fare.refundable,
        badge: FareBadge::for_change_fee(fare.change_fee),
        cabin_baggage_kg: fare.cabin_baggage_kg,
        checked_baggage_kg: fare.checked_baggage_kg,
        seat_selection: seat_selection_label(fare.seat_selection).to_string(),
        meal_included: fare.meal_included,
        change_fee: fare.change_fee,
        base: fare.base,
        tax: fare.tax,
        price: fare.total,
        agent_net_fare: earnings.agent_net_fare,
        commission: earnings.commission,
        agent_net_fare_label: earnings.net_label(),
        commission_label: earnings.commission_label(),
    }
}

/// Brand + cabin + fare basis, e.g. `FLEXI_PLUS-Y-TL2IP`. Falls back to the fare id for the basis.
pub fn fare_code(fare: &FlightFare) -> String {
    let brand = fare
        .brand
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_ascii_uppercase();
    let basis = fare.fare_basis.as_deref().unwrap_or(&fare.id);
    format!("{}-{}-{}", brand, fare.cabin.code(), basis.to_ascii_uppercase())
}

fn seat_selection_label(included: bool) -> &'static str {
    if included {
        "Free seat selection"
    } else {
        "Chargeable seat selection"
    }
}

fn baggage_summary(fares: &[FlightFare]) -> BaggageSummary {
    BaggageSummary {
        cabin_kg: fares.iter().map(|f| f.cabin_baggage_kg).max().unwrap_or(0),
        checked_kg: fares.iter().map(|f| f.checked_baggage_kg).max().unwrap_or(0),
        policy: BAGGAGE_POLICY.to_string(),
    }
}

fn synthesize_segment(record: &FlightRecord) -> Segment {
    Segment {
        from: record.origin.clone(),
        to: record.destination.clone(),
        depart_time: record.depart_time.clone(),
        arrive_time: record.arrive_time.clone(),
        depart_date: record.depart_date,
        arrive_date: record.arrive_date,
        airline: record.airline.clone(),
        flight_number: record.flight_number.clone(),
        duration_min: record.duration_min,
        aircraft_layout: AIRCRAFT_LAYOUT.to_string(),
        beverages: BEVERAGES.to_string(),
        seat_pitch: SEAT_PITCH.to_string(),
    }
}

fn synthesize_cancellation(fares: &[FlightFare]) -> CancellationPolicy {
    let any_refundable = fares.iter().any(|f| f.refundable.is_refundable());
    let any_free_change = fares.iter().any(|f| f.change_fee == 0);

    CancellationPolicy {
        refund: vec![FeeRule {
            window: FEE_WINDOW.to_string(),
            fee_inr: if any_refundable { 0 } else { REFUND_FEE_INR },
        }],
        change: vec![FeeRule {
            window: FEE_WINDOW.to_string(),
            fee_inr: if any_free_change { 0 } else { CHANGE_FEE_INR },
        }],
        no_show_fee_inr: NO_SHOW_FEE_INR,
    }
}

/// Cross-join outbound and inbound candidates into international pair rows.
///
/// Every (outbound, inbound) cell gets two synthetic bundled fares priced off
/// the cheapest fare of each leg: a non-refundable saver and a refundable
/// flex. The result is O(N×M) rows, in outbound-major order. Records without
/// fares cannot be priced and are skipped.
pub fn pair_international(
    outbound: &[FlightRecord],
    inbound: &[FlightRecord],
    pricing: &PricingEngine,
) -> Vec<IntlPairRow> {
    let outbound_legs: Vec<FlightLeg> = outbound.iter().filter(|r| !r.fares.is_empty()).map(project_leg).collect();
    let inbound_legs: Vec<FlightLeg> = inbound.iter().filter(|r| !r.fares.is_empty()).map(project_leg).collect();

    let mut rows = Vec::with_capacity(outbound_legs.len() * inbound_legs.len());

    for out_leg in &outbound_legs {
        for in_leg in &inbound_legs {
            let id = format!("{}__{}", out_leg.id, in_leg.id);
            let fares = bundle_fares(&id, out_leg, in_leg, pricing);
            let total_fare_inr = fares.iter().map(|f| f.price).min().unwrap_or(0);

            rows.push(IntlPairRow {
                id,
                outbound: out_leg.clone(),
                inbound: in_leg.clone(),
                fares,
                total_fare_inr,
            });
        }
    }

    rows
}

fn cheapest(leg: &FlightLeg) -> Option<&ViewFare> {
    leg.fares.iter().min_by_key(|f| f.price)
}

fn bundle_fares(pair_id: &str, outbound: &FlightLeg, inbound: &FlightLeg, pricing: &PricingEngine) -> Vec<ViewFare> {
    let (Some(out_fare), Some(in_fare)) = (cheapest(outbound), cheapest(inbound)) else {
        return Vec::new();
    };

    let totals = pricing.bundle_totals(out_fare.price, in_fare.price);
    let tax = out_fare.tax + in_fare.tax;
    let cabin = out_fare.cabin;
    let cabin_kg = outbound.baggage.cabin_kg.min(inbound.baggage.cabin_kg);
    let checked_kg = outbound.baggage.checked_kg.min(inbound.baggage.checked_kg);

    let bundle = |suffix: &str, brand: &str, price: i64, flexible: bool| {
        let split = pricing.agent_split(price);
        let change_fee = if flexible { 0 } else { CHANGE_FEE_INR };
        ViewFare {
            id: format!("{}-{}", pair_id, suffix),
            code: format!("{}-{}-RT", brand.replace(' ', "_").to_ascii_uppercase(), cabin.code()),
            brand: brand.to_string(),
            cabin,
            refundability: Refundability::from_flag(flexible),
            badge: FareBadge::for_change_fee(change_fee),
            cabin_baggage_kg: cabin_kg,
            checked_baggage_kg: checked_kg,
            seat_selection: seat_selection_label(flexible).to_string(),
            meal_included: flexible,
            change_fee,
            base: price - tax,
            tax,
            price,
            agent_net_fare: Some(split.agent_net_fare),
            commission: Some(split.commission),
            agent_net_fare_label: amount_label(Some(split.agent_net_fare)),
            commission_label: amount_label(Some(split.commission)),
        }
    };

    vec![
        bundle("SAVER", "Special Saver", totals.saver, false),
        bundle("FLEX", "Special Flex", totals.flex, true),
    ]
}
