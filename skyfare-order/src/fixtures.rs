use skyfare_offer::adapter::{adapt_one_way, adapt_round_trip_leg, pair_international};
use skyfare_offer::{Direction, IntlPairRow, OneWayRow, RoundTripLegRow};
use skyfare_catalog::PricingEngine;
use skyfare_shared::FlightRecord;

pub fn flight(id: &str, from: &str, to: &str, date: &str, prices: &[i64]) -> FlightRecord {
    let fares: Vec<serde_json::Value> = prices
        .iter()
        .enumerate()
        .map(|(i, price)| {
            serde_json::json!({
                "id": format!("{}-{}", id, i + 1),
                "brand": "Saver",
                "cabin": "Economy",
                "cabin_baggage_kg": 7,
                "checked_baggage_kg": 15,
                "refundable": false,
                "change_fee": 2500,
                "base": price - 600,
                "tax": 600,
                "total": price,
            })
        })
        .collect();

    serde_json::from_value(serde_json::json!({
        "id": id,
        "airline": "IndiGo",
        "flight_number": format!("6E {}", id),
        "origin": { "code": from, "city": from },
        "destination": { "code": to, "city": to },
        "depart_time": "06:10",
        "arrive_time": "08:20",
        "depart_date": date,
        "arrive_date": date,
        "stops": 0,
        "stop_label": "Non-stop",
        "duration_min": 130,
        "refundable": false,
        "fares": fares,
    }))
    .unwrap()
}

pub fn one_way_row() -> OneWayRow {
    adapt_one_way(&flight("6E-201", "DEL", "BOM", "2025-11-28", &[6400, 5600]))
}

pub fn leg_rows() -> (RoundTripLegRow, RoundTripLegRow) {
    (
        adapt_round_trip_leg(&flight("6E-201", "DEL", "BOM", "2025-11-28", &[5600]), Direction::Outbound),
        adapt_round_trip_leg(&flight("6E-202", "BOM", "DEL", "2025-12-02", &[5900]), Direction::Inbound),
    )
}

pub fn pair_row() -> IntlPairRow {
    let outbound = [flight("EK-511", "DEL", "DXB", "2025-11-28", &[18200])];
    let inbound = [flight("EK-512", "DXB", "DEL", "2025-12-05", &[17400])];
    pair_international(&outbound, &inbound, &PricingEngine::default()).remove(0)
}
