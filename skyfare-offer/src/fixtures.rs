use chrono::NaiveDate;
use skyfare_shared::{Airport, CabinClass, FlightFare, FlightRecord, Refundability};

pub fn fare(id: &str, cabin: CabinClass, total: i64) -> FlightFare {
    FlightFare {
        id: id.to_string(),
        brand: "Saver".to_string(),
        cabin,
        fare_basis: None,
        cabin_baggage_kg: 7,
        checked_baggage_kg: 15,
        refundable: Refundability::NonRefundable,
        change_fee: 2500,
        meal_included: false,
        seat_selection: false,
        base: total - total / 10,
        tax: total / 10,
        total,
        agent_net_fare: None,
        commission: None,
    }
}

/// DEL->BOM record on 2025-11-28 with one economy fare per total
pub fn record(id: &str, airline: &str, stops: u8, depart_time: &str, totals: &[i64]) -> FlightRecord {
    let day = NaiveDate::from_ymd_opt(2025, 11, 28).unwrap();
    let fares = totals
        .iter()
        .enumerate()
        .map(|(i, total)| fare(&format!("{}-{}", id.to_lowercase(), i + 1), CabinClass::Economy, *total))
        .collect();

    FlightRecord {
        id: id.to_string(),
        airline: airline.to_string(),
        flight_number: format!("{} {}", airline, id),
        logo: None,
        origin: Airport::new("DEL", "Delhi"),
        destination: Airport::new("BOM", "Mumbai"),
        depart_time: depart_time.to_string(),
        arrive_time: "23:00".to_string(),
        depart_date: day,
        arrive_date: day,
        stops,
        stop_label: match stops {
            0 => "Non-stop".to_string(),
            1 => "1 stop".to_string(),
            n => format!("{} stops", n),
        },
        duration_min: 130 + stops as u32 * 90,
        refundable: false,
        extras: vec![],
        segments: vec![],
        cancellation: None,
        fares,
    }
}
