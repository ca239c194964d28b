use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::models::ResultRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AirportFacet {
    pub code: String,
    /// "{city} ({code})"
    pub label: String,
}

/// Facts the filter panel is populated from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DatasetMeta {
    pub airlines: Vec<String>,
    /// 0 when there are no rows; callers guard degenerate slider bounds
    pub min_price: i64,
    pub max_price: i64,
    pub airline_min_price: BTreeMap<String, i64>,
    pub depart_airports: Vec<AirportFacet>,
    pub arrive_airports: Vec<AirportFacet>,
}

/// Aggregate facets over a row set.
///
/// Paired rows contribute airports from both legs, so an inbound-only origin
/// still appears among the departure airports.
pub fn summarize<R: ResultRow>(rows: &[R]) -> DatasetMeta {
    let mut airlines = BTreeSet::new();
    let mut airline_min_price: BTreeMap<String, i64> = BTreeMap::new();
    let mut depart: BTreeMap<String, String> = BTreeMap::new();
    let mut arrive: BTreeMap<String, String> = BTreeMap::new();
    let mut bounds: Option<(i64, i64)> = None;

    for row in rows {
        let price = row.total_fare_inr();
        bounds = Some(match bounds {
            Some((lo, hi)) => (lo.min(price), hi.max(price)),
            None => (price, price),
        });

        for leg in row.legs() {
            airlines.insert(leg.airline.clone());
            airline_min_price
                .entry(leg.airline.clone())
                .and_modify(|p| *p = (*p).min(price))
                .or_insert(price);
            depart
                .entry(leg.origin.code.clone())
                .or_insert_with(|| leg.origin.label());
            arrive
                .entry(leg.destination.code.clone())
                .or_insert_with(|| leg.destination.label());
        }
    }

    let (min_price, max_price) = bounds.unwrap_or((0, 0));
    let facets = |m: BTreeMap<String, String>| {
        m.into_iter()
            .map(|(code, label)| AirportFacet { code, label })
            .collect::<Vec<_>>()
    };

    DatasetMeta {
        airlines: airlines.into_iter().collect(),
        min_price,
        max_price,
        airline_min_price,
        depart_airports: facets(depart),
        arrive_airports: facets(arrive),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{adapt_one_way, pair_international};
    use crate::fixtures::record;
    use crate::models::OneWayRow;
    use skyfare_catalog::PricingEngine;
    use skyfare_shared::Airport;

    #[test]
    fn test_summarize_one_way() {
        let rows: Vec<OneWayRow> = [
            record("A", "Vistara", 0, "07:00", &[6400, 8000]),
            record("B", "IndiGo", 0, "09:00", &[5600]),
            record("C", "IndiGo", 1, "13:00", &[7100]),
        ]
        .iter()
        .map(adapt_one_way)
        .collect();

        let meta = summarize(&rows);
        assert_eq!(meta.airlines, vec!["IndiGo", "Vistara"]);
        assert_eq!(meta.min_price, 5600);
        assert_eq!(meta.max_price, 7100);
        assert_eq!(meta.airline_min_price.get("IndiGo"), Some(&5600));
        assert_eq!(meta.airline_min_price.get("Vistara"), Some(&6400));
        assert_eq!(
            meta.depart_airports,
            vec![AirportFacet { code: "DEL".to_string(), label: "Delhi (DEL)".to_string() }]
        );
        assert_eq!(meta.arrive_airports[0].label, "Mumbai (BOM)");
    }

    #[test]
    fn test_summarize_empty() {
        let meta = summarize::<OneWayRow>(&[]);
        assert_eq!(meta.min_price, 0);
        assert_eq!(meta.max_price, 0);
        assert!(meta.airlines.is_empty());
    }

    #[test]
    fn test_paired_rows_union_airports_across_legs() {
        let outbound = record("O1", "Emirates", 1, "03:10", &[21000]);
        let mut inbound = record("I1", "Emirates", 1, "22:30", &[19500]);
        inbound.origin = Airport::new("DXB", "Dubai");
        inbound.destination = Airport::new("DEL", "Delhi");

        let rows = pair_international(&[outbound], &[inbound], &PricingEngine::default());
        let meta = summarize(&rows);

        let departs: Vec<_> = meta.depart_airports.iter().map(|a| a.code.as_str()).collect();
        let arrives: Vec<_> = meta.arrive_airports.iter().map(|a| a.code.as_str()).collect();
        assert_eq!(departs, vec!["DEL", "DXB"]);
        assert_eq!(arrives, vec!["BOM", "DEL"]);
    }
}
