use crate::filter::{filter_rows, ApplyTo, FilterState};
use crate::models::{Direction, ResultRow};

/// Filter states for the two lists of a domestic round trip.
///
/// With `ApplyTo::Both` edits land on both sides. Switching to one side
/// snapshots the combined state into it so the sides can diverge; switching
/// back to `Both` copies whichever side was last active over the other.
#[derive(Debug, Clone)]
pub struct RoundTripFilters {
    apply_to: ApplyTo,
    outbound: FilterState,
    inbound: FilterState,
    last_active: Direction,
}

impl RoundTripFilters {
    pub fn new(initial: FilterState) -> Self {
        let mut initial = initial;
        initial.apply_to = ApplyTo::Both;
        Self {
            apply_to: ApplyTo::Both,
            outbound: initial.clone(),
            inbound: initial,
            last_active: Direction::Outbound,
        }
    }

    /// Independent states for each side, as sent by a client that already diverged them.
    /// The outbound state's `apply_to` governs both.
    pub fn split(outbound: FilterState, inbound: FilterState) -> Self {
        let apply_to = outbound.apply_to;
        let mut inbound = inbound;
        inbound.apply_to = apply_to;

        Self {
            apply_to,
            outbound,
            inbound,
            last_active: match apply_to {
                ApplyTo::In => Direction::Inbound,
                _ => Direction::Outbound,
            },
        }
    }

    /// Rebuild the controller from submitted panel state.
    ///
    /// Under `Both` one combined state governs both sides and any separate
    /// inbound state is ignored. Otherwise the sides are independent; a missing
    /// inbound state starts as a copy of the outbound one.
    pub fn from_states(filters: FilterState, inbound: Option<FilterState>) -> Self {
        match filters.apply_to {
            ApplyTo::Both => Self::new(filters),
            _ => {
                let inbound = inbound.unwrap_or_else(|| filters.clone());
                Self::split(filters, inbound)
            }
        }
    }

    pub fn apply_to(&self) -> ApplyTo {
        self.apply_to
    }

    pub fn outbound(&self) -> &FilterState {
        &self.outbound
    }

    pub fn inbound(&self) -> &FilterState {
        &self.inbound
    }

    /// The state the panel is currently editing
    pub fn active(&self) -> &FilterState {
        match self.apply_to {
            ApplyTo::In => &self.inbound,
            ApplyTo::Out => &self.outbound,
            ApplyTo::Both => match self.last_active {
                Direction::Outbound => &self.outbound,
                Direction::Inbound => &self.inbound,
            },
        }
    }

    pub fn update(&mut self, edit: impl FnOnce(&mut FilterState)) {
        match self.apply_to {
            ApplyTo::Out => {
                edit(&mut self.outbound);
                self.last_active = Direction::Outbound;
            }
            ApplyTo::In => {
                edit(&mut self.inbound);
                self.last_active = Direction::Inbound;
            }
            ApplyTo::Both => {
                let mut combined = self.active().clone();
                edit(&mut combined);
                self.outbound = combined.clone();
                self.inbound = combined;
            }
        }
    }

    pub fn set_apply_to(&mut self, next: ApplyTo) {
        if next == self.apply_to {
            return;
        }

        match (self.apply_to, next) {
            (ApplyTo::Both, ApplyTo::Out) => {
                self.outbound = self.active().clone();
                self.last_active = Direction::Outbound;
            }
            (ApplyTo::Both, ApplyTo::In) => {
                self.inbound = self.active().clone();
                self.last_active = Direction::Inbound;
            }
            (_, ApplyTo::Both) => match self.last_active {
                Direction::Outbound => self.inbound = self.outbound.clone(),
                Direction::Inbound => self.outbound = self.inbound.clone(),
            },
            (_, ApplyTo::Out) => self.last_active = Direction::Outbound,
            (_, ApplyTo::In) => self.last_active = Direction::Inbound,
        }

        self.apply_to = next;
        self.outbound.apply_to = next;
        self.inbound.apply_to = next;
    }

    pub fn filter_outbound<R: ResultRow + Clone>(&self, rows: &[R]) -> Vec<R> {
        filter_rows(rows, &self.outbound, ApplyTo::Out)
    }

    pub fn filter_inbound<R: ResultRow + Clone>(&self, rows: &[R]) -> Vec<R> {
        filter_rows(rows, &self.inbound, ApplyTo::In)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::adapt_round_trip_leg;
    use crate::filter::StopsChoice;
    use crate::fixtures::record;
    use crate::models::RoundTripLegRow;
    use skyfare_core::time_of_day::TimeOfDay;

    fn leg_rows(direction: Direction, flights: &[(&str, &str, &str)]) -> Vec<RoundTripLegRow> {
        flights
            .iter()
            .map(|(id, airline, depart)| adapt_round_trip_leg(&record(id, airline, 0, depart, &[5600]), direction))
            .collect()
    }

    fn ids(rows: &[RoundTripLegRow]) -> Vec<&str> {
        rows.iter().map(|r| r.row_id()).collect()
    }

    #[test]
    fn test_both_keeps_sides_in_sync() {
        let mut filters = RoundTripFilters::new(FilterState::default());
        filters.update(|f| f.nonstop_only = true);

        assert!(filters.outbound().nonstop_only);
        assert!(filters.inbound().nonstop_only);
    }

    #[test]
    fn test_sides_diverge_after_scoping() {
        let mut filters = RoundTripFilters::new(FilterState::default());
        filters.update(|f| {
            f.airlines.insert("IndiGo".to_string());
        });

        filters.set_apply_to(ApplyTo::In);
        filters.update(|f| f.stops = StopsChoice::Exactly(1));

        // Snapshot carried the combined airline selection into the inbound side
        assert!(filters.inbound().airlines.contains("IndiGo"));
        assert_eq!(filters.inbound().stops, StopsChoice::Exactly(1));
        assert_eq!(filters.outbound().stops, StopsChoice::Any);
    }

    #[test]
    fn test_back_to_both_resyncs_from_last_active_side() {
        let mut filters = RoundTripFilters::new(FilterState::default());

        filters.set_apply_to(ApplyTo::Out);
        filters.update(|f| f.nonstop_only = true);
        filters.set_apply_to(ApplyTo::In);
        filters.update(|f| f.price_max = Some(6000));

        filters.set_apply_to(ApplyTo::Both);
        assert_eq!(filters.outbound(), filters.inbound());
        assert_eq!(filters.outbound().price_max, Some(6000));
        assert!(!filters.outbound().nonstop_only);
        assert_eq!(filters.outbound().apply_to, ApplyTo::Both);
    }

    #[test]
    fn test_both_ignores_separate_inbound_state() {
        let combined = FilterState {
            airlines: ["IndiGo".to_string()].into(),
            ..Default::default()
        };
        let stale_inbound = FilterState {
            airlines: ["Vistara".to_string()].into(),
            ..Default::default()
        };

        let filters = RoundTripFilters::from_states(combined.clone(), Some(stale_inbound));
        assert_eq!(filters.apply_to(), ApplyTo::Both);
        assert_eq!(filters.inbound(), &combined);

        let inbound = leg_rows(Direction::Inbound, &[("I1", "IndiGo", "09:00"), ("I2", "Vistara", "10:00")]);
        assert_eq!(ids(&filters.filter_inbound(&inbound)), vec!["I1"]);
    }

    #[test]
    fn test_scoped_states_stay_independent() {
        let outbound_state = FilterState {
            apply_to: ApplyTo::In,
            ..Default::default()
        };
        let inbound_state = FilterState {
            airlines: ["Vistara".to_string()].into(),
            ..Default::default()
        };

        let filters = RoundTripFilters::from_states(outbound_state, Some(inbound_state));
        assert_eq!(filters.apply_to(), ApplyTo::In);
        assert_eq!(filters.active().airlines.len(), 1);
        assert_eq!(filters.inbound().apply_to, ApplyTo::In);

        let outbound = leg_rows(Direction::Outbound, &[("O1", "IndiGo", "06:10"), ("O2", "Air India", "09:45")]);
        assert_eq!(filters.filter_outbound(&outbound).len(), 2);
    }

    #[test]
    fn test_time_buckets_per_side() {
        let mut filters = RoundTripFilters::new(FilterState::default());
        filters.set_apply_to(ApplyTo::Out);
        filters.update(|f| {
            f.depart_times.insert(TimeOfDay::EarlyMorning);
        });
        filters.set_apply_to(ApplyTo::In);
        filters.update(|f| {
            f.arrive_times.insert(TimeOfDay::Evening);
        });

        let outbound = leg_rows(Direction::Outbound, &[("O1", "IndiGo", "05:30"), ("O2", "IndiGo", "08:00")]);
        let mut inbound = leg_rows(Direction::Inbound, &[("I1", "IndiGo", "12:00"), ("I2", "IndiGo", "16:00")]);
        inbound[0].flight.arrive_time = "14:10".to_string();
        inbound[1].flight.arrive_time = "18:20".to_string();

        assert_eq!(ids(&filters.filter_outbound(&outbound)), vec!["O1"]);
        assert_eq!(ids(&filters.filter_inbound(&inbound)), vec!["I2"]);
    }
}
