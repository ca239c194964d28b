use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Four fixed departure/arrival buckets: [0,6), [6,12), [12,18), [18,24).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    EarlyMorning,
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::EarlyMorning,
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
    ];

    pub fn from_hour(hour: u32) -> Option<Self> {
        match hour {
            0..=5 => Some(TimeOfDay::EarlyMorning),
            6..=11 => Some(TimeOfDay::Morning),
            12..=17 => Some(TimeOfDay::Afternoon),
            18..=23 => Some(TimeOfDay::Evening),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeOfDay::EarlyMorning => "Before 6 AM",
            TimeOfDay::Morning => "6 AM - 12 PM",
            TimeOfDay::Afternoon => "12 PM - 6 PM",
            TimeOfDay::Evening => "After 6 PM",
        }
    }
}

fn parse_clock(hhmm: &str) -> Option<NaiveTime> {
    let raw = hhmm.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

/// Minutes since midnight for a local "HH:MM" clock string.
pub fn clock_minutes(hhmm: &str) -> Option<u32> {
    parse_clock(hhmm).map(|t| t.hour() * 60 + t.minute())
}

/// Bucket a local "HH:MM" clock string. `None` when the string is not a clock time.
pub fn time_of_day(hhmm: &str) -> Option<TimeOfDay> {
    parse_clock(hhmm).and_then(|t| TimeOfDay::from_hour(t.hour()))
}
