pub mod models;

pub use models::flight::{Airport, CabinClass, FlightFare, FlightRecord, Refundability};
pub use models::policy::{CancellationPolicy, FeeRule, Segment};
