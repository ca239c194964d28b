pub mod flight;
pub mod policy;
