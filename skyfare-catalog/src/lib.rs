pub mod inventory;
pub mod pricing;

pub use inventory::{CatalogError, InMemoryCatalog};
pub use pricing::{PricingConfig, PricingEngine};
