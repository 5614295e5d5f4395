//! Rate calculation engine.
//!
//! Turns a route's rate configuration plus shipment parameters into a price
//! per shipping method. Every pricer is pure: `Some(amount)` when a rule
//! applies, `None` when the method cannot be priced for this shipment.

pub mod banded;
pub mod express;
pub mod pricing;
pub mod rate_table;
pub mod sea;

pub use pricing::{CountryRole, PricingConfig, PricingEngine, RouteContext};
pub use rate_table::RateTable;
