pub mod generator;
pub mod models;

pub use generator::{QuoteError, QuoteGenerator};
pub use models::{Estimate, QuoteOutcome, QuoteStatus, UnavailablePolicy};
