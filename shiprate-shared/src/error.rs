/// Rejections raised at the data-model boundary, before any pricing runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Exchange rate must be finite and positive, got {0}")]
    InvalidExchangeRate(f64),

    #[error("{field} must be a fraction between 0 and 1, got {value}")]
    InvalidFraction { field: &'static str, value: f64 },

    #[error("{field} must be a finite non-negative rate, got {value}")]
    InvalidRate { field: &'static str, value: f64 },

    #[error("Express slab table needs {expected} rates, found {found}")]
    SlabCount { expected: usize, found: usize },

    #[error("{field} must be a finite non-negative quantity, got {value}")]
    InvalidQuantity { field: &'static str, value: f64 },

    #[error("Country code must not be empty")]
    EmptyCountryCode,
}
