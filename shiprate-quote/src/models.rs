use serde::{Deserialize, Serialize};
use shiprate_shared::ShippingMethod;

/// Whether an estimate carries a real price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteStatus {
    Priced,
    Unavailable,
}

/// Result of quoting a single method on a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "amount", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteOutcome {
    /// A rule applied; amount in the route's quoting currency
    Priced(f64),
    /// Offered, but no rule covers this shipment
    Unavailable,
    /// Missing from the route or not active
    NotOffered,
}

impl QuoteOutcome {
    pub fn from_amount(amount: Option<f64>) -> Self {
        match amount {
            Some(amount) => QuoteOutcome::Priced(amount),
            None => QuoteOutcome::Unavailable,
        }
    }

    pub fn amount(&self) -> Option<f64> {
        match self {
            QuoteOutcome::Priced(amount) => Some(*amount),
            _ => None,
        }
    }
}

/// What to do with an offered method that cannot be priced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailablePolicy {
    /// List it with amount 0 and status `UNAVAILABLE`
    #[default]
    ZeroAmount,
    /// Leave it out of the estimate list
    Omit,
}

/// One line of a quote: a method, its price and transit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub method: ShippingMethod,
    pub method_label: String,
    pub amount: f64,
    pub eta_days: u32,
    pub status: QuoteStatus,
}

impl Estimate {
    pub fn priced(method: ShippingMethod, amount: f64, eta_days: u32) -> Self {
        Self {
            method,
            method_label: method.label().to_string(),
            amount,
            eta_days,
            status: QuoteStatus::Priced,
        }
    }

    pub fn unavailable(method: ShippingMethod, eta_days: u32) -> Self {
        Self {
            method,
            method_label: method.label().to_string(),
            amount: 0.0,
            eta_days,
            status: QuoteStatus::Unavailable,
        }
    }

    pub fn is_priced(&self) -> bool {
        self.status == QuoteStatus::Priced
    }
}
