use shiprate_pricing::{PricingEngine, RateTable, RouteContext};
use shiprate_shared::{MethodRates, Route, ShipmentRequest, ShippingMethod, ValidationError};
use tracing::{info, warn};

use crate::models::{Estimate, QuoteOutcome, UnavailablePolicy};

/// Builds the per-method estimate list for a route and shipment.
#[derive(Debug, Clone, Default)]
pub struct QuoteGenerator {
    engine: PricingEngine,
    policy: UnavailablePolicy,
}

impl QuoteGenerator {
    pub fn new(engine: PricingEngine) -> Self {
        Self {
            engine,
            policy: UnavailablePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: UnavailablePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> UnavailablePolicy {
        self.policy
    }

    /// Quote every offered method, in the order the route lists them.
    pub fn quote_all(
        &self,
        route: &Route,
        request: &ShipmentRequest,
    ) -> Result<Vec<Estimate>, QuoteError> {
        route.validate_fields()?;
        request.validate()?;

        let context = self.engine.config().context_for(route);
        let table = RateTable::new(&route.shipping_option_config);
        let mut estimates = Vec::new();

        for rates in table.offered() {
            let method = rates.method();
            let eta_days = rates.eta().unwrap_or(0);

            match self.price_offered(route, rates, &context, request) {
                Some(amount) => estimates.push(Estimate::priced(method, amount, eta_days)),
                None => {
                    warn!(route_id = %route.id, %method, "offered method could not be priced");
                    if self.policy == UnavailablePolicy::ZeroAmount {
                        estimates.push(Estimate::unavailable(method, eta_days));
                    }
                }
            }
        }

        info!(
            route_id = %route.id,
            route = %route.name,
            estimates = estimates.len(),
            "generated shipping quote"
        );
        Ok(estimates)
    }

    /// Quote a single method, keeping "not offered" distinct from
    /// "offered but unpriceable".
    pub fn quote_method(
        &self,
        route: &Route,
        request: &ShipmentRequest,
        method: ShippingMethod,
    ) -> Result<QuoteOutcome, QuoteError> {
        route.validate_fields()?;
        request.validate()?;

        let table = RateTable::new(&route.shipping_option_config);
        let Some(rates) = table.get(method) else {
            return Ok(QuoteOutcome::NotOffered);
        };

        let context = self.engine.config().context_for(route);
        Ok(QuoteOutcome::from_amount(
            self.price_offered(route, rates, &context, request),
        ))
    }

    /// A malformed config makes only its own method unavailable.
    fn price_offered(
        &self,
        route: &Route,
        rates: &MethodRates,
        context: &RouteContext,
        request: &ShipmentRequest,
    ) -> Option<f64> {
        if let Err(err) = rates.validate() {
            warn!(route_id = %route.id, method = %rates.method(), error = %err, "invalid rate config");
            return None;
        }
        self.engine.price(rates, context, request)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("Invalid quote input: {0}")]
    Validation(#[from] ValidationError),
}
