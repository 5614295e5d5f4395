use serde::{Deserialize, Serialize};
use shiprate_shared::{
    CountryCode, Direction, MethodRates, Route, ShipmentRequest, ValidationError,
};
use tracing::debug;

/// Engine-wide pricing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Reference origin with its own per-category import table
    pub hub_country: CountryCode,

    /// Country the business imports into and exports from
    pub home_country: CountryCode,

    /// Express surcharge fraction when a route omits `subCharge`
    pub default_sub_charge: f64,

    /// Express VAT fraction when a route omits `vatPercent`
    pub default_vat: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            hub_country: CountryCode::new("CN"),
            home_country: CountryCode::new("NG"),
            default_sub_charge: 0.22,
            default_vat: 0.075,
        }
    }
}

impl PricingConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.hub_country.as_str().is_empty() || self.home_country.as_str().is_empty() {
            return Err(ValidationError::EmptyCountryCode);
        }
        for (field, value) in [
            ("default_sub_charge", self.default_sub_charge),
            ("default_vat", self.default_vat),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::InvalidFraction { field, value });
            }
        }
        Ok(())
    }

    pub fn role_of(&self, code: &CountryCode) -> CountryRole {
        if *code == self.home_country {
            CountryRole::Home
        } else if *code == self.hub_country {
            CountryRole::Hub
        } else {
            CountryRole::Other
        }
    }

    /// Resolve the route facts the pricers branch on.
    pub fn context_for(&self, route: &Route) -> RouteContext {
        RouteContext {
            direction: route.category,
            origin: self.role_of(&route.origin.code),
            destination: self.role_of(&route.destination.code),
            exchange_rate: route.exchange_rate(),
        }
    }
}

/// How a country takes part in pricing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountryRole {
    Hub,
    Home,
    Other,
}

/// Route facts a pricer needs, with country identity already resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteContext {
    pub direction: Direction,
    pub origin: CountryRole,
    pub destination: CountryRole,
    pub exchange_rate: f64,
}

impl RouteContext {
    pub fn new(direction: Direction, origin: CountryRole, destination: CountryRole) -> Self {
        Self {
            direction,
            origin,
            destination,
            exchange_rate: 1.0,
        }
    }

    pub fn with_exchange_rate(mut self, exchange_rate: f64) -> Self {
        self.exchange_rate = exchange_rate;
        self
    }
}

/// Stateless rate calculator. Method-specific rules live in
/// `express`, `banded` and `sea`.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    pub(crate) config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Price one method config for a shipment, dispatching on the method.
    pub fn price(
        &self,
        rates: &MethodRates,
        context: &RouteContext,
        request: &ShipmentRequest,
    ) -> Option<f64> {
        let amount = match rates {
            MethodRates::Express(rate) => {
                self.price_express(rate, request.weight_kg, context.exchange_rate)
            }
            MethodRates::FastTrack(rate) | MethodRates::Console(rate) => {
                self.price_banded(rate, context, request.weight_kg, request.goods_category.as_ref())
            }
            MethodRates::Sea(rate) => self.price_sea(
                rate,
                request.volume_cbm,
                &request.containers,
                context.exchange_rate,
            ),
        };

        debug!(method = %rates.method(), ?amount, "priced shipping method");
        amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiprate_shared::{CountryRef, ExpressRate, SeaRate};

    #[test]
    fn test_roles_resolved_by_code() {
        let config = PricingConfig::default();
        let route = Route::new(
            "Shenzhen to Abuja",
            Direction::Import,
            CountryRef::new("CN", "People's Republic of China"),
            CountryRef::new("NG", "Federal Republic of Nigeria"),
        )
        .with_exchange_rate(1550.0);

        let context = config.context_for(&route);
        assert_eq!(context.origin, CountryRole::Hub);
        assert_eq!(context.destination, CountryRole::Home);
        assert_eq!(context.exchange_rate, 1550.0);

        // Display name alone never decides the role.
        assert_eq!(config.role_of(&CountryCode::new("China")), CountryRole::Other);
    }

    #[test]
    fn test_config_validation() {
        assert!(PricingConfig::default().validate().is_ok());

        let config = PricingConfig {
            default_sub_charge: 22.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidFraction { field: "default_sub_charge", .. })
        ));

        let config = PricingConfig {
            hub_country: CountryCode::new(""),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyCountryCode));
    }

    #[test]
    fn test_price_dispatches_by_method() {
        let engine = PricingEngine::default();
        let context = RouteContext::new(Direction::Export, CountryRole::Home, CountryRole::Other);

        let express = MethodRates::Express(ExpressRate {
            active: true,
            kg_rates: Some(vec![10.0; 10]),
            sub_charge: Some(0.0),
            vat_percent: Some(0.0),
            ..Default::default()
        });
        assert_eq!(engine.price(&express, &context, &ShipmentRequest::by_weight(1.0)), Some(10.0));

        let sea = MethodRates::Sea(SeaRate {
            active: true,
            rate_per_cbm: Some(50.0),
            ..Default::default()
        });
        assert_eq!(engine.price(&sea, &context, &ShipmentRequest::by_weight(1.0)), None);
        assert_eq!(engine.price(&sea, &context, &ShipmentRequest::by_volume(2.0)), Some(100.0));
    }
}
