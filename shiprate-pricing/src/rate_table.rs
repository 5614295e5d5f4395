use shiprate_shared::{MethodRates, ShippingMethod, ShippingOptionConfig};

/// Read-only view over a route's method configs that only exposes offered
/// (active) methods.
#[derive(Debug, Clone, Copy)]
pub struct RateTable<'a> {
    options: &'a ShippingOptionConfig,
}

impl<'a> RateTable<'a> {
    pub fn new(options: &'a ShippingOptionConfig) -> Self {
        Self { options }
    }

    /// Config for `method`, or `None` when the method is not offered
    /// (missing, or present with `active` unset).
    pub fn get(&self, method: ShippingMethod) -> Option<&'a MethodRates> {
        self.options
            .available_options
            .get(method)
            .filter(|rates| rates.is_active())
    }

    pub fn is_offered(&self, method: ShippingMethod) -> bool {
        self.get(method).is_some()
    }

    /// Offered methods in route document order.
    pub fn offered(&self) -> impl Iterator<Item = &'a MethodRates> + 'a {
        self.options
            .available_options
            .iter()
            .filter(|rates| rates.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiprate_shared::{BandedRate, ExpressRate, SeaRate};

    fn options() -> ShippingOptionConfig {
        ShippingOptionConfig {
            available_options: vec![
                MethodRates::Console(BandedRate {
                    active: true,
                    ..Default::default()
                }),
                MethodRates::Express(ExpressRate::default()),
                MethodRates::Sea(SeaRate {
                    active: true,
                    ..Default::default()
                }),
            ]
            .into_iter()
            .collect(),
        }
    }

    #[test]
    fn test_inactive_and_missing_are_not_offered() {
        let options = options();
        let table = RateTable::new(&options);

        assert!(table.is_offered(ShippingMethod::Console));
        assert!(!table.is_offered(ShippingMethod::Express));
        assert!(!table.is_offered(ShippingMethod::FastTrack));
        assert!(matches!(table.get(ShippingMethod::Sea), Some(MethodRates::Sea(_))));
    }

    #[test]
    fn test_offered_keeps_route_order() {
        let options = options();
        let methods: Vec<_> = RateTable::new(&options)
            .offered()
            .map(MethodRates::method)
            .collect();
        assert_eq!(methods, vec![ShippingMethod::Console, ShippingMethod::Sea]);
    }
}
