use shiprate_shared::{ContainerType, SeaRate};
use tracing::debug;

use crate::pricing::PricingEngine;

impl PricingEngine {
    /// Sea freight: each container with a configured rate, plus LCL volume.
    ///
    /// Every priced line (one per container instance, one for the volume)
    /// carries its own flat clearance and documentation costs. A zero total
    /// means nothing could be priced and is reported as unavailable.
    pub fn price_sea(
        &self,
        rate: &SeaRate,
        volume_cbm: f64,
        containers: &[ContainerType],
        exchange_rate: f64,
    ) -> Option<f64> {
        if !rate.active {
            return None;
        }

        let surcharges =
            rate.custom_clearance_cost.unwrap_or(0.0) + rate.documentation_cost.unwrap_or(0.0);
        let mut total = 0.0;

        for container in containers {
            if let Some(per_container) = rate.container_rate(*container) {
                total += per_container * exchange_rate + surcharges;
            }
        }

        if volume_cbm > 0.0 {
            if let Some(per_cbm) = rate.rate_per_cbm {
                total += per_cbm * volume_cbm * exchange_rate + surcharges;
            }
        }

        debug!(containers = containers.len(), volume_cbm, total, "sea freight total");
        (total != 0.0).then_some(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    const EPS: f64 = 1e-9;

    fn sample_rate() -> SeaRate {
        SeaRate {
            active: true,
            rate_per_cbm: Some(90.0),
            rate_per_20ft: Some(1200.0),
            rate_per_40ft: Some(2000.0),
            rate_per_40ft_high_cube: Some(2200.0),
            rate_per_45ft_high_cube: None,
            custom_clearance_cost: Some(150.0),
            documentation_cost: Some(50.0),
            eta: Some(35),
            ..Default::default()
        }
    }

    #[rstest]
    #[case(ContainerType::Ft20, 1200.0)]
    #[case(ContainerType::Ft40, 2000.0)]
    #[case(ContainerType::Ft40HighCube, 2200.0)]
    fn test_single_container(#[case] container: ContainerType, #[case] rate: f64) {
        let engine = PricingEngine::default();
        let amount = engine.price_sea(&sample_rate(), 0.0, &[container], 2.0).unwrap();
        assert!((amount - (rate * 2.0 + 200.0)).abs() < EPS);
    }

    #[test]
    fn test_volume_only() {
        let engine = PricingEngine::default();
        let amount = engine
            .price_sea(&sample_rate(), 4.0, &[ContainerType::Lcl], 1.0)
            .unwrap();
        assert!((amount - (90.0 * 4.0 + 200.0)).abs() < EPS);
    }

    #[test]
    fn test_surcharges_repeat_per_container_instance() {
        let engine = PricingEngine::default();
        let rate = sample_rate();
        let one = engine.price_sea(&rate, 0.0, &[ContainerType::Ft20], 1.0).unwrap();
        let two = engine
            .price_sea(&rate, 0.0, &[ContainerType::Ft20, ContainerType::Ft20], 1.0)
            .unwrap();
        assert!((two - 2.0 * one).abs() < EPS);
    }

    #[test]
    fn test_nothing_priced_is_unavailable() {
        let engine = PricingEngine::default();
        let rate = sample_rate();

        assert_eq!(engine.price_sea(&rate, 0.0, &[], 1.0), None);
        // No 45ft rate configured and no volume.
        assert_eq!(engine.price_sea(&rate, 0.0, &[ContainerType::Ft45HighCube], 1.0), None);

        let no_cbm = SeaRate {
            rate_per_cbm: None,
            ..sample_rate()
        };
        assert_eq!(engine.price_sea(&no_cbm, 12.0, &[], 1.0), None);

        let inactive = SeaRate {
            active: false,
            ..sample_rate()
        };
        assert_eq!(engine.price_sea(&inactive, 5.0, &[ContainerType::Ft40], 1.0), None);
    }

    fn container() -> impl Strategy<Value = ContainerType> {
        prop_oneof![
            Just(ContainerType::Ft20),
            Just(ContainerType::Ft40),
            Just(ContainerType::Ft40HighCube),
        ]
    }

    proptest! {
        #[test]
        fn prop_containers_are_additive(
            first in prop::collection::vec(container(), 1..4),
            second in prop::collection::vec(container(), 1..4),
            fx in 0.5f64..1500.0,
        ) {
            let engine = PricingEngine::default();
            let rate = sample_rate();
            let combined: Vec<_> = first.iter().chain(second.iter()).copied().collect();

            let a = engine.price_sea(&rate, 0.0, &first, fx).unwrap();
            let b = engine.price_sea(&rate, 0.0, &second, fx).unwrap();
            let both = engine.price_sea(&rate, 0.0, &combined, fx).unwrap();
            prop_assert!((both - (a + b)).abs() < 1e-6 * both.max(1.0));
        }
    }
}
