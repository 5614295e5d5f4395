use shiprate_shared::{BandedRate, Direction, GoodsCategory};
use tracing::debug;

use crate::pricing::{CountryRole, PricingEngine, RouteContext};

/// Upper bound of the `1-5kg` band.
pub const LOWER_BAND_LIMIT_KG: f64 = 5.0;

/// Upper bound of the `6-10kg` band; heavier shipments bill per kg.
pub const UPPER_BAND_LIMIT_KG: f64 = 10.0;

/// Order in which category tags are consulted. The first one present wins.
static CATEGORY_PRIORITY: [GoodsCategory; 5] = [
    GoodsCategory::BatteryFree,
    GoodsCategory::HasBattery,
    GoodsCategory::Chemical,
    GoodsCategory::ContainFood,
    GoodsCategory::SpecialGoods,
];

/// Category tags in effect for one quote: the method's configured tags plus
/// whatever the shipper declared.
#[derive(Debug, Clone, Copy)]
struct CategoryTags<'a> {
    configured: &'a [GoodsCategory],
    declared: Option<&'a GoodsCategory>,
}

impl<'a> CategoryTags<'a> {
    fn contains(&self, category: &GoodsCategory) -> bool {
        self.configured.contains(category) || self.declared == Some(category)
    }

    fn has_food(&self) -> bool {
        self.contains(&GoodsCategory::ContainFood)
    }

    fn leading(&self) -> Option<&'static GoodsCategory> {
        CATEGORY_PRIORITY.iter().find(|c| self.contains(c))
    }
}

impl PricingEngine {
    /// Fast Track / Console pricing.
    ///
    /// Branches on direction and the origin/destination roles:
    /// - import from the hub into home: per-kg rate picked by goods category,
    ///   plus the flat `customClearanceRatePerKg`;
    /// - import from elsewhere into home: food rate per kg, else weight bands;
    /// - export from home: as the previous case plus clearance per kg.
    ///
    /// Anything else has no rule and is unavailable.
    pub fn price_banded(
        &self,
        rate: &BandedRate,
        context: &RouteContext,
        weight_kg: f64,
        declared: Option<&GoodsCategory>,
    ) -> Option<f64> {
        if !rate.active {
            return None;
        }

        let tags = CategoryTags {
            configured: &rate.goods_category,
            declared,
        };
        let fx = context.exchange_rate;

        match (context.direction, context.origin, context.destination) {
            (Direction::Import, CountryRole::Hub, CountryRole::Home) => {
                let per_kg = hub_category_rate(rate, &tags)?;
                let clearance = rate.custom_clearance_rate_per_kg.unwrap_or(0.0);
                Some(weight_kg * per_kg * fx + clearance)
            }
            (Direction::Import, _, CountryRole::Home) => banded_or_food(rate, &tags, weight_kg, fx),
            (Direction::Export, CountryRole::Home, _) => {
                let base = banded_or_food(rate, &tags, weight_kg, fx)?;
                let clearance = rate.custom_clearance_rate_per_kg.unwrap_or(0.0);
                Some(base + clearance * weight_kg)
            }
            (direction, origin, destination) => {
                debug!(?direction, ?origin, ?destination, "no banded rule for route");
                None
            }
        }
    }
}

fn hub_category_rate(rate: &BandedRate, tags: &CategoryTags<'_>) -> Option<f64> {
    let leading = tags.leading();
    debug!(category = ?leading, "hub import category");
    match leading {
        Some(GoodsCategory::HasBattery) => rate.has_battery_rate,
        Some(GoodsCategory::Chemical) => rate.has_chemical_rate,
        Some(GoodsCategory::ContainFood) => rate.has_food_rate,
        Some(GoodsCategory::SpecialGoods) => rate.special_goods_rate,
        // BatteryFree, or no recognised tag at all
        _ => rate.rate_per_kg,
    }
}

/// Food bypasses the band table entirely.
fn banded_or_food(
    rate: &BandedRate,
    tags: &CategoryTags<'_>,
    weight_kg: f64,
    fx: f64,
) -> Option<f64> {
    if tags.has_food() {
        return Some(rate.has_food_rate? * weight_kg * fx);
    }

    if weight_kg <= LOWER_BAND_LIMIT_KG {
        Some(rate.rate_1_to_5kg? * fx)
    } else if weight_kg <= UPPER_BAND_LIMIT_KG {
        Some(rate.rate_6_to_10kg? * fx)
    } else {
        Some(weight_kg * rate.rate_per_kg? * fx)
    }
}
