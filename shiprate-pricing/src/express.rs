use shiprate_shared::{ExpressRate, EXPRESS_SLAB_COUNT};
use tracing::debug;

use crate::pricing::PricingEngine;

/// Width of one Express slab and of each extra block beyond the table.
pub const SLAB_STEP_KG: f64 = 0.5;

/// Heaviest weight covered by the slab table.
pub const SLAB_LIMIT_KG: f64 = SLAB_STEP_KG * EXPRESS_SLAB_COUNT as f64;

/// Index into the slab table for `weight_kg`, clamped to the table.
/// A weight of zero bills as the first (0.5 kg) slab.
pub fn slab_index(weight_kg: f64) -> usize {
    let index = (weight_kg / SLAB_STEP_KG).ceil() - 1.0;
    index.clamp(0.0, (EXPRESS_SLAB_COUNT - 1) as f64) as usize
}

/// Number of half-kilo blocks billed beyond the 5 kg slab.
pub fn extra_blocks(weight_kg: f64) -> u32 {
    if weight_kg <= SLAB_LIMIT_KG {
        return 0;
    }
    ((weight_kg - SLAB_LIMIT_KG) / SLAB_STEP_KG).ceil() as u32
}

impl PricingEngine {
    /// Express pricing over the half-kilo slab table.
    ///
    /// Surcharge and VAT are fractions applied to the base rate before the
    /// exchange rate: `(base + base*subCharge + base*vat) * exchangeRate`.
    /// Beyond 5 kg each extra half-kilo block adds `extraHalfKgRate` with the
    /// same treatment.
    pub fn price_express(
        &self,
        rate: &ExpressRate,
        weight_kg: f64,
        exchange_rate: f64,
    ) -> Option<f64> {
        if !rate.active {
            return None;
        }
        let slabs = rate.kg_rates.as_deref()?;
        if slabs.len() != EXPRESS_SLAB_COUNT {
            return None;
        }

        let sub_charge = rate.sub_charge.unwrap_or(self.config.default_sub_charge);
        let vat = rate.vat_percent.unwrap_or(self.config.default_vat);
        let charged = |base: f64| (base + base * sub_charge + base * vat) * exchange_rate;

        let index = slab_index(weight_kg);
        let slab_total = charged(slabs[index]);

        let blocks = extra_blocks(weight_kg);
        if blocks == 0 {
            debug!(weight_kg, index, "express slab price");
            return Some(slab_total);
        }

        let per_block = charged(rate.extra_half_kg_rate?);
        debug!(weight_kg, blocks, "express price beyond slab table");
        Some(slab_total + blocks as f64 * per_block)
    }
}
