use serde::{Deserialize, Serialize};
use std::fmt;

use super::lenient;
use super::shipment::ContainerType;
use crate::error::ValidationError;

/// Number of half-kilo Express slabs, 0.5 kg through 5.0 kg.
pub const EXPRESS_SLAB_COUNT: usize = 10;

/// Goods category tags as stored on rate configs and shipments.
///
/// Matching is exact on the stored tag; anything unrecognised is kept
/// verbatim in `Other` and never selects an alternate rate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GoodsCategory {
    BatteryFree,
    HasBattery,
    Chemical,
    ContainFood,
    SpecialGoods,
    Other(String),
}

impl GoodsCategory {
    pub fn as_str(&self) -> &str {
        match self {
            GoodsCategory::BatteryFree => "BatteryFree",
            GoodsCategory::HasBattery => "Has Battery",
            GoodsCategory::Chemical => "Chemical",
            GoodsCategory::ContainFood => "ContainFood",
            GoodsCategory::SpecialGoods => "SpecialGoods",
            GoodsCategory::Other(tag) => tag,
        }
    }
}

impl From<String> for GoodsCategory {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "BatteryFree" => GoodsCategory::BatteryFree,
            "Has Battery" => GoodsCategory::HasBattery,
            "Chemical" => GoodsCategory::Chemical,
            "ContainFood" | "Food" => GoodsCategory::ContainFood,
            "SpecialGoods" => GoodsCategory::SpecialGoods,
            _ => GoodsCategory::Other(tag),
        }
    }
}

impl From<&str> for GoodsCategory {
    fn from(tag: &str) -> Self {
        GoodsCategory::from(tag.to_string())
    }
}

impl From<GoodsCategory> for String {
    fn from(category: GoodsCategory) -> Self {
        match category {
            GoodsCategory::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for GoodsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Express (air) weight-slab rates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressRate {
    #[serde(default)]
    pub active: bool,
    /// Flat rates for 0.5, 1.0, ... 5.0 kg.
    #[serde(default)]
    pub kg_rates: Option<Vec<f64>>,
    #[serde(default)]
    pub extra_half_kg_rate: Option<f64>,
    /// Fractional surcharge, `0.22` for 22 %.
    #[serde(default)]
    pub sub_charge: Option<f64>,
    /// Fractional VAT, `0.075` for 7.5 %.
    #[serde(default)]
    pub vat_percent: Option<f64>,
    #[serde(default)]
    pub goods_category: Vec<GoodsCategory>,
    #[serde(default)]
    pub eta: Option<u32>,
}

impl ExpressRate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(rates) = &self.kg_rates {
            if rates.len() != EXPRESS_SLAB_COUNT {
                return Err(ValidationError::SlabCount {
                    expected: EXPRESS_SLAB_COUNT,
                    found: rates.len(),
                });
            }
            for rate in rates {
                check_rate("kgRates", Some(*rate))?;
            }
        }
        check_rate("extraHalfKgRate", self.extra_half_kg_rate)?;
        check_fraction("subCharge", self.sub_charge)?;
        check_fraction("vatPercent", self.vat_percent)?;
        Ok(())
    }
}

/// Fast Track and Console (air) rates. Both methods share this shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandedRate {
    #[serde(default)]
    pub active: bool,
    #[serde(rename = "1-5kg", default, deserialize_with = "lenient::option_f64")]
    pub rate_1_to_5kg: Option<f64>,
    #[serde(rename = "6-10kg", default, deserialize_with = "lenient::option_f64")]
    pub rate_6_to_10kg: Option<f64>,
    #[serde(rename = "above10kg", default, deserialize_with = "lenient::option_f64")]
    pub rate_above_10kg: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub rate_per_kg: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub rate_per_piece: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub rate_per_volume: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub has_battery_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub has_chemical_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub has_food_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub special_goods_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub custom_clearance_rate_air: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub custom_clearance_rate_per_kg: Option<f64>,
    #[serde(default)]
    pub goods_category: Vec<GoodsCategory>,
    #[serde(default)]
    pub eta: Option<u32>,
}

impl BandedRate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let rates = [
            ("1-5kg", self.rate_1_to_5kg),
            ("6-10kg", self.rate_6_to_10kg),
            ("above10kg", self.rate_above_10kg),
            ("ratePerKg", self.rate_per_kg),
            ("ratePerPiece", self.rate_per_piece),
            ("ratePerVolume", self.rate_per_volume),
            ("hasBatteryRate", self.has_battery_rate),
            ("hasChemicalRate", self.has_chemical_rate),
            ("hasFoodRate", self.has_food_rate),
            ("specialGoodsRate", self.special_goods_rate),
            ("customClearanceRateAir", self.custom_clearance_rate_air),
            ("customClearanceRatePerKg", self.custom_clearance_rate_per_kg),
        ];
        for (field, rate) in rates {
            check_rate(field, rate)?;
        }
        Ok(())
    }
}

/// Sea freight container and LCL rates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeaRate {
    #[serde(default)]
    pub active: bool,
    #[serde(rename = "ratePerCBM", default)]
    pub rate_per_cbm: Option<f64>,
    #[serde(default)]
    pub rate_per_20ft: Option<f64>,
    #[serde(default)]
    pub rate_per_40ft: Option<f64>,
    #[serde(default)]
    pub rate_per_40ft_high_cube: Option<f64>,
    #[serde(default)]
    pub rate_per_45ft_high_cube: Option<f64>,
    /// Flat, already in the quoting currency.
    #[serde(default)]
    pub custom_clearance_cost: Option<f64>,
    /// Flat, already in the quoting currency.
    #[serde(default)]
    pub documentation_cost: Option<f64>,
    #[serde(rename = "customClearanceRatePerCBM", default)]
    pub custom_clearance_rate_per_cbm: Option<f64>,
    #[serde(default)]
    pub goods_category: Vec<GoodsCategory>,
    #[serde(default)]
    pub eta: Option<u32>,
}

impl SeaRate {
    /// Flat rate for one container of the given type. `LCL` has none.
    pub fn container_rate(&self, container: ContainerType) -> Option<f64> {
        match container {
            ContainerType::Ft20 => self.rate_per_20ft,
            ContainerType::Ft40 => self.rate_per_40ft,
            ContainerType::Ft40HighCube => self.rate_per_40ft_high_cube,
            ContainerType::Ft45HighCube => self.rate_per_45ft_high_cube,
            ContainerType::Lcl => None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let rates = [
            ("ratePerCBM", self.rate_per_cbm),
            ("ratePer20ft", self.rate_per_20ft),
            ("ratePer40ft", self.rate_per_40ft),
            ("ratePer40ftHighCube", self.rate_per_40ft_high_cube),
            ("ratePer45ftHighCube", self.rate_per_45ft_high_cube),
            ("customClearanceCost", self.custom_clearance_cost),
            ("documentationCost", self.documentation_cost),
            ("customClearanceRatePerCBM", self.custom_clearance_rate_per_cbm),
        ];
        for (field, rate) in rates {
            check_rate(field, rate)?;
        }
        Ok(())
    }
}

fn check_rate(field: &'static str, rate: Option<f64>) -> Result<(), ValidationError> {
    match rate {
        Some(value) if !value.is_finite() || value < 0.0 => {
            Err(ValidationError::InvalidRate { field, value })
        }
        _ => Ok(()),
    }
}

fn check_fraction(field: &'static str, fraction: Option<f64>) -> Result<(), ValidationError> {
    match fraction {
        Some(value) if !(0.0..=1.0).contains(&value) => {
            Err(ValidationError::InvalidFraction { field, value })
        }
        _ => Ok(()),
    }
}
