use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::rates::GoodsCategory;
use crate::error::ValidationError;

/// Sea container selection. `Lcl` marks a volume-only consignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerType {
    #[serde(rename = "20ft")]
    Ft20,
    #[serde(rename = "40ft")]
    Ft40,
    #[serde(rename = "40ftHighCube")]
    Ft40HighCube,
    #[serde(rename = "45ftHighCube")]
    Ft45HighCube,
    #[serde(rename = "LCL")]
    Lcl,
}

impl ContainerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerType::Ft20 => "20ft",
            ContainerType::Ft40 => "40ft",
            ContainerType::Ft40HighCube => "40ftHighCube",
            ContainerType::Ft45HighCube => "45ftHighCube",
            ContainerType::Lcl => "LCL",
        }
    }
}

impl fmt::Display for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContainerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "20ft" => Ok(ContainerType::Ft20),
            "40ft" => Ok(ContainerType::Ft40),
            "40ftHighCube" => Ok(ContainerType::Ft40HighCube),
            "45ftHighCube" => Ok(ContainerType::Ft45HighCube),
            "LCL" => Ok(ContainerType::Lcl),
            other => Err(format!("unknown container type: {}", other)),
        }
    }
}

/// What the customer wants to ship. Direction comes from the route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentRequest {
    #[serde(default)]
    pub weight_kg: f64,
    #[serde(default)]
    pub volume_cbm: f64,
    #[serde(default)]
    pub containers: Vec<ContainerType>,
    #[serde(default)]
    pub goods_category: Option<GoodsCategory>,
}

impl ShipmentRequest {
    pub fn by_weight(weight_kg: f64) -> Self {
        Self {
            weight_kg,
            ..Default::default()
        }
    }

    pub fn by_volume(volume_cbm: f64) -> Self {
        Self {
            volume_cbm,
            ..Default::default()
        }
    }

    pub fn with_containers(mut self, containers: impl IntoIterator<Item = ContainerType>) -> Self {
        self.containers.extend(containers);
        self
    }

    pub fn with_goods_category(mut self, category: impl Into<GoodsCategory>) -> Self {
        self.goods_category = Some(category.into());
        self
    }

    /// Negative or non-finite quantities are rejected; zero is allowed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_quantity("weightKg", self.weight_kg)?;
        check_quantity("volumeCbm", self.volume_cbm)?;
        Ok(())
    }
}

fn check_quantity(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidQuantity { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipment_from_json() {
        let request: ShipmentRequest = serde_json::from_str(
            r#"{"volumeCbm": 3.5, "containers": ["20ft", "LCL", "20ft"], "goodsCategory": "Chemical"}"#,
        )
        .unwrap();

        assert_eq!(request.weight_kg, 0.0);
        assert_eq!(request.volume_cbm, 3.5);
        assert_eq!(
            request.containers,
            vec![ContainerType::Ft20, ContainerType::Lcl, ContainerType::Ft20]
        );
        assert_eq!(request.goods_category, Some(GoodsCategory::Chemical));
    }

    #[test]
    fn test_validation_rejects_negative_and_nan() {
        assert!(ShipmentRequest::by_weight(0.0).validate().is_ok());
        assert_eq!(
            ShipmentRequest::by_weight(-1.0).validate(),
            Err(ValidationError::InvalidQuantity { field: "weightKg", value: -1.0 })
        );
        assert!(ShipmentRequest::by_volume(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_container_round_trip_through_str() {
        for container in [
            ContainerType::Ft20,
            ContainerType::Ft40,
            ContainerType::Ft40HighCube,
            ContainerType::Ft45HighCube,
            ContainerType::Lcl,
        ] {
            assert_eq!(container.as_str().parse::<ContainerType>(), Ok(container));
        }
        assert!("53ft".parse::<ContainerType>().is_err());
    }
}
