use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

use super::rates::{BandedRate, ExpressRate, SeaRate};
use crate::error::ValidationError;

/// Trade direction of a route, relative to the home country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Import,
    Export,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteScope {
    Local,
    International,
}

/// ISO 3166-1 alpha-2 code, compared exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRef {
    pub code: CountryCode,
    pub name: String,
}

impl CountryRef {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: CountryCode::new(code),
            name: name.to_string(),
        }
    }
}

/// Shipping methods a route can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShippingMethod {
    #[serde(rename = "expressRate")]
    Express,
    #[serde(rename = "fastTrackRate")]
    FastTrack,
    #[serde(rename = "consoleRate")]
    Console,
    #[serde(rename = "seaRate")]
    Sea,
}

impl ShippingMethod {
    pub const ALL: [ShippingMethod; 4] = [
        ShippingMethod::Express,
        ShippingMethod::FastTrack,
        ShippingMethod::Console,
        ShippingMethod::Sea,
    ];

    /// Key under `availableOptions`.
    pub fn key(&self) -> &'static str {
        match self {
            ShippingMethod::Express => "expressRate",
            ShippingMethod::FastTrack => "fastTrackRate",
            ShippingMethod::Console => "consoleRate",
            ShippingMethod::Sea => "seaRate",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.key() == key)
    }

    /// Customer-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            ShippingMethod::Express => "Express",
            ShippingMethod::FastTrack => "Fast Track",
            ShippingMethod::Console => "Console",
            ShippingMethod::Sea => "Sea",
        }
    }
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry of `availableOptions`, typed by its method key.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodRates {
    Express(ExpressRate),
    FastTrack(BandedRate),
    Console(BandedRate),
    Sea(SeaRate),
}

impl MethodRates {
    pub fn method(&self) -> ShippingMethod {
        match self {
            MethodRates::Express(_) => ShippingMethod::Express,
            MethodRates::FastTrack(_) => ShippingMethod::FastTrack,
            MethodRates::Console(_) => ShippingMethod::Console,
            MethodRates::Sea(_) => ShippingMethod::Sea,
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            MethodRates::Express(r) => r.active,
            MethodRates::FastTrack(r) | MethodRates::Console(r) => r.active,
            MethodRates::Sea(r) => r.active,
        }
    }

    pub fn eta(&self) -> Option<u32> {
        match self {
            MethodRates::Express(r) => r.eta,
            MethodRates::FastTrack(r) | MethodRates::Console(r) => r.eta,
            MethodRates::Sea(r) => r.eta,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            MethodRates::Express(r) => r.validate(),
            MethodRates::FastTrack(r) | MethodRates::Console(r) => r.validate(),
            MethodRates::Sea(r) => r.validate(),
        }
    }
}

/// Method configs in the order the route document lists them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvailableOptions(Vec<MethodRates>);

impl AvailableOptions {
    /// Adds or replaces the config for `rates.method()`, keeping its position.
    pub fn insert(&mut self, rates: MethodRates) {
        let method = rates.method();
        match self.0.iter_mut().find(|r| r.method() == method) {
            Some(slot) => *slot = rates,
            None => self.0.push(rates),
        }
    }

    pub fn get(&self, method: ShippingMethod) -> Option<&MethodRates> {
        self.0.iter().find(|r| r.method() == method)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MethodRates> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<MethodRates> for AvailableOptions {
    fn from_iter<I: IntoIterator<Item = MethodRates>>(iter: I) -> Self {
        let mut options = AvailableOptions::default();
        for rates in iter {
            options.insert(rates);
        }
        options
    }
}

impl<'a> IntoIterator for &'a AvailableOptions {
    type Item = &'a MethodRates;
    type IntoIter = std::slice::Iter<'a, MethodRates>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for AvailableOptions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for rates in &self.0 {
            let key = rates.method().key();
            match rates {
                MethodRates::Express(r) => map.serialize_entry(key, r)?,
                MethodRates::FastTrack(r) | MethodRates::Console(r) => {
                    map.serialize_entry(key, r)?
                }
                MethodRates::Sea(r) => map.serialize_entry(key, r)?,
            }
        }
        map.end()
    }
}

struct AvailableOptionsVisitor;

impl<'de> Visitor<'de> for AvailableOptionsVisitor {
    type Value = AvailableOptions;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of shipping method keys to rate configs")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut options = AvailableOptions::default();
        while let Some(key) = access.next_key::<String>()? {
            let Some(method) = ShippingMethod::from_key(&key) else {
                access.next_value::<de::IgnoredAny>()?;
                continue;
            };
            if options.get(method).is_some() {
                return Err(de::Error::custom(format!("duplicate shipping option `{}`", key)));
            }
            let rates = match method {
                ShippingMethod::Express => MethodRates::Express(access.next_value()?),
                ShippingMethod::FastTrack => MethodRates::FastTrack(access.next_value()?),
                ShippingMethod::Console => MethodRates::Console(access.next_value()?),
                ShippingMethod::Sea => MethodRates::Sea(access.next_value()?),
            };
            options.0.push(rates);
        }
        Ok(options)
    }
}

impl<'de> Deserialize<'de> for AvailableOptions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(AvailableOptionsVisitor)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOptionConfig {
    #[serde(default)]
    pub available_options: AvailableOptions,
}

/// A configured shipping lane. Read-only input to the pricing engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: Uuid,
    pub name: String,
    pub category: Direction,
    pub origin: CountryRef,
    pub destination: CountryRef,
    pub scope: RouteScope,
    #[serde(default)]
    pub exchange_rate: Option<f64>,
    #[serde(default)]
    pub shipping_option_config: ShippingOptionConfig,
}

impl Route {
    pub fn new(name: &str, category: Direction, origin: CountryRef, destination: CountryRef) -> Self {
        let scope = if origin.code == destination.code {
            RouteScope::Local
        } else {
            RouteScope::International
        };
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category,
            origin,
            destination,
            scope,
            exchange_rate: None,
            shipping_option_config: ShippingOptionConfig::default(),
        }
    }

    pub fn with_exchange_rate(mut self, rate: f64) -> Self {
        self.exchange_rate = Some(rate);
        self
    }

    pub fn with_option(mut self, rates: MethodRates) -> Self {
        self.shipping_option_config.available_options.insert(rates);
        self
    }

    /// Multiplier from the base rate currency into the quoting currency.
    pub fn exchange_rate(&self) -> f64 {
        self.exchange_rate.unwrap_or(1.0)
    }

    /// Route-level fields only: exchange rate and country codes.
    pub fn validate_fields(&self) -> Result<(), ValidationError> {
        if let Some(rate) = self.exchange_rate {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(ValidationError::InvalidExchangeRate(rate));
            }
        }
        if self.origin.code.as_str().is_empty() || self.destination.code.as_str().is_empty() {
            return Err(ValidationError::EmptyCountryCode);
        }
        Ok(())
    }

    /// Route-level fields plus every active method config. Inactive configs
    /// are never priced and are not checked.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_fields()?;
        self.shipping_option_config
            .available_options
            .iter()
            .filter(|rates| rates.is_active())
            .try_for_each(MethodRates::validate)
    }
}
