use serde::Deserialize;
use shiprate_pricing::{PricingConfig, PricingEngine};
use shiprate_quote::{QuoteGenerator, UnavailablePolicy};
use shiprate_shared::{CountryCode, ValidationError};
use std::env;
use std::path::Path;
use tracing::debug;

type Builder = config::ConfigBuilder<config::builder::DefaultState>;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub pricing: PricingSettings,
    pub quoting: QuotingSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PricingSettings {
    pub hub_country: String,
    pub home_country: String,
    pub default_sub_charge: f64,
    pub default_vat: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct QuotingSettings {
    pub unavailable_policy: UnavailablePolicy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Source(#[from] config::ConfigError),

    #[error("Invalid pricing configuration: {0}")]
    Invalid(#[from] ValidationError),
}

fn with_defaults(builder: Builder) -> Result<Builder, config::ConfigError> {
    builder
        .set_default("pricing.hub_country", "CN")?
        .set_default("pricing.home_country", "NG")?
        .set_default("pricing.default_sub_charge", 0.22)?
        .set_default("pricing.default_vat", 0.075)?
        .set_default("quoting.unavailable_policy", "zero_amount")?
        .set_default("logging.level", "info")?
        .set_default("logging.json", false)
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(None)
    }

    /// Layered load: built-in defaults, `config/default`, `config/{RUN_MODE}`,
    /// `config/local`, an explicit file if given, then `SHIPRATE_*` variables.
    pub fn load_with(file: Option<&Path>) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = with_defaults(config::Config::builder())?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, never checked in
            .add_source(config::File::with_name("config/local").required(false));

        if let Some(path) = file {
            debug!(path = %path.display(), "adding configuration file");
            builder = builder.add_source(config::File::from(path));
        }

        // Eg. `SHIPRATE_PRICING__HUB_COUNTRY=CN`
        let settings = builder
            .add_source(
                config::Environment::with_prefix("SHIPRATE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.pricing_config()?;
        Ok(config)
    }

    /// Defaults overlaid with a TOML document. No files or environment.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let settings = with_defaults(config::Config::builder())?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.pricing_config()?;
        Ok(config)
    }

    pub fn pricing_config(&self) -> Result<PricingConfig, ValidationError> {
        let pricing = PricingConfig {
            hub_country: CountryCode::new(self.pricing.hub_country.trim()),
            home_country: CountryCode::new(self.pricing.home_country.trim()),
            default_sub_charge: self.pricing.default_sub_charge,
            default_vat: self.pricing.default_vat,
        };
        pricing.validate()?;
        Ok(pricing)
    }

    pub fn generator(&self) -> Result<QuoteGenerator, ConfigError> {
        let engine = PricingEngine::new(self.pricing_config()?);
        Ok(QuoteGenerator::new(engine).with_policy(self.quoting.unavailable_policy))
    }
}
