use crate::config::market::PairConfig;
use crate::config::*;
use crate::error::{Error, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub pairs: Vec<PairConfig>,
}

impl AppConfig {
    pub fn load(env: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("ORDER_COMPUTE").separator("__"))
            .build()
            .map_err(|e| Error::ConfigError(e.to_string()))?;

        config.try_deserialize()
            .map_err(|e| Error::ConfigError(e.to_string()))
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()
            .map_err(|e| Error::ConfigError(e.to_string()))?;

        config.try_deserialize()
            .map_err(|e| Error::ConfigError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = r#"
[logging]
level = "debug"
json = true

[engine]
active_pair = "ETH-USD"

[[pairs]]
symbol = "ETH-USD"
collateral_long_token = "USD"
collateral_short_token = "USD"
leverage = "20"
max_notional = "500000"
min_quantity_base = "0.01"
margin_ratio = "0.03"
taker_fee = "0.0005"
maker_fee = "0.0002"
base_token_precision = 2
"#;

    #[test]
    fn parses_inline_toml() {
        let config = AppConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert_eq!(config.engine.active_pair.as_deref(), Some("ETH-USD"));
        assert_eq!(config.pairs.len(), 1);

        let pair = &config.pairs[0];
        assert_eq!(pair.symbol.as_str(), "ETH-USD");
        assert_eq!(pair.leverage.as_decimal(), dec!(20));
        assert_eq!(pair.min_quantity_base.as_decimal(), dec!(0.01));
        assert_eq!(pair.base_token_precision, 2);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.logging.level, "info");
        assert!(config.engine.active_pair.is_none());
        assert!(config.pairs.is_empty());
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = AppConfig::from_toml_str("[[pairs]]\nsymbol = ").unwrap_err();
        assert_eq!(err.kind(), "config_error");
    }
}
