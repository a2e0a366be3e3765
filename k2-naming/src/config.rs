use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::jpa::JpaCompliantNamingStrategy;
use crate::k2::K2NamingStrategy;
use crate::normalizer::{BuildingContext, MappingDefaults, ObjectNameNormalizer};
use crate::spring::SpringImplicitNamingStrategy;

/// Error type for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// An I/O or YAML parsing error occurred while loading a config file.
    Load(String),
    /// A value was present but could not be interpreted.
    Invalid { key: String, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Load(msg) => write!(f, "Config load error: {msg}"),
            ConfigError::Invalid { key, value } => {
                write!(f, "Invalid value for '{key}': {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Which strategy derives raw names before the camel-case transformation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseStrategy {
    #[default]
    Spring,
    Jpa,
}

impl FromStr for BaseStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spring" => Ok(BaseStrategy::Spring),
            "jpa" => Ok(BaseStrategy::Jpa),
            _ => Err(ConfigError::Invalid {
                key: "naming.base-strategy".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Naming configuration, read from the `naming:` section of a YAML file.
///
/// ```yaml
/// naming:
///   base-strategy: spring
///   globally-quoted-identifiers: false
///   auto-quote-keywords: true
/// ```
///
/// Resolution order (lowest to highest priority):
/// 1. built-in defaults
/// 2. the YAML file
/// 3. `.env` (loaded into the process environment, never overwriting)
/// 4. `K2_NAMING_BASE_STRATEGY`, `K2_NAMING_GLOBALLY_QUOTED_IDENTIFIERS`,
///    `K2_NAMING_AUTO_QUOTE_KEYWORDS`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct NamingConfig {
    pub base_strategy: BaseStrategy,
    pub globally_quoted_identifiers: bool,
    pub auto_quote_keywords: bool,
    pub implicit_discriminator_column: String,
    pub implicit_tenant_id_column: String,
    pub implicit_id_column: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        let defaults = MappingDefaults::default();
        Self {
            base_strategy: BaseStrategy::default(),
            globally_quoted_identifiers: false,
            auto_quote_keywords: false,
            implicit_discriminator_column: defaults.implicit_discriminator_column,
            implicit_tenant_id_column: defaults.implicit_tenant_id_column,
            implicit_id_column: defaults.implicit_id_column,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    naming: NamingConfig,
}

impl NamingConfig {
    /// Parse the `naming:` section of a YAML document. Missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let file: ConfigFile =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Load(e.to_string()))?;
        Ok(file.naming)
    }

    /// Load a YAML file (when it exists), then overlay `.env` and environment variables.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
            Self::from_yaml_str(&content)?
        } else {
            Self::default()
        };

        let _ = dotenvy::dotenv();
        config.apply_env()?;
        debug!(path = %path.display(), base = ?config.base_strategy, "naming config loaded");
        Ok(config)
    }

    /// Overlay `K2_NAMING_*` environment variables.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(value) = std::env::var("K2_NAMING_BASE_STRATEGY") {
            self.base_strategy = value.parse()?;
        }
        if let Ok(value) = std::env::var("K2_NAMING_GLOBALLY_QUOTED_IDENTIFIERS") {
            self.globally_quoted_identifiers =
                parse_bool("K2_NAMING_GLOBALLY_QUOTED_IDENTIFIERS", &value)?;
        }
        if let Ok(value) = std::env::var("K2_NAMING_AUTO_QUOTE_KEYWORDS") {
            self.auto_quote_keywords = parse_bool("K2_NAMING_AUTO_QUOTE_KEYWORDS", &value)?;
        }
        Ok(())
    }

    pub fn building_context(&self) -> BuildingContext {
        BuildingContext::new(
            ObjectNameNormalizer::new(self.globally_quoted_identifiers, self.auto_quote_keywords),
            MappingDefaults {
                implicit_discriminator_column: self.implicit_discriminator_column.clone(),
                implicit_tenant_id_column: self.implicit_tenant_id_column.clone(),
                implicit_id_column: self.implicit_id_column.clone(),
            },
        )
    }

    /// The camel-case strategy on top of the configured base strategy.
    pub fn strategy(&self) -> K2NamingStrategy {
        match self.base_strategy {
            BaseStrategy::Spring => K2NamingStrategy::with_base(SpringImplicitNamingStrategy::new()),
            BaseStrategy::Jpa => K2NamingStrategy::with_base(JpaCompliantNamingStrategy::new()),
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
