use std::fs;
use std::path::Path;

use k2_naming::{BaseStrategy, EntityMapping, NamingConfig, Schema, SchemaBinder};
use tracing::debug;

/// Default configuration file, read when present.
pub const DEFAULT_CONFIG_FILE: &str = "k2-naming.yaml";

/// Read the naming configuration, applying a `--base` override last.
pub fn load_config(
    path: Option<&Path>,
    base: Option<&str>,
) -> Result<NamingConfig, Box<dyn std::error::Error>> {
    let path = path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
    let mut config = NamingConfig::load(path)?;
    if let Some(base) = base {
        config.base_strategy = base.parse::<BaseStrategy>()?;
    }
    Ok(config)
}

pub fn load_mappings(path: &Path) -> Result<Vec<EntityMapping>, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let mappings = EntityMapping::list_from_yaml_str(&content)
        .map_err(|e| format!("invalid mapping file {}: {e}", path.display()))?;
    debug!(path = %path.display(), entities = mappings.len(), "mappings loaded");
    Ok(mappings)
}

/// Bind the mappings of `mapping_path` with the configured strategy.
pub fn bind_schema(
    mapping_path: &Path,
    config: &NamingConfig,
) -> Result<Schema, Box<dyn std::error::Error>> {
    let mappings = load_mappings(mapping_path)?;
    let strategy = config.strategy();
    let context = config.building_context();
    let schema = SchemaBinder::new(&strategy, &context).bind(&mappings)?;
    Ok(schema)
}
