//! Status effect catalog loading

use super::ConfigError;
use crate::status::{EffectCatalog, StatusEffectSpec};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for status effect definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectsConfig {
    pub status_effects: Vec<StatusEffectSpec>,
}

impl EffectsConfig {
    fn into_catalog(self) -> Result<EffectCatalog, ConfigError> {
        let mut catalog = EffectCatalog::new();
        for spec in self.status_effects {
            if catalog.get(spec.name()).is_some() {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate status effect '{}'",
                    spec.name()
                )));
            }
            catalog.register(spec)?;
        }
        Ok(catalog)
    }
}

/// Load status effect definitions from a TOML or JSON file
pub fn load_effect_catalog(path: &Path) -> Result<EffectCatalog, ConfigError> {
    let config: EffectsConfig = super::load_file(path)?;
    let catalog = config.into_catalog()?;
    tracing::debug!(path = %path.display(), count = catalog.len(), "loaded status effect catalog");
    Ok(catalog)
}

/// Load status effect definitions from a TOML string
pub fn parse_effect_catalog(content: &str) -> Result<EffectCatalog, ConfigError> {
    let config: EffectsConfig = super::parse_toml(content)?;
    config.into_catalog()
}
