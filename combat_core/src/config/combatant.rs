//! Combatant loading

use super::ConfigError;
use crate::defense::DefenseConfig;
use crate::entity::Combatant;
use crate::ledger::{HealthConfig, ShieldConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Authoring form of a combatant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantConfig {
    pub id: String,
    #[serde(default)]
    pub defense: Option<DefenseConfig>,
    #[serde(default)]
    pub shield: Option<ShieldConfig>,
    #[serde(default)]
    pub health: Option<HealthConfig>,
}

/// Container for combatant definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CombatantsConfig {
    combatants: Vec<CombatantConfig>,
}

impl CombatantsConfig {
    fn build(self) -> Result<Vec<Combatant>, ConfigError> {
        let mut seen = HashSet::new();
        let mut combatants = Vec::with_capacity(self.combatants.len());
        for config in &self.combatants {
            if !seen.insert(config.id.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate combatant '{}'",
                    config.id
                )));
            }
            combatants.push(Combatant::from_config(config)?);
        }
        Ok(combatants)
    }
}

/// Load and validate combatants from a TOML or JSON file
pub fn load_combatant_config(path: &Path) -> Result<Vec<Combatant>, ConfigError> {
    let config: CombatantsConfig = super::load_file(path)?;
    let combatants = config.build()?;
    tracing::debug!(path = %path.display(), count = combatants.len(), "loaded combatants");
    Ok(combatants)
}

/// Load and validate combatants from a TOML string
pub fn parse_combatant_config(content: &str) -> Result<Vec<Combatant>, ConfigError> {
    let config: CombatantsConfig = super::parse_toml(content)?;
    config.build()
}
