//! ResolutionOutcome and TickOutcome - What a resolution or frame did

use crate::status::{EffectIdentity, StatusEvent};
use serde::{Deserialize, Serialize};

/// Result of resolving one damage event against a combatant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolutionOutcome {
    // === Damage ===
    /// Damage after crit, mitigation and damage-taken modifiers
    pub final_amount: f64,
    /// Whether the hit was a critical
    pub is_crit: bool,

    // === State Changes ===
    /// Damage soaked by the shield
    pub shield_absorbed: f64,
    /// Signed change applied to health (non-positive)
    pub health_delta: f64,
    /// Health before the hit
    pub health_before: f64,
    /// Health after the hit
    pub health_after: f64,

    // === Effects Applied ===
    /// Status effects applied or refreshed by this hit
    pub effects_applied: Vec<EffectIdentity>,

    // === Flags ===
    /// Whether this hit killed the target
    pub died: bool,
    /// The target was already dead; nothing happened
    pub target_was_dead: bool,
}

impl ResolutionOutcome {
    /// Create a new empty outcome
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any damage reached the shield or health
    pub fn landed(&self) -> bool {
        self.shield_absorbed > 0.0 || self.health_delta < 0.0
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        if self.target_was_dead {
            return "Target already dead".to_string();
        }

        let mut parts = Vec::new();

        if self.final_amount > 0.0 {
            parts.push(format!("{:.0} damage", self.final_amount));
        }

        if self.is_crit {
            parts.push("CRIT".to_string());
        }

        if self.shield_absorbed > 0.0 {
            parts.push(format!("{:.0} absorbed by shield", self.shield_absorbed));
        }

        if !self.effects_applied.is_empty() {
            let names: Vec<String> = self.effects_applied.iter().map(|e| e.to_string()).collect();
            parts.push(format!("applied {}", names.join(", ")));
        }

        if self.died {
            parts.push("FATAL".to_string());
        }

        if parts.is_empty() {
            "No damage".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Result of advancing one combatant by a frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Shield restored this frame
    pub shield_recharged: f64,
    /// Status lifecycle events in order
    pub status_events: Vec<StatusEvent>,
    /// One outcome per resolved periodic hit
    pub periodic_hits: Vec<ResolutionOutcome>,
    /// The target died during this frame
    pub died: bool,
}

impl TickOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total damage dealt by periodic hits this frame
    pub fn periodic_damage(&self) -> f64 {
        self.periodic_hits.iter().map(|h| h.final_amount).sum()
    }

    /// Identities that expired this frame
    pub fn expired(&self) -> impl Iterator<Item = &EffectIdentity> {
        self.status_events.iter().filter_map(|e| match e {
            StatusEvent::Removed { identity, .. } => Some(identity),
            _ => None,
        })
    }
}
