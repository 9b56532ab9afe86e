//! Resolution errors

use crate::types::EntityRef;
use thiserror::Error;

/// A combatant is missing a part that resolution needs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CombatError {
    #[error("combatant '{target}' has no defense profile")]
    MissingDefenseProfile { target: EntityRef },
    #[error("combatant '{target}' has no health ledger")]
    MissingHealthLedger { target: EntityRef },
}
