//! Defense system - Resistance profiles and mitigation

mod mitigation;
mod profile;

pub use mitigation::mitigate;
pub use profile::{DefenseConfig, DefenseProfile, ElementalResistance};

/// Defense calculation constants
pub mod constants {
    /// Maximum damage resistance (1.0 = immunity)
    pub const MAX_RESISTANCE: f64 = 1.0;

    /// Maximum crit resistance, in crit-chance percentage points
    pub const MAX_CRIT_RESISTANCE: f64 = 100.0;
}
