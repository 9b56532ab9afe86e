//! Modifiers - Ordered, source-keyed adjustments folded at the point of use
//!
//! Each modifier targets one `ModifierPoint` and is owned by a source id
//! (a talent, an item, a status effect identity). Sources retract exactly
//! their own contributions with `remove_source`.

use serde::{Deserialize, Serialize};

/// Where a modifier applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierPoint {
    MovementSpeed,
    /// Mitigated damage before it reaches shield or health
    DamageTaken,
    ShieldRechargeRate,
}

/// How a modifier changes the running value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum ModifierOp {
    Add(f64),
    Multiply(f64),
}

impl ModifierOp {
    fn apply(&self, value: f64) -> f64 {
        match self {
            ModifierOp::Add(amount) => value + amount,
            ModifierOp::Multiply(factor) => value * factor,
        }
    }
}

/// A single registered modifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub source: String,
    pub point: ModifierPoint,
    pub op: ModifierOp,
}

/// Ordered list of modifiers, applied in insertion order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModifierStack {
    entries: Vec<Modifier>,
}

impl ModifierStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a modifier at the end of the stack
    pub fn push(&mut self, source: impl Into<String>, point: ModifierPoint, op: ModifierOp) {
        self.entries.push(Modifier {
            source: source.into(),
            point,
            op,
        });
    }

    /// Replace everything `source` contributes with a single modifier
    pub fn replace_source(&mut self, source: &str, point: ModifierPoint, op: ModifierOp) {
        self.remove_source(source);
        self.push(source, point, op);
    }

    /// Remove every modifier owned by `source`, returning how many were removed
    pub fn remove_source(&mut self, source: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|m| m.source != source);
        before - self.entries.len()
    }

    /// Fold every modifier for `point` over `base`
    pub fn apply(&self, point: ModifierPoint, base: f64) -> f64 {
        self.entries
            .iter()
            .filter(|m| m.point == point)
            .fold(base, |value, m| m.op.apply(value))
    }

    /// Modifiers owned by `source`
    pub fn contributions<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a Modifier> + 'a {
        self.entries.iter().filter(move |m| m.source == source)
    }

    pub fn has_point(&self, point: ModifierPoint) -> bool {
        self.entries.iter().any(|m| m.point == point)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
