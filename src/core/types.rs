//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for combatants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatantId(pub Uuid);

impl CombatantId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CombatantId {
    fn default() -> Self {
        Self::new()
    }
}

/// Damage element types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Physical,
    Fire,
    Ice,
    Electric,
    Wind,
    Light,
    Dark,
}

/// How a combatant receives one element of damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Affinity {
    /// Full damage
    #[default]
    Normal,
    /// Weakness, double damage
    Weak,
    /// Resistance, half damage
    Resist,
    /// No damage at all
    Null,
    /// Damage bounces back to the attacker
    Repel,
    /// Damage heals the defender instead
    Drain,
}

impl Affinity {
    /// Damage multiplier for this affinity.
    ///
    /// Negative multipliers are signals, not factors: Repel (-1.0) means the
    /// attacker eats the hit, Drain (-0.5) means the defender is healed by it.
    pub fn multiplier(self) -> f32 {
        match self {
            Affinity::Normal => 1.0,
            Affinity::Weak => 2.0,
            Affinity::Resist => 0.5,
            Affinity::Null => 0.0,
            Affinity::Repel => -1.0,
            Affinity::Drain => -0.5,
        }
    }
}
