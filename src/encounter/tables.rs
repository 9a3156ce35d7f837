//! Weighted encounter tables

use serde::{Deserialize, Serialize};

use crate::core::dice::Dice;
use crate::core::error::{EngineError, Result};

/// One possible battle composition for an area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterData {
    pub id: String,
    /// Enemy kinds the spawner may instantiate for this encounter
    pub enemy_kinds: Vec<String>,
    pub min_enemies: u32,
    pub max_enemies: u32,
    /// Relative frequency; higher is more common
    pub weight: f32,
}

impl EncounterData {
    pub fn new(id: impl Into<String>, enemy_kinds: Vec<String>, weight: f32) -> Self {
        Self {
            id: id.into(),
            enemy_kinds,
            min_enemies: 1,
            max_enemies: 4,
            weight,
        }
    }

    pub fn with_count(mut self, min_enemies: u32, max_enemies: u32) -> Self {
        self.min_enemies = min_enemies;
        self.max_enemies = max_enemies;
        self
    }

    /// Author-time validation; the weighted draw tolerates whatever it is
    /// handed at runtime.
    pub fn validate(&self) -> Result<()> {
        if self.weight <= 0.0 {
            return Err(EngineError::NonPositiveWeight {
                id: self.id.clone(),
                weight: self.weight,
            });
        }
        if self.enemy_kinds.is_empty() {
            return Err(EngineError::NoEnemyKinds {
                id: self.id.clone(),
            });
        }
        if self.min_enemies > self.max_enemies {
            return Err(EngineError::InvalidEnemyCount {
                id: self.id.clone(),
                min: self.min_enemies,
                max: self.max_enemies,
            });
        }
        Ok(())
    }
}

/// Weighted pick over an area table.
///
/// Draws uniformly in `[0, total_weight]` and walks the table until the
/// cumulative weight covers the draw. The last entry backstops float
/// rounding at the boundary. Empty tables yield `None`.
pub fn select_random_encounter<'a>(
    encounters: &'a [EncounterData],
    dice: &mut impl Dice,
) -> Option<&'a EncounterData> {
    if encounters.is_empty() {
        return None;
    }

    let total_weight: f32 = encounters.iter().map(|e| e.weight).sum();
    if total_weight <= 0.0 {
        return encounters.last();
    }
    let draw = dice.between(0.0, total_weight);

    let mut cumulative = 0.0;
    for encounter in encounters {
        cumulative += encounter.weight;
        if draw <= cumulative {
            return Some(encounter);
        }
    }

    encounters.last()
}
