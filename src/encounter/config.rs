//! Encounter pacing configuration
//!
//! The tunables that decide how often random battles interrupt
//! exploration, collected in one place with their interactions explained.

use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};

/// Pacing knobs for one area's random encounters.
///
/// The trigger chance starts at `base_rate` once `min_steps` safe steps
/// have passed and climbs linearly so that it reaches 100% at `max_steps`,
/// where an encounter is forced regardless of the roll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EncounterConfig {
    /// Chance (percent) rolled on the first step past `min_steps`.
    ///
    /// Higher values make every eligible step dangerous; at 10.0 the
    /// player usually gets a handful of free steps past the minimum.
    pub base_rate: f32,

    /// Steps after a battle during which no roll happens at all.
    ///
    /// This is the guaranteed breather: walking fewer than this many
    /// steps can never start a battle.
    pub min_steps: u32,

    /// Step count at which a battle is guaranteed.
    ///
    /// Must exceed `min_steps`; the ramp divides by the difference.
    pub max_steps: u32,

    /// Scales the rolled chance. Items and story beats set this (0.5 for
    /// repellent incense, 2.0 for cursed ground); 1.0 is neutral. The
    /// forced trigger at `max_steps` ignores it.
    pub rate_multiplier: f32,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            base_rate: 10.0,
            min_steps: 5,
            max_steps: 30,
            rate_multiplier: 1.0,
        }
    }
}

impl EncounterConfig {
    /// Author-time validation. The engine itself degrades gracefully on a
    /// bad config (it just never triggers), but content pipelines want
    /// the loud version.
    pub fn validate(&self) -> Result<()> {
        if self.max_steps <= self.min_steps {
            return Err(EngineError::InvalidEncounterPacing {
                min_steps: self.min_steps,
                max_steps: self.max_steps,
            });
        }
        if !(0.0..=100.0).contains(&self.base_rate) {
            return Err(EngineError::EncounterRateOutOfRange(self.base_rate));
        }
        if self.rate_multiplier < 0.0 {
            return Err(EngineError::NegativeRateMultiplier(self.rate_multiplier));
        }
        Ok(())
    }
}
