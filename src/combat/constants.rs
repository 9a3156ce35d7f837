//! Combat tunables in one place

/// Base power of the universal weapon strike
pub const BASIC_ATTACK_POWER: i32 = 30;

/// Hit chance of the universal weapon strike, in percent
pub const BASIC_ATTACK_ACCURACY: f32 = 90.0;

/// Flat critical-hit chance in percent. Scaling this with Luck is a
/// planned refinement; the stat is already on `CharacterStats`.
pub const BASE_CRIT_CHANCE: f32 = 5.0;

/// Criticals multiply the affinity multiplier by this factor
pub const CRIT_MULTIPLIER: f32 = 1.5;

/// Random spread applied to base damage, lower bound
pub const DAMAGE_VARIANCE_MIN: f32 = 0.9;

/// Random spread applied to base damage, upper bound
pub const DAMAGE_VARIANCE_MAX: f32 = 1.1;

/// Flat chance to flee combat, in percent. Agility-based variance is a
/// planned refinement.
pub const ESCAPE_CHANCE: f32 = 50.0;
