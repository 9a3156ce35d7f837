//! Attack resolution
//!
//! One attack = accuracy roll, base damage with variance, affinity lookup,
//! critical roll. The result reports what happened; the caller decides how
//! to apply it (Repel sends the damage back, Drain heals the defender).

use serde::{Deserialize, Serialize};

use crate::combat::constants::{
    BASE_CRIT_CHANCE, CRIT_MULTIPLIER, DAMAGE_VARIANCE_MAX, DAMAGE_VARIANCE_MIN,
};
use crate::core::dice::Dice;
use crate::core::types::{Affinity, Element};
use crate::entity::combatant::{AffinityTable, CharacterStats, Skill};

/// Outcome of a single resolved attack
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackResult {
    pub hit: bool,
    /// Damage magnitude, never negative. For Repel this lands on the
    /// attacker, for Drain it heals the defender.
    pub damage: i32,
    pub critical: bool,
    pub affinity: Affinity,
}

impl AttackResult {
    fn miss() -> Self {
        Self {
            hit: false,
            damage: 0,
            critical: false,
            affinity: Affinity::Normal,
        }
    }
}

/// Resolves `skill` used by a combatant with `attacker` stats against a
/// defender's stats and affinity table.
pub fn resolve_attack(
    attacker: &CharacterStats,
    defender: &CharacterStats,
    defender_affinities: &AffinityTable,
    skill: &Skill,
    dice: &mut impl Dice,
) -> AttackResult {
    let hit_roll = dice.percent();
    if hit_roll > skill.accuracy {
        tracing::trace!(skill = %skill.id, hit_roll, accuracy = skill.accuracy, "attack missed");
        return AttackResult::miss();
    }

    // Physical attacks ride Strength; everything else rides Magic. Both are
    // defended by Vitality until a dedicated magic defense stat exists.
    let attack_stat = match skill.element {
        Element::Physical => attacker.strength,
        _ => attacker.magic,
    };
    let defense_stat = defender.vitality;

    let variance = dice.between(DAMAGE_VARIANCE_MIN, DAMAGE_VARIANCE_MAX);
    let swung = ((skill.base_power + attack_stat) as f32 * variance).round() as i32;
    let base_damage = (swung - defense_stat / 2).max(1);

    let affinity = defender_affinities.affinity(skill.element);
    let mut multiplier = affinity.multiplier();

    let crit_roll = dice.percent();
    let critical = crit_roll < BASE_CRIT_CHANCE;
    if critical {
        multiplier *= CRIT_MULTIPLIER;
    }

    // Null zeroes the hit outright; Repel/Drain carry their magnitude so
    // the caller can reflect or heal with it.
    let damage = match affinity {
        Affinity::Null => 0,
        _ => ((base_damage as f32 * multiplier.abs()).round() as i32).max(1),
    };

    tracing::trace!(
        skill = %skill.id,
        base_damage,
        ?affinity,
        critical,
        damage,
        "attack resolved"
    );

    AttackResult {
        hit: true,
        damage,
        critical,
        affinity,
    }
}

/// Resolves the universal weapon strike.
pub fn resolve_basic_attack(
    attacker: &CharacterStats,
    defender: &CharacterStats,
    defender_affinities: &AffinityTable,
    dice: &mut impl Dice,
) -> AttackResult {
    resolve_attack(
        attacker,
        defender,
        defender_affinities,
        &Skill::basic_attack(),
        dice,
    )
}
