//! Enemy action selection
//!
//! Reactive and resource-aware, nothing more: pick any skill the enemy can
//! afford, otherwise swing the weapon.

use crate::core::dice::Dice;
use crate::entity::combatant::{Combatant, Skill};

/// Chooses the skill an acting enemy will use this turn.
///
/// Uniform pick among skills whose MP cost is affordable right now; falls
/// back to the basic attack when nothing is.
pub fn select_action(combatant: &Combatant, dice: &mut impl Dice) -> Skill {
    let usable: Vec<&Skill> = combatant
        .skills
        .iter()
        .filter(|skill| skill.mp_cost <= combatant.stats.current_mp)
        .collect();

    if usable.is_empty() {
        return Skill::basic_attack();
    }

    usable[dice.index(usable.len())].clone()
}
