//! Combatant stats, affinities, and skills

use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};
use crate::core::types::{Affinity, Element};

/// Base statistics for a party member or enemy.
///
/// Mutations go through the methods below, which keep HP and MP inside
/// `0..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterStats {
    pub level: i32,
    pub max_hp: i32,
    pub current_hp: i32,
    pub max_mp: i32,
    pub current_mp: i32,
    /// Physical damage
    pub strength: i32,
    /// Magical damage
    pub magic: i32,
    /// Physical defense
    pub vitality: i32,
    /// Speed and evasion
    pub agility: i32,
    /// Criticals and drops
    pub luck: i32,
}

impl Default for CharacterStats {
    fn default() -> Self {
        Self {
            level: 1,
            max_hp: 100,
            current_hp: 100,
            max_mp: 50,
            current_mp: 50,
            strength: 10,
            magic: 10,
            vitality: 10,
            agility: 10,
            luck: 10,
        }
    }
}

impl CharacterStats {
    /// Subtracts HP, clamped at zero. Returns the HP actually lost.
    pub fn apply_damage(&mut self, amount: i32) -> i32 {
        let dealt = amount.max(0).min(self.current_hp);
        self.current_hp -= dealt;
        dealt
    }

    /// Restores HP, clamped at `max_hp`. Returns the HP actually recovered.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let recovered = amount.max(0).min(self.max_hp - self.current_hp);
        self.current_hp += recovered;
        recovered
    }

    /// Pays an MP cost if affordable. Returns false (and spends nothing)
    /// when current MP is short.
    pub fn spend_mp(&mut self, cost: i32) -> bool {
        if cost > self.current_mp {
            return false;
        }
        self.current_mp -= cost.max(0);
        true
    }

    /// Restores MP, clamped at `max_mp`.
    pub fn restore_mp(&mut self, amount: i32) {
        self.current_mp = (self.current_mp + amount.max(0)).min(self.max_mp);
    }

    pub fn is_downed(&self) -> bool {
        self.current_hp <= 0
    }
}

/// Per-element damage reception for one combatant.
///
/// Elements left at the default receive Normal damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AffinityTable {
    pub physical: Affinity,
    pub fire: Affinity,
    pub ice: Affinity,
    pub electric: Affinity,
    pub wind: Affinity,
    pub light: Affinity,
    pub dark: Affinity,
}

impl AffinityTable {
    /// Affinity for a specific element.
    pub fn affinity(&self, element: Element) -> Affinity {
        match element {
            Element::Physical => self.physical,
            Element::Fire => self.fire,
            Element::Ice => self.ice,
            Element::Electric => self.electric,
            Element::Wind => self.wind,
            Element::Light => self.light,
            Element::Dark => self.dark,
        }
    }

    /// Builder-style override for one element.
    pub fn with(mut self, element: Element, affinity: Affinity) -> Self {
        match element {
            Element::Physical => self.physical = affinity,
            Element::Fire => self.fire = affinity,
            Element::Ice => self.ice = affinity,
            Element::Electric => self.electric = affinity,
            Element::Wind => self.wind = affinity,
            Element::Light => self.light = affinity,
            Element::Dark => self.dark = affinity,
        }
        self
    }
}

/// A skill, spell, or item effect that resolves through the damage model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub display_name: String,
    pub element: Element,
    pub base_power: i32,
    pub mp_cost: i32,
    /// Hit chance in percent (0-100)
    pub accuracy: f32,
    /// True when the skill hits the whole opposing side
    pub targets_all: bool,
}

impl Default for Skill {
    fn default() -> Self {
        Self {
            id: String::new(),
            display_name: String::new(),
            element: Element::Physical,
            base_power: 50,
            mp_cost: 5,
            accuracy: 95.0,
            targets_all: false,
        }
    }
}

impl Skill {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, element: Element) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            element,
            ..Self::default()
        }
    }

    /// The universal weapon strike every combatant can fall back on.
    pub fn basic_attack() -> Self {
        Self {
            id: "attack".into(),
            display_name: "Attack".into(),
            element: Element::Physical,
            base_power: crate::combat::constants::BASIC_ATTACK_POWER,
            mp_cost: 0,
            accuracy: crate::combat::constants::BASIC_ATTACK_ACCURACY,
            targets_all: false,
        }
    }

    pub fn with_power(mut self, base_power: i32) -> Self {
        self.base_power = base_power;
        self
    }

    pub fn with_mp_cost(mut self, mp_cost: i32) -> Self {
        self.mp_cost = mp_cost;
        self
    }

    pub fn with_accuracy(mut self, accuracy: f32) -> Self {
        self.accuracy = accuracy;
        self
    }

    /// Author-time sanity check; the damage model itself accepts whatever
    /// it is given.
    pub fn validate(&self) -> Result<()> {
        if self.base_power < 0 {
            return Err(EngineError::InvalidSkill {
                id: self.id.clone(),
                field: "base_power",
            });
        }
        if self.mp_cost < 0 {
            return Err(EngineError::InvalidSkill {
                id: self.id.clone(),
                field: "mp_cost",
            });
        }
        if !(0.0..=100.0).contains(&self.accuracy) {
            return Err(EngineError::InvalidSkill {
                id: self.id.clone(),
                field: "accuracy",
            });
        }
        Ok(())
    }
}

/// A participant in combat: identity, stats, affinities, and skills.
///
/// Pure data. Damage resolution and action selection live in `combat`;
/// ownership lives in [`super::CombatantStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub stats: CharacterStats,
    pub affinities: AffinityTable,
    pub skills: Vec<Skill>,
}

impl Combatant {
    pub fn new(name: impl Into<String>, stats: CharacterStats) -> Self {
        Self {
            name: name.into(),
            stats,
            affinities: AffinityTable::default(),
            skills: Vec::new(),
        }
    }

    pub fn with_affinities(mut self, affinities: AffinityTable) -> Self {
        self.affinities = affinities;
        self
    }

    pub fn with_skills(mut self, skills: Vec<Skill>) -> Self {
        self.skills = skills;
        self
    }

    pub fn is_downed(&self) -> bool {
        self.stats.is_downed()
    }

    /// Skill lookup by id.
    pub fn skill(&self, id: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.id == id)
    }
}
