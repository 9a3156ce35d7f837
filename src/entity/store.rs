//! Externally-owned combatant storage

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::types::CombatantId;
use crate::entity::combatant::Combatant;

/// Owns every live combatant and hands out id handles.
///
/// Sessions and spawners never own combatants; they borrow handles into
/// this store. Removing an entry is the only way a combatant dies for good.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatantStore {
    combatants: HashMap<CombatantId, Combatant>,
}

impl CombatantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of a combatant and returns its handle.
    pub fn insert(&mut self, combatant: Combatant) -> CombatantId {
        let id = CombatantId::new();
        self.combatants.insert(id, combatant);
        id
    }

    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.get(&id)
    }

    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.get_mut(&id)
    }

    /// Destroys a combatant. Callers holding the handle elsewhere are
    /// responsible for dropping it.
    pub fn remove(&mut self, id: CombatantId) -> Option<Combatant> {
        self.combatants.remove(&id)
    }

    pub fn contains(&self, id: CombatantId) -> bool {
        self.combatants.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CombatantId, &Combatant)> {
        self.combatants.iter().map(|(id, c)| (*id, c))
    }
}
