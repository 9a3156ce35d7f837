//! Combat turn execution
//!
//! Turn flow: every party member acts in roster order, then every enemy,
//! then the turn counter advances. Enemy resolution is one synchronous
//! sweep; nothing suspends mid-action. `Animating` is a flag the UI can
//! observe while an action resolves, not a scheduling state.

use serde::{Deserialize, Serialize};

use crate::combat::constants::ESCAPE_CHANCE;
use crate::combat::policy::select_action;
use crate::combat::resolution::resolve_attack;
use crate::core::dice::Dice;
use crate::core::types::{Affinity, CombatantId};
use crate::entity::combatant::Skill;
use crate::entity::store::CombatantStore;
use crate::session::events::{CombatEndState, CombatEvent, CombatEventKind};

/// Combat session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CombatState {
    #[default]
    Inactive,
    Initializing,
    PlayerTurn,
    EnemyTurn,
    /// An action is resolving; input should wait
    Animating,
    Victory,
    Defeat,
    Escaped,
}

impl From<CombatEndState> for CombatState {
    fn from(end: CombatEndState) -> Self {
        match end {
            CombatEndState::Victory => CombatState::Victory,
            CombatEndState::Defeat => CombatState::Defeat,
            CombatEndState::Escaped => CombatState::Escaped,
        }
    }
}

/// Which roster is acting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Side {
    #[default]
    Player,
    Enemy,
}

/// What the active participant does with its action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatAction {
    /// Basic weapon strike
    Attack { target: CombatantId },
    /// A skill from the actor's learned list, by id
    Skill {
        skill_id: String,
        target: CombatantId,
    },
    /// An item effect; the inventory layer supplies the skill payload
    Item { skill: Skill, target: CombatantId },
    Guard,
    Talk,
    Escape,
}

/// The single active combat session.
///
/// Holds handles into an externally-owned [`CombatantStore`]; it borrows
/// its participants and never destroys them. Downed combatants drop out of
/// the rosters, and a side losing its last roster entry ends the combat.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatSession {
    state: CombatState,
    turn_number: u32,
    party: Vec<CombatantId>,
    enemies: Vec<CombatantId>,
    /// Acting order for the current turn: all allies, then all enemies.
    /// Agility-based initiative is a planned refinement.
    turn_order: Vec<CombatantId>,
    active_index: usize,
    active_side: Side,
    log: Vec<CombatEvent>,
}

impl CombatSession {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== queries ====================

    pub fn state(&self) -> CombatState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != CombatState::Inactive
    }

    pub fn is_player_turn(&self) -> bool {
        self.state == CombatState::PlayerTurn
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn party(&self) -> &[CombatantId] {
        &self.party
    }

    pub fn enemies(&self) -> &[CombatantId] {
        &self.enemies
    }

    pub fn turn_order(&self) -> &[CombatantId] {
        &self.turn_order
    }

    /// Whoever acts next on the current side, if anyone.
    pub fn active_participant(&self) -> Option<CombatantId> {
        let roster = match self.active_side {
            Side::Player => &self.party,
            Side::Enemy => &self.enemies,
        };
        roster.get(self.active_index).copied()
    }

    /// Full event history since the session was created.
    pub fn events(&self) -> &[CombatEvent] {
        &self.log
    }

    /// Hands the accumulated events to the caller and clears the log.
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.log)
    }

    // ==================== control ====================

    /// Opens a session with the given rosters. Ignored with a warning if a
    /// session is already running.
    pub fn start_combat(&mut self, party: Vec<CombatantId>, enemies: Vec<CombatantId>) {
        if self.is_active() {
            tracing::warn!("combat already active, ignoring start request");
            return;
        }

        let turn_order: Vec<CombatantId> = party.iter().chain(enemies.iter()).copied().collect();

        tracing::info!(
            party = party.len(),
            enemies = enemies.len(),
            "combat started"
        );

        self.party = party;
        self.enemies = enemies;
        self.turn_order = turn_order;
        self.turn_number = 0;
        self.active_index = 0;
        self.active_side = Side::Player;
        self.state = CombatState::Initializing;
        self.push_event(CombatEventKind::CombatStarted, "Combat started".into());

        self.next_turn();
    }

    /// Closes the session with the given end state and resets to inactive.
    pub fn end_combat(&mut self, end: CombatEndState) {
        if !self.is_active() {
            tracing::warn!(?end, "no active combat to end");
            return;
        }

        tracing::info!(?end, turn = self.turn_number, "combat ended");
        self.state = end.into();
        self.push_event(
            CombatEventKind::CombatEnded { end },
            format!("Combat ended: {end:?}"),
        );

        self.party.clear();
        self.enemies.clear();
        self.turn_order.clear();
        self.turn_number = 0;
        self.active_index = 0;
        self.state = CombatState::Inactive;
    }

    /// Starts the next turn: bumps the counter, re-checks the end
    /// conditions, and hands the initiative back to the party.
    pub fn next_turn(&mut self) {
        if !self.is_active()
            || matches!(self.state, CombatState::Victory | CombatState::Defeat)
        {
            return;
        }

        self.turn_number += 1;
        self.active_index = 0;

        self.check_combat_end();
        if !self.is_active() {
            return;
        }

        self.state = CombatState::PlayerTurn;
        self.active_side = Side::Player;
        tracing::info!(turn = self.turn_number, "player turn");
        self.push_event(
            CombatEventKind::TurnChanged {
                is_player_turn: true,
            },
            format!("Turn {}: player side acts", self.turn_number),
        );
    }

    /// Executes the active participant's action, then advances the acting
    /// order (except for escapes, which leave turn advancement to the
    /// caller).
    pub fn execute_action(
        &mut self,
        store: &mut CombatantStore,
        dice: &mut impl Dice,
        action: CombatAction,
    ) {
        if !self.is_active() {
            tracing::warn!("cannot act, no combat running");
            return;
        }
        let Some(actor) = self.active_participant() else {
            tracing::warn!(index = self.active_index, "no active participant to act");
            return;
        };

        self.state = CombatState::Animating;

        match action {
            CombatAction::Attack { target } => {
                self.resolve_and_apply(store, dice, actor, target, &Skill::basic_attack());
            }
            CombatAction::Skill { skill_id, target } => {
                let Some(skill) = store.get(actor).and_then(|c| c.skill(&skill_id)).cloned()
                else {
                    tracing::warn!(%skill_id, "actor does not know that skill");
                    self.restore_side_state();
                    return;
                };
                let paid = store
                    .get_mut(actor)
                    .map(|c| c.stats.spend_mp(skill.mp_cost))
                    .unwrap_or(false);
                if !paid {
                    tracing::warn!(%skill_id, "not enough MP");
                    self.restore_side_state();
                    return;
                }
                self.resolve_and_apply(store, dice, actor, target, &skill);
            }
            CombatAction::Item { skill, target } => {
                self.resolve_and_apply(store, dice, actor, target, &skill);
            }
            CombatAction::Guard => {
                let name = combatant_name(store, actor);
                self.push_event(
                    CombatEventKind::GuardRaised { id: actor },
                    format!("{name} guards"),
                );
            }
            CombatAction::Talk => {
                let name = combatant_name(store, actor);
                self.push_event(
                    CombatEventKind::TalkAttempted { id: actor },
                    format!("{name} tries to negotiate"),
                );
            }
            CombatAction::Escape => {
                self.try_escape(dice);
                return;
            }
        }

        if !self.is_active() {
            return;
        }
        self.advance_acting_order(store, dice);
    }

    /// Rolls for escape. Success ends the session; failure leaves the
    /// session running and the caller responsible for advancing the turn.
    pub fn try_escape(&mut self, dice: &mut impl Dice) -> bool {
        if !self.is_active() {
            tracing::warn!("cannot escape, no combat running");
            return false;
        }

        let roll = dice.percent();
        if roll < ESCAPE_CHANCE {
            tracing::info!(roll, "escape succeeded");
            self.push_event(
                CombatEventKind::EscapeAttempted { success: true },
                "Escaped from combat".into(),
            );
            self.end_combat(CombatEndState::Escaped);
            true
        } else {
            tracing::info!(roll, "escape failed");
            self.push_event(
                CombatEventKind::EscapeAttempted { success: false },
                "Escape failed".into(),
            );
            self.restore_side_state();
            false
        }
    }

    /// Drops a participant's handle from the rosters without touching the
    /// store. Scripted deaths, recruitments, and negotiations use this;
    /// the emptied-roster end conditions pick the change up on the next
    /// check.
    pub fn remove_participant(&mut self, id: CombatantId) {
        self.remove_from_rosters(id);
    }

    /// Ends the combat if either roster has emptied.
    pub fn check_combat_end(&mut self) {
        if !self.is_active() {
            return;
        }
        if self.enemies.is_empty() {
            self.end_combat(CombatEndState::Victory);
        } else if self.party.is_empty() {
            self.end_combat(CombatEndState::Defeat);
        }
    }

    // ==================== internals ====================

    /// One synchronous sweep: every enemy still standing picks a skill via
    /// the action policy and unloads on a random party member, then the
    /// next turn begins.
    fn process_enemy_turn(&mut self, store: &mut CombatantStore, dice: &mut impl Dice) {
        tracing::info!(turn = self.turn_number, "enemy turn");

        let order = self.enemies.clone();
        for enemy_id in order {
            if !self.is_active() {
                return;
            }
            // Downed mid-sweep (a repelled hit, a drained ally) means no action.
            let Some(position) = self.enemies.iter().position(|id| *id == enemy_id) else {
                continue;
            };
            if self.party.is_empty() {
                break;
            }

            self.active_index = position;
            let Some(enemy) = store.get(enemy_id) else {
                tracing::warn!(?enemy_id, "enemy handle points at nothing");
                continue;
            };
            let skill = select_action(enemy, dice);
            if skill.mp_cost > 0 {
                if let Some(enemy) = store.get_mut(enemy_id) {
                    enemy.stats.spend_mp(skill.mp_cost);
                }
            }

            let target = self.party[dice.index(self.party.len())];
            self.resolve_and_apply(store, dice, enemy_id, target, &skill);
        }

        if self.is_active() {
            self.next_turn();
        }
    }

    /// Resolves a skill against its target (or the whole opposing side for
    /// sweep skills) and applies damage, healing, or reflection.
    fn resolve_and_apply(
        &mut self,
        store: &mut CombatantStore,
        dice: &mut impl Dice,
        actor_id: CombatantId,
        target_id: CombatantId,
        skill: &Skill,
    ) {
        let Some(attacker) = store.get(actor_id) else {
            tracing::warn!(?actor_id, "actor handle points at nothing");
            return;
        };
        let attacker_stats = attacker.stats;
        let attacker_name = attacker.name.clone();

        let targets: Vec<CombatantId> = if skill.targets_all {
            self.opposing_roster(actor_id).to_vec()
        } else {
            vec![target_id]
        };

        for target_id in targets {
            if !self.is_active() {
                return;
            }
            let Some(defender) = store.get(target_id) else {
                tracing::warn!(?target_id, "target handle points at nothing");
                continue;
            };
            let defender_name = defender.name.clone();

            let result = resolve_attack(
                &attacker_stats,
                &defender.stats,
                &defender.affinities,
                skill,
                dice,
            );

            let description = if result.hit {
                format!(
                    "{attacker_name} hits {defender_name} with {} for {}{}",
                    skill.display_name,
                    result.damage,
                    if result.critical { " (critical)" } else { "" },
                )
            } else {
                format!("{attacker_name} misses {defender_name}")
            };
            self.push_event(
                CombatEventKind::DamageDealt {
                    target: target_id,
                    result,
                },
                description,
            );

            if result.hit {
                match result.affinity {
                    Affinity::Null => {}
                    Affinity::Drain => {
                        if let Some(defender) = store.get_mut(target_id) {
                            defender.stats.heal(result.damage);
                        }
                    }
                    Affinity::Repel => {
                        self.apply_damage(store, actor_id, result.damage);
                    }
                    _ => {
                        self.apply_damage(store, target_id, result.damage);
                    }
                }
            }

            self.check_combat_end();
        }
    }

    /// Subtracts HP and, when that downs the combatant, drops its handle
    /// from the rosters (the store entry survives; the session only
    /// borrows).
    fn apply_damage(&mut self, store: &mut CombatantStore, id: CombatantId, amount: i32) {
        let Some(combatant) = store.get_mut(id) else {
            return;
        };
        combatant.stats.apply_damage(amount);
        if combatant.is_downed() {
            let name = combatant.name.clone();
            tracing::info!(%name, "combatant downed");
            self.push_event(
                CombatEventKind::CombatantDowned { id },
                format!("{name} is downed"),
            );
            self.remove_from_rosters(id);
        }
    }

    fn remove_from_rosters(&mut self, id: CombatantId) {
        if let Some(pos) = self.party.iter().position(|p| *p == id) {
            self.party.remove(pos);
            if self.active_side == Side::Player && pos <= self.active_index && self.active_index > 0
            {
                self.active_index -= 1;
            }
        }
        if let Some(pos) = self.enemies.iter().position(|e| *e == id) {
            self.enemies.remove(pos);
            if self.active_side == Side::Enemy && pos <= self.active_index && self.active_index > 0
            {
                self.active_index -= 1;
            }
        }
        self.turn_order.retain(|t| *t != id);
    }

    /// Moves to the next participant; rolls over to the enemy sweep when
    /// the party is done, and to the next turn when the enemies are.
    fn advance_acting_order(&mut self, store: &mut CombatantStore, dice: &mut impl Dice) {
        self.active_index += 1;

        match self.active_side {
            Side::Player if self.active_index >= self.party.len() => {
                self.state = CombatState::EnemyTurn;
                self.active_side = Side::Enemy;
                self.active_index = 0;
                self.push_event(
                    CombatEventKind::TurnChanged {
                        is_player_turn: false,
                    },
                    format!("Turn {}: enemy side acts", self.turn_number),
                );
                self.process_enemy_turn(store, dice);
            }
            Side::Enemy if self.active_index >= self.enemies.len() => {
                self.next_turn();
            }
            _ => self.restore_side_state(),
        }
    }

    /// Leaves `Animating` and shows the acting side's state again.
    fn restore_side_state(&mut self) {
        self.state = match self.active_side {
            Side::Player => CombatState::PlayerTurn,
            Side::Enemy => CombatState::EnemyTurn,
        };
    }

    fn opposing_roster(&self, actor: CombatantId) -> &[CombatantId] {
        if self.party.contains(&actor) {
            &self.enemies
        } else {
            &self.party
        }
    }

    fn push_event(&mut self, kind: CombatEventKind, description: String) {
        self.log.push(CombatEvent {
            turn: self.turn_number,
            kind,
            description,
        });
    }
}

fn combatant_name(store: &CombatantStore, id: CombatantId) -> String {
    store
        .get(id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "???".into())
}
