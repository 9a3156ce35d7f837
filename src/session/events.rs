//! Typed combat events for the presentation layer

use serde::{Deserialize, Serialize};

use crate::combat::resolution::AttackResult;
use crate::core::types::CombatantId;

/// How a finished combat ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEndState {
    Victory,
    Defeat,
    Escaped,
}

/// One entry in the session's event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatEvent {
    /// Turn number the event happened on
    pub turn: u32,
    pub kind: CombatEventKind,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEventKind {
    CombatStarted,
    CombatEnded { end: CombatEndState },
    TurnChanged { is_player_turn: bool },
    DamageDealt { target: CombatantId, result: AttackResult },
    CombatantDowned { id: CombatantId },
    EscapeAttempted { success: bool },
    GuardRaised { id: CombatantId },
    TalkAttempted { id: CombatantId },
}
