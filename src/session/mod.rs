//! Combat session state machine
//!
//! Exactly one session runs at a time. It borrows party and enemy handles
//! from the combatant store, walks the player side then the enemy side
//! through each turn, applies resolved damage, and records typed events
//! for the presentation layer to drain.

pub mod events;
pub mod execution;

pub use events::{CombatEndState, CombatEvent, CombatEventKind};
pub use execution::{CombatAction, CombatSession, CombatState, Side};
