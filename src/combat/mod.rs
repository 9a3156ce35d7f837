//! Damage model and enemy action selection
//!
//! Resolution is a pure function of attacker stats, defender affinities,
//! and the skill being used; all randomness comes in through the dice seam.
//! The session applies results; nothing here touches HP.

pub mod constants;
pub mod policy;
pub mod resolution;

pub use constants::*;
pub use policy::select_action;
pub use resolution::{resolve_attack, resolve_basic_attack, AttackResult};
