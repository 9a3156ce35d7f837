//! Gloomspire - turn-based combat and random encounters for a dungeon crawler
//!
//! The engine owns the combat state machine (turn order, phase transitions,
//! victory/defeat/escape), damage resolution with elemental affinities, a
//! reactive enemy action policy, and the step-driven encounter probability
//! model that decides when a battle begins. Movement, presentation, and
//! content loading live outside; they drive the engine through the public
//! operations and consume its event logs.

pub mod combat;
pub mod core;
pub mod encounter;
pub mod entity;
pub mod session;
