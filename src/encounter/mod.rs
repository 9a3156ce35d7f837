//! Random encounter probability engine
//!
//! Exploration calls [`EncounterEngine::check_for_encounter`] once per
//! discrete movement step. The engine tracks steps since the last battle,
//! ramps the trigger chance between a minimum and a guaranteed maximum,
//! and picks a weighted composition from the current area's table. An
//! external spawner turns the selected [`EncounterData`] into combatants.

pub mod config;
pub mod engine;
pub mod tables;

pub use config::EncounterConfig;
pub use engine::{EncounterEngine, EncounterEvent, EncounterEventKind};
pub use tables::{select_random_encounter, EncounterData};
