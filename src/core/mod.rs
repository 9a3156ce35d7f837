pub mod dice;
pub mod error;
pub mod types;

pub use dice::{Dice, ScriptedDice};
pub use error::{EngineError, Result};
