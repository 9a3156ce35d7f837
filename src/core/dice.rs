//! Injectable randomness seam
//!
//! Every roll the engine makes goes through [`Dice`], so production code can
//! hand in a seeded or entropy-backed `rand` generator while tests script
//! exact outcomes. The blanket impl makes any `rand::Rng` a `Dice`.

use std::collections::VecDeque;

use rand::Rng;

/// Source of the engine's random draws.
pub trait Dice {
    /// Uniform roll in `[0, 100)`.
    fn percent(&mut self) -> f32;

    /// Uniform roll in `[lo, hi]`.
    fn between(&mut self, lo: f32, hi: f32) -> f32;

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize;
}

impl<R: Rng> Dice for R {
    fn percent(&mut self) -> f32 {
        self.gen_range(0.0..100.0)
    }

    fn between(&mut self, lo: f32, hi: f32) -> f32 {
        self.gen_range(lo..=hi)
    }

    fn index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Dice that replay a fixed script of rolls, for deterministic tests.
///
/// Each call pops the next scripted value and returns it verbatim (`index`
/// truncates and wraps into range). Panics when the script runs dry, which
/// in a test is exactly the failure you want to see.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<f32>,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = f32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }

    fn next_roll(&mut self) -> f32 {
        self.rolls
            .pop_front()
            .expect("scripted dice ran out of rolls")
    }
}

impl Dice for ScriptedDice {
    fn percent(&mut self) -> f32 {
        self.next_roll()
    }

    fn between(&mut self, _lo: f32, _hi: f32) -> f32 {
        self.next_roll()
    }

    fn index(&mut self, len: usize) -> usize {
        self.next_roll() as usize % len
    }
}
