use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("encounter pacing invalid: max_steps ({max_steps}) must exceed min_steps ({min_steps})")]
    InvalidEncounterPacing { min_steps: u32, max_steps: u32 },

    #[error("encounter rate out of range [0, 100]: {0}")]
    EncounterRateOutOfRange(f32),

    #[error("encounter rate multiplier must be non-negative: {0}")]
    NegativeRateMultiplier(f32),

    #[error("encounter '{id}' has non-positive weight: {weight}")]
    NonPositiveWeight { id: String, weight: f32 },

    #[error("encounter '{id}' has empty enemy list")]
    NoEnemyKinds { id: String },

    #[error("encounter '{id}' enemy count range inverted: {min}..{max}")]
    InvalidEnemyCount { id: String, min: u32, max: u32 },

    #[error("skill '{id}' field {field} is out of range")]
    InvalidSkill { id: String, field: &'static str },
}

pub type Result<T> = std::result::Result<T, EngineError>;
