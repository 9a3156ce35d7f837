//! Step-driven encounter engine

use serde::{Deserialize, Serialize};

use crate::core::dice::Dice;
use crate::encounter::config::EncounterConfig;
use crate::encounter::tables::{select_random_encounter, EncounterData};

/// One entry in the encounter engine's event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterEvent {
    pub kind: EncounterEventKind,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EncounterEventKind {
    EncounterTriggered { data: EncounterData },
    EncountersDisabled { duration: Option<f32> },
    EncountersEnabled,
}

/// Decides when a random battle starts and which composition it uses.
///
/// Call [`check_for_encounter`](Self::check_for_encounter) once per
/// discrete movement step and [`update`](Self::update) with elapsed time
/// so a timed disable can lapse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterEngine {
    pub config: EncounterConfig,
    enabled: bool,
    steps_since_last: u32,
    area_encounters: Vec<EncounterData>,
    /// Seconds until encounters switch back on; None means no pending
    /// re-enable (either enabled, or disabled until told otherwise).
    reenable_in: Option<f32>,
    log: Vec<EncounterEvent>,
}

impl Default for EncounterEngine {
    fn default() -> Self {
        Self::new(EncounterConfig::default())
    }
}

impl EncounterEngine {
    pub fn new(config: EncounterConfig) -> Self {
        Self {
            config,
            enabled: true,
            steps_since_last: 0,
            area_encounters: Vec::new(),
            reenable_in: None,
            log: Vec::new(),
        }
    }

    // ==================== queries ====================

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn steps_since_last(&self) -> u32 {
        self.steps_since_last
    }

    pub fn area_encounters(&self) -> &[EncounterData] {
        &self.area_encounters
    }

    pub fn events(&self) -> &[EncounterEvent] {
        &self.log
    }

    pub fn drain_events(&mut self) -> Vec<EncounterEvent> {
        std::mem::take(&mut self.log)
    }

    // ==================== stepping ====================

    /// Registers one movement step and rolls for an encounter.
    ///
    /// Returns the selected composition when a battle should start. No
    /// roll happens inside the post-battle breather, and a battle is
    /// guaranteed once the step counter reaches the configured maximum.
    /// A misconfigured step window disables the ramp rather than
    /// crashing, so encounters simply never fire.
    pub fn check_for_encounter(&mut self, dice: &mut impl Dice) -> Option<EncounterData> {
        if !self.enabled || self.area_encounters.is_empty() {
            return None;
        }
        if self.config.max_steps <= self.config.min_steps {
            tracing::trace!("step window is empty, encounters cannot ramp");
            return None;
        }

        self.steps_since_last += 1;

        if self.steps_since_last < self.config.min_steps {
            return None;
        }

        let chance = self.current_chance();
        let roll = dice.percent();
        tracing::trace!(
            steps = self.steps_since_last,
            chance,
            roll,
            "encounter check"
        );

        if roll < chance || self.steps_since_last >= self.config.max_steps {
            return self.force_encounter(dice);
        }

        None
    }

    /// Trigger chance for the current step count.
    pub fn current_chance(&self) -> f32 {
        let steps_over = self.steps_since_last.saturating_sub(self.config.min_steps);
        let window = (self.config.max_steps - self.config.min_steps) as f32;
        let increment_per_step = (100.0 - self.config.base_rate) / window;

        let ramped = self.config.base_rate + steps_over as f32 * increment_per_step;
        ramped.clamp(0.0, 100.0) * self.config.rate_multiplier
    }

    /// Starts an encounter right now, bypassing the step roll.
    pub fn force_encounter(&mut self, dice: &mut impl Dice) -> Option<EncounterData> {
        let Some(selected) = select_random_encounter(&self.area_encounters, dice).cloned() else {
            tracing::warn!("no encounters configured for this area");
            return None;
        };

        tracing::info!(id = %selected.id, steps = self.steps_since_last, "encounter triggered");
        self.steps_since_last = 0;
        self.log.push(EncounterEvent {
            kind: EncounterEventKind::EncounterTriggered {
                data: selected.clone(),
            },
            description: format!("Encounter: {}", selected.id),
        });

        Some(selected)
    }

    /// Weighted pick from the current area table, without triggering.
    pub fn select_random_encounter(&self, dice: &mut impl Dice) -> Option<&EncounterData> {
        select_random_encounter(&self.area_encounters, dice)
    }

    // ==================== area & pacing control ====================

    pub fn set_area_encounters(&mut self, encounters: Vec<EncounterData>) {
        tracing::info!(count = encounters.len(), "area encounter table updated");
        self.area_encounters = encounters;
    }

    pub fn reset_step_counter(&mut self) {
        self.steps_since_last = 0;
    }

    /// Switches encounters off. A positive `duration` schedules them back
    /// on after that much elapsed time (fed through [`update`](Self::update));
    /// zero or negative disables until [`enable_encounters`](Self::enable_encounters).
    /// Calling again replaces any pending re-enable.
    pub fn disable_encounters(&mut self, duration: f32) {
        self.enabled = false;
        self.reenable_in = (duration > 0.0).then_some(duration);

        let scheduled = self.reenable_in;
        tracing::info!(?scheduled, "encounters disabled");
        self.log.push(EncounterEvent {
            kind: EncounterEventKind::EncountersDisabled {
                duration: scheduled,
            },
            description: match scheduled {
                Some(secs) => format!("Encounters disabled for {secs:.1}s"),
                None => "Encounters disabled".into(),
            },
        });
    }

    /// Switches encounters back on and cancels any pending re-enable.
    pub fn enable_encounters(&mut self) {
        self.enabled = true;
        self.reenable_in = None;
        tracing::info!("encounters enabled");
        self.log.push(EncounterEvent {
            kind: EncounterEventKind::EncountersEnabled,
            description: "Encounters enabled".into(),
        });
    }

    /// Advances the re-enable countdown by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if let Some(remaining) = self.reenable_in {
            let left = remaining - dt;
            if left <= 0.0 {
                self.enable_encounters();
            } else {
                self.reenable_in = Some(left);
            }
        }
    }
}
