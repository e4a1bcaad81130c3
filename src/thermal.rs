//! Thermal controller: temperature validation and heater decision.
//!
//! Same shape as [`LevelController`](crate::level::LevelController):
//! a pure compute type driven by a polling loop in
//! [`tasks`](crate::tasks). The probe port has no fault channel, so a
//! reading outside the configured physical range *is* the fault signal.

use crate::config::TankConfig;

/// Outcome of evaluating one temperature reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThermalDecision {
    /// Accepted reading with the heater command.
    Valid { heater_on: bool },
    /// Physically implausible reading — discard, hold heater state.
    Spurious,
}

/// Validates temperature readings and decides the heater command.
#[derive(Debug, Clone)]
pub struct ThermalController {
    valid_min_c: f32,
    valid_max_c: f32,
}

impl ThermalController {
    pub fn new(config: &TankConfig) -> Self {
        Self {
            valid_min_c: config.temp_valid_min_c,
            valid_max_c: config.temp_valid_max_c,
        }
    }

    /// Classify a reading and decide the heater command.
    ///
    /// The boundary is exclusive-ON: at `temperature == threshold` the
    /// heater is commanded off.
    pub fn evaluate(&self, temperature_c: f32, threshold_c: f32) -> ThermalDecision {
        if temperature_c < self.valid_min_c || temperature_c > self.valid_max_c {
            return ThermalDecision::Spurious;
        }
        ThermalDecision::Valid {
            heater_on: temperature_c < threshold_c,
        }
    }
}
