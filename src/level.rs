//! Water-level controller: distance → fill percentage → pump decision.
//!
//! Pure compute type; the polling loop around it lives in
//! [`tasks`](crate::tasks). Bang-bang control only: the pump engages
//! while the derived fill percentage sits below the capacity threshold.
//!
//! ## Blind-spot compensation
//!
//! The transducer cannot range reliably below `near_field_cm`; readings
//! there under-report the fill, so a fixed calibration offset is added
//! before clamping. Readings implying a distance beyond the tank bottom
//! (plus margin) are physically impossible and rejected outright —
//! the pump is forced off rather than run on bad data.

use crate::config::TankConfig;

/// Outcome of evaluating one distance reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LevelDecision {
    /// Accepted reading with the derived fill percentage and pump command.
    Valid { fill_percent: f32, pump_on: bool },
    /// Implausibly far reading — discard it and fail safe (pump off).
    Spurious,
}

/// Converts distance readings into fill percentages and pump commands.
#[derive(Debug, Clone)]
pub struct LevelController {
    tank_height_cm: f32,
    near_field_cm: f32,
    near_field_offset_percent: f32,
    range_margin_cm: f32,
}

impl LevelController {
    pub fn new(config: &TankConfig) -> Self {
        Self {
            tank_height_cm: config.tank_height_cm,
            near_field_cm: config.near_field_cm,
            near_field_offset_percent: config.near_field_offset_percent,
            range_margin_cm: config.range_margin_cm,
        }
    }

    /// Longest distance the ranging adapter should wait for (cm).
    pub fn max_range_cm(&self) -> f32 {
        self.tank_height_cm + self.range_margin_cm
    }

    /// Fill percentage for a distance reading, blind-spot compensated
    /// and clamped to `[0, 100]`.
    pub fn fill_percent(&self, distance_cm: f32) -> f32 {
        let mut percent = (self.tank_height_cm - distance_cm) / self.tank_height_cm * 100.0;
        if distance_cm < self.near_field_cm {
            percent += self.near_field_offset_percent;
        }
        percent.clamp(0.0, 100.0)
    }

    /// Classify a reading and decide the pump command.
    pub fn evaluate(&self, distance_cm: f32, capacity_threshold: u8) -> LevelDecision {
        if distance_cm > self.tank_height_cm + self.range_margin_cm {
            return LevelDecision::Spurious;
        }
        let fill_percent = self.fill_percent(distance_cm);
        LevelDecision::Valid {
            fill_percent,
            pump_on: fill_percent < f32::from(capacity_threshold),
        }
    }
}
