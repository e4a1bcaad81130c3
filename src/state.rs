//! Shared control state — thresholds, latest readings, commanded outputs.
//!
//! [`TankState`] is the single struct every loop reads from and writes
//! to, guarded by a mutex so concurrent access can never tear a value.
//! Write ownership is single-writer-per-field:
//!
//! - `water_distance_cm`, `fill_percent`, `pump_on` — level loop only
//! - `water_temperature_c`, `heater_on` — thermal loop only
//! - `temp_threshold_c`, `capacity_threshold` — adjust consumers only
//! - `mode` — change-mode consumer only
//!
//! Everything is read by every loop (the render path in particular).

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::TankConfig;

/// Which threshold the adjustment buttons currently target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Buttons adjust the temperature threshold.
    Temperature,
    /// Buttons adjust the capacity threshold.
    Distance,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Temperature => Self::Distance,
            Self::Distance => Self::Temperature,
        }
    }
}

/// The shared control state.
#[derive(Debug, Clone, Copy)]
pub struct TankState {
    /// Active configuration mode.
    pub mode: Mode,
    /// Heater engages below this temperature (°C).
    pub temp_threshold_c: f32,
    /// Pump engages below this fill percentage (%).
    pub capacity_threshold: u8,
    /// Last accepted distance reading (cm).
    pub water_distance_cm: f32,
    /// Fill percentage derived from the last accepted distance.
    pub fill_percent: f32,
    /// Last accepted temperature reading (°C).
    pub water_temperature_c: f32,
    /// Last commanded pump level (active-high).
    pub pump_on: bool,
    /// Last commanded heater level (active-high).
    pub heater_on: bool,
}

impl TankState {
    pub fn new(config: &TankConfig) -> Self {
        Self {
            mode: Mode::Distance,
            temp_threshold_c: config.initial_temp_threshold_c,
            capacity_threshold: config.initial_capacity_threshold,
            water_distance_cm: 0.0,
            fill_percent: 0.0,
            water_temperature_c: 0.0,
            pump_on: false,
            heater_on: false,
        }
    }

    /// Step the mode-selected threshold up. Soft clamp: if the step
    /// would leave the inclusive range, nothing changes and `false` is
    /// returned (no wraparound, no saturating partial step).
    pub fn increment(&mut self, config: &TankConfig) -> bool {
        match self.mode {
            Mode::Temperature => {
                let next = self.temp_threshold_c + config.temp_threshold_step_c;
                if next > config.temp_threshold_max_c {
                    return false;
                }
                self.temp_threshold_c = next;
                true
            }
            Mode::Distance => {
                let next = self.capacity_threshold.saturating_add(config.capacity_threshold_step);
                if next > config.capacity_threshold_max {
                    return false;
                }
                self.capacity_threshold = next;
                true
            }
        }
    }

    /// Step the mode-selected threshold down. Same soft-clamp contract
    /// as [`increment`](Self::increment).
    pub fn decrement(&mut self, config: &TankConfig) -> bool {
        match self.mode {
            Mode::Temperature => {
                let next = self.temp_threshold_c - config.temp_threshold_step_c;
                if next < config.temp_threshold_min_c {
                    return false;
                }
                self.temp_threshold_c = next;
                true
            }
            Mode::Distance => {
                let Some(next) = self.capacity_threshold.checked_sub(config.capacity_threshold_step)
                else {
                    return false;
                };
                if next < config.capacity_threshold_min {
                    return false;
                }
                self.capacity_threshold = next;
                true
            }
        }
    }

    /// Flip the active mode, returning the new value.
    pub fn toggle_mode(&mut self) -> Mode {
        self.mode = self.mode.toggled();
        self.mode
    }
}

/// Cheaply clonable handle to the mutex-guarded [`TankState`].
#[derive(Clone)]
pub struct SharedState(Arc<Mutex<TankState>>);

impl SharedState {
    pub fn new(config: &TankConfig) -> Self {
        Self(Arc::new(Mutex::new(TankState::new(config))))
    }

    /// Lock the state. A poisoned lock is recovered rather than
    /// propagated — the state is plain-old-data and stays usable even
    /// if another loop panicked mid-update.
    pub fn lock(&self) -> MutexGuard<'_, TankState> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy out the current state for rendering.
    pub fn snapshot(&self) -> TankState {
        *self.lock()
    }
}
