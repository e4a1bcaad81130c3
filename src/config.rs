//! System configuration parameters
//!
//! All tunable parameters for the TankGuard unit: tank-calibration
//! geometry, sensor validity margins, threshold bounds/steps, and loop
//! timing. These are board- and reservoir-specific; adjust them here
//! when the unit is fitted to a different tank. Settings are not
//! persisted across restarts.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankConfig {
    // --- Tank geometry / level calibration ---
    /// Distance from the ultrasonic emitter to the tank bottom (cm).
    pub tank_height_cm: f32,
    /// Readings below this distance fall in the sensor blind spot (cm).
    pub near_field_cm: f32,
    /// Fill-percent compensation added for blind-spot readings.
    pub near_field_offset_percent: f32,
    /// Readings beyond `tank_height_cm + range_margin_cm` are spurious.
    pub range_margin_cm: f32,

    // --- Temperature validity ---
    /// Lowest physically plausible water temperature (°C).
    pub temp_valid_min_c: f32,
    /// Highest physically plausible water temperature (°C).
    pub temp_valid_max_c: f32,

    // --- Threshold bounds and steps ---
    /// Temperature threshold adjustment range (°C, inclusive).
    pub temp_threshold_min_c: f32,
    pub temp_threshold_max_c: f32,
    /// Temperature threshold step per button press (°C).
    pub temp_threshold_step_c: f32,
    /// Capacity threshold adjustment range (%, inclusive).
    pub capacity_threshold_min: u8,
    pub capacity_threshold_max: u8,
    /// Capacity threshold step per button press (%).
    pub capacity_threshold_step: u8,

    // --- Initial settings ---
    /// Temperature threshold at power-on (°C).
    pub initial_temp_threshold_c: f32,
    /// Capacity threshold at power-on (%).
    pub initial_capacity_threshold: u8,

    // --- Timing ---
    /// Sensor polling interval for both controllers (milliseconds).
    pub sensor_poll_interval_ms: u32,
    /// Button consumer polling interval (milliseconds).
    pub button_poll_interval_ms: u32,
    /// Minimum spacing between accepted button edges (milliseconds).
    pub debounce_window_ms: u32,
}

impl Default for TankConfig {
    fn default() -> Self {
        Self {
            // Tank geometry
            tank_height_cm: 13.5,
            near_field_cm: 3.5,
            near_field_offset_percent: 25.0,
            range_margin_cm: 10.0,

            // Temperature validity
            temp_valid_min_c: -10.0,
            temp_valid_max_c: 50.0,

            // Threshold bounds and steps
            temp_threshold_min_c: 10.0,
            temp_threshold_max_c: 50.0,
            temp_threshold_step_c: 1.0,
            capacity_threshold_min: 10,
            capacity_threshold_max: 100,
            capacity_threshold_step: 5,

            // Initial settings
            initial_temp_threshold_c: 10.0,
            initial_capacity_threshold: 10,

            // Timing
            sensor_poll_interval_ms: 2000, // 0.5 Hz per controller
            button_poll_interval_ms: 50,   // 20 Hz consumer polls
            debounce_window_ms: 200,
        }
    }
}
