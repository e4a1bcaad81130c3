//! Port traits — the boundary between control logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ control loops (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, the display) implement these
//! traits. The loop bodies in [`tasks`](crate::tasks) consume them via
//! generics, so the control core never touches hardware directly and the
//! whole crate is testable with mock adapters.

use crate::error::SensorError;

// ───────────────────────────────────────────────────────────────
// Sensor ports (driven adapters: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Ultrasonic ranging port.
pub trait DistanceSensor {
    /// Fire one ranging cycle and return the measured distance in
    /// **meters**. `max_range_cm` bounds the echo wait so a missing
    /// target cannot stall the caller past the ranging window.
    fn measure(&mut self, max_range_cm: f32) -> Result<f32, SensorError>;
}

/// Temperature probe port.
///
/// No fault channel: the probe always yields a number, and values
/// outside the configured physical range are the fault signal
/// (classified by [`ThermalController`](crate::thermal::ThermalController)).
pub trait TemperatureProbe {
    /// Current water temperature in °C.
    fn read_celsius(&mut self) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the two binary actuators.
///
/// Polarity convention: **active-high** — `true` energises the output.
/// (The two board revisions disagreed on this; active-high is the
/// documented convention for this firmware.)
pub trait ActuatorPort {
    /// Command the refill pump.
    fn set_pump(&mut self, on: bool);

    /// Command the heating element.
    fn set_heater(&mut self, on: bool);

    /// Kill both actuators — safe shutdown.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Display surface (driven adapter: domain → text grid)
// ───────────────────────────────────────────────────────────────

/// Number of character rows on the display surface.
pub const DISPLAY_ROWS: u8 = 8;

/// Fixed-size character-grid text output with per-line overwrite.
///
/// The glyph rendering itself (OLED page writes, fonts) lives behind
/// this trait; the control core only ever formats whole lines.
pub trait DisplaySurface {
    /// Overwrite one row. `clear_first` blanks the row before writing,
    /// for lines whose new text may be shorter than the old.
    fn write_line(&mut self, row: u8, text: &str, clear_first: bool);

    /// Blank one row.
    fn clear_line(&mut self, row: u8);
}
