//! Unified error types for the TankGuard firmware.
//!
//! Follows embedded best practice: a single `Error` enum that every subsystem
//! can convert into, keeping the control loops' error handling uniform.
//! All variants are `Copy` so they can be cheaply passed between loops
//! without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be read or returned out-of-range data.
    Sensor(SensorError),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Fault kinds reported by the ranging adapter.
///
/// The first three mirror the ultrasonic transducer's failure modes. The
/// controllers handle every kind identically: log, hold the actuator at
/// its last commanded state, skip the display refresh for the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Device in an unexpected state (e.g. echo line already high).
    InvalidState,
    /// No echo rise observed within the ping timeout.
    PingTimeout,
    /// Echo did not fall within the ranging window.
    EchoTimeout,
    /// Reading is outside the physically plausible range.
    OutOfRange,
    /// Unclassified device error.
    Other,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidState => write!(f, "invalid device state"),
            Self::PingTimeout => write!(f, "ping timeout"),
            Self::EchoTimeout => write!(f, "echo timeout"),
            Self::OutOfRange => write!(f, "reading out of range"),
            Self::Other => write!(f, "device error"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
