//! HC-SR04 ultrasonic ranging adapter.
//!
//! A 10 µs trigger pulse starts a ranging cycle; the echo line then goes
//! high for the acoustic round-trip time. Distance is half the round
//! trip at the speed of sound. The echo wait is bounded by the caller's
//! maximum range, so a missing water surface costs at most the ranging
//! window, never a hung loop.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs the real GPIOs and times the pulse with the
//! high-resolution timer.
//! On host/test: reads an injected distance or fault from statics.

use crate::error::SensorError;
use crate::ports::DistanceSensor;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU32, AtomicU8, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// Speed of sound at room temperature, in cm per µs.
const SPEED_OF_SOUND_CM_PER_US: f32 = 0.0343;
/// Trigger pulse width (datasheet: ≥10 µs).
#[cfg(target_os = "espidf")]
const TRIGGER_PULSE_US: i64 = 10;
/// How long to wait for the echo line to rise after triggering.
#[cfg(target_os = "espidf")]
const PING_TIMEOUT_US: i64 = 10_000;
/// Slack added on top of the max-range round trip before giving up.
#[cfg(target_os = "espidf")]
const ECHO_SLACK_US: i64 = 1_000;

// ── Host-side simulation hooks ────────────────────────────────

#[cfg(not(target_os = "espidf"))]
static SIM_DISTANCE_MM: AtomicU32 = AtomicU32::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_FAULT: AtomicU8 = AtomicU8::new(0);

/// Inject a distance (meters) for host-side runs.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_distance_m(distance_m: f32) {
    SIM_DISTANCE_MM.store((distance_m * 1000.0) as u32, Ordering::Relaxed);
    SIM_FAULT.store(0, Ordering::Relaxed);
}

/// Inject a measurement fault for host-side runs.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_fault(fault: SensorError) {
    let code = match fault {
        SensorError::InvalidState => 1,
        SensorError::PingTimeout => 2,
        SensorError::EchoTimeout => 3,
        SensorError::OutOfRange => 4,
        SensorError::Other => 5,
    };
    SIM_FAULT.store(code, Ordering::Relaxed);
}

// ── Driver ────────────────────────────────────────────────────

#[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
pub struct Hcsr04 {
    trigger_gpio: i32,
    echo_gpio: i32,
}

impl Hcsr04 {
    pub fn new(trigger_gpio: i32, echo_gpio: i32) -> Self {
        Self {
            trigger_gpio,
            echo_gpio,
        }
    }
}

impl DistanceSensor for Hcsr04 {
    #[cfg(target_os = "espidf")]
    fn measure(&mut self, max_range_cm: f32) -> Result<f32, SensorError> {
        // SAFETY: esp_timer_get_time / esp_rom_delay_us are plain reads
        // and busy-waits; no shared state involved.
        let now_us = || unsafe { esp_idf_svc::sys::esp_timer_get_time() };

        // Echo must be idle before a new cycle can start.
        if hw_init::gpio_read(self.echo_gpio) {
            return Err(SensorError::InvalidState);
        }

        hw_init::gpio_write(self.trigger_gpio, true);
        unsafe { esp_idf_svc::sys::esp_rom_delay_us(TRIGGER_PULSE_US as u32) };
        hw_init::gpio_write(self.trigger_gpio, false);

        let ping_deadline = now_us() + PING_TIMEOUT_US;
        while !hw_init::gpio_read(self.echo_gpio) {
            if now_us() > ping_deadline {
                return Err(SensorError::PingTimeout);
            }
        }

        let echo_start = now_us();
        let echo_timeout = (max_range_cm * 2.0 / SPEED_OF_SOUND_CM_PER_US) as i64 + ECHO_SLACK_US;
        while hw_init::gpio_read(self.echo_gpio) {
            if now_us() - echo_start > echo_timeout {
                return Err(SensorError::EchoTimeout);
            }
        }
        let pulse_us = (now_us() - echo_start) as f32;

        let distance_cm = pulse_us * SPEED_OF_SOUND_CM_PER_US / 2.0;
        Ok(distance_cm / 100.0)
    }

    #[cfg(not(target_os = "espidf"))]
    fn measure(&mut self, _max_range_cm: f32) -> Result<f32, SensorError> {
        match SIM_FAULT.load(Ordering::Relaxed) {
            1 => Err(SensorError::InvalidState),
            2 => Err(SensorError::PingTimeout),
            3 => Err(SensorError::EchoTimeout),
            4 => Err(SensorError::OutOfRange),
            5 => Err(SensorError::Other),
            _ => Ok(SIM_DISTANCE_MM.load(Ordering::Relaxed) as f32 / 1000.0),
        }
    }
}
