//! NTC thermistor temperature probe (10 kOhm @ 25 C, B = 3950).
//!
//! Wired in a voltage-divider with a fixed 10 kOhm resistor, read via
//! ADC1. The simplified Beta (Steinhart-Hart) equation converts
//! resistance to temperature. A saturated divider reads as -40 °C,
//! which the thermal controller classifies as out of physical range.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads an injected temperature from a static.

use crate::ports::TemperatureProbe;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicI32, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

const R25: f32 = 10_000.0;
const BETA: f32 = 3950.0;
const T25_K: f32 = 298.15;
const R_DIVIDER: f32 = 10_000.0;
const ADC_MAX: f32 = 4095.0;
const V_REF: f32 = 3.3;

#[cfg(not(target_os = "espidf"))]
static SIM_TEMP_MILLI_C: AtomicI32 = AtomicI32::new(25_000);

/// Inject a temperature (°C) for host-side runs.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_celsius(celsius: f32) {
    SIM_TEMP_MILLI_C.store((celsius * 1000.0) as i32, Ordering::Relaxed);
}

#[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
pub struct Thermistor {
    adc_gpio: i32,
}

impl Thermistor {
    pub fn new(adc_gpio: i32) -> Self {
        Self { adc_gpio }
    }

    fn adc_to_celsius(raw: u16) -> f32 {
        let voltage = (f32::from(raw) / ADC_MAX) * V_REF;
        if voltage <= 0.01 || voltage >= (V_REF - 0.01) {
            return -40.0;
        }
        let r_ntc = R_DIVIDER * voltage / (V_REF - voltage);
        let inv_t = (1.0 / T25_K) + (1.0 / BETA) * (r_ntc / R25).ln();
        if inv_t <= 0.0 {
            return -40.0;
        }
        (1.0 / inv_t) - 273.15
    }
}

impl TemperatureProbe for Thermistor {
    #[cfg(target_os = "espidf")]
    fn read_celsius(&mut self) -> f32 {
        Self::adc_to_celsius(hw_init::adc1_read(hw_init::ADC1_CH_TEMP))
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_celsius(&mut self) -> f32 {
        SIM_TEMP_MILLI_C.load(Ordering::Relaxed) as f32 / 1000.0
    }
}
