//! Sensor adapters and hardware initialisation helpers.

pub mod hcsr04;
pub mod hw_init;
pub mod thermistor;
