//! Water-tank management firmware for an ESP32-class board.
//!
//! Keeps a tank filled and warm: an HC-SR04 ultrasonic sensor over the
//! water surface drives a fill pump, an NTC thermistor drives a heater,
//! and three panel buttons adjust the two bang-bang thresholds on a
//! text display.
//!
//! The crate is split along a ports-and-adapters seam so the control
//! logic compiles and tests on the host:
//!
//! - [`ports`] — the trait seams (distance sensor, temperature probe,
//!   actuators, display surface)
//! - [`level`], [`thermal`] — pure bang-bang controllers
//! - [`buttons`] — ISR-side debounce latches
//! - [`state`], [`render`] — shared state and the 8-row status screen
//! - [`tasks`] — the five control loops tying it all together
//! - [`drivers`], [`adapters`] — the ESP-IDF-backed implementations
//!   (simulated on non-espidf targets)

#![deny(unused_must_use)]

pub mod adapters;
pub mod buttons;
pub mod config;
pub mod drivers;
pub mod error;
pub mod level;
pub mod pins;
pub mod ports;
pub mod render;
pub mod state;
pub mod tasks;
pub mod thermal;

pub use error::{Error, Result};
