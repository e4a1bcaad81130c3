//! GPIO pin assignments for the TankGuard main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Ultrasonic ranging (HC-SR04)
// ---------------------------------------------------------------------------

/// Digital output: 10 µs trigger pulse starts a ranging cycle.
pub const TRIGGER_GPIO: i32 = 13;
/// Digital input: echo pulse width encodes the round-trip time.
pub const ECHO_GPIO: i32 = 35;

// ---------------------------------------------------------------------------
// Temperature probe (NTC thermistor, voltage divider into ADC1)
// ---------------------------------------------------------------------------

/// ADC1 channel 4 (GPIO 32 on the classic ESP32).
pub const TEMP_ADC_GPIO: i32 = 32;

// ---------------------------------------------------------------------------
// Actuators — active HIGH: logic 1 energises the output
// ---------------------------------------------------------------------------

/// Relay driving the refill pump.
pub const PUMP_GPIO: i32 = 10;
/// Relay driving the heating element.
pub const HEATER_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// Buttons (active-low momentary switches with pull-up, falling-edge ISR)
// ---------------------------------------------------------------------------

/// Decrease the threshold selected by the active mode.
pub const BTN_DECREASE_GPIO: i32 = 14;
/// Increase the threshold selected by the active mode.
pub const BTN_INCREMENT_GPIO: i32 = 26;
/// Toggle between temperature and distance configuration modes.
pub const BTN_CHANGE_MODE_GPIO: i32 = 27;

// ---------------------------------------------------------------------------
// I²C bus (OLED text display)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;
