//! Hardware actuator adapter — bridges the relay GPIOs to [`ActuatorPort`].
//!
//! Dumb output stage: polarity is active-high (logic 1 energises the
//! relay) and the decision logic lives entirely in the controllers.
//! On non-espidf targets the GPIO helpers are no-ops and only the
//! commanded state is tracked.

use crate::drivers::hw_init;
use crate::pins;
use crate::ports::ActuatorPort;

pub struct HardwareActuators {
    pump_on: bool,
    heater_on: bool,
}

impl HardwareActuators {
    pub fn new() -> Self {
        // Outputs were driven low during hw_init; start in sync.
        Self {
            pump_on: false,
            heater_on: false,
        }
    }

    /// Last commanded pump level.
    pub fn pump_on(&self) -> bool {
        self.pump_on
    }

    /// Last commanded heater level.
    pub fn heater_on(&self) -> bool {
        self.heater_on
    }
}

impl Default for HardwareActuators {
    fn default() -> Self {
        Self::new()
    }
}

impl ActuatorPort for HardwareActuators {
    fn set_pump(&mut self, on: bool) {
        hw_init::gpio_write(pins::PUMP_GPIO, on);
        self.pump_on = on;
    }

    fn set_heater(&mut self, on: bool) {
        hw_init::gpio_write(pins::HEATER_GPIO, on);
        self.heater_on = on;
    }

    fn all_off(&mut self) {
        self.set_pump(false);
        self.set_heater(false);
    }
}
