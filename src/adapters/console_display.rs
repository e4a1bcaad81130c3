//! Log-backed display adapter.
//!
//! Implements [`DisplaySurface`] by writing each row to the logger
//! (UART / USB-CDC in production, stdout on the host). The OLED glyph
//! driver is an external component fed through the same trait; this
//! adapter keeps the firmware fully observable without one attached.

use log::info;

use crate::ports::DisplaySurface;

/// Adapter that mirrors every display row to the serial console.
pub struct ConsoleDisplay;

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for ConsoleDisplay {
    fn write_line(&mut self, row: u8, text: &str, _clear_first: bool) {
        info!("display[{row}] {text}");
    }

    fn clear_line(&mut self, row: u8) {
        info!("display[{row}]");
    }
}
