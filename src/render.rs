//! Fixed-layout text rendering of the control state.
//!
//! Pure formatting: a [`TankState`] snapshot in, six lines out. Invoked
//! by every loop after a state change; serialisation across loops is the
//! caller's job (the display sits behind a mutex in `tasks`).
//!
//! Layout on the 8-row surface:
//!
//! ```text
//! row 0  Levels
//! row 1  50.00 %          ← current fill
//! row 2  21.50 C          ← current temperature
//! row 4  Settings
//! row 5  10 %   <-        ← capacity threshold (marker in distance mode)
//! row 6  10.00 C          ← temperature threshold (marker in temp mode)
//! ```

use core::fmt::Write as _;

use heapless::String;

use crate::ports::DisplaySurface;
use crate::state::{Mode, TankState};

pub const ROW_LEVELS_HEADER: u8 = 0;
pub const ROW_FILL: u8 = 1;
pub const ROW_TEMPERATURE: u8 = 2;
pub const ROW_SETTINGS_HEADER: u8 = 4;
pub const ROW_CAPACITY_THRESHOLD: u8 = 5;
pub const ROW_TEMP_THRESHOLD: u8 = 6;

/// Marker appended to the threshold row the active mode targets.
const MARKER: &str = " <-";

/// One display line, at most 16 visible columns plus slack for the marker.
type Line = String<20>;

/// Write the full layout to the display surface.
pub fn render(display: &mut impl DisplaySurface, state: &TankState) {
    display.write_line(ROW_LEVELS_HEADER, "Levels", false);

    let mut line = Line::new();
    let _ = write!(line, "{:.2} %", state.fill_percent);
    display.write_line(ROW_FILL, &line, false);

    line.clear();
    let _ = write!(line, "{:.2} C", state.water_temperature_c);
    display.write_line(ROW_TEMPERATURE, &line, false);

    display.write_line(ROW_SETTINGS_HEADER, "Settings", false);

    line.clear();
    let _ = write!(line, "{} %", state.capacity_threshold);
    if state.mode == Mode::Distance {
        let _ = line.push_str(MARKER);
    }
    display.write_line(ROW_CAPACITY_THRESHOLD, &line, false);

    line.clear();
    let _ = write!(line, "{:.2} C", state.temp_threshold_c);
    if state.mode == Mode::Temperature {
        let _ = line.push_str(MARKER);
    }
    display.write_line(ROW_TEMP_THRESHOLD, &line, false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TankConfig;

    #[derive(Default)]
    struct RecordingDisplay {
        lines: Vec<(u8, std::string::String)>,
    }

    impl DisplaySurface for RecordingDisplay {
        fn write_line(&mut self, row: u8, text: &str, _clear_first: bool) {
            self.lines.push((row, text.to_owned()));
        }

        fn clear_line(&mut self, row: u8) {
            self.lines.push((row, std::string::String::new()));
        }
    }

    impl RecordingDisplay {
        fn line(&self, row: u8) -> &str {
            self.lines
                .iter()
                .rev()
                .find(|(r, _)| *r == row)
                .map(|(_, t)| t.as_str())
                .expect("row not written")
        }
    }

    fn snapshot() -> TankState {
        let mut s = TankState::new(&TankConfig::default());
        s.fill_percent = 50.0;
        s.water_temperature_c = 21.5;
        s
    }

    #[test]
    fn layout_rows_and_values() {
        let mut d = RecordingDisplay::default();
        render(&mut d, &snapshot());
        assert_eq!(d.line(ROW_LEVELS_HEADER), "Levels");
        assert_eq!(d.line(ROW_FILL), "50.00 %");
        assert_eq!(d.line(ROW_TEMPERATURE), "21.50 C");
        assert_eq!(d.line(ROW_SETTINGS_HEADER), "Settings");
    }

    #[test]
    fn marker_follows_distance_mode() {
        let mut d = RecordingDisplay::default();
        render(&mut d, &snapshot()); // initial mode is Distance
        assert_eq!(d.line(ROW_CAPACITY_THRESHOLD), "10 % <-");
        assert_eq!(d.line(ROW_TEMP_THRESHOLD), "10.00 C");
    }

    #[test]
    fn marker_follows_temperature_mode() {
        let mut s = snapshot();
        s.toggle_mode();
        let mut d = RecordingDisplay::default();
        render(&mut d, &s);
        assert_eq!(d.line(ROW_CAPACITY_THRESHOLD), "10 %");
        assert_eq!(d.line(ROW_TEMP_THRESHOLD), "10.00 C <-");
    }

    #[test]
    fn widest_values_fit_the_line_buffer() {
        let mut s = snapshot();
        s.fill_percent = 100.0;
        s.water_temperature_c = -10.0;
        s.capacity_threshold = 100;
        s.temp_threshold_c = 50.0;
        let mut d = RecordingDisplay::default();
        render(&mut d, &s);
        assert_eq!(d.line(ROW_FILL), "100.00 %");
        assert_eq!(d.line(ROW_TEMPERATURE), "-10.00 C");
        assert_eq!(d.line(ROW_CAPACITY_THRESHOLD), "100 % <-");
    }
}
