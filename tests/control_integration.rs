//! Integration tests driving the control loop bodies end to end through
//! mock ports: scripted sensor readings in, actuator commands and
//! display writes out.

use std::collections::VecDeque;
use std::sync::Mutex;

use tankguard::buttons::ButtonLatch;
use tankguard::config::TankConfig;
use tankguard::error::SensorError;
use tankguard::level::LevelController;
use tankguard::ports::{ActuatorPort, DisplaySurface, DistanceSensor, TemperatureProbe};
use tankguard::render;
use tankguard::state::{Mode, SharedState};
use tankguard::tasks::{adjust_cycle, level_cycle, mode_cycle, thermal_cycle, Adjustment};
use tankguard::thermal::ThermalController;

// ── Mock ports ────────────────────────────────────────────────

struct ScriptedSensor {
    readings: VecDeque<Result<f32, SensorError>>,
}

impl ScriptedSensor {
    fn new(readings: &[Result<f32, SensorError>]) -> Self {
        Self {
            readings: readings.iter().copied().collect(),
        }
    }
}

impl DistanceSensor for ScriptedSensor {
    fn measure(&mut self, _max_range_cm: f32) -> Result<f32, SensorError> {
        self.readings.pop_front().unwrap_or(Err(SensorError::Other))
    }
}

struct FixedProbe(f32);

impl TemperatureProbe for FixedProbe {
    fn read_celsius(&mut self) -> f32 {
        self.0
    }
}

#[derive(Default)]
struct RecordingActuators {
    pump_commands: Vec<bool>,
    heater_commands: Vec<bool>,
}

impl ActuatorPort for RecordingActuators {
    fn set_pump(&mut self, on: bool) {
        self.pump_commands.push(on);
    }

    fn set_heater(&mut self, on: bool) {
        self.heater_commands.push(on);
    }

    fn all_off(&mut self) {
        self.set_pump(false);
        self.set_heater(false);
    }
}

#[derive(Debug, PartialEq)]
enum DisplayOp {
    Write(u8, String),
    Clear(u8),
}

#[derive(Default)]
struct RecordingDisplay {
    ops: Vec<DisplayOp>,
}

impl DisplaySurface for RecordingDisplay {
    fn write_line(&mut self, row: u8, text: &str, _clear_first: bool) {
        self.ops.push(DisplayOp::Write(row, text.to_owned()));
    }

    fn clear_line(&mut self, row: u8) {
        self.ops.push(DisplayOp::Clear(row));
    }
}

impl RecordingDisplay {
    fn last_write(&self, row: u8) -> Option<&str> {
        self.ops.iter().rev().find_map(|op| match op {
            DisplayOp::Write(r, text) if *r == row => Some(text.as_str()),
            _ => None,
        })
    }

    fn cleared(&self, row: u8) -> bool {
        self.ops.contains(&DisplayOp::Clear(row))
    }
}

fn harness() -> (TankConfig, SharedState, Mutex<RecordingDisplay>) {
    let config = TankConfig::default();
    let state = SharedState::new(&config);
    (config, state, Mutex::new(RecordingDisplay::default()))
}

// ── Level loop ────────────────────────────────────────────────

#[test]
fn half_full_tank_engages_pump_below_threshold() {
    let (config, state, display) = harness();
    state.lock().capacity_threshold = 100;

    let controller = LevelController::new(&config);
    // 0.0675 m over a 13.5 cm tank → exactly half full.
    let mut sensor = ScriptedSensor::new(&[Ok(0.0675)]);
    let mut actuators = RecordingActuators::default();

    level_cycle(&controller, &mut sensor, &mut actuators, &display, &state);

    assert_eq!(actuators.pump_commands, vec![true]);
    let snap = state.snapshot();
    assert!((snap.water_distance_cm - 6.75).abs() < 0.001);
    assert!((snap.fill_percent - 50.0).abs() < 0.01);
    assert!(snap.pump_on);

    let d = display.lock().unwrap();
    assert!(d.cleared(render::ROW_FILL));
    assert_eq!(d.last_write(render::ROW_FILL), Some("50.00 %"));
}

#[test]
fn fill_at_threshold_keeps_pump_off() {
    let (config, state, display) = harness();
    state.lock().capacity_threshold = 50;

    let controller = LevelController::new(&config);
    let mut sensor = ScriptedSensor::new(&[Ok(0.0675)]);
    let mut actuators = RecordingActuators::default();

    level_cycle(&controller, &mut sensor, &mut actuators, &display, &state);

    // fill == threshold is on target: strictly-below engages.
    assert_eq!(actuators.pump_commands, vec![false]);
    assert!(!state.snapshot().pump_on);
}

#[test]
fn spurious_reading_forces_pump_off_without_render() {
    let (config, state, display) = harness();
    {
        let mut st = state.lock();
        st.pump_on = true;
        st.water_distance_cm = 6.75;
        st.fill_percent = 50.0;
    }

    let controller = LevelController::new(&config);
    // 0.30 m is past the 23.5 cm plausibility limit.
    let mut sensor = ScriptedSensor::new(&[Ok(0.30)]);
    let mut actuators = RecordingActuators::default();

    level_cycle(&controller, &mut sensor, &mut actuators, &display, &state);

    assert_eq!(actuators.pump_commands, vec![false]);
    let snap = state.snapshot();
    assert!(!snap.pump_on);
    // The bogus reading must not replace the last good one.
    assert!((snap.water_distance_cm - 6.75).abs() < 0.001);
    assert!((snap.fill_percent - 50.0).abs() < 0.01);
    assert!(display.lock().unwrap().ops.is_empty());
}

#[test]
fn measurement_fault_holds_actuator_and_skips_render() {
    let (config, state, display) = harness();
    state.lock().pump_on = true;

    let controller = LevelController::new(&config);
    let mut sensor = ScriptedSensor::new(&[Err(SensorError::PingTimeout)]);
    let mut actuators = RecordingActuators::default();

    level_cycle(&controller, &mut sensor, &mut actuators, &display, &state);

    assert!(actuators.pump_commands.is_empty(), "fault must not recommand the pump");
    assert!(state.snapshot().pump_on, "last commanded state must hold");
    assert!(display.lock().unwrap().ops.is_empty());
}

#[test]
fn recovery_after_fault_resumes_control() {
    let (config, state, display) = harness();
    state.lock().capacity_threshold = 100;

    let controller = LevelController::new(&config);
    let mut sensor = ScriptedSensor::new(&[Err(SensorError::EchoTimeout), Ok(0.0675)]);
    let mut actuators = RecordingActuators::default();

    level_cycle(&controller, &mut sensor, &mut actuators, &display, &state);
    level_cycle(&controller, &mut sensor, &mut actuators, &display, &state);

    assert_eq!(actuators.pump_commands, vec![true]);
    assert!((state.snapshot().fill_percent - 50.0).abs() < 0.01);
}

// ── Thermal loop ──────────────────────────────────────────────

#[test]
fn cold_water_engages_heater() {
    let (config, state, display) = harness();
    let controller = ThermalController::new(&config);
    let mut probe = FixedProbe(5.0);
    let mut actuators = RecordingActuators::default();

    thermal_cycle(&controller, &mut probe, &mut actuators, &display, &state);

    assert_eq!(actuators.heater_commands, vec![true]);
    let snap = state.snapshot();
    assert!(snap.heater_on);
    assert!((snap.water_temperature_c - 5.0).abs() < f32::EPSILON);

    let d = display.lock().unwrap();
    assert!(d.cleared(render::ROW_TEMPERATURE));
    assert_eq!(d.last_write(render::ROW_TEMPERATURE), Some("5.00 C"));
}

#[test]
fn temperature_at_threshold_keeps_heater_off() {
    let (config, state, display) = harness();
    let controller = ThermalController::new(&config);
    // Threshold boots at 10.0; equal is warm enough.
    let mut probe = FixedProbe(10.0);
    let mut actuators = RecordingActuators::default();

    thermal_cycle(&controller, &mut probe, &mut actuators, &display, &state);

    assert_eq!(actuators.heater_commands, vec![false]);
    assert!(!state.snapshot().heater_on);
}

#[test]
fn implausible_temperature_is_discarded() {
    let (config, state, display) = harness();
    {
        let mut st = state.lock();
        st.heater_on = true;
        st.water_temperature_c = 8.0;
    }

    let controller = ThermalController::new(&config);
    let mut probe = FixedProbe(55.0); // past the 50 °C plausibility limit
    let mut actuators = RecordingActuators::default();

    thermal_cycle(&controller, &mut probe, &mut actuators, &display, &state);

    assert!(actuators.heater_commands.is_empty());
    let snap = state.snapshot();
    assert!(snap.heater_on, "implausible reading must not toggle the heater");
    assert!((snap.water_temperature_c - 8.0).abs() < f32::EPSILON);
    assert!(display.lock().unwrap().ops.is_empty());
}

#[test]
fn raising_the_threshold_engages_the_heater() {
    let (config, state, display) = harness();
    state.lock().toggle_mode(); // buttons now target the temperature threshold

    let controller = ThermalController::new(&config);
    let mut probe = FixedProbe(12.0);
    let mut actuators = RecordingActuators::default();

    // 12 °C against the boot threshold of 10 °C: warm enough.
    thermal_cycle(&controller, &mut probe, &mut actuators, &display, &state);
    assert_eq!(actuators.heater_commands, vec![false]);

    // Three accepted presses push the threshold to 13 °C.
    let latch = ButtonLatch::new();
    for edge_ms in [1_000, 2_000, 3_000] {
        assert!(latch.on_edge(edge_ms, config.debounce_window_ms));
        assert!(adjust_cycle(Adjustment::Increment, &latch, &config, &display, &state));
    }
    assert!((state.snapshot().temp_threshold_c - 13.0).abs() < f32::EPSILON);

    thermal_cycle(&controller, &mut probe, &mut actuators, &display, &state);
    assert_eq!(actuators.heater_commands, vec![false, true]);
}

// ── Button consumers ──────────────────────────────────────────

#[test]
fn adjust_without_pending_event_is_a_no_op() {
    let (config, state, display) = harness();
    let latch = ButtonLatch::new();

    assert!(!adjust_cycle(Adjustment::Increment, &latch, &config, &display, &state));
    assert!(display.lock().unwrap().ops.is_empty());
    assert_eq!(state.snapshot().capacity_threshold, 10);
}

#[test]
fn press_adjusts_and_refreshes_the_active_row() {
    let (config, state, display) = harness();
    let latch = ButtonLatch::new();
    assert!(latch.on_edge(1_000, config.debounce_window_ms));

    assert!(adjust_cycle(Adjustment::Increment, &latch, &config, &display, &state));

    assert_eq!(state.snapshot().capacity_threshold, 15);
    let d = display.lock().unwrap();
    assert!(d.cleared(render::ROW_CAPACITY_THRESHOLD));
    assert!(!d.cleared(render::ROW_TEMP_THRESHOLD));
    assert_eq!(d.last_write(render::ROW_CAPACITY_THRESHOLD), Some("15 % <-"));
}

#[test]
fn press_at_limit_renders_without_clearing() {
    let (config, state, display) = harness();
    // Capacity threshold boots at its minimum of 10 %.
    let latch = ButtonLatch::new();
    assert!(latch.on_edge(1_000, config.debounce_window_ms));

    assert!(adjust_cycle(Adjustment::Decrease, &latch, &config, &display, &state));

    assert_eq!(state.snapshot().capacity_threshold, 10);
    let d = display.lock().unwrap();
    assert!(!d.cleared(render::ROW_CAPACITY_THRESHOLD));
    assert_eq!(d.last_write(render::ROW_CAPACITY_THRESHOLD), Some("10 % <-"));
}

#[test]
fn bounce_train_yields_a_single_adjustment() {
    let (config, state, display) = harness();
    let latch = ButtonLatch::new();

    // One press with contact bounce: only the first edge is accepted.
    assert!(latch.on_edge(1_000, config.debounce_window_ms));
    assert!(!latch.on_edge(1_050, config.debounce_window_ms));
    assert!(!latch.on_edge(1_120, config.debounce_window_ms));

    assert!(adjust_cycle(Adjustment::Increment, &latch, &config, &display, &state));
    assert!(!adjust_cycle(Adjustment::Increment, &latch, &config, &display, &state));
    assert_eq!(state.snapshot().capacity_threshold, 15);
}

#[test]
fn mode_toggle_clears_both_threshold_rows_and_moves_the_marker() {
    let (config, state, display) = harness();
    let latch = ButtonLatch::new();
    assert!(latch.on_edge(1_000, config.debounce_window_ms));

    assert!(mode_cycle(&latch, &display, &state));

    assert_eq!(state.snapshot().mode, Mode::Temperature);
    let d = display.lock().unwrap();
    assert!(d.cleared(render::ROW_CAPACITY_THRESHOLD));
    assert!(d.cleared(render::ROW_TEMP_THRESHOLD));
    assert_eq!(d.last_write(render::ROW_CAPACITY_THRESHOLD), Some("10 %"));
    assert_eq!(d.last_write(render::ROW_TEMP_THRESHOLD), Some("10.00 C <-"));
}

#[test]
fn mode_toggle_redirects_the_adjustment_buttons() {
    let (config, state, display) = harness();
    let mode_latch = ButtonLatch::new();
    let inc_latch = ButtonLatch::new();

    assert!(mode_latch.on_edge(1_000, config.debounce_window_ms));
    assert!(mode_cycle(&mode_latch, &display, &state));

    assert!(inc_latch.on_edge(2_000, config.debounce_window_ms));
    assert!(adjust_cycle(Adjustment::Increment, &inc_latch, &config, &display, &state));

    let snap = state.snapshot();
    assert_eq!(snap.capacity_threshold, 10, "distance threshold must not move");
    assert!((snap.temp_threshold_c - 11.0).abs() < f32::EPSILON);
}
