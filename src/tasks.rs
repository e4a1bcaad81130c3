//! The five control loops.
//!
//! Each loop is split into a pure-ish `*_cycle()` body (testable with
//! mock ports) and a `run_*` wrapper that polls it forever on its own
//! thread. No ordering is guaranteed or required between loops; all
//! cross-loop communication goes through [`SharedState`] and the
//! mutex-guarded display.
//!
//! | Loop         | Cadence   | Owns (writes)                              |
//! |--------------|-----------|--------------------------------------------|
//! | level        | ~2 s      | `water_distance_cm`, `fill_percent`, `pump_on` |
//! | thermal      | ~2 s      | `water_temperature_c`, `heater_on`         |
//! | decrease     | ~50 ms    | mode-selected threshold                    |
//! | increment    | ~50 ms    | mode-selected threshold                    |
//! | change-mode  | ~50 ms    | `mode`                                     |

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use log::{info, warn};

use crate::buttons::{ButtonChannel, ButtonLatch};
use crate::config::TankConfig;
use crate::level::{LevelController, LevelDecision};
use crate::ports::{ActuatorPort, DisplaySurface, DistanceSensor, TemperatureProbe};
use crate::render::{self, render};
use crate::state::{Mode, SharedState};
use crate::thermal::{ThermalController, ThermalDecision};

fn lock_display<D>(display: &Mutex<D>) -> MutexGuard<'_, D> {
    display.lock().unwrap_or_else(PoisonError::into_inner)
}

// ── Level loop ────────────────────────────────────────────────

/// One level-control cycle: range, convert, decide, refresh.
pub fn level_cycle<S, A, D>(
    controller: &LevelController,
    sensor: &mut S,
    actuators: &mut A,
    display: &Mutex<D>,
    state: &SharedState,
) where
    S: DistanceSensor,
    A: ActuatorPort,
    D: DisplaySurface,
{
    let distance_m = match sensor.measure(controller.max_range_cm()) {
        Ok(d) => d,
        Err(fault) => {
            // Hold the last pump command and skip the refresh; the next
            // poll happens on the normal schedule.
            warn!("hcsr04: measurement fault: {fault}");
            return;
        }
    };
    let distance_cm = distance_m * 100.0;

    let capacity_threshold = state.lock().capacity_threshold;
    match controller.evaluate(distance_cm, capacity_threshold) {
        LevelDecision::Spurious => {
            // Fail safe: never run the pump on an impossible reading.
            warn!("hcsr04: spurious reading {distance_cm:.2} cm, forcing pump off");
            actuators.set_pump(false);
            state.lock().pump_on = false;
        }
        LevelDecision::Valid {
            fill_percent,
            pump_on,
        } => {
            let snapshot = {
                let mut st = state.lock();
                st.water_distance_cm = distance_cm;
                st.fill_percent = fill_percent;
                if pump_on && !st.pump_on {
                    warn!(
                        "hcsr04: pump engaged ({fill_percent:.2} % under {capacity_threshold} % target)"
                    );
                }
                st.pump_on = pump_on;
                *st
            };
            actuators.set_pump(pump_on);
            info!("hcsr04: distance {distance_cm:.2} cm, fill {fill_percent:.2} %");

            let mut d = lock_display(display);
            d.clear_line(render::ROW_FILL);
            render(&mut *d, &snapshot);
        }
    }
}

pub fn run_level_loop<S, A, D>(
    config: &TankConfig,
    mut sensor: S,
    mut actuators: A,
    display: Arc<Mutex<D>>,
    state: SharedState,
) -> !
where
    S: DistanceSensor,
    A: ActuatorPort,
    D: DisplaySurface,
{
    let controller = LevelController::new(config);
    let interval = Duration::from_millis(config.sensor_poll_interval_ms.into());
    loop {
        level_cycle(&controller, &mut sensor, &mut actuators, &display, &state);
        thread::sleep(interval);
    }
}

// ── Thermal loop ──────────────────────────────────────────────

/// One thermal-control cycle: read, validate, decide, refresh.
pub fn thermal_cycle<P, A, D>(
    controller: &ThermalController,
    probe: &mut P,
    actuators: &mut A,
    display: &Mutex<D>,
    state: &SharedState,
) where
    P: TemperatureProbe,
    A: ActuatorPort,
    D: DisplaySurface,
{
    let temperature_c = probe.read_celsius();
    let threshold_c = state.lock().temp_threshold_c;

    match controller.evaluate(temperature_c, threshold_c) {
        ThermalDecision::Spurious => {
            // Hold the heater state; a flaky probe must not toggle it.
            warn!("thermistor: discarding implausible reading {temperature_c:.2} C");
        }
        ThermalDecision::Valid { heater_on } => {
            let snapshot = {
                let mut st = state.lock();
                st.water_temperature_c = temperature_c;
                if heater_on && !st.heater_on {
                    warn!(
                        "thermistor: heater engaged ({temperature_c:.2} C under {threshold_c:.2} C target)"
                    );
                }
                st.heater_on = heater_on;
                *st
            };
            actuators.set_heater(heater_on);
            info!("thermistor: temperature {temperature_c:.2} C");

            let mut d = lock_display(display);
            d.clear_line(render::ROW_TEMPERATURE);
            render(&mut *d, &snapshot);
        }
    }
}

pub fn run_thermal_loop<P, A, D>(
    config: &TankConfig,
    mut probe: P,
    mut actuators: A,
    display: Arc<Mutex<D>>,
    state: SharedState,
) -> !
where
    P: TemperatureProbe,
    A: ActuatorPort,
    D: DisplaySurface,
{
    let controller = ThermalController::new(config);
    let interval = Duration::from_millis(config.sensor_poll_interval_ms.into());
    loop {
        thermal_cycle(&controller, &mut probe, &mut actuators, &display, &state);
        thread::sleep(interval);
    }
}

// ── Threshold adjustment consumers ────────────────────────────

/// Which way an adjustment consumer steps its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Decrease,
    Increment,
}

impl Adjustment {
    pub fn channel(self) -> ButtonChannel {
        match self {
            Self::Decrease => ButtonChannel::Decrease,
            Self::Increment => ButtonChannel::Increment,
        }
    }
}

/// One consumer poll: claim a pending press and apply the adjustment.
/// Returns whether an event was consumed.
pub fn adjust_cycle<D>(
    direction: Adjustment,
    latch: &ButtonLatch,
    config: &TankConfig,
    display: &Mutex<D>,
    state: &SharedState,
) -> bool
where
    D: DisplaySurface,
{
    if !latch.take() {
        return false;
    }

    let (snapshot, changed) = {
        let mut st = state.lock();
        let changed = match direction {
            Adjustment::Decrease => st.decrement(config),
            Adjustment::Increment => st.increment(config),
        };
        (*st, changed)
    };

    let row = match snapshot.mode {
        Mode::Distance => render::ROW_CAPACITY_THRESHOLD,
        Mode::Temperature => render::ROW_TEMP_THRESHOLD,
    };
    let mut d = lock_display(display);
    if changed {
        d.clear_line(row);
    }
    render(&mut *d, &snapshot);

    let tag = direction.channel().tag();
    if changed {
        info!("{tag}: threshold adjusted");
    } else {
        info!("{tag}: at limit, unchanged");
    }
    true
}

pub fn run_adjust_loop<D>(
    direction: Adjustment,
    config: &TankConfig,
    latch: &'static ButtonLatch,
    display: Arc<Mutex<D>>,
    state: SharedState,
) -> !
where
    D: DisplaySurface,
{
    let interval = Duration::from_millis(config.button_poll_interval_ms.into());
    loop {
        adjust_cycle(direction, latch, config, &display, &state);
        thread::sleep(interval);
    }
}

// ── Change-mode consumer ──────────────────────────────────────

/// One consumer poll: claim a pending press and toggle the active mode.
/// Both threshold rows are cleared so the marker cannot linger on the
/// stale row. Returns whether an event was consumed.
pub fn mode_cycle<D>(latch: &ButtonLatch, display: &Mutex<D>, state: &SharedState) -> bool
where
    D: DisplaySurface,
{
    if !latch.take() {
        return false;
    }

    let snapshot = {
        let mut st = state.lock();
        st.toggle_mode();
        *st
    };

    let mut d = lock_display(display);
    d.clear_line(render::ROW_CAPACITY_THRESHOLD);
    d.clear_line(render::ROW_TEMP_THRESHOLD);
    render(&mut *d, &snapshot);

    info!("change-mode: active mode now {:?}", snapshot.mode);
    true
}

pub fn run_mode_loop<D>(
    config: &TankConfig,
    latch: &'static ButtonLatch,
    display: Arc<Mutex<D>>,
    state: SharedState,
) -> !
where
    D: DisplaySurface,
{
    let interval = Duration::from_millis(config.button_poll_interval_ms.into());
    loop {
        mode_cycle(latch, &display, &state);
        thread::sleep(interval);
    }
}
