//! TankGuard firmware — main entry point.
//!
//! Boot sequence: ESP-IDF bootstrap, peripheral + ISR bring-up, then
//! five control loops — level, thermal, and the three button consumers.
//! Four run on spawned threads; the level loop keeps the main thread.

#![deny(unused_must_use)]

use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::{anyhow, Result};
use log::info;

use tankguard::adapters::console_display::ConsoleDisplay;
use tankguard::adapters::hardware::HardwareActuators;
use tankguard::buttons::{self, ButtonChannel};
use tankguard::config::TankConfig;
use tankguard::drivers::{hcsr04::Hcsr04, hw_init, thermistor::Thermistor};
use tankguard::pins;
use tankguard::ports::DisplaySurface;
use tankguard::render;
use tankguard::state::SharedState;
use tankguard::tasks::{self, Adjustment};

const LOOP_THREAD_STACK: usize = 8 * 1024;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  TankGuard v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Peripheral + ISR bring-up ──────────────────────────
    let config = TankConfig::default();
    buttons::configure(config.debounce_window_ms);

    hw_init::init_peripherals().map_err(|e| anyhow!("peripheral init failed: {e}"))?;
    hw_init::init_isr_service().map_err(|e| anyhow!("ISR service init failed: {e}"))?;

    // ── 3. Construct ports + shared state ─────────────────────
    let state = SharedState::new(&config);
    let display = Arc::new(Mutex::new(ConsoleDisplay::new()));
    let sensor = Hcsr04::new(pins::TRIGGER_GPIO, pins::ECHO_GPIO);
    let probe = Thermistor::new(pins::TEMP_ADC_GPIO);

    // One actuator handle per sensor loop; each loop commands only its
    // own output, so the handles never fight over a GPIO.
    let pump_actuators = HardwareActuators::new();
    let heater_actuators = HardwareActuators::new();

    // Paint the full screen once so every row is populated before the
    // loops start their single-row refreshes.
    {
        let mut d = display.lock().map_err(|_| anyhow!("display lock poisoned at boot"))?;
        for row in 0..tankguard::ports::DISPLAY_ROWS {
            d.clear_line(row);
        }
        render::render(&mut *d, &state.snapshot());
    }

    // ── 4. Spawn the loop threads ─────────────────────────────
    {
        let (cfg, st, disp) = (config.clone(), state.clone(), Arc::clone(&display));
        thread::Builder::new()
            .name("thermal".into())
            .stack_size(LOOP_THREAD_STACK)
            .spawn(move || tasks::run_thermal_loop(&cfg, probe, heater_actuators, disp, st))?;
    }
    {
        let (cfg, st, disp) = (config.clone(), state.clone(), Arc::clone(&display));
        thread::Builder::new()
            .name("btn-decrease".into())
            .stack_size(LOOP_THREAD_STACK)
            .spawn(move || {
                tasks::run_adjust_loop(
                    Adjustment::Decrease,
                    &cfg,
                    buttons::latch(ButtonChannel::Decrease),
                    disp,
                    st,
                )
            })?;
    }
    {
        let (cfg, st, disp) = (config.clone(), state.clone(), Arc::clone(&display));
        thread::Builder::new()
            .name("btn-increment".into())
            .stack_size(LOOP_THREAD_STACK)
            .spawn(move || {
                tasks::run_adjust_loop(
                    Adjustment::Increment,
                    &cfg,
                    buttons::latch(ButtonChannel::Increment),
                    disp,
                    st,
                )
            })?;
    }
    {
        let (cfg, st, disp) = (config.clone(), state.clone(), Arc::clone(&display));
        thread::Builder::new()
            .name("btn-mode".into())
            .stack_size(LOOP_THREAD_STACK)
            .spawn(move || {
                tasks::run_mode_loop(&cfg, buttons::latch(ButtonChannel::ChangeMode), disp, st)
            })?;
    }

    info!("System ready. Entering level loop.");

    // ── 5. Level loop on the main thread ──────────────────────
    tasks::run_level_loop(&config, sensor, pump_actuators, display, state)
}
