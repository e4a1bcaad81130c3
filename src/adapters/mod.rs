//! Adapters binding the port traits to concrete backends.

pub mod console_display;
pub mod hardware;
