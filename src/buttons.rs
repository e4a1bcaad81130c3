//! ISR-debounced button input channels.
//!
//! ## Hardware
//!
//! Three active-low momentary switches with pull-ups. Each GPIO fires on
//! the falling edge; the ISR runs the producer half of a single-slot
//! mailbox, and a dedicated consumer loop polls [`take`] at ~50 ms.
//!
//! ## Two-part debounce guard
//!
//! An edge is accepted only if
//!
//! 1. at least the debounce window has elapsed since the last *accepted*
//!    edge on this channel (time debounce), and
//! 2. no prior accepted event is still unconsumed (pending latch).
//!
//! Part 1 suppresses contact bounce; part 2 prevents a burst of presses
//! from overwriting an event the consumer has not claimed yet. A dropped
//! edge does not update the timestamp, so it cannot push the window out.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// The three logical input channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonChannel {
    Decrease = 0,
    Increment = 1,
    ChangeMode = 2,
}

impl ButtonChannel {
    pub const COUNT: usize = 3;

    /// Log tag for this channel.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Decrease => "decrease",
            Self::Increment => "increment",
            Self::ChangeMode => "change-mode",
        }
    }
}

/// Single-slot, capacity-1 mailbox with producer-side debounce.
///
/// Written by the ISR, read by one consumer loop. Lock-free.
pub struct ButtonLatch {
    last_edge_ms: AtomicU32,
    pending: AtomicBool,
}

impl ButtonLatch {
    pub const fn new() -> Self {
        Self {
            last_edge_ms: AtomicU32::new(0),
            pending: AtomicBool::new(false),
        }
    }

    /// Producer side — call from the falling-edge ISR. Returns whether
    /// the edge was accepted.
    pub fn on_edge(&self, now_ms: u32, debounce_window_ms: u32) -> bool {
        let last = self.last_edge_ms.load(Ordering::Relaxed);
        if now_ms.wrapping_sub(last) < debounce_window_ms {
            return false;
        }
        if self.pending.load(Ordering::Acquire) {
            return false;
        }
        self.last_edge_ms.store(now_ms, Ordering::Relaxed);
        self.pending.store(true, Ordering::Release);
        true
    }

    /// Consumer side — claim and clear the pending event, if any.
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    /// True if an accepted event is waiting for its consumer.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

impl Default for ButtonLatch {
    fn default() -> Self {
        Self::new()
    }
}

// ── Static latches for the ISR entry points ───────────────────

static LATCHES: [ButtonLatch; ButtonChannel::COUNT] =
    [ButtonLatch::new(), ButtonLatch::new(), ButtonLatch::new()];

/// Debounce window used by the ISR path; seeded from `TankConfig` at boot.
static DEBOUNCE_WINDOW_MS: AtomicU32 = AtomicU32::new(200);

/// Set the debounce window for the ISR entry points. Call once at boot
/// before the ISR service is installed.
pub fn configure(debounce_window_ms: u32) {
    DEBOUNCE_WINDOW_MS.store(debounce_window_ms, Ordering::Relaxed);
}

/// The latch for a channel.
pub fn latch(channel: ButtonChannel) -> &'static ButtonLatch {
    &LATCHES[channel as usize]
}

/// ISR entry — register on the falling edge of each button GPIO.
/// Safe to call from interrupt context (lock-free atomics only).
pub fn edge_isr(channel: ButtonChannel, now_ms: u32) {
    let window = DEBOUNCE_WINDOW_MS.load(Ordering::Relaxed);
    latch(channel).on_edge(now_ms, window);
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: u32 = 200;

    #[test]
    fn first_edge_accepted() {
        let latch = ButtonLatch::new();
        assert!(latch.on_edge(500, WINDOW));
        assert!(latch.is_pending());
    }

    #[test]
    fn bounce_within_window_yields_one_event() {
        let latch = ButtonLatch::new();
        assert!(latch.on_edge(500, WINDOW));
        assert!(latch.take());
        // Second edge 120 ms later: pending is clear but the window
        // has not elapsed.
        assert!(!latch.on_edge(620, WINDOW));
        assert!(!latch.take());
    }

    #[test]
    fn spaced_edges_with_consumption_yield_two_events() {
        let latch = ButtonLatch::new();
        assert!(latch.on_edge(500, WINDOW));
        assert!(latch.take());
        assert!(latch.on_edge(750, WINDOW));
        assert!(latch.take());
    }

    #[test]
    fn unconsumed_event_blocks_new_edges() {
        let latch = ButtonLatch::new();
        assert!(latch.on_edge(500, WINDOW));
        // Well past the window, but the first event was never taken.
        assert!(!latch.on_edge(2000, WINDOW));
        assert!(latch.take());
        assert!(!latch.take(), "dropped edge must not be double-counted");
    }

    #[test]
    fn rejected_edge_does_not_extend_the_window() {
        let latch = ButtonLatch::new();
        assert!(latch.on_edge(500, WINDOW));
        assert!(latch.take());
        assert!(!latch.on_edge(600, WINDOW)); // bounce, rejected
        // Window is measured from the accepted edge at 500, not 600.
        assert!(latch.on_edge(700, WINDOW));
    }

    #[test]
    fn channels_have_distinct_latches() {
        assert!(!core::ptr::eq(
            latch(ButtonChannel::Decrease),
            latch(ButtonChannel::Increment)
        ));
        assert_eq!(ButtonChannel::ChangeMode.tag(), "change-mode");
    }
}
