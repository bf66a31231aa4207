use std::time::{Duration, Instant};

/// Trailing-edge rate limiter for the render path.
///
/// Every document change `poke`s the debouncer; `fire` reports true once the
/// quiet window has elapsed with no further pokes. Multiple changes within
/// one window collapse into a single render of the latest state.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    last_poke: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_poke: None,
        }
    }

    pub fn poke(&mut self, now: Instant) {
        self.last_poke = Some(now);
    }

    /// True once per quiet window, after which the debouncer is idle again.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.last_poke {
            Some(poked) if now.duration_since(poked) >= self.window => {
                self.last_poke = None;
                true
            }
            _ => false,
        }
    }

    /// When the pending trigger becomes due, if any. Used by the event loop
    /// to schedule a wakeup instead of polling.
    pub fn deadline(&self) -> Option<Instant> {
        self.last_poke.map(|poked| poked + self.window)
    }
}

/// Leading-edge rate limiter for wheel navigation.
///
/// The first event is accepted and arms the gate; everything else inside the
/// quiet window is ignored, so one physical scroll gesture moves one slide.
#[derive(Debug)]
pub struct WheelGate {
    window: Duration,
    armed_at: Option<Instant>,
}

impl WheelGate {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            armed_at: None,
        }
    }

    pub fn accept(&mut self, now: Instant) -> bool {
        if let Some(armed) = self.armed_at {
            if now.duration_since(armed) < self.window {
                return false;
            }
        }
        self.armed_at = Some(now);
        true
    }
}
