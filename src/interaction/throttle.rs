use std::time::{Duration, Instant};

/// Leading-edge rate limiter: the first call passes, later calls pass once `interval` has
/// elapsed since the last one that did.
#[derive(Clone, Debug)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    /// Limiter allowing one tick per `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Whether a tick at `now` may run. Records `now` when it may.
    pub fn ready(&mut self, now: Instant) -> bool {
        let ok = match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if ok {
            self.last = Some(now);
        }
        ok
    }

    /// Forget the last tick so the next call passes.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/throttle.rs"]
mod tests;
