use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic time source for the frame loop, seconds
pub trait FrameClock {
    fn now(&self) -> f32;
}

/// Wall clock measured from construction
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }

    /// Restart the timeline
    pub fn reset(&mut self) {
        self.start = Instant::now();
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn now(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Synthetic clock, clones share the same reading
///
/// Hand one clone to the scheduler and keep another to drive time in tests.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f32>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, seconds: f32) {
        self.now.set(seconds);
    }

    pub fn advance(&self, seconds: f32) {
        self.now.set(self.now.get() + seconds);
    }
}

impl FrameClock for ManualClock {
    fn now(&self) -> f32 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn system_clock_measures_elapsed() {
        let clock = SystemClock::new();
        thread::sleep(Duration::from_millis(10));
        let now = clock.now();
        assert!(now >= 0.009);
    }

    #[test]
    fn system_clock_resets() {
        let mut clock = SystemClock::new();
        thread::sleep(Duration::from_millis(10));
        clock.reset();
        assert!(clock.now() < 0.005);
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(0.5);
        handle.advance(0.25);
        assert_eq!(clock.now(), 0.75);
        handle.set(2.0);
        assert_eq!(clock.now(), 2.0);
    }
}
