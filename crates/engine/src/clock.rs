use std::time::{Duration, Instant};

/// Time source for the game loop.
pub trait Clock {
    /// Seconds since the previous call (or since construction, on the first).
    fn elapsed_secs(&mut self) -> f64;

    /// Give up the CPU when an iteration had nothing to do.
    fn idle(&mut self, duration: Duration);
}

/// Wall-clock time; idles by sleeping the thread.
#[derive(Debug)]
pub struct SystemClock {
    last: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed_secs(&mut self) -> f64 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        elapsed.as_secs_f64()
    }

    fn idle(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Reports exactly `step` seconds per call and never sleeps. Drives the loop
/// deterministically, one update per iteration when `step` is the frame cap.
#[derive(Debug, Clone, Copy)]
pub struct FixedStepClock {
    step: f64,
}

impl FixedStepClock {
    pub fn new(step: f64) -> Self {
        Self { step }
    }
}

impl Clock for FixedStepClock {
    fn elapsed_secs(&mut self) -> f64 {
        self.step
    }

    fn idle(&mut self, _duration: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_measures_since_last_call() {
        let mut clock = SystemClock::new();
        std::thread::sleep(Duration::from_millis(5));
        let first = clock.elapsed_secs();
        assert!(first >= 0.005);
        let second = clock.elapsed_secs();
        assert!(second < first);
    }

    #[test]
    fn fixed_step_clock_is_constant() {
        let mut clock = FixedStepClock::new(0.25);
        assert_eq!(clock.elapsed_secs(), 0.25);
        assert_eq!(clock.elapsed_secs(), 0.25);
    }
}
