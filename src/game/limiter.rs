//! Fixed-rate tick pacing.

use std::thread;
use std::time::{Duration, Instant};

/// Holds a loop to a target tick rate by sleeping off the rest of each period.
///
/// If a tick overruns its period the schedule restarts from the current time
/// instead of trying to catch up.
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    period: Duration,
    deadline: Instant,
}

impl FrameLimiter {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            deadline: now,
        }
    }

    /// Advances to the next deadline and returns how long to wait for it.
    pub fn delay(&mut self, now: Instant) -> Duration {
        self.deadline += self.period;
        if self.deadline <= now {
            self.deadline = now;
            Duration::ZERO
        } else {
            self.deadline - now
        }
    }

    /// Sleeps until the next tick is due.
    pub fn wait(&mut self) {
        let delay = self.delay(Instant::now());
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    /// Restarts the schedule, e.g. after a pause.
    pub fn reset(&mut self, now: Instant) {
        self.deadline = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(16);

    #[test]
    fn test_waits_out_the_rest_of_the_period() {
        let start = Instant::now();
        let mut limiter = FrameLimiter::new(PERIOD, start);
        assert_eq!(limiter.delay(start + Duration::from_millis(4)), Duration::from_millis(12));
        // Next deadline is measured from the previous one, not from now
        assert_eq!(limiter.delay(start + Duration::from_millis(20)), Duration::from_millis(12));
    }

    #[test]
    fn test_overrun_restarts_schedule() {
        let start = Instant::now();
        let mut limiter = FrameLimiter::new(PERIOD, start);
        let late = start + Duration::from_millis(50);
        assert_eq!(limiter.delay(late), Duration::ZERO);
        assert_eq!(limiter.delay(late), PERIOD);
    }

    #[test]
    fn test_reset() {
        let start = Instant::now();
        let mut limiter = FrameLimiter::new(PERIOD, start);
        let later = start + Duration::from_secs(3);
        limiter.reset(later);
        assert_eq!(limiter.delay(later), PERIOD);
    }
}
