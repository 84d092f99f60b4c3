//! Per-hour task budget enforcement (§4.4 "Enforce per-hour budget
//! (maxTasksPerHour); if exhausted, skip until the hour rolls").

use std::time::{Duration, Instant};

const HOUR: Duration = Duration::from_secs(3600);

/// Tracks emissions within a rolling hour window, reset wholesale when the
/// window elapses (simpler than a sliding log and sufficient for the
/// "skip until the hour rolls" semantics the spec calls for).
pub struct HourlyBudget {
    max_per_hour: u32,
    window_start: Instant,
    emitted_this_window: u32,
}

impl HourlyBudget {
    pub fn new(max_per_hour: u32, now: Instant) -> Self {
        Self {
            max_per_hour,
            window_start: now,
            emitted_this_window: 0,
        }
    }

    fn roll_window_if_elapsed(&mut self, now: Instant) {
        if now.saturating_duration_since(self.window_start) >= HOUR {
            self.window_start = now;
            self.emitted_this_window = 0;
        }
    }

    /// Whether an emission is currently allowed, given `now`.
    pub fn has_capacity(&mut self, now: Instant) -> bool {
        self.roll_window_if_elapsed(now);
        self.emitted_this_window < self.max_per_hour
    }

    /// Records one emission against the current window.
    pub fn record_emission(&mut self, now: Instant) {
        self.roll_window_if_elapsed(now);
        self.emitted_this_window += 1;
    }

    pub fn remaining(&self) -> u32 {
        self.max_per_hour.saturating_sub(self.emitted_this_window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_exhausts_and_recovers_after_the_hour_rolls() {
        let t0 = Instant::now();
        let mut budget = HourlyBudget::new(2, t0);

        assert!(budget.has_capacity(t0));
        budget.record_emission(t0);
        assert!(budget.has_capacity(t0));
        budget.record_emission(t0);
        assert!(!budget.has_capacity(t0));

        let later = t0 + Duration::from_secs(3601);
        assert!(budget.has_capacity(later));
        assert_eq!(budget.remaining(), 2);
    }

    #[test]
    fn zero_budget_never_has_capacity() {
        let t0 = Instant::now();
        let mut budget = HourlyBudget::new(0, t0);
        assert!(!budget.has_capacity(t0));
    }
}
