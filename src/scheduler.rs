use std::time::{Duration, Instant};

/// Length of one countdown tick.
pub const SECOND: Duration = Duration::from_secs(1);

/// A periodic source of "one period elapsed" notifications that can be
/// armed and disarmed at will. Polled rather than pushing, so the caller
/// decides on which thread ticks are applied.
pub trait Scheduler {
    /// Start counting periods from now. Re-arming discards any periods
    /// that were pending from the previous arm.
    fn arm(&mut self);

    /// Stop counting. No further periods are reported until the next arm.
    fn disarm(&mut self);

    fn is_armed(&self) -> bool;

    /// Number of whole periods that elapsed since the previous call.
    fn due(&mut self, now: Instant) -> u32;
}

/// Wall-clock scheduler on the monotonic clock.
#[derive(Debug, Clone)]
pub struct IntervalScheduler {
    period: Duration,
    next_due: Option<Instant>,
}

impl IntervalScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    pub fn every_second() -> Self {
        Self::new(SECOND)
    }

    pub fn arm_at(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }
}

impl Default for IntervalScheduler {
    fn default() -> Self {
        Self::every_second()
    }
}

impl Scheduler for IntervalScheduler {
    fn arm(&mut self) {
        self.arm_at(Instant::now());
    }

    fn disarm(&mut self) {
        self.next_due = None;
    }

    fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    fn due(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next_due else {
            return 0;
        };
        if self.period.is_zero() {
            return 0;
        }

        let mut count = 0;
        while now >= next {
            count += 1;
            next += self.period;
        }
        self.next_due = Some(next);
        count
    }
}

/// Scheduler whose periods are released by hand.
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    armed: bool,
    pending: u32,
    pub arm_count: usize,
    pub disarm_count: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `n` elapsed periods. Ignored while disarmed.
    pub fn advance(&mut self, n: u32) {
        if self.armed {
            self.pending += n;
        }
    }
}

impl Scheduler for ManualScheduler {
    fn arm(&mut self) {
        self.armed = true;
        self.pending = 0;
        self.arm_count += 1;
    }

    fn disarm(&mut self) {
        self.armed = false;
        self.pending = 0;
        self.disarm_count += 1;
    }

    fn is_armed(&self) -> bool {
        self.armed
    }

    fn due(&mut self, _now: Instant) -> u32 {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_disarmed_reports_nothing() {
        let mut sched = IntervalScheduler::every_second();
        let now = Instant::now();
        assert!(!sched.is_armed());
        assert_eq!(sched.due(now + Duration::from_secs(10)), 0);
    }

    #[test]
    fn test_interval_counts_whole_periods() {
        let mut sched = IntervalScheduler::every_second();
        let t0 = Instant::now();
        sched.arm_at(t0);

        assert_eq!(sched.due(t0 + Duration::from_millis(999)), 0);
        assert_eq!(sched.due(t0 + Duration::from_millis(1000)), 1);
        assert_eq!(sched.due(t0 + Duration::from_millis(1500)), 0);
        assert_eq!(sched.due(t0 + Duration::from_millis(4200)), 3);
        assert_eq!(sched.due(t0 + Duration::from_millis(4999)), 0);
        assert_eq!(sched.due(t0 + Duration::from_millis(5000)), 1);
    }

    #[test]
    fn test_interval_disarm_stops_delivery() {
        let mut sched = IntervalScheduler::every_second();
        let t0 = Instant::now();
        sched.arm_at(t0);
        sched.disarm();
        assert!(!sched.is_armed());
        assert_eq!(sched.due(t0 + Duration::from_secs(5)), 0);
    }

    #[test]
    fn test_interval_rearm_drops_old_schedule() {
        let mut sched = IntervalScheduler::every_second();
        let t0 = Instant::now();
        sched.arm_at(t0);
        sched.arm_at(t0 + Duration::from_millis(700));
        assert_eq!(sched.due(t0 + Duration::from_millis(1200)), 0);
        assert_eq!(sched.due(t0 + Duration::from_millis(1700)), 1);
    }

    #[test]
    fn test_manual_advance_only_when_armed() {
        let mut sched = ManualScheduler::new();
        let now = Instant::now();
        sched.advance(3);
        assert_eq!(sched.due(now), 0);

        sched.arm();
        sched.advance(2);
        sched.advance(1);
        assert_eq!(sched.due(now), 3);
        assert_eq!(sched.due(now), 0);

        sched.advance(4);
        sched.disarm();
        assert_eq!(sched.due(now), 0);
    }
}
