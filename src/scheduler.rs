use std::time::{Duration, Instant};

/// Single periodic tick source.
///
/// At most one period is armed at a time. Arming replaces the previous
/// period outright, and a fire that was due under the old period is
/// discarded, so no stale tick survives a rearm or a disarm.
pub trait Scheduler {
    /// Starts (or restarts) periodic firing every `interval`.
    fn arm(&mut self, interval: Duration);

    /// Stops firing and drops any due tick.
    fn disarm(&mut self);

    #[must_use]
    fn is_armed(&self) -> bool;

    /// Consumes one due tick. Returns false when nothing is due or the
    /// scheduler is disarmed.
    fn take_due(&mut self) -> bool;
}

/// Wall-clock scheduler polled from the render loop.
#[derive(Debug, Clone, Default)]
pub struct IntervalScheduler {
    period: Option<Duration>,
    next_due: Option<Instant>,
}

impl IntervalScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms relative to an explicit clock reading.
    pub fn arm_at(&mut self, interval: Duration, now: Instant) {
        self.period = Some(interval);
        self.next_due = Some(now + interval);
    }

    /// Consumes a due tick relative to an explicit clock reading.
    ///
    /// Late polls fire once and restart the period from `now`; missed
    /// periods are not replayed in a burst.
    pub fn take_due_at(&mut self, now: Instant) -> bool {
        let (Some(period), Some(next_due)) = (self.period, self.next_due) else {
            return false;
        };

        if now < next_due {
            return false;
        }

        self.next_due = Some(now + period);
        true
    }

    /// Time left until the next tick, if armed.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due
            .map(|next_due| next_due.saturating_duration_since(now))
    }
}

impl Scheduler for IntervalScheduler {
    fn arm(&mut self, interval: Duration) {
        self.arm_at(interval, Instant::now());
    }

    fn disarm(&mut self) {
        self.period = None;
        self.next_due = None;
    }

    fn is_armed(&self) -> bool {
        self.period.is_some()
    }

    fn take_due(&mut self) -> bool {
        self.take_due_at(Instant::now())
    }
}

/// Deterministic scheduler stepped by hand, for tests and replays.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    period: Option<Duration>,
    due: bool,
    arm_history: Vec<Duration>,
    disarm_count: usize,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the period elapsing. Has no effect while disarmed.
    pub fn fire(&mut self) {
        if self.period.is_some() {
            self.due = true;
        }
    }

    /// Currently armed period.
    #[must_use]
    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Every interval passed to `arm`, oldest first.
    #[must_use]
    pub fn arm_history(&self) -> &[Duration] {
        &self.arm_history
    }

    #[must_use]
    pub fn disarm_count(&self) -> usize {
        self.disarm_count
    }
}

impl Scheduler for ManualScheduler {
    fn arm(&mut self, interval: Duration) {
        self.period = Some(interval);
        self.due = false;
        self.arm_history.push(interval);
    }

    fn disarm(&mut self) {
        self.period = None;
        self.due = false;
        self.disarm_count += 1;
    }

    fn is_armed(&self) -> bool {
        self.period.is_some()
    }

    fn take_due(&mut self) -> bool {
        std::mem::take(&mut self.due)
    }
}
