//! Timing primitives evaluated against the shared animation clock.
//!
//! All times are `f64` milliseconds, as handed out by `performance.now()` /
//! `requestAnimationFrame`. Nothing here owns a real timer: the host samples
//! the clock once per frame and polls these structures with it.

/// Ordered one-shot cues, each keyed to an offset from the timeline start.
///
/// Every cue fires exactly once. A late poll fires all overdue cues
/// back-to-back, in offset order.
#[derive(Debug, Clone)]
pub struct Timeline<C> {
    cues: Vec<(f64, C)>,
    start: Option<f64>,
    next: usize,
}

impl<C: Copy> Timeline<C> {
    pub fn new(mut cues: Vec<(f64, C)>) -> Self {
        // Stable sort keeps declaration order for equal offsets.
        cues.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self {
            cues,
            start: None,
            next: 0,
        }
    }

    /// Start the timeline at `now`. Ignored if already running.
    pub fn start(&mut self, now: f64) {
        if self.start.is_none() {
            self.start = Some(now);
        }
    }

    pub fn is_started(&self) -> bool {
        self.start.is_some()
    }

    /// True once every cue has fired, or after `cancel`.
    pub fn is_finished(&self) -> bool {
        self.next >= self.cues.len()
    }

    pub fn start_time(&self) -> Option<f64> {
        self.start
    }

    /// Absolute deadline of the cue at `offset_ms`, if started.
    pub fn deadline(&self, offset_ms: f64) -> Option<f64> {
        self.start.map(|s| s + offset_ms)
    }

    /// Return every cue whose deadline is at or before `now`, in order.
    pub fn poll(&mut self, now: f64) -> Vec<C> {
        let Some(start) = self.start else {
            return Vec::new();
        };
        let mut due = Vec::new();
        while let Some(&(offset, cue)) = self.cues.get(self.next) {
            if now < start + offset {
                break;
            }
            due.push(cue);
            self.next += 1;
        }
        due
    }

    /// Drop all pending cues. Nothing fires after this until `reset`.
    pub fn cancel(&mut self) {
        self.next = self.cues.len();
    }

    /// Back to the unstarted state with every cue pending again.
    pub fn reset(&mut self) {
        self.start = None;
        self.next = 0;
    }
}

/// Periodic timer.
pub struct IntervalTimer {
    period: f64,
    next_due: Option<f64>,
    /// Cap on how many periods a single poll may report (0 = no cap).
    max_catch_up: u32,
}

impl IntervalTimer {
    pub fn new(period_ms: f64) -> Self {
        Self {
            period: period_ms.max(1.0),
            next_due: None,
            max_catch_up: 0,
        }
    }

    /// Limit how many elapsed periods one poll reports after a stall.
    /// Skipped periods are dropped, not deferred.
    pub fn with_max_catch_up(mut self, max: u32) -> Self {
        self.max_catch_up = max;
        self
    }

    /// Start (or restart) the timer; the first fire is one period after `now`.
    pub fn start(&mut self, now: f64) {
        self.next_due = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    /// Number of periods that elapsed since the previous poll.
    pub fn poll(&mut self, now: f64) -> u32 {
        let Some(due) = self.next_due else {
            return 0;
        };
        if now < due {
            return 0;
        }
        let elapsed = ((now - due) / self.period).floor() as u32 + 1;
        self.next_due = Some(due + elapsed as f64 * self.period);
        if self.max_catch_up > 0 {
            elapsed.min(self.max_catch_up)
        } else {
            elapsed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Cue {
        A,
        B,
        C,
    }

    #[test]
    fn timeline_waits_for_start() {
        let mut t = Timeline::new(vec![(0.0, Cue::A)]);
        assert!(t.poll(1_000.0).is_empty());
        t.start(1_000.0);
        assert_eq!(t.poll(1_000.0), vec![Cue::A]);
    }

    #[test]
    fn timeline_fires_each_cue_once() {
        let mut t = Timeline::new(vec![(100.0, Cue::A), (200.0, Cue::B)]);
        t.start(0.0);
        assert!(t.poll(99.0).is_empty());
        assert_eq!(t.poll(100.0), vec![Cue::A]);
        assert!(t.poll(150.0).is_empty());
        assert_eq!(t.poll(250.0), vec![Cue::B]);
        assert!(t.poll(10_000.0).is_empty());
        assert!(t.is_finished());
    }

    #[test]
    fn stalled_poll_fires_in_order() {
        let mut t = Timeline::new(vec![(300.0, Cue::C), (100.0, Cue::A), (200.0, Cue::B)]);
        t.start(0.0);
        assert_eq!(t.poll(1_000.0), vec![Cue::A, Cue::B, Cue::C]);
    }

    #[test]
    fn cancelled_timeline_never_fires() {
        let mut t = Timeline::new(vec![(100.0, Cue::A)]);
        t.start(0.0);
        t.cancel();
        assert!(t.poll(500.0).is_empty());
        t.reset();
        assert!(!t.is_started());
        t.start(1_000.0);
        assert_eq!(t.poll(1_100.0), vec![Cue::A]);
    }

    #[test]
    fn interval_counts_elapsed_periods() {
        let mut timer = IntervalTimer::new(30.0);
        assert_eq!(timer.poll(100.0), 0, "not started");
        timer.start(0.0);
        assert_eq!(timer.poll(29.0), 0);
        assert_eq!(timer.poll(30.0), 1);
        assert_eq!(timer.poll(59.0), 0);
        assert_eq!(timer.poll(125.0), 3); // 60, 90, 120
        assert_eq!(timer.poll(150.0), 1);
    }

    #[test]
    fn interval_catch_up_is_capped() {
        let mut timer = IntervalTimer::new(200.0).with_max_catch_up(10);
        timer.start(0.0);
        assert_eq!(timer.poll(60_000.0), 10);
        // Skipped periods are gone; the next fire is one period later.
        assert_eq!(timer.poll(60_100.0), 0);
        assert_eq!(timer.poll(60_200.0), 1);
    }

    #[test]
    fn stopped_interval_is_silent() {
        let mut timer = IntervalTimer::new(10.0);
        timer.start(0.0);
        timer.stop();
        assert!(!timer.is_running());
        assert_eq!(timer.poll(1_000.0), 0);
    }
}
