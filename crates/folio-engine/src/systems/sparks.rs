//! Recurring DOM-level sparks.
//!
//! The emitter only decides *when* and *where*; the bridge creates one
//! element per `Spark` and removes it when its CSS animation ends.

use crate::api::config::FieldConfig;
use crate::core::time::IntervalTimer;
use crate::systems::trail::rng::Rng;

/// Bursts reported after a long stall are capped to this many.
const MAX_CATCH_UP: u32 = 10;

/// Placement and timing for one transient spark element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spark {
    /// Horizontal position as a percentage of the container width.
    pub left_pct: f32,
    /// Vertical position as a percentage of the container height.
    pub top_pct: f32,
    /// CSS animation duration, when randomized.
    pub duration_ms: Option<f32>,
    /// CSS animation delay, when randomized.
    pub delay_ms: Option<f32>,
}

pub struct SparkEmitter {
    timer: IntervalTimer,
    burst: usize,
    duration_ms: Option<(f32, f32)>,
    max_delay_ms: Option<f32>,
    rng: Rng,
}

impl SparkEmitter {
    /// One spark per period, placed anywhere in the container.
    pub fn new(period_ms: f64, seed: u64) -> Self {
        Self {
            timer: IntervalTimer::new(period_ms).with_max_catch_up(MAX_CATCH_UP),
            burst: 1,
            duration_ms: None,
            max_delay_ms: None,
            rng: Rng::new(seed),
        }
    }

    /// Rising particle field: bursts with randomized duration and delay.
    pub fn field(config: &FieldConfig, seed: u64) -> Self {
        Self {
            timer: IntervalTimer::new(config.period_ms).with_max_catch_up(MAX_CATCH_UP),
            burst: config.burst,
            duration_ms: Some((config.min_duration_ms, config.max_duration_ms)),
            max_delay_ms: Some(config.max_delay_ms),
            rng: Rng::new(seed),
        }
    }

    /// Begin emitting; the first burst is one period after `at`.
    pub fn start(&mut self, at: f64) {
        self.timer.start(at);
    }

    pub fn stop(&mut self) {
        self.timer.stop();
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Sparks due by `now`.
    pub fn poll(&mut self, now: f64) -> Vec<Spark> {
        let bursts = self.timer.poll(now) as usize;
        (0..bursts * self.burst).map(|_| self.next_spark()).collect()
    }

    fn next_spark(&mut self) -> Spark {
        let left_pct = self.rng.next_f32() * 100.0;
        let top_pct = self.rng.next_f32() * 100.0;
        let duration_ms = self
            .duration_ms
            .map(|(lo, hi)| self.rng.range(lo, hi));
        let delay_ms = self.max_delay_ms.map(|max| self.rng.next_f32() * max);
        Spark {
            left_pct,
            top_pct,
            duration_ms,
            delay_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_until_started() {
        let mut e = SparkEmitter::new(200.0, 1);
        assert!(e.poll(10_000.0).is_empty());
    }

    #[test]
    fn one_spark_per_period() {
        let mut e = SparkEmitter::new(200.0, 1);
        e.start(0.0);
        assert!(e.poll(199.0).is_empty());
        let sparks = e.poll(200.0);
        assert_eq!(sparks.len(), 1);
        assert!((0.0..100.0).contains(&sparks[0].left_pct));
        assert!((0.0..100.0).contains(&sparks[0].top_pct));
        assert_eq!(sparks[0].duration_ms, None);
        assert_eq!(e.poll(600.0).len(), 2);
    }

    #[test]
    fn stop_is_immediate() {
        let mut e = SparkEmitter::new(200.0, 1);
        e.start(0.0);
        e.stop();
        assert!(e.poll(1_000.0).is_empty());
        assert!(!e.is_running());
    }

    #[test]
    fn field_bursts_with_timing() {
        let cfg = FieldConfig::default();
        let mut e = SparkEmitter::field(&cfg, 3);
        e.start(0.0);
        let sparks = e.poll(200.0);
        assert_eq!(sparks.len(), 3);
        for s in sparks {
            let d = s.duration_ms.unwrap();
            assert!((3000.0..7000.0).contains(&d));
            let delay = s.delay_ms.unwrap();
            assert!((0.0..2000.0).contains(&delay));
        }
    }

    #[test]
    fn stalls_do_not_flood() {
        let mut e = SparkEmitter::new(200.0, 1);
        e.start(0.0);
        assert_eq!(e.poll(3_600_000.0).len(), MAX_CATCH_UP as usize);
    }
}
