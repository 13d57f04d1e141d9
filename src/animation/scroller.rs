use std::time::Duration;

use super::Interpolator;

/// Result of advancing a [`Scroller`] by one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTick {
    /// Current value after this step
    pub value: f32,
    /// True once the run has reached its final value
    pub done: bool,
}

/// Polled scalar animator that moves an integer position from `start`
/// by `delta` over a fixed duration, shaped by an [`Interpolator`].
///
/// The scroller holds no clock. The owner advances it with the time elapsed
/// since the previous frame, so runs are deterministic under test.
#[derive(Debug, Clone)]
pub struct Scroller {
    start: i32,
    delta: i32,
    duration: Duration,
    elapsed: Duration,
    current: i32,
    finished: bool,
    interpolator: Interpolator,
}

impl Scroller {
    pub fn new(interpolator: Interpolator) -> Self {
        Self {
            start: 0,
            delta: 0,
            duration: Duration::ZERO,
            elapsed: Duration::ZERO,
            current: 0,
            finished: true,
            interpolator,
        }
    }

    /// Begin a new run from `start` to `start + delta`.
    ///
    /// Any run in progress is replaced without reaching its end value.
    pub fn start_scroll(&mut self, start: i32, delta: i32, duration: Duration) {
        self.start = start;
        self.delta = delta;
        self.duration = duration;
        self.elapsed = Duration::ZERO;
        self.current = start;
        self.finished = false;
    }

    /// Advance by `dt` and report the new value.
    ///
    /// The frame that crosses the duration snaps to the final value and
    /// reports `done`. Ticking a finished scroller returns its last value.
    pub fn tick(&mut self, dt: Duration) -> ScrollTick {
        if self.finished {
            return ScrollTick {
                value: self.current as f32,
                done: true,
            };
        }

        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed < self.duration {
            let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
            let eased = self.interpolator.evaluate(t);
            self.current = self.start + (eased * self.delta as f32).round() as i32;
        } else {
            self.current = self.final_value();
            self.finished = true;
        }

        ScrollTick {
            value: self.current as f32,
            done: self.finished,
        }
    }

    /// Stop immediately, leaving the value where it is
    pub fn force_finished(&mut self) {
        self.finished = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current_value(&self) -> f32 {
        self.current as f32
    }

    pub fn final_value(&self) -> i32 {
        self.start + self.delta
    }

    /// Time left before the current run reaches its final value
    pub fn time_remaining(&self) -> Duration {
        if self.finished {
            return Duration::ZERO;
        }
        self.duration.saturating_sub(self.elapsed)
    }
}

impl Default for Scroller {
    fn default() -> Self {
        Self::new(Interpolator::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn test_new_scroller_is_finished() {
        let mut scroller = Scroller::default();
        assert!(scroller.is_finished());
        assert_eq!(scroller.tick(FRAME), ScrollTick { value: 0.0, done: true });
    }

    #[test]
    fn test_run_reaches_final_value() {
        let mut scroller = Scroller::new(Interpolator::Decelerate(3.0));
        scroller.start_scroll(0, 258, Duration::from_millis(1200));

        let mut frames = 0;
        let mut last = scroller.tick(FRAME);
        while !last.done {
            last = scroller.tick(FRAME);
            frames += 1;
            assert!(frames < 1000, "scroller never finished");
        }
        assert_eq!(last.value, 258.0);
        assert!(scroller.is_finished());
    }

    #[test]
    fn test_values_increase_monotonically() {
        let mut scroller = Scroller::new(Interpolator::Decelerate(3.0));
        scroller.start_scroll(0, 300, Duration::from_millis(1200));

        let mut previous = 0.0;
        loop {
            let tick = scroller.tick(FRAME);
            assert!(tick.value >= previous, "{} < {}", tick.value, previous);
            previous = tick.value;
            if tick.done {
                break;
            }
        }
    }

    #[test]
    fn test_negative_delta_runs_down_to_zero() {
        let mut scroller = Scroller::new(Interpolator::Decelerate(3.0));
        scroller.start_scroll(120, -120, Duration::from_millis(800));

        let first = scroller.tick(FRAME);
        assert!(first.value < 120.0);
        assert!(!first.done);

        let last = scroller.tick(Duration::from_millis(800));
        assert!(last.done);
        assert_eq!(last.value, 0.0);
    }

    #[test]
    fn test_force_finished_keeps_current_value() {
        let mut scroller = Scroller::new(Interpolator::Linear);
        scroller.start_scroll(0, 100, Duration::from_millis(1000));
        let tick = scroller.tick(Duration::from_millis(500));
        assert_eq!(tick.value, 50.0);

        scroller.force_finished();
        assert!(scroller.is_finished());
        assert_eq!(scroller.current_value(), 50.0);
        assert_eq!(scroller.tick(FRAME).value, 50.0);
    }

    #[test]
    fn test_restart_resets_elapsed_time() {
        let mut scroller = Scroller::new(Interpolator::Linear);
        scroller.start_scroll(0, 100, Duration::from_millis(100));
        scroller.tick(Duration::from_millis(60));
        scroller.start_scroll(60, -60, Duration::from_millis(100));
        assert_eq!(scroller.time_remaining(), Duration::from_millis(100));
        assert_eq!(scroller.current_value(), 60.0);
        assert_eq!(scroller.final_value(), 0);
    }

    #[test]
    fn test_huge_step_finishes_instead_of_overflowing() {
        let mut scroller = Scroller::new(Interpolator::Decelerate(3.0));
        scroller.start_scroll(0, 100, Duration::from_millis(1200));
        scroller.tick(FRAME);
        let tick = scroller.tick(Duration::MAX);
        assert_eq!(tick, ScrollTick { value: 100.0, done: true });
    }

    #[test]
    fn test_time_remaining_counts_down() {
        let mut scroller = Scroller::new(Interpolator::Linear);
        scroller.start_scroll(0, 100, Duration::from_millis(100));
        scroller.tick(Duration::from_millis(30));
        assert_eq!(scroller.time_remaining(), Duration::from_millis(70));
        scroller.force_finished();
        assert_eq!(scroller.time_remaining(), Duration::ZERO);
    }
}
