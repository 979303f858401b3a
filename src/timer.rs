//! Performance measurement tools.

use std::{
    fmt, mem,
    sync::Mutex,
    time::{Duration, Instant},
};

const EMA_ALPHA: f32 = 0.3;

/// A timer that can measure and average the time an operation takes.
///
/// Collected timings are averaged and reset when the timer is displayed using `{}`
/// ([`std::fmt::Display`]).
pub struct Timer {
    name: &'static str,
    state: Mutex<State>,
}

struct State {
    /// The current exponential moving average of measured times, in seconds.
    avg: f32,
    /// The number of time measurements that contributed to the current `avg`.
    count: usize,
}

impl Timer {
    /// Creates a new timer.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: Mutex::new(State { avg: 0.0, count: 0 }),
        }
    }

    /// Invokes a closure, measuring and recording the time it takes.
    pub fn time<T>(&self, timee: impl FnOnce() -> T) -> T {
        let _guard = self.start();
        timee()
    }

    /// Starts timing an operation using a drop guard.
    ///
    /// When the returned [`TimerGuard`] is dropped, the time between the call to `start` and the
    /// drop is measured and recorded.
    pub fn start(&self) -> TimerGuard<'_> {
        TimerGuard {
            start: Instant::now(),
            timer: self,
        }
    }

    fn stop(&self, start: Instant) {
        let secs = start.elapsed().as_secs_f32();
        let mut state = self.state.lock().unwrap();
        state.avg = if state.count == 0 {
            secs
        } else {
            EMA_ALPHA * secs + (1.0 - EMA_ALPHA) * state.avg
        };
        state.count += 1;
    }
}

/// Displays the average recorded time and resets it.
impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut state = self.state.lock().unwrap();

        let avg = mem::replace(&mut state.avg, 0.0);
        let len = mem::replace(&mut state.count, 0);
        let avg_ms = avg * 1000.0;

        write!(f, "{}: {len}x{avg_ms:.01}ms", self.name)
    }
}

/// Cloning a timer resets its collected timings.
impl Clone for Timer {
    fn clone(&self) -> Self {
        Self::new(self.name)
    }
}

/// Guard returned by [`Timer::start`]. Stops timing the operation when dropped.
pub struct TimerGuard<'a> {
    start: Instant,
    timer: &'a Timer,
}

impl Drop for TimerGuard<'_> {
    fn drop(&mut self) {
        self.timer.stop(self.start);
    }
}

/// Computes the instantaneous frame rate from two consecutive frame timestamps.
///
/// Returns `1 / (current − previous)`, or [`None`] when the timestamps are equal (there is no
/// meaningful rate for zero elapsed time, and the naive formula would divide by zero). A
/// `current` that lies before `previous` is treated the same way.
pub fn fps(previous: Instant, current: Instant) -> Option<f32> {
    let elapsed = current.saturating_duration_since(previous);
    if elapsed.is_zero() {
        return None;
    }

    Some(1.0 / elapsed.as_secs_f32())
}

/// Derives an instantaneous FPS value from the timestamps of consecutive frames.
///
/// The previous frame's timestamp is threaded internally; [`FpsEstimator::tick`] yields [`None`]
/// on the first frame, where no previous timestamp exists yet.
#[derive(Debug, Default)]
pub struct FpsEstimator {
    prev: Option<Instant>,
}

impl FpsEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a frame timestamp and returns the FPS value derived from the previous one.
    pub fn tick(&mut self) -> Option<f32> {
        let now = Instant::now();
        let fps = self.prev.and_then(|prev| fps(prev, now));
        self.prev = Some(now);
        fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fps_from_timestamps() {
        let t0 = Instant::now();

        assert_relative_eq!(fps(t0, t0 + Duration::from_millis(500)).unwrap(), 2.0);
        assert_relative_eq!(fps(t0, t0 + Duration::from_secs(2)).unwrap(), 0.5);
        assert_relative_eq!(
            fps(t0, t0 + Duration::from_micros(16_667)).unwrap(),
            60.0,
            max_relative = 1e-3,
        );
    }

    #[test]
    fn fps_degenerate_timing() {
        let t0 = Instant::now();

        // Equal timestamps must not divide by zero.
        assert_eq!(fps(t0, t0), None);
        // Neither must a timestamp pair in the wrong order.
        assert_eq!(fps(t0 + Duration::from_secs(1), t0), None);
    }

    #[test]
    fn estimator_skips_first_frame() {
        let mut estimator = FpsEstimator::new();
        assert_eq!(estimator.tick(), None);
        assert!(estimator.tick().is_some());
    }

    #[test]
    fn timer_records_and_resets() {
        let timer = Timer::new("op");
        timer.time(|| std::thread::sleep(Duration::from_millis(1)));
        timer.time(|| ());

        let display = timer.to_string();
        assert!(display.starts_with("op: 2x"), "{display}");
        // Displaying resets the collected timings.
        assert!(timer.to_string().starts_with("op: 0x"));
    }
}
