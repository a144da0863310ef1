//! Time management utilities

use std::time::{Duration, Instant};

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    /// Update the timer as if the frame began at `now`
    pub fn update_at(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.delta_time = elapsed.as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Frames counted over one reporting window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FpsSample {
    /// Frames presented during the window
    pub frames: u32,
    /// Duration of the most recent frame in seconds
    pub delta: f32,
}

/// Counts frames and reports once per wall-clock interval
///
/// Purely observational: nothing in the frame loop depends on its output.
pub struct FpsCounter {
    interval: Duration,
    window_start: Instant,
    frames: u32,
}

impl FpsCounter {
    /// Create a counter reporting every `interval`
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(interval, Instant::now())
    }

    /// Create a counter whose first window opens at `start`
    pub fn starting_at(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            window_start: start,
            frames: 0,
        }
    }

    /// Count one frame finished at `now`
    ///
    /// Returns a sample when the current window has elapsed, then starts a new one.
    pub fn tick(&mut self, now: Instant, delta: f32) -> Option<FpsSample> {
        self.frames += 1;

        if now.saturating_duration_since(self.window_start) < self.interval {
            return None;
        }

        let sample = FpsSample {
            frames: self.frames,
            delta,
        };
        self.frames = 0;
        self.window_start = now;
        Some(sample)
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_accumulates() {
        let start = Instant::now();
        let mut timer = Timer::new();
        timer.last_frame = start;

        timer.update_at(start + Duration::from_millis(20));
        timer.update_at(start + Duration::from_millis(50));

        assert_eq!(timer.frame_count(), 2);
        assert!((timer.delta_time() - 0.030).abs() < 1e-4);
        assert!((timer.total_time() - 0.050).abs() < 1e-4);
    }

    #[test]
    fn test_fps_counter_reports_once_per_interval() {
        let start = Instant::now();
        let mut counter = FpsCounter::starting_at(Duration::from_secs(1), start);

        for i in 1..60 {
            let now = start + Duration::from_millis(i * 16);
            assert!(counter.tick(now, 0.016).is_none());
        }

        let sample = counter
            .tick(start + Duration::from_millis(1000), 0.016)
            .expect("interval elapsed");
        assert_eq!(sample.frames, 60);

        // A fresh window begins after reporting
        assert!(counter.tick(start + Duration::from_millis(1016), 0.016).is_none());
    }
}
