//! Wall-clock frame timing
//!
//! Measures the real time between redraws. The simulation uses it only for the
//! respawn timer; movement is per frame.

use std::time::{Duration, Instant};

/// Longest delta a single frame may report
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

const FPS_SAMPLE_COUNT: usize = 60;

pub struct FrameClock {
    last_instant: Option<Instant>,
    pub frame_count: u64,
    fps_samples: [f32; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_instant: None,
            frame_count: 0,
            fps_samples: [1.0 / 60.0; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 60.0,
        }
    }

    /// Time since the previous call (zero on the first call)
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let raw = self
            .last_instant
            .map(|last| now.duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last_instant = Some(now);
        self.record(raw)
    }

    /// Cap and record a measured delta
    fn record(&mut self, raw: Duration) -> Duration {
        let dt = cap_frame_delta(raw);
        self.frame_count += 1;

        self.fps_samples[self.fps_sample_index] = dt.as_secs_f32();
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt = self.fps_samples.iter().sum::<f32>() / FPS_SAMPLE_COUNT as f32;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };

        if self.frame_count % 600 == 0 {
            log::debug!("~{:.0} fps", self.smoothed_fps);
        }
        dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamp a stalled frame (window drag, breakpoint) to [`MAX_FRAME_DELTA`]
pub fn cap_frame_delta(raw: Duration) -> Duration {
    if raw > MAX_FRAME_DELTA {
        log::warn!(
            "Frame took {:.1}ms, capping to {}ms",
            raw.as_secs_f64() * 1000.0,
            MAX_FRAME_DELTA.as_millis()
        );
        MAX_FRAME_DELTA
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(), Duration::ZERO);
        assert_eq!(clock.frame_count, 1);
    }

    #[test]
    fn test_cap_frame_delta() {
        assert_eq!(cap_frame_delta(Duration::from_millis(16)), Duration::from_millis(16));
        assert_eq!(cap_frame_delta(Duration::from_secs(3)), MAX_FRAME_DELTA);
    }

    #[test]
    fn test_fps_smoothing_converges() {
        let mut clock = FrameClock::new();
        for _ in 0..FPS_SAMPLE_COUNT {
            clock.record(Duration::from_millis(10));
        }
        assert!((clock.smoothed_fps - 100.0).abs() < 0.5);
    }
}
