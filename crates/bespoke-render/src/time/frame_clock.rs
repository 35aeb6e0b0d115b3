use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Seconds since the clock started, accumulated from clamped deltas.
    ///
    /// Animated shaders read this value; because it is built from clamped
    /// deltas it never jumps after a stall.
    pub elapsed: f32,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped so a paused tab, a debugger stop or a minimized
/// window does not make animations leap forward.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    elapsed: f64,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default clamps (0.1 ms .. 250 ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            elapsed: 0.0,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the delta baseline without rewinding `elapsed`.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = self.advance(now.saturating_duration_since(self.last));
        self.last = now;
        dt
    }

    fn advance(&mut self, raw: Duration) -> FrameTime {
        let dt = raw.clamp(self.dt_min, self.dt_max);
        self.elapsed += dt.as_secs_f64();

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: self.elapsed as f32,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_stall_is_clamped() {
        let mut clock = FrameClock::new();
        let ft = clock.advance(Duration::from_secs(10));
        assert!((ft.dt - 0.25).abs() < 1e-6);
        assert!((ft.elapsed - 0.25).abs() < 1e-6);
    }

    #[test]
    fn elapsed_accumulates_and_index_increments() {
        let mut clock = FrameClock::new();
        let a = clock.advance(Duration::from_millis(16));
        let b = clock.advance(Duration::from_millis(16));
        assert_eq!(a.frame_index, 0);
        assert_eq!(b.frame_index, 1);
        assert!((b.elapsed - 0.032).abs() < 1e-4);
    }
}
