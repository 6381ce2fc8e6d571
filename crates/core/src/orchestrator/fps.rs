//! Frame-rate instrumentation for the scan loop.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::metrics;

const REPORT_WINDOW: Duration = Duration::from_secs(1);

/// Counts completed iterations and reports the observed rate once per
/// window, to the log and to the fps gauge.
pub(super) struct FpsCounter {
    window_started: Instant,
    frames: u32,
}

impl FpsCounter {
    pub(super) fn new() -> Self {
        Self {
            window_started: Instant::now(),
            frames: 0,
        }
    }

    pub(super) fn tick(&mut self) {
        self.frames += 1;
        let elapsed = self.window_started.elapsed();
        if elapsed >= REPORT_WINDOW {
            let fps = f64::from(self.frames) / elapsed.as_secs_f64();
            debug!(fps = format_args!("{fps:.1}"), "scan loop rate");
            metrics::CAMERA_FPS.set(fps);
            self.window_started = Instant::now();
            self.frames = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_accumulates_within_window() {
        let mut counter = FpsCounter::new();
        counter.tick();
        counter.tick();
        assert_eq!(counter.frames, 2);
    }
}
