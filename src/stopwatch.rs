//! Scoped elapsed-time measurement.

use std::time::{Duration, Instant};

/// Stopwatch owned by the call that needs the timing, not by the process.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Stopwatch {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Elapsed time as `HH:MM:SS.cc`.
    pub fn elapsed_display(&self) -> String {
        let elapsed = self.elapsed();
        let total_seconds = elapsed.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;
        let centiseconds = elapsed.subsec_millis() / 10;
        format!("{hours:02}:{minutes:02}:{seconds:02}.{centiseconds:02}")
    }
}
