use std::time::{Duration, Instant};

use crate::foundation::core::Fps;

/// Time source for the capture loop.
///
/// `start` is called once when recording begins; `elapsed` is measured from that point.
pub trait FrameClock {
    /// Mark the start of recording.
    fn start(&mut self);
    /// Time since `start`.
    fn elapsed(&self) -> Duration;
    /// Yield until the next frame is due at `fps`.
    ///
    /// Returns how many frame slots the clock moved forward, at least 1. More than one means
    /// deadlines were missed and the caller should hold its last frame for the extra slots.
    fn wait_next_frame(&mut self, fps: Fps) -> u64;
}

/// Deterministic clock: each `wait_next_frame` advances exactly one frame, with no sleeping.
#[derive(Clone, Debug, Default)]
pub struct SimulatedClock {
    ticks: u64,
    fps: Option<Fps>,
}

impl SimulatedClock {
    /// A clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames advanced since `start`.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl FrameClock for SimulatedClock {
    fn start(&mut self) {
        self.ticks = 0;
        self.fps = None;
    }

    fn elapsed(&self) -> Duration {
        match self.fps {
            Some(fps) => fps.frames_to_duration(self.ticks),
            None => Duration::ZERO,
        }
    }

    fn wait_next_frame(&mut self, fps: Fps) -> u64 {
        self.fps = Some(fps);
        self.ticks += 1;
        1
    }
}

/// Wall clock that sleeps until each frame deadline.
///
/// Deadlines are absolute (`start + n / fps`), so a slow frame shortens the next wait rather than
/// pushing every later frame back. Deadlines missed entirely are reported as extra slots by
/// `wait_next_frame`.
#[derive(Clone, Debug, Default)]
pub struct RealTimeClock {
    started: Option<Instant>,
    ticks: u64,
}

impl RealTimeClock {
    /// A clock that starts on the first `start` call.
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameClock for RealTimeClock {
    fn start(&mut self) {
        self.started = Some(Instant::now());
        self.ticks = 0;
    }

    fn elapsed(&self) -> Duration {
        self.started.map(|t| t.elapsed()).unwrap_or_default()
    }

    fn wait_next_frame(&mut self, fps: Fps) -> u64 {
        let started = *self.started.get_or_insert_with(Instant::now);
        let prev = self.ticks;
        self.ticks += 1;
        let deadline = started + fps.frames_to_duration(self.ticks);
        let now = Instant::now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        } else {
            // Behind schedule; skip the deadlines already missed.
            let behind = now - started;
            let due = fps.secs_to_frames_ceil(behind.as_secs_f64());
            self.ticks = self.ticks.max(due);
        }
        self.ticks - prev
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/clock.rs"]
mod tests;
