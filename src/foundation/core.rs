use std::time::Duration;

use crate::foundation::error::{StillmotionError, StillmotionResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// 0-based index of a captured frame within one capture session.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Capture cadence used for motion formats.
    pub const CAPTURE: Fps = Fps { num: 30, den: 1 };

    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> StillmotionResult<Self> {
        if den == 0 {
            return Err(StillmotionError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(StillmotionError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Exact wall time at which frame `frames` starts, in whole nanoseconds.
    ///
    /// Integer math keeps simulated timelines free of accumulated float drift: 60 frames at
    /// 30 fps land on exactly 2 s.
    pub fn frames_to_duration(self, frames: u64) -> Duration {
        let nanos = u128::from(frames) * 1_000_000_000u128 * u128::from(self.den)
            / u128::from(self.num);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }

    /// Convert seconds to frame count using ceil semantics.
    pub fn secs_to_frames_ceil(self, secs: f64) -> u64 {
        (secs * self.as_f64()).ceil().max(0.0) as u64
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Canvas center in pixel space.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// Canvas bounds as a rectangle anchored at the origin.
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
