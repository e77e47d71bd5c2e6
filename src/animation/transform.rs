use std::time::Duration;

use crate::animation::formulas::FormulaInput;
use crate::animation::kind::AnimationKind;
use crate::foundation::core::{Affine, Point, Vec2};

/// Normalized position within one animation cycle, in `[0, 1)`.
///
/// Only clock sampling creates progress values: [`Progress::from_elapsed`] during capture and
/// [`Progress::MIDPOINT`] for static formats.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Progress(f64);

impl Progress {
    /// Cycle midpoint, where static-format exports freeze the animation.
    pub const MIDPOINT: Progress = Progress(0.5);

    /// `(elapsed mod cycle) / cycle`. A zero cycle yields progress 0.
    pub fn from_elapsed(elapsed: Duration, cycle: Duration) -> Self {
        let cycle_ns = cycle.as_nanos();
        if cycle_ns == 0 {
            return Self(0.0);
        }
        let within = elapsed.as_nanos() % cycle_ns;
        Self(within as f64 / cycle_ns as f64)
    }

    /// Raw value in `[0, 1)`.
    pub fn value(self) -> f64 {
        self.0
    }
}

/// 2D affine parameters plus opacity applied to the source image for one frame.
///
/// Angles are radians. Translation is in surface pixels. Scale, rotation and skew act about the
/// surface center.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Transform {
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
    /// Clockwise rotation in radians (y axis points down).
    pub rotation: f64,
    /// Horizontal offset in pixels.
    pub translate_x: f64,
    /// Vertical offset in pixels.
    pub translate_y: f64,
    /// Horizontal skew angle in radians.
    pub skew_x: f64,
    /// Vertical skew angle in radians.
    pub skew_y: f64,
    /// Opacity in `[0, 1]`, computed independently of scale.
    pub opacity: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Rest pose: no geometric change, fully opaque.
    pub const IDENTITY: Transform = Transform {
        scale_x: 1.0,
        scale_y: 1.0,
        rotation: 0.0,
        translate_x: 0.0,
        translate_y: 0.0,
        skew_x: 0.0,
        skew_y: 0.0,
        opacity: 1.0,
    };

    /// Identity with a uniform scale.
    pub const fn uniform_scale(s: f64) -> Self {
        Self {
            scale_x: s,
            scale_y: s,
            ..Self::IDENTITY
        }
    }

    /// Translation component.
    pub fn translation(&self) -> Vec2 {
        Vec2::new(self.translate_x, self.translate_y)
    }

    /// Compose into an affine acting about `center`.
    ///
    /// Canonical order:
    /// `T(center) * T(translate) * R(rotation) * K(skew) * S(scale) * T(-center)`
    pub fn to_affine(&self, center: Point) -> Affine {
        let t_center = Affine::translate(center.to_vec2());
        let t_uncenter = Affine::translate(-center.to_vec2());
        let t_translate = Affine::translate(self.translation());
        let t_rotate = Affine::rotate(self.rotation);
        let t_skew = Affine::new([1.0, self.skew_y.tan(), self.skew_x.tan(), 1.0, 0.0, 0.0]);
        let t_scale = Affine::scale_non_uniform(self.scale_x, self.scale_y);
        t_center * t_translate * t_rotate * t_skew * t_scale * t_uncenter
    }

    /// `true` when the image would collapse to zero area or is fully transparent.
    pub fn is_invisible(&self) -> bool {
        self.opacity <= 0.0 || self.to_affine(Point::ORIGIN).determinant().abs() < 1e-9
    }

    /// Replace non-finite fields by their identity value and clamp opacity into `[0, 1]`.
    pub(crate) fn sanitize(self) -> Self {
        fn finite_or(v: f64, fallback: f64) -> f64 {
            if v.is_finite() { v } else { fallback }
        }
        let id = Self::IDENTITY;
        Self {
            scale_x: finite_or(self.scale_x, id.scale_x),
            scale_y: finite_or(self.scale_y, id.scale_y),
            rotation: finite_or(self.rotation, id.rotation),
            translate_x: finite_or(self.translate_x, id.translate_x),
            translate_y: finite_or(self.translate_y, id.translate_y),
            skew_x: finite_or(self.skew_x, id.skew_x),
            skew_y: finite_or(self.skew_y, id.skew_y),
            opacity: finite_or(self.opacity, id.opacity).clamp(0.0, 1.0),
        }
    }

    /// Sample `kind` at a clock-derived progress on a `width x height` surface.
    pub fn sample(kind: AnimationKind, progress: Progress, width: u32, height: u32) -> Self {
        compute_transform(kind, progress.value(), f64::from(width), f64::from(height))
    }
}

/// Wrap arbitrary progress into `[0, 1)`; `1.0` wraps to `0.0`, non-finite input maps to `0.0`.
pub(crate) fn wrap_progress(progress: f64) -> f64 {
    if !progress.is_finite() {
        return 0.0;
    }
    let wrapped = progress.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs.
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

fn positive_or_one(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 1.0 }
}

/// Compute the transform for `kind` at `progress` on a `width x height` surface.
///
/// Total over every kind, any progress value (treated modulo 1) and any dimensions (non-positive
/// dimensions are treated as 1). Output fields are always finite and opacity is in `[0, 1]`.
pub fn compute_transform(kind: AnimationKind, progress: f64, width: f64, height: f64) -> Transform {
    let input = FormulaInput {
        t: wrap_progress(progress),
        w: positive_or_one(width),
        h: positive_or_one(height),
    };
    (kind.formula())(&input).sanitize()
}

/// Like [`compute_transform`], resolving `tag` with [`AnimationKind::from_tag_or_default`].
///
/// Unknown tags deterministically produce the default (`scaleIn`) transform.
pub fn compute_transform_for_tag(tag: &str, progress: f64, width: f64, height: f64) -> Transform {
    compute_transform(
        AnimationKind::from_tag_or_default(tag),
        progress,
        width,
        height,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/animation/transform.rs"]
mod tests;
