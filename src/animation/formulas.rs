use crate::animation::transform::Transform;
use crate::foundation::core::Vec2;

pub(crate) mod attention;
pub(crate) mod composite;
pub(crate) mod entrances;
pub(crate) mod exits;

/// Inputs shared by every formula: wrapped progress and surface size in pixels.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FormulaInput {
    pub(crate) t: f64,
    pub(crate) w: f64,
    pub(crate) h: f64,
}

pub(crate) type Formula = fn(&FormulaInput) -> Transform;

/// Screen edge an element travels from (entrances) or towards (exits).
#[derive(Clone, Copy, Debug)]
pub(crate) enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// Offset of one full surface extent towards this edge.
    pub(crate) fn offset(self, i: &FormulaInput) -> Vec2 {
        match self {
            Self::Top => Vec2::new(0.0, -i.h),
            Self::Bottom => Vec2::new(0.0, i.h),
            Self::Left => Vec2::new(-i.w, 0.0),
            Self::Right => Vec2::new(i.w, 0.0),
        }
    }

    pub(crate) fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Translation that turns a rotation about the surface center into one about `pivot`
/// (`pivot` is relative to the center).
pub(crate) fn pivot_compensation(angle: f64, pivot: Vec2) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    let rotated = Vec2::new(pivot.x * cos - pivot.y * sin, pivot.x * sin + pivot.y * cos);
    pivot - rotated
}

pub(crate) fn deg(d: f64) -> f64 {
    d.to_radians()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/formulas.rs"]
mod tests;
