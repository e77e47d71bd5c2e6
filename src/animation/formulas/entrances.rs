//! Entrance families: the element arrives at its rest pose by the end of the cycle.

use std::f64::consts::{PI, TAU};

use crate::animation::ease::Ease;
use crate::animation::formulas::{Edge, FormulaInput, deg, pivot_compensation};
use crate::animation::transform::Transform;
use crate::foundation::core::Vec2;

fn translated(base: Transform, offset: Vec2) -> Transform {
    Transform {
        translate_x: base.translate_x + offset.x,
        translate_y: base.translate_y + offset.y,
        ..base
    }
}

// Back entrances: fly in at 70% size, then grow to full size.

fn back_in(i: &FormulaInput, from: Edge) -> Transform {
    let (travel, grow) = if i.t < 0.8 {
        (1.0 - Ease::OutCubic.apply(i.t / 0.8), 0.0)
    } else {
        (0.0, (i.t - 0.8) / 0.2)
    };
    let opacity = if i.t < 0.8 { 0.7 } else { 0.7 + 0.3 * grow };
    let base = Transform {
        opacity,
        ..Transform::uniform_scale(0.7 + 0.3 * grow)
    };
    translated(base, from.offset(i) * (1.2 * travel))
}

pub(crate) fn back_in_down(i: &FormulaInput) -> Transform {
    back_in(i, Edge::Top)
}

pub(crate) fn back_in_left(i: &FormulaInput) -> Transform {
    back_in(i, Edge::Left)
}

pub(crate) fn back_in_right(i: &FormulaInput) -> Transform {
    back_in(i, Edge::Right)
}

pub(crate) fn back_in_up(i: &FormulaInput) -> Transform {
    back_in(i, Edge::Bottom)
}

// Bouncing entrances.

pub(crate) fn bounce_in(i: &FormulaInput) -> Transform {
    Transform::uniform_scale(Ease::InOutQuad.apply(i.t))
}

fn bounce_in_from(i: &FormulaInput, from: Edge) -> Transform {
    // First touchdown at t = 1/2.75, then shrinking rebounds until rest at t = 1.
    let rebound = 1.0 - Ease::OutBounce.apply(i.t);
    let squash = 1.0 + 0.1 * (i.t * TAU).sin().abs() * (1.0 - i.t);
    let (scale_x, scale_y) = if from.is_vertical() {
        (1.0 / squash, squash)
    } else {
        (squash, 1.0 / squash)
    };
    let base = Transform {
        scale_x,
        scale_y,
        opacity: (i.t * 4.0).min(1.0),
        ..Transform::IDENTITY
    };
    translated(base, from.offset(i) * rebound)
}

pub(crate) fn bounce_in_down(i: &FormulaInput) -> Transform {
    bounce_in_from(i, Edge::Top)
}

pub(crate) fn bounce_in_left(i: &FormulaInput) -> Transform {
    bounce_in_from(i, Edge::Left)
}

pub(crate) fn bounce_in_right(i: &FormulaInput) -> Transform {
    bounce_in_from(i, Edge::Right)
}

pub(crate) fn bounce_in_up(i: &FormulaInput) -> Transform {
    bounce_in_from(i, Edge::Bottom)
}

// Fading entrances. Directional fades ramp opacity with sin(t*pi) so both cycle ends are
// transparent.

pub(crate) fn fade_in(i: &FormulaInput) -> Transform {
    Transform {
        opacity: i.t,
        ..Transform::IDENTITY
    }
}

fn fade_in_from(i: &FormulaInput, offset: Vec2) -> Transform {
    let base = Transform {
        opacity: (i.t * PI).sin(),
        ..Transform::IDENTITY
    };
    translated(base, offset * (1.0 - Ease::OutCubic.apply(i.t)))
}

pub(crate) fn fade_in_down(i: &FormulaInput) -> Transform {
    fade_in_from(i, Edge::Top.offset(i))
}

pub(crate) fn fade_in_left(i: &FormulaInput) -> Transform {
    fade_in_from(i, Edge::Left.offset(i))
}

pub(crate) fn fade_in_right(i: &FormulaInput) -> Transform {
    fade_in_from(i, Edge::Right.offset(i))
}

pub(crate) fn fade_in_up(i: &FormulaInput) -> Transform {
    fade_in_from(i, Edge::Bottom.offset(i))
}

pub(crate) fn fade_in_top_left(i: &FormulaInput) -> Transform {
    fade_in_from(i, Edge::Top.offset(i) + Edge::Left.offset(i))
}

pub(crate) fn fade_in_bottom_right(i: &FormulaInput) -> Transform {
    fade_in_from(i, Edge::Bottom.offset(i) + Edge::Right.offset(i))
}

// Flippers. A rotation about a screen axis is projected onto the 2D plane as a cosine scale.

pub(crate) fn flip(i: &FormulaInput) -> Transform {
    let lift = 1.0 + 0.2 * (i.t * PI).sin();
    Transform {
        scale_x: (i.t * TAU).cos() * lift,
        scale_y: lift,
        ..Transform::IDENTITY
    }
}

pub(crate) fn flip_in_x(i: &FormulaInput) -> Transform {
    let angle = deg(90.0) * (1.0 - Ease::OutBack.apply(i.t));
    Transform {
        scale_y: angle.cos(),
        opacity: Ease::OutQuad.apply(i.t),
        ..Transform::IDENTITY
    }
}

pub(crate) fn flip_in_y(i: &FormulaInput) -> Transform {
    let angle = deg(90.0) * (1.0 - Ease::OutBack.apply(i.t));
    Transform {
        scale_x: angle.cos(),
        opacity: Ease::OutQuad.apply(i.t),
        ..Transform::IDENTITY
    }
}

// Lightspeed entrances: slide in along x while the skew relaxes.

fn light_speed_in(i: &FormulaInput, from: Edge) -> Transform {
    let sign = if matches!(from, Edge::Right) { 1.0 } else { -1.0 };
    let rest = 1.0 - Ease::OutCubic.apply(i.t);
    Transform {
        translate_x: sign * i.w * rest,
        skew_x: -sign * deg(30.0) * rest,
        opacity: Ease::OutQuad.apply(i.t),
        ..Transform::IDENTITY
    }
}

pub(crate) fn light_speed_in_right(i: &FormulaInput) -> Transform {
    light_speed_in(i, Edge::Right)
}

pub(crate) fn light_speed_in_left(i: &FormulaInput) -> Transform {
    light_speed_in(i, Edge::Left)
}

// Rotating entrances.

pub(crate) fn rotate_in(i: &FormulaInput) -> Transform {
    Transform {
        rotation: i.t * TAU,
        ..Transform::IDENTITY
    }
}

/// Rotate from `start_deg` to rest about a bottom corner of the surface.
fn rotate_in_about(i: &FormulaInput, corner: Edge, start_deg: f64) -> Transform {
    let x = match corner {
        Edge::Left => -i.w / 2.0,
        _ => i.w / 2.0,
    };
    let angle = deg(start_deg) * (1.0 - Ease::OutCubic.apply(i.t));
    let shift = pivot_compensation(angle, Vec2::new(x, i.h / 2.0));
    Transform {
        rotation: angle,
        translate_x: shift.x,
        translate_y: shift.y,
        opacity: i.t,
        ..Transform::IDENTITY
    }
}

pub(crate) fn rotate_in_down_left(i: &FormulaInput) -> Transform {
    rotate_in_about(i, Edge::Left, -45.0)
}

pub(crate) fn rotate_in_down_right(i: &FormulaInput) -> Transform {
    rotate_in_about(i, Edge::Right, 45.0)
}

pub(crate) fn rotate_in_up_left(i: &FormulaInput) -> Transform {
    rotate_in_about(i, Edge::Left, 45.0)
}

pub(crate) fn rotate_in_up_right(i: &FormulaInput) -> Transform {
    rotate_in_about(i, Edge::Right, -90.0)
}

// Zooming entrances.

pub(crate) fn zoom_in(i: &FormulaInput) -> Transform {
    Transform {
        opacity: (i.t * 2.0).min(1.0),
        ..Transform::uniform_scale(0.3 + 0.7 * Ease::OutCubic.apply(i.t))
    }
}

fn zoom_in_from(i: &FormulaInput, from: Edge) -> Transform {
    // Shrunk and far away until 60%, slightly past the rest pose, then settle.
    let (scale, travel) = if i.t < 0.6 {
        let u = Ease::InQuad.apply(i.t / 0.6);
        (0.1 + 0.375 * u, 1.0 - 1.06 * u)
    } else {
        let u = Ease::OutQuad.apply((i.t - 0.6) / 0.4);
        (0.475 + 0.525 * u, -0.06 * (1.0 - u))
    };
    let base = Transform {
        opacity: (i.t / 0.6).min(1.0),
        ..Transform::uniform_scale(scale)
    };
    translated(base, from.offset(i) * travel)
}

pub(crate) fn zoom_in_down(i: &FormulaInput) -> Transform {
    zoom_in_from(i, Edge::Top)
}

pub(crate) fn zoom_in_left(i: &FormulaInput) -> Transform {
    zoom_in_from(i, Edge::Left)
}

pub(crate) fn zoom_in_right(i: &FormulaInput) -> Transform {
    zoom_in_from(i, Edge::Right)
}

pub(crate) fn zoom_in_up(i: &FormulaInput) -> Transform {
    zoom_in_from(i, Edge::Bottom)
}

// Sliding entrances.

fn slide_in_from(i: &FormulaInput, from: Edge) -> Transform {
    translated(
        Transform::IDENTITY,
        from.offset(i) * (1.0 - Ease::OutCubic.apply(i.t)),
    )
}

pub(crate) fn slide_in_down(i: &FormulaInput) -> Transform {
    slide_in_from(i, Edge::Top)
}

pub(crate) fn slide_in_left(i: &FormulaInput) -> Transform {
    slide_in_from(i, Edge::Left)
}

pub(crate) fn slide_in_right(i: &FormulaInput) -> Transform {
    slide_in_from(i, Edge::Right)
}

pub(crate) fn slide_in_up(i: &FormulaInput) -> Transform {
    slide_in_from(i, Edge::Bottom)
}
