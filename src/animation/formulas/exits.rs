//! Exit families: the element leaves its rest pose by the end of the cycle.

use crate::animation::ease::Ease;
use crate::animation::formulas::{Edge, FormulaInput, deg};
use crate::animation::transform::Transform;

pub(crate) fn fade_out(i: &FormulaInput) -> Transform {
    Transform {
        opacity: 1.0 - i.t,
        ..Transform::IDENTITY
    }
}

pub(crate) fn flip_out_x(i: &FormulaInput) -> Transform {
    Transform {
        scale_y: (deg(90.0) * Ease::InQuad.apply(i.t)).cos(),
        opacity: 1.0 - i.t,
        ..Transform::IDENTITY
    }
}

pub(crate) fn flip_out_y(i: &FormulaInput) -> Transform {
    Transform {
        scale_x: (deg(90.0) * Ease::InQuad.apply(i.t)).cos(),
        opacity: 1.0 - i.t,
        ..Transform::IDENTITY
    }
}

fn light_speed_out(i: &FormulaInput, to: Edge) -> Transform {
    let sign = if matches!(to, Edge::Right) { 1.0 } else { -1.0 };
    let gone = Ease::InCubic.apply(i.t);
    Transform {
        translate_x: sign * i.w * gone,
        skew_x: sign * deg(30.0) * gone,
        opacity: 1.0 - i.t,
        ..Transform::IDENTITY
    }
}

pub(crate) fn light_speed_out_right(i: &FormulaInput) -> Transform {
    light_speed_out(i, Edge::Right)
}

pub(crate) fn light_speed_out_left(i: &FormulaInput) -> Transform {
    light_speed_out(i, Edge::Left)
}

pub(crate) fn rotate_out(i: &FormulaInput) -> Transform {
    Transform {
        rotation: deg(200.0) * Ease::InQuad.apply(i.t),
        opacity: 1.0 - i.t,
        ..Transform::IDENTITY
    }
}

pub(crate) fn zoom_out(i: &FormulaInput) -> Transform {
    Transform::uniform_scale(1.5 - 0.5 * i.t)
}

fn slide_out_to(i: &FormulaInput, to: Edge) -> Transform {
    let offset = to.offset(i) * Ease::InCubic.apply(i.t);
    Transform {
        translate_x: offset.x,
        translate_y: offset.y,
        ..Transform::IDENTITY
    }
}

pub(crate) fn slide_out_down(i: &FormulaInput) -> Transform {
    slide_out_to(i, Edge::Bottom)
}

pub(crate) fn slide_out_left(i: &FormulaInput) -> Transform {
    slide_out_to(i, Edge::Left)
}

pub(crate) fn slide_out_right(i: &FormulaInput) -> Transform {
    slide_out_to(i, Edge::Right)
}

pub(crate) fn slide_out_up(i: &FormulaInput) -> Transform {
    slide_out_to(i, Edge::Top)
}
