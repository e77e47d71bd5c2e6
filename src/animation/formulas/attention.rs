//! Attention seekers: the element stays in place and loops around its rest pose.

use std::f64::consts::{PI, TAU};

use crate::animation::formulas::{FormulaInput, deg, pivot_compensation};
use crate::animation::transform::Transform;
use crate::foundation::core::Vec2;

pub(crate) fn bounce(i: &FormulaInput) -> Transform {
    let hop = (i.t * TAU).sin().abs();
    Transform {
        scale_x: 1.0 - 0.02 * hop,
        scale_y: 1.0 + 0.05 * hop,
        translate_y: -0.08 * i.h * hop,
        ..Transform::IDENTITY
    }
}

pub(crate) fn flash(i: &FormulaInput) -> Transform {
    Transform {
        opacity: 0.5 + 0.5 * (i.t * 2.0 * TAU).cos(),
        ..Transform::IDENTITY
    }
}

pub(crate) fn pulse(i: &FormulaInput) -> Transform {
    Transform::uniform_scale(1.0 + 0.05 * (i.t * PI).sin())
}

pub(crate) fn rubber_band(i: &FormulaInput) -> Transform {
    let stretch = 0.25 * (i.t * 2.0 * TAU).sin() * (1.0 - i.t);
    Transform {
        scale_x: 1.0 + stretch,
        scale_y: 1.0 - stretch,
        ..Transform::IDENTITY
    }
}

pub(crate) fn shake_x(i: &FormulaInput) -> Transform {
    Transform {
        translate_x: 0.02 * i.w * (i.t * 5.0 * TAU).sin(),
        ..Transform::IDENTITY
    }
}

pub(crate) fn shake_y(i: &FormulaInput) -> Transform {
    Transform {
        translate_y: 0.02 * i.h * (i.t * 5.0 * TAU).sin(),
        ..Transform::IDENTITY
    }
}

pub(crate) fn head_shake(i: &FormulaInput) -> Transform {
    // Shakes during the first half, rests for the second.
    let u = (i.t / 0.5).min(1.0);
    let wave = (u * 2.0 * TAU).sin() * (1.0 - u);
    Transform {
        translate_x: -0.012 * i.w * wave,
        rotation: deg(-9.0) * wave,
        ..Transform::IDENTITY
    }
}

pub(crate) fn swing(i: &FormulaInput) -> Transform {
    let angle = deg(15.0) * (i.t * 2.0 * TAU).sin() * (1.0 - i.t);
    let shift = pivot_compensation(angle, Vec2::new(0.0, -i.h / 2.0));
    Transform {
        rotation: angle,
        translate_x: shift.x,
        translate_y: shift.y,
        ..Transform::IDENTITY
    }
}

pub(crate) fn tada(i: &FormulaInput) -> Transform {
    let envelope = (i.t * PI).sin();
    Transform {
        rotation: deg(3.0) * (i.t * 5.0 * TAU).sin() * envelope,
        ..Transform::uniform_scale(1.0 + 0.1 * envelope)
    }
}

pub(crate) fn wobble(i: &FormulaInput) -> Transform {
    let wave = (i.t * 2.5 * TAU).sin() * (1.0 - i.t);
    Transform {
        translate_x: -0.25 * i.w * wave,
        rotation: deg(-5.0) * wave,
        ..Transform::IDENTITY
    }
}

pub(crate) fn jello(i: &FormulaInput) -> Transform {
    let skew = deg(-12.5) * (i.t * 3.0 * TAU).sin() * (i.t * PI).sin();
    Transform {
        skew_x: skew,
        skew_y: skew,
        ..Transform::IDENTITY
    }
}

pub(crate) fn heart_beat(i: &FormulaInput) -> Transform {
    // Two beats in the first 70% of the cycle, then rest.
    if i.t >= 0.7 {
        return Transform::IDENTITY;
    }
    let beat = (i.t / 0.7 * 2.0 * TAU).sin().max(0.0);
    Transform::uniform_scale(1.0 + 0.3 * beat)
}
