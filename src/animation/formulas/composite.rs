//! Specials and custom kinds. Each layers at least two of scale, rotation, translation, skew and
//! opacity.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::animation::ease::Ease;
use crate::animation::formulas::{FormulaInput, deg, pivot_compensation};
use crate::animation::transform::Transform;
use crate::foundation::core::Vec2;

pub(crate) fn hinge(i: &FormulaInput) -> Transform {
    let pivot = Vec2::new(-i.w / 2.0, -i.h / 2.0);
    let (angle, drop, opacity) = if i.t < 0.2 {
        (deg(80.0) * Ease::InOutQuad.apply(i.t / 0.2), 0.0, 1.0)
    } else if i.t < 0.8 {
        // Swings between 80 and 60 degrees.
        let u = (i.t - 0.2) / 0.6;
        (deg(70.0) + deg(10.0) * (u * 1.5 * TAU).cos(), 0.0, 1.0)
    } else {
        let u = (i.t - 0.8) / 0.2;
        (deg(60.0), 0.7 * i.h * Ease::InQuad.apply(u), 1.0 - u)
    };
    let shift = pivot_compensation(angle, pivot);
    Transform {
        rotation: angle,
        translate_x: shift.x,
        translate_y: shift.y + drop,
        opacity,
        ..Transform::IDENTITY
    }
}

pub(crate) fn jack_in_the_box(i: &FormulaInput) -> Transform {
    let angle = deg(30.0) * (1.0 - i.t) * (i.t * 1.5 * TAU).cos();
    let shift = pivot_compensation(angle, Vec2::new(0.0, i.h / 2.0));
    Transform {
        rotation: angle,
        translate_x: shift.x,
        translate_y: shift.y,
        opacity: Ease::OutQuad.apply(i.t),
        ..Transform::uniform_scale(0.1 + 0.9 * Ease::OutBack.apply(i.t))
    }
}

pub(crate) fn roll_in(i: &FormulaInput) -> Transform {
    let rest = 1.0 - Ease::OutCubic.apply(i.t);
    Transform {
        translate_x: -i.w * rest,
        rotation: deg(-120.0) * rest,
        opacity: i.t,
        ..Transform::IDENTITY
    }
}

/// Default kind: pulsing scale from half size up to full size.
pub(crate) fn scale_in(i: &FormulaInput) -> Transform {
    Transform::uniform_scale(0.5 + i.t * 0.5)
}

pub(crate) fn scale_out(i: &FormulaInput) -> Transform {
    Transform::uniform_scale(1.0 - i.t * 0.5)
}

pub(crate) fn swirl_in(i: &FormulaInput) -> Transform {
    Transform {
        rotation: (1.0 - i.t) * TAU,
        ..Transform::uniform_scale(0.3 + i.t * 0.7)
    }
}

pub(crate) fn slide_in(i: &FormulaInput) -> Transform {
    Transform {
        translate_x: (1.0 - i.t) * i.w,
        ..Transform::IDENTITY
    }
}

pub(crate) fn spiral_in(i: &FormulaInput) -> Transform {
    let settle = Ease::OutCubic.apply(i.t);
    let radius = (1.0 - settle) * 0.5 * i.w.min(i.h);
    let (sin, cos) = (i.t * 2.0 * TAU).sin_cos();
    Transform {
        translate_x: radius * cos,
        translate_y: radius * sin,
        rotation: -(1.0 - i.t) * TAU,
        opacity: (i.t * FRAC_PI_2).sin(),
        ..Transform::uniform_scale(0.2 + 0.8 * settle)
    }
}

pub(crate) fn glitch_skew(i: &FormulaInput) -> Transform {
    let envelope = (i.t * PI).sin();
    Transform {
        skew_x: 0.35 * (i.t * 4.0 * TAU).sin() * envelope,
        translate_x: 0.03 * i.w * (i.t * 7.0 * TAU).sin() * envelope,
        scale_x: 1.0 + 0.04 * (i.t * 3.0 * TAU).sin(),
        opacity: 0.75 + 0.25 * (i.t * 6.0 * TAU).cos(),
        ..Transform::IDENTITY
    }
}
