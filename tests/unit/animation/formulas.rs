use super::*;
use crate::animation::kind::AnimationKind;
use crate::animation::transform::compute_transform;

fn input(t: f64) -> FormulaInput {
    FormulaInput {
        t,
        w: 1024.0,
        h: 576.0,
    }
}

fn active_channels(t: &Transform) -> usize {
    let id = Transform::IDENTITY;
    let eps = 1e-9;
    let scale = (t.scale_x - id.scale_x).abs() > eps || (t.scale_y - id.scale_y).abs() > eps;
    let rotation = t.rotation.abs() > eps;
    let translation = t.translate_x.abs() > eps || t.translate_y.abs() > eps;
    let skew = t.skew_x.abs() > eps || t.skew_y.abs() > eps;
    let opacity = (t.opacity - 1.0).abs() > eps;
    [scale, rotation, translation, skew, opacity]
        .into_iter()
        .filter(|c| *c)
        .count()
}

#[test]
fn pivot_compensation_keeps_pivot_fixed() {
    let pivot = Vec2::new(-50.0, 30.0);
    let angle = 0.7;
    let shift = pivot_compensation(angle, pivot);
    let (s, c) = angle.sin_cos();
    let rotated = Vec2::new(pivot.x * c - pivot.y * s, pivot.x * s + pivot.y * c);
    let moved = rotated + shift;
    assert!((moved - pivot).hypot() < 1e-9);
}

#[test]
fn bounce_scale_and_offset_follow_abs_sine() {
    let t = attention::bounce(&input(0.25));
    assert!((t.scale_y - 1.05).abs() < 1e-12);
    assert!((t.translate_y + 0.08 * 576.0).abs() < 1e-9);
    let rest = attention::bounce(&input(0.5));
    assert!(rest.translate_y.abs() < 1e-9);
}

#[test]
fn directional_fades_ramp_with_sine() {
    let mid = entrances::fade_in_up(&input(0.5));
    assert!((mid.opacity - 1.0).abs() < 1e-12);
    let start = entrances::fade_in_up(&input(0.0));
    assert_eq!(start.opacity, 0.0);
    assert_eq!(start.translate_y, 576.0);
}

#[test]
fn legacy_kinds_match_reference_curves() {
    assert_eq!(composite::scale_in(&input(0.5)).scale_x, 0.75);
    assert_eq!(composite::scale_out(&input(0.5)).scale_x, 0.75);
    assert_eq!(exits::zoom_out(&input(0.0)).scale_x, 1.5);
    assert_eq!(entrances::fade_in(&input(0.3)).opacity, 0.3);
    assert_eq!(composite::slide_in(&input(0.25)).translate_x, 768.0);
    let swirl = composite::swirl_in(&input(0.5));
    assert!((swirl.scale_x - 0.65).abs() < 1e-12);
    assert!((swirl.rotation - std::f64::consts::PI).abs() < 1e-12);
    assert_eq!(entrances::bounce_in(&input(0.25)).scale_x, 0.125);
}

#[test]
fn rotate_family_spins_full_turns() {
    let t = entrances::rotate_in(&input(0.5));
    assert!((t.rotation - std::f64::consts::PI).abs() < 1e-12);
}

#[test]
fn opacity_is_independent_of_scale() {
    // Fully transparent while still geometrically non-trivial.
    let t = entrances::bounce_in_down(&input(0.0));
    assert_eq!(t.opacity, 0.0);
    assert!(t.translate_y.abs() > 0.0);
    let zoom = entrances::zoom_in(&input(0.0));
    assert_eq!(zoom.opacity, 0.0);
    assert!((zoom.scale_x - 0.3).abs() < 1e-12);
}

#[test]
fn composite_kinds_layer_multiple_channels() {
    for kind in [
        AnimationKind::SwirlIn,
        AnimationKind::SpiralIn,
        AnimationKind::GlitchSkew,
        AnimationKind::Hinge,
        AnimationKind::JackInTheBox,
        AnimationKind::RollIn,
    ] {
        let max = (1..20)
            .map(|s| active_channels(&compute_transform(kind, f64::from(s) / 20.0, 1024.0, 576.0)))
            .max()
            .unwrap_or(0);
        assert!(max >= 2, "{kind} only animates {max} channel(s)");
    }
}

#[test]
fn entrances_end_near_rest_pose() {
    let near_end = 0.999;
    for kind in [
        AnimationKind::BackInLeft,
        AnimationKind::SlideInRight,
        AnimationKind::ZoomInDown,
        AnimationKind::LightSpeedInLeft,
        AnimationKind::RotateInDownLeft,
    ] {
        let t = compute_transform(kind, near_end, 1024.0, 576.0);
        assert!(t.translation().hypot() < 10.0, "{kind}: {t:?}");
        assert!(t.opacity > 0.9, "{kind}: {t:?}");
    }
}

#[test]
fn hinge_drops_and_fades_at_the_end() {
    let late = composite::hinge(&input(0.95));
    assert!(late.opacity < 0.3);
    let early = composite::hinge(&input(0.5));
    assert_eq!(early.opacity, 1.0);
    assert!(early.rotation > deg(59.0) && early.rotation < deg(81.0));
}

#[test]
fn bounce_in_from_edge_touches_down_then_rests() {
    let start = entrances::bounce_in_up(&input(0.0));
    assert_eq!(start.translate_y, 576.0);
    let touchdown = entrances::bounce_in_up(&input(1.0 / 2.75));
    assert!(touchdown.translate_y.abs() < 1e-9);
    let rebound = entrances::bounce_in_up(&input(0.55));
    assert!(rebound.translate_y > 1.0);
    let rest = entrances::bounce_in_up(&input(1.0));
    assert!(rest.translate_y.abs() < 1e-9);
}
