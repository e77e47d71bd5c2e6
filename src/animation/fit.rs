use crate::foundation::core::Rect;

/// Largest rectangle with the source aspect ratio that fits inside `dst_w x dst_h`, centered on
/// both axes.
///
/// Shared by every animation kind; the transform is applied on top of this rectangle. Degenerate
/// sources (zero or non-finite size) yield an empty rectangle at the target center.
pub fn fit_rect(src_w: f64, src_h: f64, dst_w: f64, dst_h: f64) -> Rect {
    let cx = dst_w / 2.0;
    let cy = dst_h / 2.0;
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !(valid(src_w) && valid(src_h) && valid(dst_w) && valid(dst_h)) {
        return Rect::new(cx, cy, cx, cy);
    }

    let scale = (dst_w / src_w).min(dst_h / src_h);
    let w = (src_w * scale).min(dst_w);
    let h = (src_h * scale).min(dst_h);
    let x0 = (dst_w - w) / 2.0;
    let y0 = (dst_h - h) / 2.0;
    Rect::new(x0, y0, x0 + w, y0 + h)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/fit.rs"]
mod tests;
