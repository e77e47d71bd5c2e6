use std::sync::Arc;

use crate::animation::fit::fit_rect;
use crate::animation::transform::Transform;
use crate::assets::decode::DecodedImage;
use crate::foundation::core::{Affine, Canvas};
use crate::foundation::error::{StillmotionError, StillmotionResult};
use crate::foundation::math::premul_rgba8;
use crate::render::FrameRGBA;

/// Source image uploaded once as a `vello_cpu` paint.
#[derive(Clone)]
pub struct SourcePaint {
    paint: vello_cpu::Image,
    width: u32,
    height: u32,
}

impl SourcePaint {
    /// Upload a decoded image.
    pub fn from_decoded(img: &DecodedImage) -> StillmotionResult<Self> {
        let pixmap = pixmap_from_premul_bytes(&img.rgba8_premul, img.width, img.height)?;
        Ok(Self {
            paint: vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            },
            width: img.width,
            height: img.height,
        })
    }

    /// Source size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Raster surface owned by one capture session.
///
/// Every [`Surface::compose`] call starts from a reset context and leaves the transform at
/// identity with no open layers, so repeated frames never leak state into each other.
pub struct Surface {
    canvas: Canvas,
    background: [u8; 4],
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl Surface {
    /// Acquire a surface of `canvas` size cleared to `background_rgba` (alpha forced opaque).
    pub fn new(canvas: Canvas, background_rgba: [u8; 4]) -> StillmotionResult<Self> {
        let (w, h) = surface_dims(canvas)?;
        let [r, g, b, _] = background_rgba;
        Ok(Self {
            canvas,
            background: premul_rgba8([r, g, b, 255]),
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
        })
    }

    /// Surface size in pixels.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Clear to the background, then draw `image` at its aspect-fit rectangle under `transform`.
    pub fn compose(&mut self, transform: &Transform, image: &SourcePaint) -> FrameRGBA {
        let ctx = &mut self.ctx;
        let w = f64::from(self.canvas.width);
        let h = f64::from(self.canvas.height);

        ctx.reset();
        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        let [r, g, b, a] = self.background;
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));

        if !transform.is_invisible() {
            let src_w = f64::from(image.width);
            let src_h = f64::from(image.height);
            let fit = fit_rect(src_w, src_h, w, h);
            let place = Affine::translate((fit.x0, fit.y0))
                * Affine::scale_non_uniform(fit.width() / src_w, fit.height() / src_h);
            let tr = transform.to_affine(self.canvas.center()) * place;

            let opacity = transform.opacity as f32;
            ctx.set_transform(affine_to_cpu(tr));
            ctx.set_paint(image.paint.clone());
            if opacity < 1.0 {
                ctx.push_opacity_layer(opacity);
            }
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, src_w, src_h));
            if opacity < 1.0 {
                ctx.pop_layer();
            }
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);

        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
        }
    }
}

fn surface_dims(canvas: Canvas) -> StillmotionResult<(u16, u16)> {
    if canvas.width == 0 || canvas.height == 0 {
        return Err(StillmotionError::surface_unavailable(format!(
            "surface size must be non-zero, got {}x{}",
            canvas.width, canvas.height
        )));
    }
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| StillmotionError::surface_unavailable("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| StillmotionError::surface_unavailable("surface height exceeds u16"))?;
    Ok((w, h))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> StillmotionResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| StillmotionError::image_load("source image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| StillmotionError::image_load("source image height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(StillmotionError::image_load("source pixel buffer length mismatch"));
    }
    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in bytes.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
