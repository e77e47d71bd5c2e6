use std::sync::Arc;

use crate::foundation::error::{StillmotionError, StillmotionResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// A fully decoded source image.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl DecodedImage {
    /// Source aspect ratio (`width / height`).
    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height.max(1))
    }
}

/// Decode PNG/JPEG/WebP/GIF/... bytes into premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> StillmotionResult<DecodedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| StillmotionError::image_load(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(StillmotionError::image_load("decoded image has no pixels"));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(DecodedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
