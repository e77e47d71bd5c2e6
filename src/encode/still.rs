use crate::encode::codec::Codec;
use crate::encode::sink::{EncodedOutput, EncoderConfig, FrameEncoder};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{StillmotionError, StillmotionResult};
use crate::foundation::math::flatten_premul_over_bg;
use crate::render::FrameRGBA;

/// Single-frame encoder for static containers (GIF, lossless WebP), using the `image` crate.
pub struct StillImageEncoder {
    codec: Codec,
    cfg: Option<EncoderConfig>,
    frame: Option<Vec<u8>>,
}

impl StillImageEncoder {
    /// Create an encoder for a static codec.
    pub fn new(codec: Codec) -> StillmotionResult<Self> {
        if codec.is_video() {
            return Err(StillmotionError::encoding_unsupported(format!(
                "codec '{codec}' is not a still image codec"
            )));
        }
        Ok(Self {
            codec,
            cfg: None,
            frame: None,
        })
    }
}

impl FrameEncoder for StillImageEncoder {
    fn codec(&self) -> Codec {
        self.codec
    }

    fn begin(&mut self, cfg: EncoderConfig) -> StillmotionResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(StillmotionError::validation(
                "image encoder width/height must be non-zero",
            ));
        }
        if self.codec == Codec::Gif && (cfg.width > 0xffff || cfg.height > 0xffff) {
            return Err(StillmotionError::validation(
                "gif width/height must fit in 16 bits",
            ));
        }
        self.cfg = Some(cfg);
        self.frame = None;
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, frame: &FrameRGBA) -> StillmotionResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| StillmotionError::encoding_runtime("image encoder not started"))?;
        if self.frame.is_some() {
            return Err(StillmotionError::encoding_runtime(
                "image encoder accepts exactly one frame",
            ));
        }
        cfg.check_frame(frame)?;

        let mut opaque = vec![0u8; frame.data.len()];
        flatten_premul_over_bg(&mut opaque, &frame.data, cfg.bg_rgba);
        self.frame = Some(opaque);
        Ok(())
    }

    fn finish(&mut self) -> StillmotionResult<EncodedOutput> {
        let cfg = self
            .cfg
            .take()
            .ok_or_else(|| StillmotionError::encoding_runtime("image encoder not started"))?;
        let data = self
            .frame
            .take()
            .ok_or_else(|| StillmotionError::encoding_runtime("image encoder received no frame"))?;

        let mut buf = Vec::new();
        match self.codec {
            Codec::WebpLossless => {
                image::codecs::webp::WebPEncoder::new_lossless(&mut buf)
                    .encode(&data, cfg.width, cfg.height, image::ExtendedColorType::Rgba8)
                    .map_err(|e| {
                        StillmotionError::encoding_runtime(format!("webp encode failed: {e}"))
                    })?;
            }
            Codec::Gif => {
                // The GIF trailer is written when the encoder drops.
                let mut enc = image::codecs::gif::GifEncoder::new(&mut buf);
                enc.encode(&data, cfg.width, cfg.height, image::ExtendedColorType::Rgba8)
                    .map_err(|e| {
                        StillmotionError::encoding_runtime(format!("gif encode failed: {e}"))
                    })?;
                drop(enc);
            }
            other => {
                return Err(StillmotionError::encoding_unsupported(format!(
                    "codec '{other}' is not a still image codec"
                )));
            }
        }

        Ok(EncodedOutput {
            chunks: vec![buf],
            mime: self.codec.container().mime(),
        })
    }

    fn abort(&mut self) {
        self.cfg = None;
        self.frame = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/still.rs"]
mod tests;
