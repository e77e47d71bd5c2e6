use std::sync::{Arc, Mutex};

use crate::encode::codec::Codec;
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{StillmotionError, StillmotionResult};
use crate::render::FrameRGBA;

/// Configuration provided to a [`FrameEncoder`] before the first frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
    /// Background used to flatten any residual alpha (RGBA8, straight alpha).
    pub bg_rgba: [u8; 4],
}

impl EncoderConfig {
    pub(crate) fn check_frame(&self, frame: &FrameRGBA) -> StillmotionResult<()> {
        if frame.width != self.width || frame.height != self.height {
            return Err(StillmotionError::encoding_runtime(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.width, self.height
            )));
        }
        if frame.data.len() != (self.width as usize) * (self.height as usize) * 4 {
            return Err(StillmotionError::encoding_runtime(
                "frame.data size mismatch with width*height*4",
            ));
        }
        Ok(())
    }
}

/// Encoded bytes as emitted by the encoder, in emission order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncodedOutput {
    /// Non-empty chunks in the order they were produced.
    pub chunks: Vec<Vec<u8>>,
    /// MIME type of the concatenated bytes.
    pub mime: &'static str,
}

impl EncodedOutput {
    /// Total byte length across all chunks.
    pub fn len(&self) -> usize {
        self.chunks.iter().map(Vec::len).sum()
    }

    /// `true` when no bytes were produced.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concatenate all chunks into one buffer.
    pub fn concat(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        for chunk in self.chunks {
            out.extend_from_slice(&chunk);
        }
        out
    }
}

/// Encoder contract for consuming rendered frames in capture order.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order. After
/// `finish` or `abort` the encoder holds no buffered output.
pub trait FrameEncoder: Send {
    /// Codec this encoder produces.
    fn codec(&self) -> Codec;
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: EncoderConfig) -> StillmotionResult<()>;
    /// Push one frame in strictly increasing capture order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> StillmotionResult<()>;
    /// Flush everything still buffered and hand back the encoded chunks.
    fn finish(&mut self) -> StillmotionResult<EncodedOutput>;
    /// Stop encoding and drop all buffered output.
    fn abort(&mut self);
}

/// Tracks the last pushed index and rejects anything that does not move forward.
#[derive(Debug, Default)]
pub(crate) struct FrameOrder {
    last: Option<FrameIndex>,
}

impl FrameOrder {
    pub(crate) fn advance(&mut self, idx: FrameIndex) -> StillmotionResult<()> {
        if let Some(last) = self.last
            && idx.0 <= last.0
        {
            return Err(StillmotionError::encoding_runtime(format!(
                "out-of-order frame index {} after {}",
                idx.0, last.0
            )));
        }
        self.last = Some(idx);
        Ok(())
    }

    pub(crate) fn reset(&mut self) {
        self.last = None;
    }
}

/// Shared record of what in-memory encoders were asked to do.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncoderJournal {
    /// Configurations received by `begin`, in call order.
    pub configs: Vec<EncoderConfig>,
    /// Indices of accepted frames, in push order.
    pub frames: Vec<FrameIndex>,
    /// Number of successful `finish` calls.
    pub finished: u32,
    /// Number of `abort` calls.
    pub aborted: u32,
}

pub(crate) const DIGEST_SEED: u64 = 0x5d1f_3a9b_c2e4_7086;

/// In-memory encoder for tests and dry runs.
///
/// Emits one 24-byte chunk per frame: the frame index, the frame size and an xxh3 digest of the
/// pixels, all little-endian.
#[derive(Debug)]
pub struct InMemoryEncoder {
    codec: Codec,
    cfg: Option<EncoderConfig>,
    order: FrameOrder,
    chunks: Vec<Vec<u8>>,
    journal: Option<Arc<Mutex<EncoderJournal>>>,
}

impl InMemoryEncoder {
    /// Create an encoder that reports `codec`.
    pub fn new(codec: Codec) -> Self {
        Self {
            codec,
            cfg: None,
            order: FrameOrder::default(),
            chunks: Vec::new(),
            journal: None,
        }
    }

    /// Create an encoder that also records its calls into `journal`.
    pub fn with_journal(codec: Codec, journal: Arc<Mutex<EncoderJournal>>) -> Self {
        Self {
            journal: Some(journal),
            ..Self::new(codec)
        }
    }

    fn record(&self, f: impl FnOnce(&mut EncoderJournal)) {
        if let Some(journal) = &self.journal
            && let Ok(mut j) = journal.lock()
        {
            f(&mut j);
        }
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<EncoderConfig> {
        self.cfg
    }

    /// Number of frames buffered since `begin`.
    pub fn buffered_frames(&self) -> usize {
        self.chunks.len()
    }
}

/// Decode one chunk emitted by [`InMemoryEncoder`] into `(index, width, height, digest)`.
pub fn parse_in_memory_chunk(chunk: &[u8]) -> Option<(FrameIndex, u32, u32, u64)> {
    if chunk.len() != 24 {
        return None;
    }
    let idx = u64::from_le_bytes(chunk[0..8].try_into().ok()?);
    let w = u32::from_le_bytes(chunk[8..12].try_into().ok()?);
    let h = u32::from_le_bytes(chunk[12..16].try_into().ok()?);
    let digest = u64::from_le_bytes(chunk[16..24].try_into().ok()?);
    Some((FrameIndex(idx), w, h, digest))
}

impl FrameEncoder for InMemoryEncoder {
    fn codec(&self) -> Codec {
        self.codec
    }

    fn begin(&mut self, cfg: EncoderConfig) -> StillmotionResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(StillmotionError::validation(
                "encoder width/height must be non-zero",
            ));
        }
        self.cfg = Some(cfg);
        self.order.reset();
        self.chunks.clear();
        self.record(|j| j.configs.push(cfg));
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> StillmotionResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| StillmotionError::encoding_runtime("in-memory encoder not started"))?;
        cfg.check_frame(frame)?;
        self.order.advance(idx)?;

        let digest = xxhash_rust::xxh3::xxh3_64_with_seed(&frame.data, DIGEST_SEED);
        let mut chunk = Vec::with_capacity(24);
        chunk.extend_from_slice(&idx.0.to_le_bytes());
        chunk.extend_from_slice(&frame.width.to_le_bytes());
        chunk.extend_from_slice(&frame.height.to_le_bytes());
        chunk.extend_from_slice(&digest.to_le_bytes());
        self.chunks.push(chunk);
        self.record(|j| j.frames.push(idx));
        Ok(())
    }

    fn finish(&mut self) -> StillmotionResult<EncodedOutput> {
        if self.cfg.take().is_none() {
            return Err(StillmotionError::encoding_runtime(
                "in-memory encoder not started",
            ));
        }
        self.record(|j| j.finished += 1);
        Ok(EncodedOutput {
            chunks: std::mem::take(&mut self.chunks),
            mime: self.codec.container().mime(),
        })
    }

    fn abort(&mut self) {
        self.cfg = None;
        self.order.reset();
        self.chunks.clear();
        self.record(|j| j.aborted += 1);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
