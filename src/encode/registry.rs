use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::encode::codec::{Codec, OutputFormat};
use crate::encode::ffmpeg::{FfmpegEncoder, probe_video_codecs};
use crate::encode::sink::{EncoderJournal, FrameEncoder, InMemoryEncoder};
use crate::encode::still::StillImageEncoder;
use crate::foundation::error::{StillmotionError, StillmotionResult};

/// Source of encoders for a host.
pub trait EncoderBackend: Send + Sync {
    /// `true` when this backend can open an encoder for `codec`.
    fn supports(&self, codec: Codec) -> bool;
    /// Open a fresh encoder for `codec`.
    fn open(&self, codec: Codec) -> StillmotionResult<Box<dyn FrameEncoder>>;
}

/// Encoders available on this machine: `ffmpeg` for video, `image` for still formats.
///
/// The `ffmpeg -encoders` probe runs once, in [`SystemEncoders::probe`].
#[derive(Clone, Debug)]
pub struct SystemEncoders {
    video: HashSet<Codec>,
}

impl SystemEncoders {
    /// Probe the system `ffmpeg` for usable video codecs.
    pub fn probe() -> Self {
        let video: HashSet<Codec> = probe_video_codecs().into_iter().collect();
        tracing::debug!(codecs = ?video, "probed ffmpeg video encoders");
        Self { video }
    }

    /// Still formats only; every video codec reports unsupported.
    pub fn still_only() -> Self {
        Self {
            video: HashSet::new(),
        }
    }
}

impl EncoderBackend for SystemEncoders {
    fn supports(&self, codec: Codec) -> bool {
        if codec.is_video() {
            self.video.contains(&codec)
        } else {
            true
        }
    }

    fn open(&self, codec: Codec) -> StillmotionResult<Box<dyn FrameEncoder>> {
        if !self.supports(codec) {
            return Err(StillmotionError::encoding_unsupported(format!(
                "no encoder available for codec '{codec}'"
            )));
        }
        if codec.is_video() {
            Ok(Box::new(FfmpegEncoder::new(codec)?))
        } else {
            Ok(Box::new(StillImageEncoder::new(codec)?))
        }
    }
}

/// Backend serving [`InMemoryEncoder`]s for a chosen set of codecs.
///
/// Every opened encoder writes into one shared [`EncoderJournal`].
#[derive(Clone, Debug)]
pub struct InMemoryBackend {
    supported: HashSet<Codec>,
    journal: Arc<Mutex<EncoderJournal>>,
}

impl InMemoryBackend {
    /// Support exactly `codecs`.
    pub fn new(codecs: impl IntoIterator<Item = Codec>) -> Self {
        Self {
            supported: codecs.into_iter().collect(),
            journal: Arc::default(),
        }
    }

    /// Support every codec.
    pub fn all() -> Self {
        Self::new([
            Codec::Vp9,
            Codec::Vp8,
            Codec::H264,
            Codec::Mpeg4,
            Codec::Gif,
            Codec::WebpLossless,
        ])
    }

    /// Snapshot of everything recorded so far.
    pub fn journal(&self) -> EncoderJournal {
        self.journal
            .lock()
            .map(|j| j.clone())
            .unwrap_or_default()
    }
}

impl EncoderBackend for InMemoryBackend {
    fn supports(&self, codec: Codec) -> bool {
        self.supported.contains(&codec)
    }

    fn open(&self, codec: Codec) -> StillmotionResult<Box<dyn FrameEncoder>> {
        if !self.supports(codec) {
            return Err(StillmotionError::encoding_unsupported(format!(
                "no encoder available for codec '{codec}'"
            )));
        }
        Ok(Box::new(InMemoryEncoder::with_journal(
            codec,
            Arc::clone(&self.journal),
        )))
    }
}

/// Pick the codec for `format`: its primary codec, else its fallback.
///
/// Returns the chosen codec and whether it is a substitution.
pub fn negotiate_codec(
    backend: &dyn EncoderBackend,
    format: OutputFormat,
) -> StillmotionResult<(Codec, bool)> {
    let primary = format.primary();
    if backend.supports(primary) {
        return Ok((primary, false));
    }
    match format.fallback() {
        Some(fallback) if backend.supports(fallback) => Ok((fallback, true)),
        Some(fallback) => Err(StillmotionError::encoding_unsupported(format!(
            "neither {primary} nor {fallback} can encode {format} on this host"
        ))),
        None => Err(StillmotionError::encoding_unsupported(format!(
            "{primary} cannot encode {format} on this host"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/registry.rs"]
mod tests;
