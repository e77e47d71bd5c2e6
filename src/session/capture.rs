use crate::animation::transform::{Progress, Transform};
use crate::assets::source::load_source_image;
use crate::encode::codec::Codec;
use crate::encode::registry::{EncoderBackend, negotiate_codec};
use crate::encode::sink::{EncoderConfig, FrameEncoder};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{StillmotionError, StillmotionResult};
use crate::render::FrameRGBA;
use crate::render::cpu::{SourcePaint, Surface};
use crate::session::cancel::CancelToken;
use crate::session::clock::FrameClock;
use crate::session::request::{ExportSettings, RenderRequest};

/// Motion exports record this many full animation cycles.
pub const RECORDED_CYCLES: u32 = 2;

/// Lifecycle of one capture session.
///
/// `Idle -> Loading -> Recording -> Finalizing -> Done`, with `Failed` reachable from every
/// non-terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum CaptureState {
    Idle,
    Loading,
    Recording,
    Finalizing,
    Done,
    Failed,
}

impl CaptureState {
    /// `true` for `Done` and `Failed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    fn can_enter(self, next: CaptureState) -> bool {
        use CaptureState::*;
        matches!(
            (self, next),
            (Idle, Loading)
                | (Loading, Recording)
                | (Recording, Finalizing)
                | (Finalizing, Done)
                | (Idle | Loading | Recording | Finalizing, Failed)
        )
    }
}

/// Primary codec that could not be used, and the fallback that replaced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CodecSubstitution {
    /// Codec the format prefers.
    pub requested: Codec,
    /// Codec actually used.
    pub used: Codec,
}

/// Encoded file ready to hand to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    /// `animation.<ext>`.
    pub file_name: String,
    /// MIME type of `bytes`.
    pub mime: &'static str,
    /// Concatenated encoder output.
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Byte length.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` when the artifact holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the artifact as `dir/<file_name>`, creating `dir` if needed.
    pub fn save_in(&self, dir: impl AsRef<std::path::Path>) -> StillmotionResult<std::path::PathBuf> {
        use anyhow::Context as _;
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        Ok(path)
    }
}

/// Result of a capture session that reached `Done`.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptureOutcome {
    /// Encoded file.
    pub artifact: Artifact,
    /// Codec that produced it.
    pub codec: Codec,
    /// Set when the fallback codec was used.
    pub substitution: Option<CodecSubstitution>,
    /// Frames handed to the encoder.
    pub frames_encoded: u64,
}

/// Mutable state of one export, from source loading to the finished artifact.
///
/// Owns the surface, the decoded source and the open encoder. Everything is released when the
/// session reaches `Done` or `Failed`; a failed session never yields partial output.
pub struct CaptureSession<'a> {
    request: &'a RenderRequest,
    settings: &'a ExportSettings,
    state: CaptureState,

    paint: Option<SourcePaint>,
    surface: Option<Surface>,
    encoder: Option<Box<dyn FrameEncoder>>,
    substitution: Option<CodecSubstitution>,
    frames_pushed: u64,
}

impl<'a> CaptureSession<'a> {
    /// A new session in `Idle`.
    pub fn new(request: &'a RenderRequest, settings: &'a ExportSettings) -> Self {
        Self {
            request,
            settings,
            state: CaptureState::Idle,
            paint: None,
            surface: None,
            encoder: None,
            substitution: None,
            frames_pushed: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Frames handed to the encoder so far.
    pub fn frames_pushed(&self) -> u64 {
        self.frames_pushed
    }

    /// Drive the session to a terminal state.
    ///
    /// On error the session is moved to `Failed` before the error is returned.
    pub fn run(
        &mut self,
        backend: &dyn EncoderBackend,
        clock: &mut dyn FrameClock,
        cancel: &CancelToken,
    ) -> StillmotionResult<CaptureOutcome> {
        let result = self.run_inner(backend, clock, cancel);
        if let Err(e) = &result {
            self.fail(e);
        }
        result
    }

    fn run_inner(
        &mut self,
        backend: &dyn EncoderBackend,
        clock: &mut dyn FrameClock,
        cancel: &CancelToken,
    ) -> StillmotionResult<CaptureOutcome> {
        check_cancel(cancel)?;
        self.load()?;
        self.start_recording(backend)?;
        if self.request.format.is_static() {
            self.capture_still()?;
        } else {
            self.record(clock, cancel)?;
        }
        self.finalize(cancel)
    }

    /// `Idle -> Loading`: read and decode the source image.
    pub fn load(&mut self) -> StillmotionResult<()> {
        self.enter(CaptureState::Loading)?;
        let decoded = load_source_image(&self.request.source, self.settings.load_timeout)?;
        self.paint = Some(SourcePaint::from_decoded(&decoded)?);
        Ok(())
    }

    /// `Loading -> Recording`: negotiate a codec, open the encoder and acquire the surface.
    pub fn start_recording(&mut self, backend: &dyn EncoderBackend) -> StillmotionResult<()> {
        if self.paint.is_none() {
            return Err(StillmotionError::image_load("source image is not loaded"));
        }
        let format = self.request.format;
        let (codec, substituted) = negotiate_codec(backend, format)?;
        if substituted {
            let sub = CodecSubstitution {
                requested: format.primary(),
                used: codec,
            };
            tracing::warn!(
                requested = %sub.requested,
                used = %sub.used,
                "primary codec unavailable; using fallback"
            );
            self.substitution = Some(sub);
        }

        let canvas = self.request.canvas();
        let surface = Surface::new(canvas, self.settings.background_rgba)?;

        let mut encoder = backend.open(codec)?;
        encoder.begin(EncoderConfig {
            width: canvas.width,
            height: canvas.height,
            fps: self.settings.fps,
            bg_rgba: self.settings.background_rgba,
        })?;

        self.surface = Some(surface);
        self.encoder = Some(encoder);
        self.enter(CaptureState::Recording)
    }

    /// Static formats: encode the single frame frozen at the cycle midpoint.
    pub fn capture_still(&mut self) -> StillmotionResult<()> {
        let frame = self.compose(Progress::MIDPOINT)?;
        self.push(&frame)
    }

    /// Motion formats: fill every frame slot of two full cycles.
    ///
    /// Each slot is sampled at its own timeline position (`index / fps`), so the encoded file
    /// always spans two cycles at the requested duration. When the clock reports missed
    /// deadlines, the last composed frame is repeated for the skipped slots.
    pub fn record(
        &mut self,
        clock: &mut dyn FrameClock,
        cancel: &CancelToken,
    ) -> StillmotionResult<()> {
        let cycle = self.request.cycle();
        let stop_at = cycle * RECORDED_CYCLES;
        let fps = self.settings.fps;
        let slot_time = |idx: u64| fps.frames_to_duration(idx);

        clock.start();
        let mut held = 0u64;
        while slot_time(self.frames_pushed) < stop_at {
            check_cancel(cancel)?;
            let progress = Progress::from_elapsed(slot_time(self.frames_pushed), cycle);
            let frame = self.compose(progress)?;
            self.push(&frame)?;

            let slots = clock.wait_next_frame(fps);
            for _ in 1..slots {
                if slot_time(self.frames_pushed) >= stop_at {
                    break;
                }
                check_cancel(cancel)?;
                self.push(&frame)?;
                held += 1;
            }
        }
        if held > 0 {
            tracing::warn!(held, "capture fell behind the clock; repeated frames");
        }
        tracing::debug!(frames = self.frames_pushed, "recording complete");
        Ok(())
    }

    fn compose(&mut self, progress: Progress) -> StillmotionResult<FrameRGBA> {
        self.ensure_recording()?;
        let (Some(surface), Some(paint)) = (self.surface.as_mut(), self.paint.as_ref()) else {
            return Err(StillmotionError::encoding_runtime(
                "capture session is missing its surface",
            ));
        };
        let canvas = surface.canvas();
        let transform = Transform::sample(
            self.request.animation,
            progress,
            canvas.width,
            canvas.height,
        );
        Ok(surface.compose(&transform, paint))
    }

    fn push(&mut self, frame: &FrameRGBA) -> StillmotionResult<()> {
        self.ensure_recording()?;
        let Some(encoder) = self.encoder.as_mut() else {
            return Err(StillmotionError::encoding_runtime(
                "capture session is missing its encoder",
            ));
        };
        encoder
            .push_frame(FrameIndex(self.frames_pushed), frame)
            .map_err(as_runtime)?;
        self.frames_pushed += 1;
        Ok(())
    }

    fn ensure_recording(&self) -> StillmotionResult<()> {
        if self.state != CaptureState::Recording {
            return Err(StillmotionError::encoding_runtime(format!(
                "cannot capture a frame while {:?}",
                self.state
            )));
        }
        Ok(())
    }

    /// `Recording -> Finalizing -> Done`: flush the encoder into one artifact.
    pub fn finalize(&mut self, cancel: &CancelToken) -> StillmotionResult<CaptureOutcome> {
        check_cancel(cancel)?;
        self.enter(CaptureState::Finalizing)?;

        let mut encoder = self
            .encoder
            .take()
            .ok_or_else(|| StillmotionError::encoding_runtime("no encoder to finalize"))?;
        let codec = encoder.codec();
        let output = match encoder.finish() {
            Ok(out) => out,
            Err(e) => {
                encoder.abort();
                return Err(as_runtime(e));
            }
        };
        if output.is_empty() {
            return Err(StillmotionError::encoding_runtime(
                "encoder produced no output",
            ));
        }

        let format = self.request.format;
        let artifact = Artifact {
            file_name: format.file_name(),
            mime: output.mime,
            bytes: output.concat(),
        };
        self.surface = None;
        self.paint = None;
        self.enter(CaptureState::Done)?;

        Ok(CaptureOutcome {
            artifact,
            codec,
            substitution: self.substitution,
            frames_encoded: self.frames_pushed,
        })
    }

    /// Abort the encoder, release everything and move to `Failed`.
    pub fn fail(&mut self, cause: &StillmotionError) {
        if self.state.is_terminal() {
            return;
        }
        if let Some(mut encoder) = self.encoder.take() {
            encoder.abort();
        }
        self.surface = None;
        self.paint = None;
        tracing::debug!(from = ?self.state, error = %cause, "capture session failed");
        self.state = CaptureState::Failed;
    }

    fn enter(&mut self, next: CaptureState) -> StillmotionResult<()> {
        if !self.state.can_enter(next) {
            return Err(StillmotionError::encoding_runtime(format!(
                "invalid capture transition {:?} -> {:?}",
                self.state, next
            )));
        }
        tracing::debug!(from = ?self.state, to = ?next, "capture state");
        self.state = next;
        Ok(())
    }
}

impl Drop for CaptureSession<'_> {
    fn drop(&mut self) {
        if let Some(mut encoder) = self.encoder.take() {
            encoder.abort();
        }
    }
}

fn check_cancel(cancel: &CancelToken) -> StillmotionResult<()> {
    if cancel.is_cancelled() {
        return Err(StillmotionError::Cancelled);
    }
    Ok(())
}

/// Faults raised by an encoder after recording started are runtime faults.
fn as_runtime(e: StillmotionError) -> StillmotionError {
    match e {
        StillmotionError::EncodingRuntime(_) | StillmotionError::Cancelled => e,
        other => StillmotionError::encoding_runtime(other.to_string()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/capture.rs"]
mod tests;
