use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::encode::codec::{Codec, OutputFormat};
use crate::encode::registry::{EncoderBackend, SystemEncoders};
use crate::foundation::error::{StillmotionError, StillmotionResult};
use crate::session::cancel::CancelToken;
use crate::session::capture::{Artifact, CaptureSession, CaptureState, CodecSubstitution};
use crate::session::clock::{FrameClock, RealTimeClock};
use crate::session::request::{ExportSettings, RenderRequest};

/// Status notification emitted while an export runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportEvent {
    /// The export was accepted and is starting.
    Started {
        /// Requested container.
        format: OutputFormat,
    },
    /// The artifact is ready.
    Completed {
        /// `animation.<ext>`.
        file_name: String,
        /// Artifact size in bytes.
        bytes: usize,
    },
    /// The export stopped without an artifact.
    Failed {
        /// Short user-facing description; internal detail is left out.
        cause: &'static str,
    },
}

/// Receives [`ExportEvent`]s.
pub trait ExportObserver {
    /// Called for every event, in order.
    fn on_event(&mut self, event: &ExportEvent);
}

impl<F: FnMut(&ExportEvent)> ExportObserver for F {
    fn on_event(&mut self, event: &ExportEvent) {
        self(event)
    }
}

/// Observer that forwards events to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl ExportObserver for LogObserver {
    fn on_event(&mut self, event: &ExportEvent) {
        match event {
            ExportEvent::Started { format } => tracing::info!(%format, "export started"),
            ExportEvent::Completed { file_name, bytes } => {
                tracing::info!(file_name = %file_name, bytes, "export completed")
            }
            ExportEvent::Failed { cause } => tracing::warn!(cause, "export failed"),
        }
    }
}

/// What a successful export produced.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportReport {
    /// Encoded file.
    pub artifact: Artifact,
    /// Codec that produced it.
    pub codec: Codec,
    /// Set when the fallback codec replaced the primary one.
    pub substitution: Option<CodecSubstitution>,
    /// Frames handed to the encoder.
    pub frames_encoded: u64,
    /// Terminal session state (`Done`).
    pub state: CaptureState,
}

/// Runs exports against one encoder backend, at most one at a time.
pub struct Exporter {
    backend: Box<dyn EncoderBackend>,
    busy: AtomicBool,
}

impl Exporter {
    /// Exporter over `backend`.
    pub fn new(backend: impl EncoderBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            busy: AtomicBool::new(false),
        }
    }

    /// Exporter over the encoders found on this machine.
    pub fn system() -> Self {
        Self::new(SystemEncoders::probe())
    }

    /// `true` while an export is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Render `request` and encode it.
    ///
    /// Fails with [`StillmotionError::SessionBusy`] without emitting events when another export
    /// is still running on this exporter. Otherwise emits `Started`, then exactly one of
    /// `Completed` or `Failed`.
    #[tracing::instrument(
        skip_all,
        fields(
            animation = %request.animation,
            resolution = %request.resolution,
            format = %request.format
        )
    )]
    pub fn export(
        &self,
        request: &RenderRequest,
        settings: &ExportSettings,
        clock: &mut dyn FrameClock,
        cancel: &CancelToken,
        observer: &mut dyn ExportObserver,
    ) -> StillmotionResult<ExportReport> {
        let _guard = BusyGuard::acquire(&self.busy)?;

        observer.on_event(&ExportEvent::Started {
            format: request.format,
        });

        match self.run(request, settings, clock, cancel) {
            Ok(report) => {
                observer.on_event(&ExportEvent::Completed {
                    file_name: report.artifact.file_name.clone(),
                    bytes: report.artifact.len(),
                });
                Ok(report)
            }
            Err(e) => {
                tracing::warn!(error = %e, "export failed");
                observer.on_event(&ExportEvent::Failed {
                    cause: e.user_message(),
                });
                Err(e)
            }
        }
    }

    fn run(
        &self,
        request: &RenderRequest,
        settings: &ExportSettings,
        clock: &mut dyn FrameClock,
        cancel: &CancelToken,
    ) -> StillmotionResult<ExportReport> {
        request.validate()?;
        settings.validate()?;

        let mut session = CaptureSession::new(request, settings);
        let outcome = session.run(self.backend.as_ref(), clock, cancel)?;
        tracing::info!(
            codec = %outcome.codec,
            frames = outcome.frames_encoded,
            bytes = outcome.artifact.len(),
            "artifact ready"
        );
        Ok(ExportReport {
            artifact: outcome.artifact,
            codec: outcome.codec,
            substitution: outcome.substitution,
            frames_encoded: outcome.frames_encoded,
            state: session.state(),
        })
    }
}

struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> StillmotionResult<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| StillmotionError::SessionBusy)?;
        Ok(Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Export with the system encoders, a real-time clock and no cancellation.
///
/// All calls share one process-wide exporter, so a second call while one is running fails with
/// [`StillmotionError::SessionBusy`].
pub fn export_animated_file(request: &RenderRequest) -> StillmotionResult<ExportReport> {
    static SHARED: OnceLock<Exporter> = OnceLock::new();
    let exporter = SHARED.get_or_init(Exporter::system);
    exporter.export(
        request,
        &ExportSettings::default(),
        &mut RealTimeClock::new(),
        &CancelToken::new(),
        &mut LogObserver,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/session/exporter.rs"]
mod tests;
