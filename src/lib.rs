//! stillmotion animates a single still image through one of 67 parametric transforms and
//! encodes the loop as WebM, MP4, GIF or WebP.
//!
//! - [`compute_transform`] is the pure Transform Library: animation kind + progress in, affine
//!   parameters and opacity out.
//! - An [`Exporter`] drives a [`CaptureSession`] that samples the transform at 30 fps, composites
//!   the image on a CPU raster surface and streams frames into an encoder.
#![forbid(unsafe_code)]

/// Animation kinds, formulas, easing and the fit rule.
pub mod animation;
/// Source image loading and decoding.
pub mod assets;
/// Encoders, codecs and encoder backends.
pub mod encode;
/// Shared value types, errors and pixel math.
pub mod foundation;
/// Raster surface and frame buffers.
pub mod render;
/// Requests, clocks, cancellation, capture sessions and the exporter.
pub mod session;

pub use crate::animation::ease::Ease;
pub use crate::animation::fit::fit_rect;
pub use crate::animation::kind::{AnimationKind, Family};
pub use crate::animation::transform::{
    Progress, Transform, compute_transform, compute_transform_for_tag,
};
pub use crate::assets::decode::{DecodedImage, decode_image};
pub use crate::assets::source::{DEFAULT_LOAD_TIMEOUT, SourceImage, load_source_image};
pub use crate::encode::codec::{Codec, OutputFormat};
pub use crate::encode::ffmpeg::{FfmpegEncoder, is_ffmpeg_on_path};
pub use crate::encode::registry::{EncoderBackend, InMemoryBackend, SystemEncoders};
pub use crate::encode::sink::{
    EncodedOutput, EncoderConfig, EncoderJournal, FrameEncoder, InMemoryEncoder,
    parse_in_memory_chunk,
};
pub use crate::encode::still::StillImageEncoder;
pub use crate::foundation::core::{Affine, Canvas, Fps, FrameIndex, Point, Rect, Vec2};
pub use crate::foundation::error::{StillmotionError, StillmotionResult};
pub use crate::render::FrameRGBA;
pub use crate::render::cpu::{SourcePaint, Surface};
pub use crate::session::cancel::CancelToken;
pub use crate::session::capture::{
    Artifact, CaptureOutcome, CaptureSession, CaptureState, CodecSubstitution,
};
pub use crate::session::clock::{FrameClock, RealTimeClock, SimulatedClock};
pub use crate::session::exporter::{
    ExportEvent, ExportObserver, ExportReport, Exporter, LogObserver, export_animated_file,
};
pub use crate::session::request::{ExportSettings, RenderRequest, Resolution};
