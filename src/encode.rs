//! Encoders that turn rendered frames into a byte artifact.
//!
//! Motion formats stream through the system `ffmpeg`; static formats are written with the
//! `image` crate. Backends decide which codecs a host can actually provide.

/// Output containers and the codecs that can fill them.
pub mod codec;
/// `ffmpeg`-based streaming video encoder.
pub mod ffmpeg;
/// Backends that open encoders for codecs.
pub mod registry;
/// Encoder trait, configuration and the in-memory encoder.
pub mod sink;
/// Single-frame image encoders (GIF, lossless WebP).
pub mod still;
