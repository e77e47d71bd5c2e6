//! Source image loading and decoding.

/// Decoding of encoded image bytes into premultiplied RGBA8.
pub mod decode;
/// Where a source image comes from and how it is loaded.
pub mod source;
