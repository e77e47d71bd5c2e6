use std::fmt;
use std::str::FromStr;

use crate::foundation::error::StillmotionError;

/// Output container requested by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// WebM video.
    Webm,
    /// MP4 video (fragmented, so it can be streamed out of `ffmpeg`).
    Mp4,
    /// Single-frame GIF.
    Gif,
    /// Single-frame lossless WebP.
    Webp,
}

impl OutputFormat {
    /// Every format, in presentation order.
    pub const ALL: [OutputFormat; 4] = [Self::Webm, Self::Mp4, Self::Gif, Self::Webp];

    /// File extension without the dot.
    pub fn ext(self) -> &'static str {
        match self {
            Self::Webm => "webm",
            Self::Mp4 => "mp4",
            Self::Gif => "gif",
            Self::Webp => "webp",
        }
    }

    /// MIME type of the produced artifact.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Webm => "video/webm",
            Self::Mp4 => "video/mp4",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }

    /// `true` for containers that hold a single frame.
    pub fn is_static(self) -> bool {
        matches!(self, Self::Gif | Self::Webp)
    }

    /// Preferred codec.
    pub fn primary(self) -> Codec {
        match self {
            Self::Webm => Codec::Vp9,
            Self::Mp4 => Codec::H264,
            Self::Gif => Codec::Gif,
            Self::Webp => Codec::WebpLossless,
        }
    }

    /// Codec tried when the primary one is unavailable.
    pub fn fallback(self) -> Option<Codec> {
        match self {
            Self::Webm => Some(Codec::Vp8),
            Self::Mp4 => Some(Codec::Mpeg4),
            Self::Gif | Self::Webp => None,
        }
    }

    /// File name of the artifact, `animation.<ext>`.
    pub fn file_name(self) -> String {
        format!("animation.{}", self.ext())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ext())
    }
}

impl FromStr for OutputFormat {
    type Err = StillmotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.ext().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                StillmotionError::validation(format!(
                    "unknown output format '{s}' (expected webm, mp4, gif or webp)"
                ))
            })
    }
}

/// Concrete codec an encoder produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Codec {
    /// VP9 in WebM.
    Vp9,
    /// VP8 in WebM.
    Vp8,
    /// H.264 in MP4.
    H264,
    /// MPEG-4 Part 2 in MP4.
    Mpeg4,
    /// GIF image.
    Gif,
    /// Lossless WebP image.
    WebpLossless,
}

impl Codec {
    /// Short display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Vp9 => "vp9",
            Self::Vp8 => "vp8",
            Self::H264 => "h264",
            Self::Mpeg4 => "mpeg4",
            Self::Gif => "gif",
            Self::WebpLossless => "webp-lossless",
        }
    }

    /// Container this codec writes into.
    pub fn container(self) -> OutputFormat {
        match self {
            Self::Vp9 | Self::Vp8 => OutputFormat::Webm,
            Self::H264 | Self::Mpeg4 => OutputFormat::Mp4,
            Self::Gif => OutputFormat::Gif,
            Self::WebpLossless => OutputFormat::Webp,
        }
    }

    /// `true` for codecs that carry many frames.
    pub fn is_video(self) -> bool {
        !self.container().is_static()
    }

    /// Name of the `ffmpeg` encoder implementing this codec.
    pub fn ffmpeg_encoder(self) -> Option<&'static str> {
        match self {
            Self::Vp9 => Some("libvpx-vp9"),
            Self::Vp8 => Some("libvpx"),
            Self::H264 => Some("libx264"),
            Self::Mpeg4 => Some("mpeg4"),
            Self::Gif | Self::WebpLossless => None,
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/codec.rs"]
mod tests;
