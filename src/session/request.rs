use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::animation::kind::AnimationKind;
use crate::assets::source::{DEFAULT_LOAD_TIMEOUT, SourceImage};
use crate::encode::codec::OutputFormat;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{StillmotionError, StillmotionResult};

/// Shortest accepted cycle, in seconds.
pub const MIN_CYCLE_SECS: f64 = 0.5;
/// Longest accepted cycle, in seconds.
pub const MAX_CYCLE_SECS: f64 = 5.0;

/// Output aspect preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Resolution {
    /// `1:1`, 512x512.
    #[serde(rename = "1:1")]
    Square,
    /// `9:16`, 576x1024.
    #[serde(rename = "9:16")]
    Portrait,
    /// `16:9`, 1024x576.
    #[serde(rename = "16:9")]
    Landscape,
}

impl Resolution {
    /// Every preset.
    pub const ALL: [Resolution; 3] = [Self::Square, Self::Portrait, Self::Landscape];

    /// Aspect tag, e.g. `"16:9"`.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Portrait => "9:16",
            Self::Landscape => "16:9",
        }
    }

    /// Pixel size of the surface.
    pub fn canvas(self) -> Canvas {
        let (width, height) = match self {
            Self::Square => (512, 512),
            Self::Portrait => (576, 1024),
            Self::Landscape => (1024, 576),
        };
        Canvas { width, height }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Resolution {
    type Err = StillmotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.tag() == s.trim())
            .ok_or_else(|| {
                StillmotionError::validation(format!(
                    "unknown resolution '{s}' (expected 1:1, 9:16 or 16:9)"
                ))
            })
    }
}

/// Everything the caller chooses for one export. Immutable once built.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RenderRequest {
    /// Image to animate.
    pub source: SourceImage,
    /// Animation applied to the image. Unknown tags in JSON resolve to the default kind.
    #[serde(deserialize_with = "animation_or_default", default)]
    pub animation: AnimationKind,
    /// Output aspect preset.
    pub resolution: Resolution,
    /// Seconds per animation cycle, in `[0.5, 5.0]`.
    pub cycle_duration_secs: f64,
    /// Output container.
    pub format: OutputFormat,
}

fn animation_or_default<'de, D>(d: D) -> Result<AnimationKind, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let tag = <String as serde::Deserialize>::deserialize(d)?;
    Ok(AnimationKind::from_tag_or_default(&tag))
}

impl RenderRequest {
    /// Parse a request from JSON text.
    pub fn from_json(text: &str) -> StillmotionResult<Self> {
        let req: Self = serde_json::from_str(text)
            .map_err(|e| StillmotionError::validation(format!("parse request JSON: {e}")))?;
        req.validate()?;
        Ok(req)
    }

    /// Parse a request from a JSON file. Relative image paths resolve against the file's folder.
    pub fn from_path(path: impl AsRef<Path>) -> StillmotionResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StillmotionError::validation(format!("open request JSON '{}': {e}", path.display()))
        })?;
        let mut req: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| StillmotionError::validation(format!("parse request JSON: {e}")))?;
        if let SourceImage::Path(p) = &req.source
            && p.is_relative()
            && let Some(dir) = path.parent()
        {
            req.source = SourceImage::Path(dir.join(p));
        }
        req.validate()?;
        Ok(req)
    }

    /// Check caller-provided values.
    pub fn validate(&self) -> StillmotionResult<()> {
        let secs = self.cycle_duration_secs;
        if !secs.is_finite() || !(MIN_CYCLE_SECS..=MAX_CYCLE_SECS).contains(&secs) {
            return Err(StillmotionError::validation(format!(
                "cycle duration must be within [{MIN_CYCLE_SECS}, {MAX_CYCLE_SECS}] seconds, got {secs}"
            )));
        }
        Ok(())
    }

    /// One animation cycle.
    pub fn cycle(&self) -> Duration {
        Duration::from_secs_f64(self.cycle_duration_secs)
    }

    /// Output surface size.
    pub fn canvas(&self) -> Canvas {
        self.resolution.canvas()
    }
}

/// Host-side knobs that are not part of the request.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Capture cadence for motion formats.
    pub fps: Fps,
    /// Surface background (RGBA8, straight alpha; alpha is forced opaque).
    pub background_rgba: [u8; 4],
    /// Bound on reading and decoding the source image.
    pub load_timeout: Duration,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            fps: Fps::CAPTURE,
            background_rgba: [255, 255, 255, 255],
            load_timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }
}

impl ExportSettings {
    /// Parse settings from JSON; missing fields take their defaults.
    pub fn from_json(text: &str) -> StillmotionResult<Self> {
        let settings: Self = serde_json::from_str(text)
            .map_err(|e| StillmotionError::validation(format!("parse settings JSON: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check host-provided values.
    pub fn validate(&self) -> StillmotionResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if self.load_timeout.is_zero() {
            return Err(StillmotionError::validation("load timeout must be non-zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/request.rs"]
mod tests;
