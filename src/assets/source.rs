use std::path::PathBuf;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crate::assets::decode::{DecodedImage, decode_image};
use crate::foundation::error::{StillmotionError, StillmotionResult};

/// Default bound on how long reading and decoding the source image may take.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// The still image an export animates.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceImage {
    /// Image file on disk.
    Path(PathBuf),
    /// Encoded image bytes already in memory.
    #[serde(skip)]
    Bytes(Arc<[u8]>),
}

impl SourceImage {
    /// Source backed by a file path.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// Source backed by encoded bytes.
    pub fn bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::Bytes(bytes.into())
    }

    fn describe(&self) -> String {
        match self {
            Self::Path(p) => format!("'{}'", p.display()),
            Self::Bytes(b) => format!("<{} in-memory bytes>", b.len()),
        }
    }

    fn read_and_decode(&self) -> StillmotionResult<DecodedImage> {
        match self {
            Self::Path(p) => {
                let bytes = std::fs::read(p).map_err(|e| {
                    StillmotionError::image_load(format!(
                        "failed to read image '{}': {e}",
                        p.display()
                    ))
                })?;
                decode_image(&bytes)
            }
            Self::Bytes(b) => decode_image(b),
        }
    }
}

/// Read and decode `source`, giving up after `timeout`.
///
/// Decoding runs on a helper thread; on timeout the thread is detached and its result dropped.
#[tracing::instrument(skip(source), fields(image = %source.describe()))]
pub fn load_source_image(
    source: &SourceImage,
    timeout: Duration,
) -> StillmotionResult<DecodedImage> {
    let (tx, rx) = mpsc::sync_channel(1);
    let owned = source.clone();
    std::thread::Builder::new()
        .name("stillmotion-image-load".to_owned())
        .spawn(move || {
            // The receiver may be gone after a timeout; nothing left to report to.
            let _ = tx.send(owned.read_and_decode());
        })
        .map_err(|e| StillmotionError::image_load(format!("failed to start image loader: {e}")))?;

    match rx.recv_timeout(timeout) {
        Ok(Ok(img)) => {
            tracing::debug!(width = img.width, height = img.height, "source image decoded");
            Ok(img)
        }
        Ok(Err(e)) => Err(e),
        Err(mpsc::RecvTimeoutError::Timeout) => Err(StillmotionError::image_load(format!(
            "timed out after {:?} loading {}",
            timeout,
            source.describe()
        ))),
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(StillmotionError::image_load(
            "image loader stopped without a result",
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
