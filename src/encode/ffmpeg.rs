use std::io::Read;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use crate::encode::codec::{Codec, OutputFormat};
use crate::encode::sink::{EncodedOutput, EncoderConfig, FrameEncoder, FrameOrder};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{StillmotionError, StillmotionResult};
use crate::foundation::math::flatten_premul_over_bg;
use crate::render::FrameRGBA;

const STDOUT_CHUNK: usize = 64 * 1024;

type Drain<T> = JoinHandle<std::io::Result<T>>;

/// Streaming video encoder backed by the system `ffmpeg`.
///
/// Raw opaque RGBA8 frames go to stdin; the container stream is read back from stdout in
/// chunks on a drain thread so nothing touches the filesystem. MP4 output is fragmented because
/// a plain MP4 cannot be written to a pipe.
pub struct FfmpegEncoder {
    codec: Codec,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stdout_drain: Option<Drain<Vec<Vec<u8>>>>,
    stderr_drain: Option<Drain<Vec<u8>>>,

    scratch: Vec<u8>,
    cfg: Option<EncoderConfig>,
    order: FrameOrder,
}

impl FfmpegEncoder {
    /// Create an encoder for a video codec. Nothing is spawned until `begin`.
    pub fn new(codec: Codec) -> StillmotionResult<Self> {
        if codec.ffmpeg_encoder().is_none() {
            return Err(StillmotionError::encoding_unsupported(format!(
                "codec '{codec}' is not an ffmpeg video codec"
            )));
        }
        Ok(Self {
            codec,
            child: None,
            stdin: None,
            stdout_drain: None,
            stderr_drain: None,
            scratch: Vec::new(),
            cfg: None,
            order: FrameOrder::default(),
        })
    }

    fn command(&self, cfg: &EncoderConfig) -> StillmotionResult<Command> {
        let encoder = self.codec.ffmpeg_encoder().ok_or_else(|| {
            StillmotionError::encoding_unsupported(format!("no ffmpeg encoder for '{}'", self.codec))
        })?;

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        // Input: raw RGBA8 frames, already flattened to opaque in push_frame.
        cmd.args([
            "-hide_banner",
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
        ]);
        push_input_fps(&mut cmd, cfg.fps);
        cmd.args(["-i", "pipe:0", "-an", "-c:v", encoder]);

        match self.codec {
            Codec::Vp9 => cmd.args(["-b:v", "0", "-crf", "32", "-deadline", "realtime"]),
            Codec::Vp8 => cmd.args(["-b:v", "2M", "-deadline", "realtime"]),
            Codec::H264 => cmd.args(["-preset", "veryfast"]),
            Codec::Mpeg4 => cmd.args(["-q:v", "3"]),
            Codec::Gif | Codec::WebpLossless => &mut cmd,
        };
        cmd.args(["-pix_fmt", "yuv420p"]);

        match self.codec.container() {
            OutputFormat::Mp4 => {
                cmd.args([
                    "-movflags",
                    "frag_keyframe+empty_moov+default_base_moof",
                    "-f",
                    "mp4",
                ]);
            }
            _ => {
                cmd.args(["-f", "webm"]);
            }
        }
        cmd.arg("pipe:1");
        Ok(cmd)
    }

    fn join_stderr(&mut self) -> String {
        match self.stderr_drain.take().map(JoinHandle::join) {
            Some(Ok(Ok(bytes))) => String::from_utf8_lossy(&bytes).trim().to_owned(),
            _ => String::new(),
        }
    }
}

impl FrameEncoder for FfmpegEncoder {
    fn codec(&self) -> Codec {
        self.codec
    }

    fn begin(&mut self, cfg: EncoderConfig) -> StillmotionResult<()> {
        if cfg.fps.num == 0 || cfg.fps.den == 0 {
            return Err(StillmotionError::validation("fps must be non-zero"));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(StillmotionError::validation(
                "ffmpeg encoder width/height must be non-zero",
            ));
        }
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(StillmotionError::validation(
                "ffmpeg encoder width/height must be even (required for yuv420p output)",
            ));
        }
        if self.child.is_some() {
            return Err(StillmotionError::encoding_runtime(
                "ffmpeg encoder already started",
            ));
        }
        if !is_ffmpeg_on_path() {
            return Err(StillmotionError::encoding_unsupported(
                "ffmpeg is required for video encoding, but was not found on PATH",
            ));
        }

        let mut child = self.command(&cfg)?.spawn().map_err(|e| {
            StillmotionError::encoding_unsupported(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child.stdin.take().ok_or_else(|| {
            StillmotionError::encoding_runtime("failed to open ffmpeg stdin (unexpected)")
        })?;
        let mut stdout = child.stdout.take().ok_or_else(|| {
            StillmotionError::encoding_runtime("failed to open ffmpeg stdout (unexpected)")
        })?;
        let mut stderr = child.stderr.take().ok_or_else(|| {
            StillmotionError::encoding_runtime("failed to open ffmpeg stderr (unexpected)")
        })?;

        let stdout_drain = std::thread::spawn(move || {
            let mut chunks = Vec::new();
            let mut buf = vec![0u8; STDOUT_CHUNK];
            loop {
                let n = stdout.read(&mut buf)?;
                if n == 0 {
                    break;
                }
                chunks.push(buf[..n].to_vec());
            }
            Ok(chunks)
        });
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        tracing::debug!(
            codec = %self.codec,
            width = cfg.width,
            height = cfg.height,
            "ffmpeg encoder started"
        );

        self.scratch = vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4];
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stdout_drain = Some(stdout_drain);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.order.reset();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> StillmotionResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| StillmotionError::encoding_runtime("ffmpeg encoder not started"))?;
        cfg.check_frame(frame)?;
        self.order.advance(idx)?;

        flatten_premul_over_bg(&mut self.scratch, &frame.data, cfg.bg_rgba);

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(StillmotionError::encoding_runtime(
                "ffmpeg encoder is already finalized",
            ));
        };

        use std::io::Write as _;
        if let Err(e) = stdin.write_all(&self.scratch) {
            drop(self.stdin.take());
            let stderr = self.join_stderr();
            return Err(StillmotionError::encoding_runtime(format!(
                "failed to write frame to ffmpeg stdin: {e}: {stderr}"
            )));
        }
        Ok(())
    }

    fn finish(&mut self) -> StillmotionResult<EncodedOutput> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| StillmotionError::encoding_runtime("ffmpeg encoder not started"))?;
        self.cfg = None;

        let status = child.wait().map_err(|e| {
            StillmotionError::encoding_runtime(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let chunks = match self.stdout_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| StillmotionError::encoding_runtime("ffmpeg stdout drain thread panicked"))?
                .map_err(|e| {
                    StillmotionError::encoding_runtime(format!("ffmpeg stdout read failed: {e}"))
                })?,
            None => Vec::new(),
        };
        let stderr = self.join_stderr();

        if !status.success() {
            return Err(StillmotionError::encoding_runtime(format!(
                "ffmpeg exited with status {status}: {stderr}"
            )));
        }
        if chunks.is_empty() {
            return Err(StillmotionError::encoding_runtime(
                "ffmpeg produced no output",
            ));
        }

        Ok(EncodedOutput {
            chunks,
            mime: self.codec.container().mime(),
        })
    }

    fn abort(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
        if let Some(handle) = self.stdout_drain.take() {
            let _ = handle.join();
        }
        let _ = self.join_stderr();
        self.cfg = None;
        self.order.reset();
        self.scratch.clear();
    }
}

impl Drop for FfmpegEncoder {
    fn drop(&mut self) {
        if self.child.is_some() {
            self.abort();
        }
    }
}

fn push_input_fps(cmd: &mut Command, fps: Fps) {
    // For rawvideo input, `-r` goes before `-i`.
    cmd.args(["-r", &format!("{}/{}", fps.num, fps.den)]);
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Ask the system `ffmpeg` which of our video codecs it can encode.
///
/// Returns an empty list when `ffmpeg` is missing.
pub fn probe_video_codecs() -> Vec<Codec> {
    let output = Command::new("ffmpeg")
        .args(["-hide_banner", "-encoders"])
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output();
    match output {
        Ok(out) if out.status.success() => {
            parse_encoder_list(&String::from_utf8_lossy(&out.stdout))
        }
        Ok(out) => {
            tracing::warn!(status = %out.status, "ffmpeg -encoders failed");
            Vec::new()
        }
        Err(e) => {
            tracing::debug!(error = %e, "ffmpeg not available");
            Vec::new()
        }
    }
}

/// Parse `ffmpeg -encoders` output into the video codecs it lists.
///
/// Encoder rows look like ` V....D libx264   libx264 H.264 / AVC ...`: a six-character
/// capability field starting with `V` followed by the encoder name.
pub(crate) fn parse_encoder_list(text: &str) -> Vec<Codec> {
    let names: Vec<&str> = text
        .lines()
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let flags = parts.next()?;
            let name = parts.next()?;
            (flags.len() == 6 && flags.starts_with('V')).then_some(name)
        })
        .collect();

    [Codec::Vp9, Codec::Vp8, Codec::H264, Codec::Mpeg4]
        .into_iter()
        .filter(|c| {
            c.ffmpeg_encoder()
                .is_some_and(|enc| names.contains(&enc))
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
