use super::*;
use crate::animation::kind::AnimationKind;
use crate::assets::source::SourceImage;
use crate::encode::codec::OutputFormat;
use crate::encode::registry::InMemoryBackend;
use crate::encode::sink::parse_in_memory_chunk;
use crate::foundation::core::Fps;
use crate::session::clock::SimulatedClock;
use std::time::Duration;
use crate::session::request::Resolution;
use std::io::Cursor;

fn png_bytes() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(8, 4, image::Rgba([200, 40, 40, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn request(format: OutputFormat, secs: f64) -> RenderRequest {
    RenderRequest {
        source: SourceImage::bytes(png_bytes()),
        animation: AnimationKind::Pulse,
        resolution: Resolution::Square,
        cycle_duration_secs: secs,
        format,
    }
}

#[test]
fn still_session_walks_every_state() {
    let req = request(OutputFormat::Webp, 1.0);
    let settings = ExportSettings::default();
    let backend = InMemoryBackend::all();
    let mut session = CaptureSession::new(&req, &settings);
    assert_eq!(session.state(), CaptureState::Idle);

    session.load().unwrap();
    assert_eq!(session.state(), CaptureState::Loading);
    session.start_recording(&backend).unwrap();
    assert_eq!(session.state(), CaptureState::Recording);
    session.capture_still().unwrap();
    let outcome = session.finalize(&CancelToken::new()).unwrap();

    assert_eq!(session.state(), CaptureState::Done);
    assert_eq!(outcome.frames_encoded, 1);
    assert_eq!(outcome.codec, Codec::WebpLossless);
    assert_eq!(outcome.artifact.file_name, "animation.webp");
    assert_eq!(outcome.artifact.mime, "image/webp");
    assert!(outcome.substitution.is_none());
}

#[test]
fn motion_session_records_two_cycles() {
    let req = request(OutputFormat::Webm, 0.5);
    let settings = ExportSettings::default();
    let backend = InMemoryBackend::all();
    let mut clock = SimulatedClock::new();
    let mut session = CaptureSession::new(&req, &settings);

    let outcome = session
        .run(&backend, &mut clock, &CancelToken::new())
        .unwrap();
    // 2 x 0.5 s at 30 fps.
    assert_eq!(outcome.frames_encoded, 30);
    assert_eq!(clock.ticks(), 30);
    assert_eq!(outcome.artifact.len(), 30 * 24);
    assert_eq!(backend.journal().frames.len(), 30);
}

#[test]
fn frames_cannot_be_captured_before_recording() {
    let req = request(OutputFormat::Gif, 1.0);
    let settings = ExportSettings::default();
    let mut session = CaptureSession::new(&req, &settings);
    assert!(session.capture_still().is_err());
    assert!(session.finalize(&CancelToken::new()).is_err());
}

#[test]
fn recording_needs_a_loaded_image() {
    let req = request(OutputFormat::Gif, 1.0);
    let settings = ExportSettings::default();
    let mut session = CaptureSession::new(&req, &settings);
    let err = session.start_recording(&InMemoryBackend::all()).unwrap_err();
    assert!(matches!(err, StillmotionError::ImageLoad(_)), "{err}");
}

#[test]
fn fail_aborts_the_open_encoder() {
    let req = request(OutputFormat::Mp4, 1.0);
    let settings = ExportSettings::default();
    let backend = InMemoryBackend::all();
    let mut session = CaptureSession::new(&req, &settings);
    session.load().unwrap();
    session.start_recording(&backend).unwrap();

    session.fail(&StillmotionError::Cancelled);
    assert_eq!(session.state(), CaptureState::Failed);
    assert_eq!(backend.journal().aborted, 1);

    // Terminal: nothing moves a failed session.
    session.fail(&StillmotionError::Cancelled);
    assert_eq!(backend.journal().aborted, 1);
    assert!(session.finalize(&CancelToken::new()).is_err());
}

#[test]
fn cancelled_before_start_fails_in_idle() {
    let req = request(OutputFormat::Webm, 1.0);
    let settings = ExportSettings::default();
    let cancel = CancelToken::new();
    cancel.cancel();
    let mut session = CaptureSession::new(&req, &settings);
    let err = session
        .run(&InMemoryBackend::all(), &mut SimulatedClock::new(), &cancel)
        .unwrap_err();
    assert!(matches!(err, StillmotionError::Cancelled));
    assert_eq!(session.state(), CaptureState::Failed);
    assert_eq!(session.frames_pushed(), 0);
}

#[test]
fn substitution_is_recorded() {
    let req = request(OutputFormat::Webm, 0.5);
    let settings = ExportSettings::default();
    let backend = InMemoryBackend::new([Codec::Vp8]);
    let mut session = CaptureSession::new(&req, &settings);
    let outcome = session
        .run(&backend, &mut SimulatedClock::new(), &CancelToken::new())
        .unwrap();
    assert_eq!(outcome.codec, Codec::Vp8);
    assert_eq!(
        outcome.substitution,
        Some(CodecSubstitution {
            requested: Codec::Vp9,
            used: Codec::Vp8,
        })
    );
}

#[test]
fn state_graph_only_moves_forward() {
    use CaptureState::*;
    assert!(Idle.can_enter(Loading));
    assert!(Recording.can_enter(Failed));
    assert!(!Idle.can_enter(Recording));
    assert!(!Done.can_enter(Failed));
    assert!(!Failed.can_enter(Idle));
    assert!(Done.is_terminal() && Failed.is_terminal());
}

#[test]
fn artifact_is_saved_under_its_file_name() {
    let dir = std::env::temp_dir().join(format!("stillmotion_artifact_{}", std::process::id()));
    let artifact = Artifact {
        file_name: "animation.gif".to_owned(),
        mime: "image/gif",
        bytes: vec![1, 2, 3],
    };
    let path = artifact.save_in(&dir).unwrap();
    assert_eq!(path, dir.join("animation.gif"));
    assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
    let _ = std::fs::remove_dir_all(&dir);
}

/// Clock that always reports `slots` elapsed frame slots per wait.
struct LaggingClock {
    inner: SimulatedClock,
    slots: u64,
}

impl FrameClock for LaggingClock {
    fn start(&mut self) {
        self.inner.start();
    }

    fn elapsed(&self) -> Duration {
        self.inner.elapsed()
    }

    fn wait_next_frame(&mut self, fps: Fps) -> u64 {
        for _ in 0..self.slots {
            self.inner.wait_next_frame(fps);
        }
        self.slots
    }
}

#[test]
fn missed_slots_repeat_the_last_frame() {
    let mut req = request(OutputFormat::Webm, 0.5);
    req.animation = AnimationKind::RotateIn;
    let settings = ExportSettings::default();
    let backend = InMemoryBackend::all();
    let mut clock = LaggingClock {
        inner: SimulatedClock::new(),
        slots: 3,
    };
    let mut session = CaptureSession::new(&req, &settings);
    let outcome = session
        .run(&backend, &mut clock, &CancelToken::new())
        .unwrap();

    assert_eq!(outcome.frames_encoded, 30);
    let digests: Vec<u64> = outcome
        .artifact
        .bytes
        .chunks(24)
        .map(|c| parse_in_memory_chunk(c).unwrap().3)
        .collect();
    for group in digests.chunks(3) {
        assert!(group.iter().all(|d| *d == group[0]));
    }
    assert_ne!(digests[2], digests[3]);
}

#[test]
fn still_capture_uses_the_midpoint_pose() {
    let mut req = request(OutputFormat::Webp, 1.0);
    req.animation = AnimationKind::FadeIn;
    let settings = ExportSettings::default();
    let backend = InMemoryBackend::all();
    let mut session = CaptureSession::new(&req, &settings);
    session.load().unwrap();
    session.start_recording(&backend).unwrap();

    let start = session.compose(Progress::from_elapsed(Duration::ZERO, req.cycle())).unwrap();
    let mid = session.compose(Progress::MIDPOINT).unwrap();
    assert_ne!(start, mid);

    session.capture_still().unwrap();
    let outcome = session.finalize(&CancelToken::new()).unwrap();
    let recorded = parse_in_memory_chunk(&outcome.artifact.bytes).unwrap().3;
    let expected = xxhash_rust::xxh3::xxh3_64_with_seed(&mid.data, crate::encode::sink::DIGEST_SEED);
    assert_eq!(recorded, expected);
}
