use super::*;
use crate::animation::kind::AnimationKind;
use crate::assets::source::SourceImage;
use crate::encode::registry::InMemoryBackend;
use crate::session::clock::SimulatedClock;
use crate::session::request::Resolution;
use std::io::Cursor;

fn png_bytes() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([0, 120, 255, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn request(format: OutputFormat) -> RenderRequest {
    RenderRequest {
        source: SourceImage::bytes(png_bytes()),
        animation: AnimationKind::FadeIn,
        resolution: Resolution::Square,
        cycle_duration_secs: 1.0,
        format,
    }
}

#[test]
fn success_emits_started_then_completed() {
    let exporter = Exporter::new(InMemoryBackend::all());
    let mut events = Vec::new();
    let mut observer = |e: &ExportEvent| events.push(e.clone());

    let report = exporter
        .export(
            &request(OutputFormat::Gif),
            &ExportSettings::default(),
            &mut SimulatedClock::new(),
            &CancelToken::new(),
            &mut observer,
        )
        .unwrap();

    assert_eq!(report.state, CaptureState::Done);
    assert_eq!(
        events,
        vec![
            ExportEvent::Started {
                format: OutputFormat::Gif
            },
            ExportEvent::Completed {
                file_name: "animation.gif".to_owned(),
                bytes: report.artifact.len(),
            },
        ]
    );
    assert!(!exporter.is_busy());
}

#[test]
fn failure_reports_a_short_cause() {
    let exporter = Exporter::new(InMemoryBackend::all());
    let mut events = Vec::new();
    let mut observer = |e: &ExportEvent| events.push(e.clone());
    let mut req = request(OutputFormat::Webm);
    req.source = SourceImage::bytes(b"not an image".to_vec());

    let err = exporter
        .export(
            &req,
            &ExportSettings::default(),
            &mut SimulatedClock::new(),
            &CancelToken::new(),
            &mut observer,
        )
        .unwrap_err();

    assert!(matches!(err, StillmotionError::ImageLoad(_)), "{err}");
    assert_eq!(
        events.last(),
        Some(&ExportEvent::Failed {
            cause: "The image could not be loaded."
        })
    );
    assert!(!exporter.is_busy());
}

#[test]
fn invalid_duration_fails_after_started() {
    let exporter = Exporter::new(InMemoryBackend::all());
    let mut events = Vec::new();
    let mut observer = |e: &ExportEvent| events.push(e.clone());
    let mut req = request(OutputFormat::Webp);
    req.cycle_duration_secs = 9.0;

    let err = exporter
        .export(
            &req,
            &ExportSettings::default(),
            &mut SimulatedClock::new(),
            &CancelToken::new(),
            &mut observer,
        )
        .unwrap_err();
    assert!(matches!(err, StillmotionError::Validation(_)));
    assert_eq!(events.len(), 2);
}

#[test]
fn second_export_while_running_is_busy() {
    let exporter = Exporter::new(InMemoryBackend::all());
    let req = request(OutputFormat::Webp);
    let settings = ExportSettings::default();
    let mut nested: Option<StillmotionResult<ExportReport>> = None;

    let mut observer = |e: &ExportEvent| {
        if matches!(e, ExportEvent::Started { .. }) {
            let mut inner_events = Vec::new();
            nested = Some(exporter.export(
                &req,
                &settings,
                &mut SimulatedClock::new(),
                &CancelToken::new(),
                &mut |e: &ExportEvent| inner_events.push(e.clone()),
            ));
            assert!(inner_events.is_empty());
        }
    };

    let outer = exporter.export(
        &req,
        &settings,
        &mut SimulatedClock::new(),
        &CancelToken::new(),
        &mut observer,
    );
    assert!(outer.is_ok());
    assert!(matches!(nested, Some(Err(StillmotionError::SessionBusy))));

    // Released afterwards.
    assert!(!exporter.is_busy());
    assert!(
        exporter
            .export(
                &req,
                &settings,
                &mut SimulatedClock::new(),
                &CancelToken::new(),
                &mut LogObserver,
            )
            .is_ok()
    );
}

#[test]
fn log_observer_accepts_every_event() {
    let mut obs = LogObserver;
    obs.on_event(&ExportEvent::Started {
        format: OutputFormat::Mp4,
    });
    obs.on_event(&ExportEvent::Failed {
        cause: StillmotionError::Cancelled.user_message(),
    });
}
