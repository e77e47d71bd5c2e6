use super::*;

fn request_json(animation: &str, duration: f64, format: &str) -> String {
    format!(
        r#"{{
            "source": {{ "path": "cat.png" }},
            "animation": "{animation}",
            "resolution": "16:9",
            "cycle_duration_secs": {duration},
            "format": "{format}"
        }}"#
    )
}

#[test]
fn resolutions_map_to_fixed_sizes() {
    assert_eq!(
        Resolution::Square.canvas(),
        Canvas {
            width: 512,
            height: 512
        }
    );
    assert_eq!(
        Resolution::Portrait.canvas(),
        Canvas {
            width: 576,
            height: 1024
        }
    );
    assert_eq!(
        "16:9".parse::<Resolution>().unwrap().canvas(),
        Canvas {
            width: 1024,
            height: 576
        }
    );
    assert!("4:3".parse::<Resolution>().is_err());
}

#[test]
fn parses_a_full_request() {
    let req = RenderRequest::from_json(&request_json("backInDown", 1.5, "mp4")).unwrap();
    assert_eq!(req.animation, AnimationKind::BackInDown);
    assert_eq!(req.resolution, Resolution::Landscape);
    assert_eq!(req.format, OutputFormat::Mp4);
    assert_eq!(req.cycle(), Duration::from_millis(1500));
    assert!(matches!(req.source, SourceImage::Path(ref p) if p.ends_with("cat.png")));
}

#[test]
fn unknown_animation_tag_uses_default() {
    let req = RenderRequest::from_json(&request_json("wobbleSideways", 1.0, "webm")).unwrap();
    assert_eq!(req.animation, AnimationKind::DEFAULT);
}

#[test]
fn duration_bounds_are_inclusive() {
    assert!(RenderRequest::from_json(&request_json("pulse", 0.5, "gif")).is_ok());
    assert!(RenderRequest::from_json(&request_json("pulse", 5.0, "gif")).is_ok());
}

#[test]
fn duration_out_of_range_is_rejected() {
    for secs in [0.49, 5.01, 0.0, -1.0] {
        let err = RenderRequest::from_json(&request_json("pulse", secs, "gif")).unwrap_err();
        assert!(matches!(err, StillmotionError::Validation(_)), "{secs}: {err}");
    }
}

#[test]
fn unknown_format_is_rejected() {
    let err = RenderRequest::from_json(&request_json("pulse", 1.0, "avi")).unwrap_err();
    assert!(matches!(err, StillmotionError::Validation(_)), "{err}");
}

#[test]
fn from_path_resolves_relative_images() {
    let dir = std::env::temp_dir().join(format!("stillmotion_request_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("request.json");
    std::fs::write(&path, request_json("flash", 2.0, "webp")).unwrap();

    let req = RenderRequest::from_path(&path).unwrap();
    match &req.source {
        SourceImage::Path(p) => assert_eq!(p, &dir.join("cat.png")),
        other => panic!("unexpected source {other:?}"),
    }
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn settings_default_to_capture_rate_and_white() {
    let s = ExportSettings::default();
    assert_eq!(s.fps, Fps::CAPTURE);
    assert_eq!(s.background_rgba, [255, 255, 255, 255]);
    assert_eq!(s.load_timeout, DEFAULT_LOAD_TIMEOUT);
}

#[test]
fn settings_json_fills_missing_fields() {
    let s = ExportSettings::from_json(r#"{ "background_rgba": [0, 0, 0, 255] }"#).unwrap();
    assert_eq!(s.background_rgba, [0, 0, 0, 255]);
    assert_eq!(s.fps, Fps::CAPTURE);
}

#[test]
fn zero_fps_settings_are_rejected() {
    let s = ExportSettings {
        fps: Fps { num: 0, den: 1 },
        ..ExportSettings::default()
    };
    assert!(s.validate().is_err());
}
