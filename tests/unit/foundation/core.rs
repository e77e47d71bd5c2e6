use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert_eq!(Fps::new(30, 1).unwrap(), Fps::CAPTURE);
}

#[test]
fn frames_to_duration_is_exact_on_whole_seconds() {
    let fps = Fps::CAPTURE;
    assert_eq!(fps.frames_to_duration(0), Duration::ZERO);
    assert_eq!(fps.frames_to_duration(30), Duration::from_secs(1));
    assert_eq!(fps.frames_to_duration(60), Duration::from_secs(2));
    assert_eq!(fps.frames_to_duration(1), Duration::from_nanos(33_333_333));
}

#[test]
fn secs_to_frames_ceil_rounds_up() {
    let fps = Fps::CAPTURE;
    assert_eq!(fps.secs_to_frames_ceil(2.0), 60);
    assert_eq!(fps.secs_to_frames_ceil(0.01), 1);
    assert_eq!(fps.secs_to_frames_ceil(-1.0), 0);
}

#[test]
fn canvas_center_and_bounds() {
    let c = Canvas {
        width: 1024,
        height: 576,
    };
    assert_eq!(c.center(), Point::new(512.0, 288.0));
    assert_eq!(c.bounds(), Rect::new(0.0, 0.0, 1024.0, 576.0));
}
