use super::*;
use std::io::Cursor;

fn tiny_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn loads_in_memory_bytes() {
    let src = SourceImage::bytes(tiny_png());
    let img = load_source_image(&src, DEFAULT_LOAD_TIMEOUT).unwrap();
    assert_eq!((img.width, img.height), (3, 2));
}

#[test]
fn loads_from_path() {
    let dir = std::env::temp_dir().join(format!("stillmotion_source_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("tiny.png");
    std::fs::write(&path, tiny_png()).unwrap();

    let img = load_source_image(&SourceImage::path(&path), DEFAULT_LOAD_TIMEOUT).unwrap();
    assert_eq!((img.width, img.height), (3, 2));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_file_is_an_image_load_error() {
    let src = SourceImage::path("/definitely/not/here.png");
    let err = load_source_image(&src, DEFAULT_LOAD_TIMEOUT).unwrap_err();
    assert!(matches!(err, StillmotionError::ImageLoad(_)), "{err}");
}

#[test]
fn zero_timeout_gives_up_on_a_large_decode() {
    let img = image::RgbaImage::from_pixel(2048, 2048, image::Rgba([1, 2, 3, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    let err = load_source_image(&SourceImage::bytes(buf), Duration::ZERO).unwrap_err();
    match err {
        StillmotionError::ImageLoad(msg) => assert!(msg.contains("timed out"), "{msg}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn path_source_serializes_as_snake_case() {
    let json = serde_json::to_string(&SourceImage::path("a.png")).unwrap();
    assert_eq!(json, r#"{"path":"a.png"}"#);
}
