use super::*;

#[test]
fn primary_codec_wins_when_supported() {
    let backend = InMemoryBackend::all();
    assert_eq!(
        negotiate_codec(&backend, OutputFormat::Webm).unwrap(),
        (Codec::Vp9, false)
    );
}

#[test]
fn fallback_codec_is_flagged_as_substitution() {
    let backend = InMemoryBackend::new([Codec::Mpeg4]);
    assert_eq!(
        negotiate_codec(&backend, OutputFormat::Mp4).unwrap(),
        (Codec::Mpeg4, true)
    );
}

#[test]
fn no_codec_is_unsupported() {
    let backend = InMemoryBackend::new([Codec::Gif]);
    let err = negotiate_codec(&backend, OutputFormat::Webm).unwrap_err();
    assert!(matches!(err, StillmotionError::EncodingUnsupported(_)), "{err}");
    let err = negotiate_codec(&backend, OutputFormat::Webp).unwrap_err();
    assert!(matches!(err, StillmotionError::EncodingUnsupported(_)), "{err}");
}

#[test]
fn still_only_system_backend_serves_images() {
    let backend = SystemEncoders::still_only();
    assert!(backend.supports(Codec::Gif));
    assert!(backend.supports(Codec::WebpLossless));
    assert!(!backend.supports(Codec::Vp9));
    assert!(backend.open(Codec::H264).is_err());
    assert_eq!(backend.open(Codec::Gif).unwrap().codec(), Codec::Gif);
}

#[test]
fn in_memory_backend_refuses_unlisted_codecs() {
    let backend = InMemoryBackend::new([Codec::Vp8]);
    assert!(backend.open(Codec::Vp9).is_err());
    assert_eq!(backend.open(Codec::Vp8).unwrap().codec(), Codec::Vp8);
}
