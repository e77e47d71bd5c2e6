use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StillmotionError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        StillmotionError::image_load("x")
            .to_string()
            .contains("image load error:")
    );
    assert!(
        StillmotionError::surface_unavailable("x")
            .to_string()
            .contains("surface unavailable:")
    );
    assert!(
        StillmotionError::encoding_unsupported("x")
            .to_string()
            .contains("encoding unsupported:")
    );
    assert!(
        StillmotionError::encoding_runtime("x")
            .to_string()
            .contains("encoding runtime error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StillmotionError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn user_message_hides_internal_detail() {
    let err = StillmotionError::encoding_runtime("ffmpeg exited with status 1: /tmp/secret");
    assert!(!err.user_message().contains("/tmp/secret"));
    assert_eq!(
        StillmotionError::Cancelled.user_message(),
        "The export was cancelled."
    );
}
