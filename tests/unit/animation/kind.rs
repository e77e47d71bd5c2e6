use super::*;
use std::collections::BTreeSet;

#[test]
fn all_lists_every_kind_once() {
    let unique: BTreeSet<_> = AnimationKind::ALL.iter().copied().collect();
    assert_eq!(unique.len(), AnimationKind::ALL.len());
    let tags: BTreeSet<_> = AnimationKind::ALL.iter().map(|k| k.tag()).collect();
    assert_eq!(tags.len(), AnimationKind::ALL.len());
}

#[test]
fn tags_match_serde_representation() {
    for kind in AnimationKind::ALL {
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, format!("\"{}\"", kind.tag()));
        let back: AnimationKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);
    }
}

#[test]
fn from_str_is_strict_and_from_tag_or_default_is_lenient() {
    assert_eq!(
        "swirlIn".parse::<AnimationKind>().unwrap(),
        AnimationKind::SwirlIn
    );
    assert!("SwirlIn".parse::<AnimationKind>().is_err());
    assert_eq!(
        AnimationKind::from_tag_or_default("nope"),
        AnimationKind::ScaleIn
    );
    assert_eq!(AnimationKind::default(), AnimationKind::ScaleIn);
}

#[test]
fn legacy_preview_kinds_are_present() {
    for tag in [
        "scaleIn", "scaleOut", "swirlIn", "fadeIn", "slideIn", "bounceIn", "rotateIn", "zoomOut",
    ] {
        assert!(AnimationKind::from_tag(tag).is_some(), "{tag}");
    }
}

#[test]
fn families_group_kinds() {
    assert_eq!(AnimationKind::Tada.family(), Family::AttentionSeeker);
    assert_eq!(AnimationKind::BackInUp.family(), Family::BackEntrance);
    assert_eq!(AnimationKind::GlitchSkew.family(), Family::Custom);
    assert_eq!(AnimationKind::Hinge.family().label(), "Specials");
    assert_eq!(AnimationKind::JackInTheBox.label(), "Jack In The Box");
}
