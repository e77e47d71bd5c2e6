use std::fmt;
use std::str::FromStr;

use crate::animation::formulas::{Formula, attention, composite, entrances, exits};
use crate::foundation::error::StillmotionError;

/// Family an [`AnimationKind`] belongs to, used for grouping in listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Family {
    /// In-place loops that draw attention.
    AttentionSeeker,
    /// Fly in at reduced size, then grow.
    BackEntrance,
    /// Arrive with decaying bounces.
    BounceEntrance,
    /// Fade in, optionally while sliding.
    FadeEntrance,
    /// Fade out.
    FadeExit,
    /// Rotations about a screen axis, projected to 2D.
    Flipper,
    /// Skewed horizontal slides.
    Lightspeed,
    /// Rotate into the rest pose.
    RotateEntrance,
    /// Rotate away.
    RotateExit,
    /// Grow into the rest pose.
    ZoomEntrance,
    /// Shrink from an enlarged pose.
    ZoomExit,
    /// Slide in from an edge.
    SlideEntrance,
    /// Slide out to an edge.
    SlideExit,
    /// One-off multi-stage effects.
    Special,
    /// Composite kinds specific to this crate.
    Custom,
}

impl Family {
    /// Human-readable family name.
    pub fn label(self) -> &'static str {
        match self {
            Self::AttentionSeeker => "Attention seekers",
            Self::BackEntrance => "Back entrances",
            Self::BounceEntrance => "Bouncing entrances",
            Self::FadeEntrance => "Fading entrances",
            Self::FadeExit => "Fading exits",
            Self::Flipper => "Flippers",
            Self::Lightspeed => "Lightspeed",
            Self::RotateEntrance => "Rotating entrances",
            Self::RotateExit => "Rotating exits",
            Self::ZoomEntrance => "Zooming entrances",
            Self::ZoomExit => "Zooming exits",
            Self::SlideEntrance => "Sliding entrances",
            Self::SlideExit => "Sliding exits",
            Self::Special => "Specials",
            Self::Custom => "Custom",
        }
    }
}

/// The closed set of animations an image can be rendered through.
///
/// Serialized as its camelCase tag (`"scaleIn"`, `"backInDown"`, ...).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum AnimationKind {
    Bounce,
    Flash,
    Pulse,
    RubberBand,
    ShakeX,
    ShakeY,
    HeadShake,
    Swing,
    Tada,
    Wobble,
    Jello,
    HeartBeat,
    BackInDown,
    BackInLeft,
    BackInRight,
    BackInUp,
    BounceIn,
    BounceInDown,
    BounceInLeft,
    BounceInRight,
    BounceInUp,
    FadeIn,
    FadeInDown,
    FadeInLeft,
    FadeInRight,
    FadeInUp,
    FadeInTopLeft,
    FadeInBottomRight,
    FadeOut,
    Flip,
    FlipInX,
    FlipInY,
    FlipOutX,
    FlipOutY,
    LightSpeedInRight,
    LightSpeedInLeft,
    LightSpeedOutRight,
    LightSpeedOutLeft,
    RotateIn,
    RotateInDownLeft,
    RotateInDownRight,
    RotateInUpLeft,
    RotateInUpRight,
    RotateOut,
    ZoomIn,
    ZoomInDown,
    ZoomInLeft,
    ZoomInRight,
    ZoomInUp,
    ZoomOut,
    SlideInDown,
    SlideInLeft,
    SlideInRight,
    SlideInUp,
    SlideOutDown,
    SlideOutLeft,
    SlideOutRight,
    SlideOutUp,
    Hinge,
    JackInTheBox,
    RollIn,
    ScaleIn,
    ScaleOut,
    SwirlIn,
    SlideIn,
    SpiralIn,
    GlitchSkew,
}

/// Table row describing one [`AnimationKind`].
#[derive(Clone, Copy)]
pub(crate) struct KindInfo {
    pub(crate) tag: &'static str,
    pub(crate) label: &'static str,
    pub(crate) family: Family,
    pub(crate) formula: Formula,
}

const fn row(
    tag: &'static str,
    label: &'static str,
    family: Family,
    formula: Formula,
) -> KindInfo {
    KindInfo {
        tag,
        label,
        family,
        formula,
    }
}

impl AnimationKind {
    /// Kind used when a tag does not name any known animation.
    pub const DEFAULT: AnimationKind = AnimationKind::ScaleIn;

    /// Every kind, in listing order.
    pub const ALL: [AnimationKind; 67] = {
        use AnimationKind::*;
        [
            Bounce, Flash, Pulse, RubberBand, ShakeX, ShakeY, HeadShake, Swing, Tada, Wobble,
            Jello, HeartBeat, BackInDown, BackInLeft, BackInRight, BackInUp, BounceIn,
            BounceInDown, BounceInLeft, BounceInRight, BounceInUp, FadeIn, FadeInDown, FadeInLeft,
            FadeInRight, FadeInUp, FadeInTopLeft, FadeInBottomRight, FadeOut, Flip, FlipInX,
            FlipInY, FlipOutX, FlipOutY, LightSpeedInRight, LightSpeedInLeft, LightSpeedOutRight,
            LightSpeedOutLeft, RotateIn, RotateInDownLeft, RotateInDownRight, RotateInUpLeft,
            RotateInUpRight, RotateOut, ZoomIn, ZoomInDown, ZoomInLeft, ZoomInRight, ZoomInUp,
            ZoomOut, SlideInDown, SlideInLeft, SlideInRight, SlideInUp, SlideOutDown,
            SlideOutLeft, SlideOutRight, SlideOutUp, Hinge, JackInTheBox, RollIn, ScaleIn,
            ScaleOut, SwirlIn, SlideIn, SpiralIn, GlitchSkew,
        ]
    };

    pub(crate) fn info(self) -> KindInfo {
        use Family as F;
        match self {
            Self::Bounce => row("bounce", "Bounce", F::AttentionSeeker, attention::bounce),
            Self::Flash => row("flash", "Flash", F::AttentionSeeker, attention::flash),
            Self::Pulse => row("pulse", "Pulse", F::AttentionSeeker, attention::pulse),
            Self::RubberBand => row(
                "rubberBand",
                "Rubber Band",
                F::AttentionSeeker,
                attention::rubber_band,
            ),
            Self::ShakeX => row("shakeX", "Shake X", F::AttentionSeeker, attention::shake_x),
            Self::ShakeY => row("shakeY", "Shake Y", F::AttentionSeeker, attention::shake_y),
            Self::HeadShake => row(
                "headShake",
                "Head Shake",
                F::AttentionSeeker,
                attention::head_shake,
            ),
            Self::Swing => row("swing", "Swing", F::AttentionSeeker, attention::swing),
            Self::Tada => row("tada", "Tada", F::AttentionSeeker, attention::tada),
            Self::Wobble => row("wobble", "Wobble", F::AttentionSeeker, attention::wobble),
            Self::Jello => row("jello", "Jello", F::AttentionSeeker, attention::jello),
            Self::HeartBeat => row(
                "heartBeat",
                "Heart Beat",
                F::AttentionSeeker,
                attention::heart_beat,
            ),
            Self::BackInDown => row(
                "backInDown",
                "Back In Down",
                F::BackEntrance,
                entrances::back_in_down,
            ),
            Self::BackInLeft => row(
                "backInLeft",
                "Back In Left",
                F::BackEntrance,
                entrances::back_in_left,
            ),
            Self::BackInRight => row(
                "backInRight",
                "Back In Right",
                F::BackEntrance,
                entrances::back_in_right,
            ),
            Self::BackInUp => row(
                "backInUp",
                "Back In Up",
                F::BackEntrance,
                entrances::back_in_up,
            ),
            Self::BounceIn => row(
                "bounceIn",
                "Bounce In",
                F::BounceEntrance,
                entrances::bounce_in,
            ),
            Self::BounceInDown => row(
                "bounceInDown",
                "Bounce In Down",
                F::BounceEntrance,
                entrances::bounce_in_down,
            ),
            Self::BounceInLeft => row(
                "bounceInLeft",
                "Bounce In Left",
                F::BounceEntrance,
                entrances::bounce_in_left,
            ),
            Self::BounceInRight => row(
                "bounceInRight",
                "Bounce In Right",
                F::BounceEntrance,
                entrances::bounce_in_right,
            ),
            Self::BounceInUp => row(
                "bounceInUp",
                "Bounce In Up",
                F::BounceEntrance,
                entrances::bounce_in_up,
            ),
            Self::FadeIn => row("fadeIn", "Fade In", F::FadeEntrance, entrances::fade_in),
            Self::FadeInDown => row(
                "fadeInDown",
                "Fade In Down",
                F::FadeEntrance,
                entrances::fade_in_down,
            ),
            Self::FadeInLeft => row(
                "fadeInLeft",
                "Fade In Left",
                F::FadeEntrance,
                entrances::fade_in_left,
            ),
            Self::FadeInRight => row(
                "fadeInRight",
                "Fade In Right",
                F::FadeEntrance,
                entrances::fade_in_right,
            ),
            Self::FadeInUp => row(
                "fadeInUp",
                "Fade In Up",
                F::FadeEntrance,
                entrances::fade_in_up,
            ),
            Self::FadeInTopLeft => row(
                "fadeInTopLeft",
                "Fade In Top Left",
                F::FadeEntrance,
                entrances::fade_in_top_left,
            ),
            Self::FadeInBottomRight => row(
                "fadeInBottomRight",
                "Fade In Bottom Right",
                F::FadeEntrance,
                entrances::fade_in_bottom_right,
            ),
            Self::FadeOut => row("fadeOut", "Fade Out", F::FadeExit, exits::fade_out),
            Self::Flip => row("flip", "Flip", F::Flipper, entrances::flip),
            Self::FlipInX => row("flipInX", "Flip In X", F::Flipper, entrances::flip_in_x),
            Self::FlipInY => row("flipInY", "Flip In Y", F::Flipper, entrances::flip_in_y),
            Self::FlipOutX => row("flipOutX", "Flip Out X", F::Flipper, exits::flip_out_x),
            Self::FlipOutY => row("flipOutY", "Flip Out Y", F::Flipper, exits::flip_out_y),
            Self::LightSpeedInRight => row(
                "lightSpeedInRight",
                "Light Speed In Right",
                F::Lightspeed,
                entrances::light_speed_in_right,
            ),
            Self::LightSpeedInLeft => row(
                "lightSpeedInLeft",
                "Light Speed In Left",
                F::Lightspeed,
                entrances::light_speed_in_left,
            ),
            Self::LightSpeedOutRight => row(
                "lightSpeedOutRight",
                "Light Speed Out Right",
                F::Lightspeed,
                exits::light_speed_out_right,
            ),
            Self::LightSpeedOutLeft => row(
                "lightSpeedOutLeft",
                "Light Speed Out Left",
                F::Lightspeed,
                exits::light_speed_out_left,
            ),
            Self::RotateIn => row(
                "rotateIn",
                "Rotate In",
                F::RotateEntrance,
                entrances::rotate_in,
            ),
            Self::RotateInDownLeft => row(
                "rotateInDownLeft",
                "Rotate In Down Left",
                F::RotateEntrance,
                entrances::rotate_in_down_left,
            ),
            Self::RotateInDownRight => row(
                "rotateInDownRight",
                "Rotate In Down Right",
                F::RotateEntrance,
                entrances::rotate_in_down_right,
            ),
            Self::RotateInUpLeft => row(
                "rotateInUpLeft",
                "Rotate In Up Left",
                F::RotateEntrance,
                entrances::rotate_in_up_left,
            ),
            Self::RotateInUpRight => row(
                "rotateInUpRight",
                "Rotate In Up Right",
                F::RotateEntrance,
                entrances::rotate_in_up_right,
            ),
            Self::RotateOut => row("rotateOut", "Rotate Out", F::RotateExit, exits::rotate_out),
            Self::ZoomIn => row("zoomIn", "Zoom In", F::ZoomEntrance, entrances::zoom_in),
            Self::ZoomInDown => row(
                "zoomInDown",
                "Zoom In Down",
                F::ZoomEntrance,
                entrances::zoom_in_down,
            ),
            Self::ZoomInLeft => row(
                "zoomInLeft",
                "Zoom In Left",
                F::ZoomEntrance,
                entrances::zoom_in_left,
            ),
            Self::ZoomInRight => row(
                "zoomInRight",
                "Zoom In Right",
                F::ZoomEntrance,
                entrances::zoom_in_right,
            ),
            Self::ZoomInUp => row(
                "zoomInUp",
                "Zoom In Up",
                F::ZoomEntrance,
                entrances::zoom_in_up,
            ),
            Self::ZoomOut => row("zoomOut", "Zoom Out", F::ZoomExit, exits::zoom_out),
            Self::SlideInDown => row(
                "slideInDown",
                "Slide In Down",
                F::SlideEntrance,
                entrances::slide_in_down,
            ),
            Self::SlideInLeft => row(
                "slideInLeft",
                "Slide In Left",
                F::SlideEntrance,
                entrances::slide_in_left,
            ),
            Self::SlideInRight => row(
                "slideInRight",
                "Slide In Right",
                F::SlideEntrance,
                entrances::slide_in_right,
            ),
            Self::SlideInUp => row(
                "slideInUp",
                "Slide In Up",
                F::SlideEntrance,
                entrances::slide_in_up,
            ),
            Self::SlideOutDown => row(
                "slideOutDown",
                "Slide Out Down",
                F::SlideExit,
                exits::slide_out_down,
            ),
            Self::SlideOutLeft => row(
                "slideOutLeft",
                "Slide Out Left",
                F::SlideExit,
                exits::slide_out_left,
            ),
            Self::SlideOutRight => row(
                "slideOutRight",
                "Slide Out Right",
                F::SlideExit,
                exits::slide_out_right,
            ),
            Self::SlideOutUp => row(
                "slideOutUp",
                "Slide Out Up",
                F::SlideExit,
                exits::slide_out_up,
            ),
            Self::Hinge => row("hinge", "Hinge", F::Special, composite::hinge),
            Self::JackInTheBox => row(
                "jackInTheBox",
                "Jack In The Box",
                F::Special,
                composite::jack_in_the_box,
            ),
            Self::RollIn => row("rollIn", "Roll In", F::Special, composite::roll_in),
            Self::ScaleIn => row("scaleIn", "Scale In", F::Custom, composite::scale_in),
            Self::ScaleOut => row("scaleOut", "Scale Out", F::Custom, composite::scale_out),
            Self::SwirlIn => row("swirlIn", "Swirl In", F::Custom, composite::swirl_in),
            Self::SlideIn => row("slideIn", "Slide In", F::Custom, composite::slide_in),
            Self::SpiralIn => row("spiralIn", "Spiral In", F::Custom, composite::spiral_in),
            Self::GlitchSkew => row(
                "glitchSkew",
                "Glitch Skew",
                F::Custom,
                composite::glitch_skew,
            ),
        }
    }

    /// Stable camelCase tag, identical to the serde representation.
    pub fn tag(self) -> &'static str {
        self.info().tag
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        self.info().label
    }

    /// Family this kind belongs to.
    pub fn family(self) -> Family {
        self.info().family
    }

    pub(crate) fn formula(self) -> Formula {
        self.info().formula
    }

    /// Look up a kind by its exact tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.tag() == tag)
    }

    /// Look up a kind by tag, falling back to [`AnimationKind::DEFAULT`] for unknown tags.
    ///
    /// The fallback keeps the transform contract total; it is logged, never silent.
    pub fn from_tag_or_default(tag: &str) -> Self {
        Self::from_tag(tag).unwrap_or_else(|| {
            tracing::warn!(
                tag,
                fallback = Self::DEFAULT.tag(),
                "unknown animation tag; using default"
            );
            Self::DEFAULT
        })
    }
}

impl Default for AnimationKind {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for AnimationKind {
    type Err = StillmotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s)
            .ok_or_else(|| StillmotionError::validation(format!("unknown animation '{s}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/kind.rs"]
mod tests;
