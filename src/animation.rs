//! Transform Library: pure per-frame transforms for every [`kind::AnimationKind`].

/// Easing curves shared by the formula table.
pub mod ease;
/// Aspect-preserving image fit rule.
pub mod fit;
pub(crate) mod formulas;
/// The closed set of animation kinds.
pub mod kind;
/// Transform value and the `compute_transform` entry points.
pub mod transform;
