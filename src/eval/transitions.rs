use crate::{
    animation::ease::{ramp_in, ramp_out},
    eval::evaluator::ResolvedVisual,
    foundation::math::clamp01,
    model::clip::{Transition, TransitionKind},
};

/// Vertical travel of a slide transition, in pixels.
pub const SLIDE_DISTANCE_PX: f64 = 100.0;

/// Which end of the clip a transition sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionEdge {
    /// `[0, d]` from the clip start.
    In,
    /// `[D - d, D]` before the clip end.
    Out,
}

/// Linear progress through the transition window at clip-local `frame`, clamped to `[0, 1]`.
///
/// Windows longer than the clip are not shortened; the ramp simply never completes.
pub fn window_progress(edge: TransitionEdge, t: &Transition, frame: f64, clip_len: f64) -> f64 {
    let d = t.duration.max(1) as f64;
    match edge {
        TransitionEdge::In => clamp01(frame / d),
        TransitionEdge::Out => clamp01((frame - (clip_len - d)) / d),
    }
}

/// Fold one transition at progress `t` into `v`.
pub(crate) fn apply(edge: TransitionEdge, kind: TransitionKind, t: f64, v: &mut ResolvedVisual) {
    match (edge, kind) {
        (TransitionEdge::In, TransitionKind::Fade) => v.opacity *= t,
        (TransitionEdge::Out, TransitionKind::Fade) => v.opacity *= 1.0 - t,

        (TransitionEdge::In, TransitionKind::Slide) => {
            v.translate_y += SLIDE_DISTANCE_PX - SLIDE_DISTANCE_PX * ramp_out(t);
        }
        (TransitionEdge::Out, TransitionKind::Slide) => {
            v.translate_y += SLIDE_DISTANCE_PX * ramp_in(t);
        }

        (TransitionEdge::In, TransitionKind::Zoom) => v.scale *= ramp_out(t),
        (TransitionEdge::Out, TransitionKind::Zoom) => v.scale *= 1.0 - ramp_in(t),

        // Entry reveals left to right by shrinking the right inset; exit hides from the left.
        (TransitionEdge::In, TransitionKind::Wipe) => v.clip_region.right_pct = 100.0 - 100.0 * t,
        (TransitionEdge::Out, TransitionKind::Wipe) => v.clip_region.left_pct = 100.0 * t,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/transitions.rs"]
mod tests;
