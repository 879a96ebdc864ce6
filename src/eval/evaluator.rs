use crate::{
    animation::keyframes,
    eval::filter::FilterDescriptor,
    eval::transitions::{self, TransitionEdge},
    foundation::error::{KeylineError, KeylineResult},
    model::clip::{Clip, Property},
    model::project::{Project, Track},
};

/// Horizontal insets, in percent of the clip width, hidden by wipe transitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipRegion {
    /// Hidden from the left edge.
    pub left_pct: f64,
    /// Hidden from the right edge.
    pub right_pct: f64,
}

impl ClipRegion {
    /// Nothing is clipped.
    pub fn is_full(&self) -> bool {
        self.left_pct <= 0.0 && self.right_pct <= 0.0
    }
}

/// Fully resolved visual state of one clip at one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedVisual {
    /// Opacity multiplier.
    pub opacity: f64,
    /// Horizontal offset in pixels.
    pub translate_x: f64,
    /// Vertical offset in pixels.
    pub translate_y: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Rotation in degrees.
    pub rotation_deg: f64,
    /// Wipe insets.
    pub clip_region: ClipRegion,
    /// Resolved filter, if the clip has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterDescriptor>,
}

impl Default for ResolvedVisual {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            scale: 1.0,
            rotation_deg: 0.0,
            clip_region: ClipRegion::default(),
            filter: None,
        }
    }
}

impl ResolvedVisual {
    /// `translate * rotate * scale`, rotating and scaling about the clip origin.
    pub fn to_affine(&self) -> kurbo::Affine {
        kurbo::Affine::translate((self.translate_x, self.translate_y))
            * kurbo::Affine::rotate(self.rotation_deg.to_radians())
            * kurbo::Affine::scale(self.scale)
    }
}

/// Resolve `clip` at clip-local `frame`.
///
/// `frame` is clamped to `[0, durationInFrames]`. Stages run in a fixed order: static
/// values, entry then exit transitions, keyframe curves (which replace whatever the earlier
/// stages produced for their property), filter.
pub fn evaluate(clip: &Clip, frame: i64) -> ResolvedVisual {
    let len = clip.duration_in_frames;
    let f = frame.clamp(0, i64::try_from(len).unwrap_or(i64::MAX)) as f64;

    let mut v = ResolvedVisual {
        opacity: clip.static_value(Property::Opacity),
        translate_x: clip.static_value(Property::X),
        translate_y: clip.static_value(Property::Y),
        scale: clip.static_value(Property::Scale),
        rotation_deg: clip.static_value(Property::Rotation),
        clip_region: ClipRegion::default(),
        filter: None,
    };

    for (edge, t) in [
        (TransitionEdge::In, &clip.transition_in),
        (TransitionEdge::Out, &clip.transition_out),
    ] {
        if let Some(t) = t {
            let p = transitions::window_progress(edge, t, f, len as f64);
            transitions::apply(edge, t.kind, p, &mut v);
        }
    }

    for property in Property::ALL {
        let Some(value) = keyframes::sample(clip.keyframes_for(property), f) else {
            continue;
        };
        match property {
            Property::Opacity => v.opacity = value,
            Property::Scale => v.scale = value,
            Property::Rotation => v.rotation_deg = value,
            Property::X => v.translate_x = value,
            Property::Y => v.translate_y = value,
        }
    }

    v.filter = clip.filter.as_ref().map(FilterDescriptor::resolve);
    v
}

/// One clip that is live at a project frame.
#[derive(Clone, Debug)]
pub struct EvaluatedClip<'a> {
    /// Source clip.
    pub clip: &'a Clip,
    /// Owning track.
    pub track: &'a Track,
    /// Frame relative to the clip start.
    pub local_frame: u64,
    /// Resolved visual state (ignored for audio).
    pub visual: ResolvedVisual,
}

/// Every live clip at one project frame, in paint order.
#[derive(Clone, Debug)]
pub struct EvaluatedFrame<'a> {
    /// Absolute project frame.
    pub frame: u64,
    /// Tracks in project order, then clips in array order; later entries paint on top.
    pub clips: Vec<EvaluatedClip<'a>>,
}

/// Resolve every clip live at absolute project `frame`.
///
/// Clips whose track no longer exists are skipped.
#[tracing::instrument(skip(project), fields(project = %project.id))]
pub fn evaluate_project_frame(project: &Project, frame: u64) -> KeylineResult<EvaluatedFrame<'_>> {
    if frame >= project.duration_in_frames {
        return Err(KeylineError::evaluation(format!(
            "frame {frame} is out of bounds (duration {})",
            project.duration_in_frames
        )));
    }

    let mut clips = Vec::new();
    for track in &project.tracks {
        for clip in project.clips_on_track(&track.id) {
            if !clip.contains_frame(frame) {
                continue;
            }
            let local_frame = frame - clip.start_frame;
            clips.push(EvaluatedClip {
                clip,
                track,
                local_frame,
                visual: evaluate(clip, i64::try_from(local_frame).unwrap_or(i64::MAX)),
            });
        }
    }

    Ok(EvaluatedFrame { frame, clips })
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
