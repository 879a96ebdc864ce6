use std::collections::BTreeMap;

use crate::{
    animation::ease::Easing,
    foundation::core::{ClipId, TrackId},
    foundation::error::{KeylineError, KeylineResult},
    model::clip::{Clip, ClipContent, Filter, Keyframe, Property, Transition},
};

/// Default length of a freshly drafted clip (3 s at 30 fps).
pub const DEFAULT_CLIP_FRAMES: u64 = 90;

#[derive(Clone, Debug, PartialEq)]
/// Everything needed to create a clip except its id, which the store generates.
pub struct ClipDraft {
    /// Type tag plus payload.
    pub content: ClipContent,
    /// First frame on the project timeline.
    pub start_frame: u64,
    /// Length in frames (`>= 1`).
    pub duration_in_frames: u64,
    /// Target track. Not checked on insert.
    pub track_id: TrackId,
    /// Display name.
    pub name: String,
    /// Static horizontal offset.
    pub x: Option<f64>,
    /// Static vertical offset.
    pub y: Option<f64>,
    /// Display width.
    pub width: Option<f64>,
    /// Display height.
    pub height: Option<f64>,
    /// Static scale.
    pub scale: Option<f64>,
    /// Static opacity.
    pub opacity: Option<f64>,
    /// Static rotation in degrees.
    pub rotation: Option<f64>,
    /// Optional filter.
    pub filter: Option<Filter>,
    /// Optional entry ramp.
    pub transition_in: Option<Transition>,
    /// Optional exit ramp.
    pub transition_out: Option<Transition>,
    /// Initial keyframes; each list must already be sorted with unique frames.
    pub keyframes: BTreeMap<Property, Vec<Keyframe>>,
}

impl ClipDraft {
    /// Draft a clip at frame 0 lasting [`DEFAULT_CLIP_FRAMES`].
    pub fn new(content: ClipContent, track_id: TrackId, name: impl Into<String>) -> Self {
        Self {
            content,
            start_frame: 0,
            duration_in_frames: DEFAULT_CLIP_FRAMES,
            track_id,
            name: name.into(),
            x: None,
            y: None,
            width: None,
            height: None,
            scale: None,
            opacity: None,
            rotation: None,
            filter: None,
            transition_in: None,
            transition_out: None,
            keyframes: BTreeMap::new(),
        }
    }

    /// Draft a text clip.
    pub fn text(track_id: TrackId, name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(ClipContent::Text { text: text.into() }, track_id, name)
    }

    /// Draft a video clip.
    pub fn video(track_id: TrackId, name: impl Into<String>, src: impl Into<String>) -> Self {
        Self::new(ClipContent::Video { src: src.into() }, track_id, name)
    }

    /// Draft an image clip.
    pub fn image(track_id: TrackId, name: impl Into<String>, src: impl Into<String>) -> Self {
        Self::new(ClipContent::Image { src: src.into() }, track_id, name)
    }

    /// Draft an audio clip.
    pub fn audio(track_id: TrackId, name: impl Into<String>, src: impl Into<String>) -> Self {
        Self::new(ClipContent::Audio { src: src.into() }, track_id, name)
    }

    /// Place the clip at `frame`.
    pub fn starting_at(mut self, frame: u64) -> Self {
        self.start_frame = frame;
        self
    }

    /// Set the clip length.
    pub fn lasting(mut self, frames: u64) -> Self {
        self.duration_in_frames = frames;
        self
    }

    /// Set the entry ramp.
    pub fn with_transition_in(mut self, t: Transition) -> Self {
        self.transition_in = Some(t);
        self
    }

    /// Set the exit ramp.
    pub fn with_transition_out(mut self, t: Transition) -> Self {
        self.transition_out = Some(t);
        self
    }

    /// Set the filter.
    pub fn with_filter(mut self, f: Filter) -> Self {
        self.filter = Some(f);
        self
    }

    /// Seed keyframes for `property`.
    pub fn with_keyframes(mut self, property: Property, keys: Vec<Keyframe>) -> Self {
        self.keyframes.insert(property, keys);
        self
    }

    pub(crate) fn into_clip(self, id: ClipId) -> Clip {
        Clip {
            id,
            content: self.content,
            start_frame: self.start_frame,
            duration_in_frames: self.duration_in_frames,
            track_id: self.track_id,
            name: self.name,
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            scale: self.scale,
            opacity: self.opacity,
            rotation: self.rotation,
            filter: self.filter,
            transition_in: self.transition_in,
            transition_out: self.transition_out,
            keyframes: self.keyframes,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Shallow update of a clip. `None` leaves a field alone; for optional clip fields,
/// `Some(None)` clears the field. Keyframes are not patchable here.
pub struct ClipPatch {
    /// New display name.
    pub name: Option<String>,
    /// New type/payload.
    pub content: Option<ClipContent>,
    /// New start frame.
    pub start_frame: Option<u64>,
    /// New duration.
    pub duration_in_frames: Option<u64>,
    /// New owning track.
    pub track_id: Option<TrackId>,
    /// Set or clear `x`.
    pub x: Option<Option<f64>>,
    /// Set or clear `y`.
    pub y: Option<Option<f64>>,
    /// Set or clear `width`.
    pub width: Option<Option<f64>>,
    /// Set or clear `height`.
    pub height: Option<Option<f64>>,
    /// Set or clear `scale`.
    pub scale: Option<Option<f64>>,
    /// Set or clear `opacity`.
    pub opacity: Option<Option<f64>>,
    /// Set or clear `rotation`.
    pub rotation: Option<Option<f64>>,
    /// Set or clear the filter.
    pub filter: Option<Option<Filter>>,
    /// Set or clear the entry ramp.
    pub transition_in: Option<Option<Transition>>,
    /// Set or clear the exit ramp.
    pub transition_out: Option<Option<Transition>>,
}

impl ClipPatch {
    /// Patch that only moves the clip start.
    pub fn start_frame(frame: u64) -> Self {
        Self {
            start_frame: Some(frame),
            ..Self::default()
        }
    }

    /// Patch that only changes the clip length.
    pub fn duration(frames: u64) -> Self {
        Self {
            duration_in_frames: Some(frames),
            ..Self::default()
        }
    }

    pub(crate) fn merge_into(self, clip: &mut Clip) {
        fn set<T>(slot: &mut T, v: Option<T>) {
            if let Some(v) = v {
                *slot = v;
            }
        }

        set(&mut clip.name, self.name);
        set(&mut clip.content, self.content);
        set(&mut clip.start_frame, self.start_frame);
        set(&mut clip.duration_in_frames, self.duration_in_frames);
        set(&mut clip.track_id, self.track_id);
        set(&mut clip.x, self.x);
        set(&mut clip.y, self.y);
        set(&mut clip.width, self.width);
        set(&mut clip.height, self.height);
        set(&mut clip.scale, self.scale);
        set(&mut clip.opacity, self.opacity);
        set(&mut clip.rotation, self.rotation);
        set(&mut clip.filter, self.filter);
        set(&mut clip.transition_in, self.transition_in);
        set(&mut clip.transition_out, self.transition_out);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
/// Merge onto an existing keyframe.
pub struct KeyframePatch {
    /// New value.
    pub value: Option<f64>,
    /// New easing.
    pub easing: Option<Easing>,
}

impl KeyframePatch {
    pub(crate) fn validate(&self) -> KeylineResult<()> {
        if self.value.is_some_and(|v| !v.is_finite()) {
            return Err(KeylineError::validation("keyframe value must be finite"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Shallow update of a track.
pub struct TrackPatch {
    /// New display name.
    pub name: Option<String>,
    /// Mute or unmute.
    pub is_muted: Option<bool>,
    /// Hide or show.
    pub is_hidden: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Update of project-level settings.
pub struct SettingsPatch {
    /// New project name.
    pub name: Option<String>,
    /// New frame rate (`> 0`).
    pub fps: Option<u32>,
    /// New duration; clamped to the tier cap.
    pub duration_in_frames: Option<u64>,
    /// New output width (`> 0`).
    pub width: Option<u32>,
    /// New output height (`> 0`).
    pub height: Option<u32>,
}

impl SettingsPatch {
    pub(crate) fn validate(&self) -> KeylineResult<()> {
        if self.fps == Some(0) {
            return Err(KeylineError::validation("fps must be > 0"));
        }
        if self.width == Some(0) || self.height == Some(0) {
            return Err(KeylineError::validation("width and height must be > 0"));
        }
        if self.duration_in_frames == Some(0) {
            return Err(KeylineError::validation("durationInFrames must be >= 1"));
        }
        Ok(())
    }
}

/// A duration request that exceeded the tier cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct DurationClamp {
    /// Duration the caller asked for.
    pub requested: u64,
    /// Duration actually stored (the cap).
    pub applied: u64,
}

/// What [`crate::TimelineStore::update_project_settings`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SettingsOutcome {
    /// Set when the requested duration was clamped.
    pub duration_clamp: Option<DurationClamp>,
}
