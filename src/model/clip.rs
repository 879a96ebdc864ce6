use std::{collections::BTreeMap, fmt, str::FromStr};

use crate::{
    animation::ease::Easing,
    foundation::core::{ClipId, TrackId},
    foundation::error::{KeylineError, KeylineResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A timed element placed on a track.
///
/// `start_frame` is absolute project time; keyframe frames are relative to it.
pub struct Clip {
    /// Store-generated identifier.
    pub id: ClipId,
    /// Type tag plus type-specific payload.
    #[serde(flatten)]
    pub content: ClipContent,
    /// First frame on the project timeline.
    pub start_frame: u64,
    /// Length in frames (`>= 1`).
    pub duration_in_frames: u64,
    /// Owning track.
    pub track_id: TrackId,
    /// Display name.
    pub name: String,
    /// Static horizontal offset in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Static vertical offset in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Optional display width, passed through to the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Optional display height, passed through to the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Static uniform scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// Static opacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Static rotation in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// At most one visual filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    /// Ramp applied at the start of the clip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_in: Option<Transition>,
    /// Ramp applied at the end of the clip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_out: Option<Transition>,
    /// Per-property keyframe lists, each sorted by frame with unique frames.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub keyframes: BTreeMap<Property, Vec<Keyframe>>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
/// Clip type with its payload. `src` is an opaque media reference (URL or inline data).
pub enum ClipContent {
    /// Video media.
    Video {
        /// Media reference.
        src: String,
    },
    /// Still image.
    Image {
        /// Media reference.
        src: String,
    },
    /// Literal text.
    Text {
        /// Text content.
        text: String,
    },
    /// Audio media.
    Audio {
        /// Media reference.
        src: String,
    },
}

impl ClipContent {
    /// Lowercase type tag as used in project JSON.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Video { .. } => "video",
            Self::Image { .. } => "image",
            Self::Text { .. } => "text",
            Self::Audio { .. } => "audio",
        }
    }

    /// `true` for clips that only make sound.
    pub fn is_audio(&self) -> bool {
        matches!(self, Self::Audio { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A single visual filter.
pub struct Filter {
    /// Filter kind.
    #[serde(rename = "type")]
    pub kind: FilterKind,
    /// Strength in `[0, 100]`.
    pub intensity: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Supported filter kinds.
pub enum FilterKind {
    /// Gaussian blur.
    Blur,
    /// Desaturation.
    Grayscale,
    /// Sepia tone.
    Sepia,
    /// Contrast boost.
    Contrast,
    /// Brightness boost.
    Brightness,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// A time-bounded ramp at one edge of a clip.
pub struct Transition {
    /// Ramp kind.
    #[serde(rename = "type")]
    pub kind: TransitionKind,
    /// Ramp length in frames.
    pub duration: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Supported transition kinds.
pub enum TransitionKind {
    /// Opacity ramp.
    Fade,
    /// Vertical offset ramp.
    Slide,
    /// Left-to-right reveal region.
    Wipe,
    /// Scale ramp.
    Zoom,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One sample of a property curve.
pub struct Keyframe {
    /// Frame relative to the clip start.
    pub frame: u64,
    /// Property value at `frame`.
    pub value: f64,
    /// Curve toward the next keyframe; unset means linear.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<Easing>,
}

impl Keyframe {
    /// Keyframe without an easing tag.
    pub fn new(frame: u64, value: f64) -> Self {
        Self {
            frame,
            value,
            easing: None,
        }
    }

    /// Same keyframe with `easing` set.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    /// Effective easing (`Linear` when unset).
    pub fn easing_or_default(&self) -> Easing {
        self.easing.unwrap_or_default()
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
/// Animatable clip property.
pub enum Property {
    /// Opacity multiplier.
    Opacity,
    /// Uniform scale.
    Scale,
    /// Rotation in degrees.
    Rotation,
    /// Horizontal offset.
    X,
    /// Vertical offset.
    Y,
}

/// Authoring range shown for a property lane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropertyRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Slider step.
    pub step: f64,
}

impl Property {
    /// Lane order in the keyframe editor.
    pub const ALL: [Property; 5] = [
        Property::Scale,
        Property::Opacity,
        Property::Rotation,
        Property::X,
        Property::Y,
    ];

    /// Value inserted when a lane is clicked, and the evaluator's base default.
    pub fn default_value(self) -> f64 {
        match self {
            Self::Opacity | Self::Scale => 1.0,
            Self::Rotation | Self::X | Self::Y => 0.0,
        }
    }

    /// Human-readable lane label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Opacity => "Opacity",
            Self::Scale => "Scale",
            Self::Rotation => "Rotation",
            Self::X => "Position X",
            Self::Y => "Position Y",
        }
    }

    /// Authoring range for this lane.
    pub fn range(self) -> PropertyRange {
        let (min, max, step) = match self {
            Self::Scale => (0.0, 2.0, 0.1),
            Self::Opacity => (0.0, 1.0, 0.1),
            Self::Rotation => (0.0, 360.0, 15.0),
            Self::X | Self::Y => (-1000.0, 1000.0, 10.0),
        };
        PropertyRange { min, max, step }
    }

    /// JSON key for this property.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Opacity => "opacity",
            Self::Scale => "scale",
            Self::Rotation => "rotation",
            Self::X => "x",
            Self::Y => "y",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Property {
    type Err = KeylineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "opacity" => Ok(Self::Opacity),
            "scale" => Ok(Self::Scale),
            "rotation" => Ok(Self::Rotation),
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            other => Err(KeylineError::validation(format!(
                "unknown property '{other}'"
            ))),
        }
    }
}

impl Clip {
    /// Exclusive end frame on the project timeline.
    pub fn end_frame(&self) -> u64 {
        self.start_frame.saturating_add(self.duration_in_frames)
    }

    /// Whether absolute project frame `f` falls inside `[start, end)`.
    pub fn contains_frame(&self, f: u64) -> bool {
        self.start_frame <= f && f < self.end_frame()
    }

    /// Keyframes for `property`, empty when none exist.
    pub fn keyframes_for(&self, property: Property) -> &[Keyframe] {
        self.keyframes
            .get(&property)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Static value of `property`, falling back to its default.
    pub fn static_value(&self, property: Property) -> f64 {
        let v = match property {
            Property::Opacity => self.opacity,
            Property::Scale => self.scale,
            Property::Rotation => self.rotation,
            Property::X => self.x,
            Property::Y => self.y,
        };
        v.unwrap_or_else(|| property.default_value())
    }

    /// Check the per-clip invariants: positive duration, finite numbers, bounded filter
    /// intensity, non-empty transitions, sorted unique keyframes.
    pub fn validate(&self) -> KeylineResult<()> {
        let ctx = |msg: &str| KeylineError::validation(format!("clip '{}': {msg}", self.id));

        if self.duration_in_frames == 0 {
            return Err(ctx("durationInFrames must be >= 1"));
        }
        for (name, v) in [
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("height", self.height),
            ("scale", self.scale),
            ("opacity", self.opacity),
            ("rotation", self.rotation),
        ] {
            if v.is_some_and(|v| !v.is_finite()) {
                return Err(ctx(&format!("{name} must be finite")));
            }
        }
        if let Some(filter) = &self.filter {
            validate_filter(filter).map_err(|e| ctx(&e))?;
        }
        for t in [&self.transition_in, &self.transition_out]
            .into_iter()
            .flatten()
        {
            validate_transition(t).map_err(|e| ctx(&e))?;
        }
        for (property, keys) in &self.keyframes {
            if keys.iter().any(|k| !k.value.is_finite()) {
                return Err(ctx(&format!("{property} keyframe values must be finite")));
            }
            if !keys.windows(2).all(|w| w[0].frame < w[1].frame) {
                return Err(ctx(&format!(
                    "{property} keyframes must be sorted by frame without duplicates"
                )));
            }
        }
        Ok(())
    }
}

pub(crate) fn validate_filter(filter: &Filter) -> Result<(), String> {
    if !filter.intensity.is_finite() || !(0.0..=100.0).contains(&filter.intensity) {
        return Err("filter intensity must be within [0, 100]".to_string());
    }
    Ok(())
}

pub(crate) fn validate_transition(t: &Transition) -> Result<(), String> {
    if t.duration == 0 {
        return Err("transition duration must be >= 1".to_string());
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/model/clip.rs"]
mod tests;
