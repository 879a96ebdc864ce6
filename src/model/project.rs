use std::{collections::BTreeSet, fmt};

use crate::{
    foundation::core::{ClipId, TrackId},
    foundation::error::{KeylineError, KeylineResult},
    model::clip::{Clip, ClipContent},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A complete, self-contained editing project.
///
/// The project is the unit of save/restore and of render-job submission: it carries no
/// references to external state, so serializing and deserializing it preserves the
/// evaluator output for every frame.
pub struct Project {
    /// Project identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Frames per second.
    pub fps: u32,
    /// Total length in frames, capped by the active tier.
    pub duration_in_frames: u64,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Tracks in display order.
    pub tracks: Vec<Track>,
    /// Clips in paint order (later entries paint over earlier ones).
    pub clips: Vec<Clip>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A lane holding clips of a compatible kind.
pub struct Track {
    /// Track identifier.
    pub id: TrackId,
    /// Display name.
    pub name: String,
    /// Lane kind.
    #[serde(rename = "type")]
    pub kind: TrackKind,
    /// Audio from this track is dropped when set.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_muted: bool,
    /// Visuals from this track are dropped when set.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_hidden: bool,
}

fn is_false(v: &bool) -> bool {
    !*v
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Track lane kinds.
pub enum TrackKind {
    /// Video and image clips.
    Video,
    /// Audio clips.
    Audio,
    /// Text overlays.
    Text,
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Text => "text",
        })
    }
}

impl Track {
    /// Track with default flags.
    pub fn new(id: TrackId, name: impl Into<String>, kind: TrackKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            is_muted: false,
            is_hidden: false,
        }
    }
}

impl Project {
    /// The project a fresh editor opens with: three tracks and a title card.
    pub fn starter() -> Self {
        Self {
            id: "default-project".to_string(),
            name: "My Video Project".to_string(),
            fps: 30,
            duration_in_frames: 30 * 10,
            width: 1920,
            height: 1080,
            tracks: vec![
                Track::new(TrackId::from("track-1"), "Main Video", TrackKind::Video),
                Track::new(TrackId::from("track-2"), "Text Overlay", TrackKind::Text),
                Track::new(
                    TrackId::from("track-3"),
                    "Background Music",
                    TrackKind::Audio,
                ),
            ],
            clips: vec![Clip {
                id: ClipId::from("clip-1"),
                content: ClipContent::Text {
                    text: "Welcome to Remotion".to_string(),
                },
                start_frame: 0,
                duration_in_frames: 90,
                track_id: TrackId::from("track-2"),
                name: "Title Card".to_string(),
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
                keyframes: Default::default(),
            }],
        }
    }

    /// Look up a track.
    pub fn track(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| &t.id == id)
    }

    /// Look up a clip.
    pub fn clip(&self, id: &ClipId) -> Option<&Clip> {
        self.clips.iter().find(|c| &c.id == id)
    }

    pub(crate) fn clip_mut(&mut self, id: &ClipId) -> Option<&mut Clip> {
        self.clips.iter_mut().find(|c| &c.id == id)
    }

    /// Clips on `track`, in paint order.
    pub fn clips_on_track<'a>(&'a self, track: &'a TrackId) -> impl Iterator<Item = &'a Clip> {
        self.clips.iter().filter(move |c| &c.track_id == track)
    }

    /// Check structural invariants: positive settings, unique ids and every per-clip
    /// invariant.
    ///
    /// A clip whose track is gone is allowed (the evaluator skips it) and only logged.
    pub fn validate(&self) -> KeylineResult<()> {
        if self.fps == 0 {
            return Err(KeylineError::validation("project fps must be > 0"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(KeylineError::validation(
                "project width and height must be > 0",
            ));
        }
        if self.duration_in_frames == 0 {
            return Err(KeylineError::validation(
                "project durationInFrames must be >= 1",
            ));
        }

        let mut track_ids = BTreeSet::new();
        for t in &self.tracks {
            if !track_ids.insert(&t.id) {
                return Err(KeylineError::validation(format!(
                    "duplicate track id '{}'",
                    t.id
                )));
            }
        }

        let mut clip_ids = BTreeSet::new();
        for c in &self.clips {
            if !clip_ids.insert(&c.id) {
                return Err(KeylineError::validation(format!(
                    "duplicate clip id '{}'",
                    c.id
                )));
            }
            if !track_ids.contains(&c.track_id) {
                tracing::warn!(
                    clip = %c.id,
                    track = %c.track_id,
                    "clip references missing track"
                );
            }
            c.validate()?;
        }
        Ok(())
    }

    /// Parse project JSON without validating it.
    pub fn from_json(s: &str) -> KeylineResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Pretty-printed project JSON.
    pub fn to_json_pretty(&self) -> KeylineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/project.rs"]
mod tests;
