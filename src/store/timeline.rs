use crate::{
    animation::keyframes::{self, Upsert},
    foundation::config::EditorConfig,
    foundation::core::{ClipId, JobId, TrackId},
    foundation::error::{KeylineError, KeylineResult},
    model::clip::{Clip, Property},
    model::project::{Project, Track, TrackKind},
    store::job::{JobStatus, JobTracker, JobUpdate},
    store::observer::{StoreEvent, SubscriptionId, Subscribers},
    store::patch::{
        ClipDraft, ClipPatch, DurationClamp, KeyframePatch, SettingsOutcome, SettingsPatch,
        TrackPatch,
    },
};

/// Owner of the project being edited plus the transient editor state around it.
///
/// Every mutation is synchronous. Operations addressing an unknown id are no-ops and report
/// `false` (or `None`); malformed numeric input is rejected with
/// [`KeylineError::Validation`] before anything is touched. Subscribers are notified after
/// each applied change.
#[derive(Debug)]
pub struct TimelineStore {
    project: Project,
    config: EditorConfig,
    current_frame: u64,
    is_playing: bool,
    selected_clip: Option<ClipId>,
    job: JobTracker,
    subscribers: Subscribers<StoreEvent>,
}

impl Default for TimelineStore {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl TimelineStore {
    /// Store holding the starter project.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            project: Project::starter(),
            config,
            current_frame: 0,
            is_playing: false,
            selected_clip: None,
            job: JobTracker::default(),
            subscribers: Subscribers::default(),
        }
    }

    /// Store holding `project`, validated and capped to the tier maximum first.
    pub fn with_project(project: Project, config: EditorConfig) -> KeylineResult<Self> {
        let mut store = Self::new(config);
        store.set_project(project)?;
        Ok(store)
    }

    fn emit(&mut self, event: StoreEvent) {
        self.subscribers.notify(&event);
    }

    // ---- project ---------------------------------------------------------------------

    /// Current project snapshot.
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Active editor settings.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Replace the whole project. On a validation error the current project is kept.
    ///
    /// A duration above the tier maximum is clamped the same way
    /// [`Self::update_project_settings`] clamps it.
    pub fn set_project(&mut self, project: Project) -> KeylineResult<Option<DurationClamp>> {
        project.validate()?;
        self.project = project;
        let clamp = self.cap_duration(self.project.duration_in_frames);
        if let Some(sel) = &self.selected_clip
            && self.project.clip(sel).is_none()
        {
            self.selected_clip = None;
        }
        self.emit(StoreEvent::ProjectReplaced);
        if let Some(clamp) = clamp {
            self.emit(StoreEvent::DurationClamped(clamp));
        }
        Ok(clamp)
    }

    /// Set the duration to `requested`, capped at the tier maximum for the current fps.
    /// Also pulls the playhead back into range.
    fn cap_duration(&mut self, requested: u64) -> Option<DurationClamp> {
        let cap = self.config.tier.max_duration_frames(self.project.fps);
        let clamp = (requested > cap).then(|| {
            tracing::warn!(
                requested,
                applied = cap,
                tier = ?self.config.tier,
                "project duration clamped to tier maximum"
            );
            DurationClamp {
                requested,
                applied: cap,
            }
        });
        self.project.duration_in_frames = requested.min(cap);
        self.current_frame = self.current_frame.min(self.project.duration_in_frames);
        clamp
    }

    /// Back to the starter project with idle playback, no selection and no job.
    /// Subscriptions survive.
    pub fn reset(&mut self) {
        self.project = Project::starter();
        self.current_frame = 0;
        self.is_playing = false;
        self.selected_clip = None;
        self.job.reset();
        self.emit(StoreEvent::ProjectReplaced);
    }

    /// Look up a clip.
    pub fn clip(&self, id: &ClipId) -> Option<&Clip> {
        self.project.clip(id)
    }

    /// Look up a track.
    pub fn track(&self, id: &TrackId) -> Option<&Track> {
        self.project.track(id)
    }

    /// Clips on `track`, in paint order.
    pub fn clips_on_track<'a>(&'a self, track: &'a TrackId) -> impl Iterator<Item = &'a Clip> {
        self.project.clips_on_track(track)
    }

    // ---- tracks ----------------------------------------------------------------------

    /// Append an empty track named after its kind.
    pub fn add_track(&mut self, kind: TrackKind) -> TrackId {
        let id = TrackId::generate();
        self.project
            .tracks
            .push(Track::new(id.clone(), format!("{kind} Track"), kind));
        tracing::debug!(track = %id, %kind, "track added");
        self.emit(StoreEvent::TrackAdded(id.clone()));
        id
    }

    /// Remove a track together with every clip on it.
    pub fn remove_track(&mut self, id: &TrackId) -> bool {
        let before = self.project.tracks.len();
        self.project.tracks.retain(|t| &t.id != id);
        if self.project.tracks.len() == before {
            return false;
        }

        let clips_before = self.project.clips.len();
        self.project.clips.retain(|c| &c.track_id != id);
        let removed_clips = clips_before - self.project.clips.len();
        tracing::debug!(track = %id, removed_clips, "track removed");

        if let Some(sel) = &self.selected_clip
            && self.project.clip(sel).is_none()
        {
            self.selected_clip = None;
            self.emit(StoreEvent::SelectionChanged(None));
        }
        self.emit(StoreEvent::TrackRemoved {
            track: id.clone(),
            removed_clips,
        });
        true
    }

    /// Rename, mute or hide a track.
    pub fn update_track(&mut self, id: &TrackId, patch: TrackPatch) -> bool {
        let Some(track) = self.project.tracks.iter_mut().find(|t| &t.id == id) else {
            return false;
        };
        if let Some(name) = patch.name {
            track.name = name;
        }
        if let Some(muted) = patch.is_muted {
            track.is_muted = muted;
        }
        if let Some(hidden) = patch.is_hidden {
            track.is_hidden = hidden;
        }
        self.emit(StoreEvent::TrackUpdated(id.clone()));
        true
    }

    // ---- clips -----------------------------------------------------------------------

    /// Append a clip built from `draft` and return its generated id.
    ///
    /// The target track is not checked; overlapping clips are allowed.
    pub fn add_clip(&mut self, draft: ClipDraft) -> KeylineResult<ClipId> {
        let id = ClipId::generate();
        let clip = draft.into_clip(id.clone());
        clip.validate()?;
        tracing::debug!(
            clip = %id,
            track = %clip.track_id,
            kind = clip.content.type_name(),
            "clip added"
        );
        self.project.clips.push(clip);
        self.emit(StoreEvent::ClipAdded(id.clone()));
        Ok(id)
    }

    /// Shallow-merge `patch` into a clip. `Ok(false)` when the clip does not exist.
    pub fn update_clip(&mut self, id: &ClipId, patch: ClipPatch) -> KeylineResult<bool> {
        let Some(clip) = self.project.clip_mut(id) else {
            return Ok(false);
        };
        let mut next = clip.clone();
        patch.merge_into(&mut next);
        next.validate()?;
        *clip = next;
        self.emit(StoreEvent::ClipUpdated(id.clone()));
        Ok(true)
    }

    /// Remove a clip, clearing the selection if it pointed there.
    pub fn remove_clip(&mut self, id: &ClipId) -> bool {
        let before = self.project.clips.len();
        self.project.clips.retain(|c| &c.id != id);
        if self.project.clips.len() == before {
            return false;
        }
        tracing::debug!(clip = %id, "clip removed");
        if self.selected_clip.as_ref() == Some(id) {
            self.selected_clip = None;
            self.emit(StoreEvent::SelectionChanged(None));
        }
        self.emit(StoreEvent::ClipRemoved(id.clone()));
        true
    }

    // ---- keyframes -------------------------------------------------------------------

    /// Insert a keyframe, or replace the value at an existing frame (dropping its easing).
    /// `Ok(None)` when the clip does not exist.
    pub fn add_keyframe(
        &mut self,
        clip: &ClipId,
        property: Property,
        frame: u64,
        value: f64,
    ) -> KeylineResult<Option<Upsert>> {
        let Some(c) = self.project.clip_mut(clip) else {
            return Ok(None);
        };
        if !value.is_finite() {
            return Err(KeylineError::validation("keyframe value must be finite"));
        }
        let outcome = keyframes::upsert(c.keyframes.entry(property).or_default(), frame, value);
        self.emit(StoreEvent::KeyframesChanged {
            clip: clip.clone(),
            property,
        });
        Ok(Some(outcome))
    }

    /// Remove the keyframe at exactly `frame`. An emptied list stays in place.
    pub fn remove_keyframe(&mut self, clip: &ClipId, property: Property, frame: u64) -> bool {
        let removed = self
            .project
            .clip_mut(clip)
            .and_then(|c| c.keyframes.get_mut(&property))
            .is_some_and(|keys| keyframes::remove(keys, frame));
        if removed {
            self.emit(StoreEvent::KeyframesChanged {
                clip: clip.clone(),
                property,
            });
        }
        removed
    }

    /// Merge `patch` onto the keyframe at exactly `frame`.
    pub fn update_keyframe(
        &mut self,
        clip: &ClipId,
        property: Property,
        frame: u64,
        patch: KeyframePatch,
    ) -> KeylineResult<bool> {
        patch.validate()?;
        let updated = self
            .project
            .clip_mut(clip)
            .and_then(|c| c.keyframes.get_mut(&property))
            .is_some_and(|keys| keyframes::update(keys, frame, patch.value, patch.easing));
        if updated {
            self.emit(StoreEvent::KeyframesChanged {
                clip: clip.clone(),
                property,
            });
        }
        Ok(updated)
    }

    // ---- settings --------------------------------------------------------------------

    /// Apply project-level settings.
    ///
    /// The resulting duration is capped by the active tier at the resulting fps; a capped
    /// value is reported in the outcome and published as [`StoreEvent::DurationClamped`].
    pub fn update_project_settings(
        &mut self,
        patch: SettingsPatch,
    ) -> KeylineResult<SettingsOutcome> {
        patch.validate()?;

        let p = &mut self.project;
        if let Some(name) = patch.name {
            p.name = name;
        }
        if let Some(fps) = patch.fps {
            p.fps = fps;
        }
        if let Some(w) = patch.width {
            p.width = w;
        }
        if let Some(h) = patch.height {
            p.height = h;
        }

        let requested = patch.duration_in_frames.unwrap_or(p.duration_in_frames);
        let outcome = SettingsOutcome {
            duration_clamp: self.cap_duration(requested),
        };

        self.emit(StoreEvent::SettingsChanged);
        if let Some(clamp) = outcome.duration_clamp {
            self.emit(StoreEvent::DurationClamped(clamp));
        }
        Ok(outcome)
    }

    // ---- playback & selection --------------------------------------------------------

    /// Playhead position.
    pub fn current_frame(&self) -> u64 {
        self.current_frame
    }

    /// Whether playback is running.
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Selected clip, if any.
    pub fn selected_clip(&self) -> Option<&ClipId> {
        self.selected_clip.as_ref()
    }

    fn set_playback(&mut self, frame: u64, playing: bool) {
        if self.current_frame == frame && self.is_playing == playing {
            return;
        }
        self.current_frame = frame;
        self.is_playing = playing;
        self.emit(StoreEvent::PlaybackChanged { frame, playing });
    }

    /// Move the playhead, clamped to `[0, durationInFrames]`. Returns the applied frame.
    pub fn seek(&mut self, frame: u64) -> u64 {
        let frame = frame.min(self.project.duration_in_frames);
        self.set_playback(frame, self.is_playing);
        frame
    }

    /// Start playback.
    pub fn play(&mut self) {
        self.set_playback(self.current_frame, true);
    }

    /// Stop playback, keeping the playhead.
    pub fn pause(&mut self) {
        self.set_playback(self.current_frame, false);
    }

    /// Flip between playing and paused. Returns the new state.
    pub fn toggle_playback(&mut self) -> bool {
        let playing = !self.is_playing;
        self.set_playback(self.current_frame, playing);
        playing
    }

    /// Select a clip, or clear the selection with `None`.
    pub fn select_clip(&mut self, clip: Option<ClipId>) {
        if self.selected_clip == clip {
            return;
        }
        self.selected_clip = clip.clone();
        self.emit(StoreEvent::SelectionChanged(clip));
    }

    // ---- render job ------------------------------------------------------------------

    /// Tracked job state.
    pub fn job(&self) -> &JobTracker {
        &self.job
    }

    fn emit_job(&mut self) {
        self.emit(StoreEvent::JobChanged {
            job_id: self.job.job_id().cloned(),
            status: self.job.status(),
        });
    }

    /// Replace the tracked job id.
    pub fn set_job_id(&mut self, id: Option<JobId>) {
        self.job.set_job_id(id);
        self.emit_job();
    }

    /// Move the job to `status`; transitions outside the lifecycle are rejected.
    pub fn set_status(&mut self, status: JobStatus) -> KeylineResult<()> {
        if let Err(err) = self.job.set_status(status) {
            tracing::warn!(from = ?self.job.status(), to = ?status, "rejected job transition");
            return Err(err);
        }
        self.emit_job();
        Ok(())
    }

    /// Apply a notification from the job service. `Ok(false)` for another job's update.
    pub fn apply_job_update(&mut self, update: JobUpdate) -> KeylineResult<bool> {
        let from = self.job.status();
        let to = update.status;
        match self.job.apply_update(update) {
            Ok(true) => {
                self.emit_job();
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(err) => {
                tracing::warn!(?from, ?to, now = ?self.job.status(), "rejected job update");
                if self.job.status() != from {
                    self.emit_job();
                }
                Err(err)
            }
        }
    }

    // ---- observers -------------------------------------------------------------------

    /// Register a change callback. It stays registered until [`Self::unsubscribe`].
    pub fn subscribe(&mut self, callback: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    /// Drop a change callback.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/timeline.rs"]
mod tests;
