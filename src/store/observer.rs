use crate::{
    foundation::core::{ClipId, JobId, TrackId},
    model::clip::Property,
    store::job::JobStatus,
    store::patch::DurationClamp,
};

/// Handle returned by `subscribe`; pass it back to `unsubscribe`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Change notifications published by the store after each applied mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreEvent {
    /// A track was appended.
    TrackAdded(TrackId),
    /// A track and its clips were removed.
    TrackRemoved {
        /// Removed track.
        track: TrackId,
        /// Number of clips removed with it.
        removed_clips: usize,
    },
    /// Track name or flags changed.
    TrackUpdated(TrackId),
    /// A clip was appended.
    ClipAdded(ClipId),
    /// A clip's fields changed.
    ClipUpdated(ClipId),
    /// A clip was removed.
    ClipRemoved(ClipId),
    /// A keyframe list changed.
    KeyframesChanged {
        /// Owning clip.
        clip: ClipId,
        /// Affected property.
        property: Property,
    },
    /// Project settings changed.
    SettingsChanged,
    /// A duration update was clamped to the tier cap.
    DurationClamped(DurationClamp),
    /// The whole project was replaced or reset.
    ProjectReplaced,
    /// Playhead or play state changed.
    PlaybackChanged {
        /// Current frame.
        frame: u64,
        /// Whether playback is running.
        playing: bool,
    },
    /// Selection changed.
    SelectionChanged(Option<ClipId>),
    /// The tracked render job changed.
    JobChanged {
        /// Tracked job, if any.
        job_id: Option<JobId>,
        /// Current status.
        status: JobStatus,
    },
}

type Callback<E> = Box<dyn FnMut(&E)>;

/// Ordered list of callbacks. Nothing is removed implicitly: every subscriber must
/// call `unsubscribe` on teardown.
pub struct Subscribers<E> {
    next: u64,
    entries: Vec<(SubscriptionId, Callback<E>)>,
}

impl<E> Default for Subscribers<E> {
    fn default() -> Self {
        Self {
            next: 0,
            entries: Vec::new(),
        }
    }
}

impl<E> std::fmt::Debug for Subscribers<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &self.entries.len())
            .finish()
    }
}

impl<E> Subscribers<E> {
    /// Register `callback`; it runs for every later `notify` until unsubscribed.
    pub fn subscribe(&mut self, callback: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next);
        self.next += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Drop a callback. Returns `false` for an unknown or already removed id.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(sid, _)| *sid != id);
        self.entries.len() < before
    }

    /// Deliver `event` to every callback in subscription order.
    pub fn notify(&mut self, event: &E) {
        for (_, cb) in &mut self.entries {
            cb(event);
        }
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nobody is subscribed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/observer.rs"]
mod tests;
