//! Keyline is the timeline and keyframe animation engine behind a browser-style video editor.
//!
//! It owns the editable project model and resolves what every clip looks like at every frame.
//! Decoding, compositing and encoding media are left to an external renderer.
//!
//! # Pipeline overview
//!
//! 1. **Edit**: gestures from [`InteractionController`] and direct calls mutate a
//!    [`TimelineStore`], which keeps the [`Project`] consistent and publishes [`StoreEvent`]s.
//! 2. **Evaluate**: `Clip + frame -> ResolvedVisual` ([`evaluate`]), or a whole project frame
//!    in paint order ([`evaluate_project_frame`]).
//! 3. **Adapt**: `EvaluatedFrame -> Vec<RenderPrimitive>` ([`compile_frame`]), drawn by any
//!    [`RenderBackend`]; whole projects go to a [`RenderJobService`] for export.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic evaluation**: a pure function of `(clip, frame)`, callable in any order.
//! - **Validated mutations**: malformed numbers are rejected before the project is touched;
//!   unknown ids are no-ops.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod eval;
mod foundation;
mod interaction;
mod model;
mod render;
mod store;

pub use animation::ease::Easing;
pub use animation::keyframes::{Upsert, sample as sample_keyframes};
pub use eval::evaluator::{
    ClipRegion, EvaluatedClip, EvaluatedFrame, ResolvedVisual, evaluate, evaluate_project_frame,
};
pub use eval::filter::FilterDescriptor;
pub use eval::fingerprint::{FrameFingerprint, fingerprint_frame, fingerprint_visual};
pub use eval::transitions::{SLIDE_DISTANCE_PX, TransitionEdge, window_progress};
pub use foundation::config::{DRAG_THROTTLE_MS, EditorConfig, PIXELS_PER_FRAME, Tier};
pub use foundation::core::{ClipId, JobId, TrackId, format_timecode};
pub use foundation::error::{KeylineError, KeylineResult};
pub use foundation::math::round_half_up;
pub use interaction::controller::{
    ClickButton, DragMode, DragState, InteractionController, TimeScale, compute_move_frame,
    compute_resize_duration,
};
pub use interaction::throttle::Throttle;
pub use model::clip::{
    Clip, ClipContent, Filter, FilterKind, Keyframe, Property, PropertyRange, Transition,
    TransitionKind,
};
pub use model::project::{Project, Track, TrackKind};
pub use render::adapter::{
    ClipSize, RenderBackend, RenderPrimitive, RenderStats, compile_frame, render_frame,
    render_range,
};
pub use render::export::{RenderJobService, submit_render};
pub use store::job::{JobStatus, JobTracker, JobUpdate};
pub use store::observer::{StoreEvent, Subscribers, SubscriptionId};
pub use store::patch::{
    ClipDraft, ClipPatch, DEFAULT_CLIP_FRAMES, DurationClamp, KeyframePatch, SettingsOutcome,
    SettingsPatch, TrackPatch,
};
pub use store::timeline::TimelineStore;
