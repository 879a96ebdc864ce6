use std::time::Instant;

use crate::{
    animation::keyframes::Upsert,
    foundation::config::{EditorConfig, PIXELS_PER_FRAME},
    foundation::core::ClipId,
    foundation::error::KeylineResult,
    foundation::math::round_half_up,
    interaction::throttle::Throttle,
    model::clip::Property,
    store::patch::{ClipPatch, KeyframePatch},
    store::timeline::TimelineStore,
};

/// Fixed conversion between timeline pixels and frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    pixels_per_frame: f64,
}

impl Default for TimeScale {
    fn default() -> Self {
        Self {
            pixels_per_frame: PIXELS_PER_FRAME,
        }
    }
}

impl TimeScale {
    /// Scale with `pixels_per_frame`; non-positive or non-finite values fall back to the
    /// default.
    pub fn new(pixels_per_frame: f64) -> Self {
        if pixels_per_frame.is_finite() && pixels_per_frame > 0.0 {
            Self { pixels_per_frame }
        } else {
            Self::default()
        }
    }

    /// Pixels per frame.
    pub fn pixels_per_frame(self) -> f64 {
        self.pixels_per_frame
    }

    /// Left edge of `frame` in pixels.
    pub fn frame_to_px(self, frame: u64) -> f64 {
        frame as f64 * self.pixels_per_frame
    }

    /// Nearest frame to pixel offset `px` (halves round up). May be negative.
    pub fn px_to_frame(self, px: f64) -> i64 {
        round_half_up(px / self.pixels_per_frame) as i64
    }

    /// `px_to_frame` clamped to `[0, max]`.
    pub fn px_to_frame_clamped(self, px: f64, max: u64) -> u64 {
        let f = self.px_to_frame(px);
        if f <= 0 { 0 } else { (f as u64).min(max) }
    }
}

/// What a drag changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    /// Body drag: shifts `startFrame`.
    Move,
    /// Right-edge drag: changes `durationInFrames`.
    Resize,
}

/// State captured on pointer-down.
#[derive(Clone, Debug, PartialEq)]
pub struct DragState {
    /// Dragged clip.
    pub clip: ClipId,
    /// Move or resize.
    pub mode: DragMode,
    /// Pointer x at press time.
    pub start_x: f64,
    /// `startFrame` (move) or `durationInFrames` (resize) at press time.
    pub original: u64,
}

/// Mouse button of a keyframe click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickButton {
    /// Cycles the keyframe easing.
    Primary,
    /// Deletes the keyframe.
    Secondary,
}

fn shift_frame(original: u64, delta: i64, min: u64) -> u64 {
    let v = (original as i64).saturating_add(delta);
    if v < min as i64 { min } else { v as u64 }
}

/// New `startFrame` for a body drag: never before frame 0.
pub fn compute_move_frame(original_start: u64, delta_frames: i64) -> u64 {
    shift_frame(original_start, delta_frames, 0)
}

/// New `durationInFrames` for an edge drag: at least one frame.
pub fn compute_resize_duration(original_duration: u64, delta_frames: i64) -> u64 {
    shift_frame(original_duration, delta_frames, 1)
}

/// Translates pointer gestures on the timeline into store mutations.
///
/// Holds at most one drag at a time. Pointer moves are throttled on the leading edge; a
/// move swallowed by the throttle is kept and applied on [`Self::release`].
#[derive(Debug)]
pub struct InteractionController {
    scale: TimeScale,
    throttle: Throttle,
    drag: Option<DragState>,
    pending_x: Option<f64>,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl InteractionController {
    /// Controller using the timeline scale and throttle from `config`.
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            scale: TimeScale::new(config.pixels_per_frame),
            throttle: Throttle::new(config.drag_throttle()),
            drag: None,
            pending_x: None,
        }
    }

    /// Active timeline scale.
    pub fn scale(&self) -> TimeScale {
        self.scale
    }

    /// Current drag, if any.
    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    fn press(
        &mut self,
        store: &mut TimelineStore,
        clip: &ClipId,
        pointer_x: f64,
        mode: DragMode,
    ) -> bool {
        if !pointer_x.is_finite() {
            return false;
        }
        let Some(c) = store.clip(clip) else {
            return false;
        };
        let original = match mode {
            DragMode::Move => c.start_frame,
            DragMode::Resize => c.duration_in_frames,
        };
        self.drag = Some(DragState {
            clip: clip.clone(),
            mode,
            start_x: pointer_x,
            original,
        });
        self.pending_x = None;
        self.throttle.reset();
        store.select_clip(Some(clip.clone()));
        true
    }

    /// Start moving a clip. Returns `false` for an unknown clip.
    pub fn press_clip_body(
        &mut self,
        store: &mut TimelineStore,
        clip: &ClipId,
        pointer_x: f64,
    ) -> bool {
        self.press(store, clip, pointer_x, DragMode::Move)
    }

    /// Start resizing a clip from its right edge. Returns `false` for an unknown clip.
    pub fn press_clip_edge(
        &mut self,
        store: &mut TimelineStore,
        clip: &ClipId,
        pointer_x: f64,
    ) -> bool {
        self.press(store, clip, pointer_x, DragMode::Resize)
    }

    fn apply_drag(&self, store: &mut TimelineStore, pointer_x: f64) -> KeylineResult<bool> {
        let Some(drag) = &self.drag else {
            return Ok(false);
        };
        let delta = self.scale.px_to_frame(pointer_x - drag.start_x);
        let patch = match drag.mode {
            DragMode::Move => ClipPatch::start_frame(compute_move_frame(drag.original, delta)),
            DragMode::Resize => {
                ClipPatch::duration(compute_resize_duration(drag.original, delta))
            }
        };
        store.update_clip(&drag.clip, patch)
    }

    /// Pointer moved to `pointer_x` at `now`. Returns whether the store was changed.
    pub fn pointer_move(
        &mut self,
        store: &mut TimelineStore,
        pointer_x: f64,
        now: Instant,
    ) -> KeylineResult<bool> {
        if self.drag.is_none() || !pointer_x.is_finite() {
            return Ok(false);
        }
        if !self.throttle.ready(now) {
            self.pending_x = Some(pointer_x);
            return Ok(false);
        }
        self.pending_x = None;
        self.apply_drag(store, pointer_x)
    }

    /// End the drag, applying the last position the throttle held back.
    pub fn release(&mut self, store: &mut TimelineStore) -> KeylineResult<bool> {
        let applied = match self.pending_x.take() {
            Some(x) => self.apply_drag(store, x),
            None => Ok(false),
        };
        self.drag = None;
        self.throttle.reset();
        applied
    }

    /// Click on a property lane at `click_x` (relative to the clip start): adds a keyframe
    /// holding the property's default value at the nearest frame inside the clip.
    pub fn click_lane(
        &self,
        store: &mut TimelineStore,
        clip: &ClipId,
        property: Property,
        click_x: f64,
    ) -> KeylineResult<Option<Upsert>> {
        if !click_x.is_finite() {
            return Ok(None);
        }
        let Some(c) = store.clip(clip) else {
            return Ok(None);
        };
        let frame = self.scale.px_to_frame_clamped(click_x, c.duration_in_frames);
        store.add_keyframe(clip, property, frame, property.default_value())
    }

    /// Click on an existing keyframe marker.
    pub fn click_keyframe(
        &self,
        store: &mut TimelineStore,
        clip: &ClipId,
        property: Property,
        frame: u64,
        button: ClickButton,
    ) -> KeylineResult<bool> {
        match button {
            ClickButton::Secondary => Ok(store.remove_keyframe(clip, property, frame)),
            ClickButton::Primary => {
                let Some(key) = store
                    .clip(clip)
                    .and_then(|c| c.keyframes_for(property).iter().find(|k| k.frame == frame))
                else {
                    return Ok(false);
                };
                let patch = KeyframePatch {
                    value: None,
                    easing: Some(key.easing_or_default().cycle()),
                };
                store.update_keyframe(clip, property, frame, patch)
            }
        }
    }

    /// Click on the ruler: seek to the nearest frame. Returns the applied frame.
    pub fn click_ruler(&self, store: &mut TimelineStore, x: f64) -> u64 {
        if !x.is_finite() {
            return store.current_frame();
        }
        let frame = self
            .scale
            .px_to_frame_clamped(x, store.project().duration_in_frames);
        store.seek(frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/controller.rs"]
mod tests;
