use std::ops::Range;

use crate::{
    eval::evaluator::{EvaluatedClip, EvaluatedFrame, ResolvedVisual, evaluate_project_frame},
    foundation::core::ClipId,
    foundation::error::{KeylineError, KeylineResult},
    model::clip::ClipContent,
    model::project::Project,
};

/// Display size passed through from the clip; `None` lets the backend pick.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct ClipSize {
    /// Width in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Height in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
/// Draw instruction for one live clip, consumed by a [`RenderBackend`].
pub enum RenderPrimitive {
    /// Video frame at `local_frame` of the source.
    Video {
        /// Source clip.
        clip_id: ClipId,
        /// Opaque media reference.
        src: String,
        /// Frame relative to the clip start.
        local_frame: u64,
        /// Resolved transform, opacity, insets and filter.
        visual: ResolvedVisual,
        /// Display size.
        size: ClipSize,
    },
    /// Still image.
    Image {
        /// Source clip.
        clip_id: ClipId,
        /// Opaque media reference.
        src: String,
        /// Resolved transform, opacity, insets and filter.
        visual: ResolvedVisual,
        /// Display size.
        size: ClipSize,
    },
    /// Text block.
    Text {
        /// Source clip.
        clip_id: ClipId,
        /// Text to lay out.
        text: String,
        /// Resolved transform, opacity, insets and filter.
        visual: ResolvedVisual,
        /// Display size.
        size: ClipSize,
    },
    /// Audio span. Visual state does not apply.
    Audio {
        /// Source clip.
        clip_id: ClipId,
        /// Opaque media reference.
        src: String,
        /// First project frame of the span.
        start_frame: u64,
        /// Span length in frames.
        duration_in_frames: u64,
    },
}

fn primitive_for(node: &EvaluatedClip<'_>) -> Option<RenderPrimitive> {
    let clip = node.clip;
    let size = ClipSize {
        width: clip.width,
        height: clip.height,
    };
    let clip_id = clip.id.clone();
    let visual = node.visual;

    match &clip.content {
        ClipContent::Audio { src } => {
            if node.track.is_muted || src.is_empty() {
                return None;
            }
            Some(RenderPrimitive::Audio {
                clip_id,
                src: src.clone(),
                start_frame: clip.start_frame,
                duration_in_frames: clip.duration_in_frames,
            })
        }
        _ if node.track.is_hidden => None,
        ClipContent::Video { src } if !src.is_empty() => Some(RenderPrimitive::Video {
            clip_id,
            src: src.clone(),
            local_frame: node.local_frame,
            visual,
            size,
        }),
        ClipContent::Image { src } if !src.is_empty() => Some(RenderPrimitive::Image {
            clip_id,
            src: src.clone(),
            visual,
            size,
        }),
        ClipContent::Text { text } => Some(RenderPrimitive::Text {
            clip_id,
            text: text.clone(),
            visual,
            size,
        }),
        ClipContent::Video { .. } | ClipContent::Image { .. } => None,
    }
}

/// Turn an evaluated frame into draw instructions, keeping paint order.
///
/// Clips without media, visuals on hidden tracks and audio on muted tracks are dropped.
pub fn compile_frame(eval: &EvaluatedFrame<'_>) -> Vec<RenderPrimitive> {
    eval.clips.iter().filter_map(primitive_for).collect()
}

/// The external player or exporter that turns primitives into pixels and sound.
pub trait RenderBackend {
    /// Start a frame of the given output size.
    fn begin_frame(&mut self, frame: u64, width: u32, height: u32) -> KeylineResult<()>;

    /// Draw one primitive on top of everything drawn so far this frame.
    fn draw(&mut self, primitive: &RenderPrimitive) -> KeylineResult<()>;

    /// Finish the frame.
    fn end_frame(&mut self) -> KeylineResult<()>;
}

/// Evaluate and draw one project frame. Returns the number of primitives drawn.
pub fn render_frame(
    project: &Project,
    frame: u64,
    backend: &mut dyn RenderBackend,
) -> KeylineResult<usize> {
    let eval = evaluate_project_frame(project, frame)?;
    let prims = compile_frame(&eval);

    backend.begin_frame(frame, project.width, project.height)?;
    for p in &prims {
        backend.draw(p)?;
    }
    backend.end_frame()?;
    Ok(prims.len())
}

/// Totals from [`render_range`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames rendered.
    pub frames: u64,
    /// Primitives drawn across all frames.
    pub primitives: u64,
}

/// Render frames `range.start..range.end` in order, stopping at the first error.
pub fn render_range(
    project: &Project,
    range: Range<u64>,
    backend: &mut dyn RenderBackend,
) -> KeylineResult<RenderStats> {
    if range.end > project.duration_in_frames {
        return Err(KeylineError::evaluation(format!(
            "range end {} exceeds project duration {}",
            range.end, project.duration_in_frames
        )));
    }

    let mut stats = RenderStats::default();
    for frame in range {
        stats.primitives += render_frame(project, frame, backend)? as u64;
        stats.frames += 1;
    }
    tracing::debug!(frames = stats.frames, primitives = stats.primitives, "range rendered");
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/render/adapter.rs"]
mod tests;
