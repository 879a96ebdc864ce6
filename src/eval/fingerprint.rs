use crate::{
    eval::evaluator::{EvaluatedFrame, ResolvedVisual},
    eval::filter::FilterDescriptor,
    foundation::math::Fnv1a64,
};

/// 128-bit digest of an evaluated frame, stable across runs and platforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameFingerprint {
    /// First FNV-1a lane.
    pub hi: u64,
    /// Second, differently seeded lane.
    pub lo: u64,
}

struct Pair(Fnv1a64, Fnv1a64);

impl Pair {
    fn new() -> Self {
        Self(Fnv1a64::new_default(), Fnv1a64::new(0x9ae1_6a3b_2f90_404f))
    }

    fn u8(&mut self, v: u8) {
        self.0.write_u8(v);
        self.1.write_u8(v);
    }

    fn u64(&mut self, v: u64) {
        self.0.write_u64(v);
        self.1.write_u64(v);
    }

    fn f64(&mut self, v: f64) {
        self.0.write_f64(v);
        self.1.write_f64(v);
    }

    fn str(&mut self, s: &str) {
        self.u64(s.len() as u64);
        self.0.write_bytes(s.as_bytes());
        self.1.write_bytes(s.as_bytes());
    }

    fn finish(self) -> FrameFingerprint {
        FrameFingerprint {
            hi: self.0.finish(),
            lo: self.1.finish(),
        }
    }
}

fn write_visual(h: &mut Pair, v: &ResolvedVisual) {
    for x in [
        v.opacity,
        v.translate_x,
        v.translate_y,
        v.scale,
        v.rotation_deg,
        v.clip_region.left_pct,
        v.clip_region.right_pct,
    ] {
        h.f64(x);
    }
    match v.filter {
        None => h.u8(0),
        Some(FilterDescriptor::Blur { radius_px }) => {
            h.u8(1);
            h.f64(radius_px);
        }
        Some(FilterDescriptor::Grayscale { percent }) => {
            h.u8(2);
            h.f64(percent);
        }
        Some(FilterDescriptor::Sepia { percent }) => {
            h.u8(3);
            h.f64(percent);
        }
        Some(FilterDescriptor::Contrast { percent }) => {
            h.u8(4);
            h.f64(percent);
        }
        Some(FilterDescriptor::Brightness { percent }) => {
            h.u8(5);
            h.f64(percent);
        }
    }
}

/// Digest of a single resolved visual.
pub fn fingerprint_visual(v: &ResolvedVisual) -> FrameFingerprint {
    let mut h = Pair::new();
    write_visual(&mut h, v);
    h.finish()
}

/// Digest of everything live at a project frame, including paint order.
pub fn fingerprint_frame(frame: &EvaluatedFrame<'_>) -> FrameFingerprint {
    let mut h = Pair::new();
    h.u64(frame.frame);
    h.u64(frame.clips.len() as u64);
    for c in &frame.clips {
        h.str(c.clip.id.as_str());
        h.str(c.track.id.as_str());
        h.str(c.clip.content.type_name());
        h.u64(c.local_frame);
        write_visual(&mut h, &c.visual);
    }
    h.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/eval/fingerprint.rs"]
mod tests;
