use crate::{animation::ease::Easing, foundation::math::lerp, model::clip::Keyframe};

/// Outcome of writing a keyframe at a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Upsert {
    /// No keyframe existed at that frame.
    Inserted,
    /// An existing keyframe at that frame was replaced.
    Replaced,
}

/// Write `value` at `frame`, replacing any key already there (its easing is dropped), and
/// leave the list sorted by frame.
pub(crate) fn upsert(keys: &mut Vec<Keyframe>, frame: u64, value: f64) -> Upsert {
    let before = keys.len();
    keys.retain(|k| k.frame != frame);
    let outcome = if keys.len() < before {
        Upsert::Replaced
    } else {
        Upsert::Inserted
    };
    keys.push(Keyframe::new(frame, value));
    keys.sort_by_key(|k| k.frame);
    outcome
}

/// Remove the key at exactly `frame`. Returns whether one was removed.
pub(crate) fn remove(keys: &mut Vec<Keyframe>, frame: u64) -> bool {
    let before = keys.len();
    keys.retain(|k| k.frame != frame);
    keys.len() < before
}

/// Merge `value` / `easing` onto the key at exactly `frame`. Returns whether one matched.
pub(crate) fn update(
    keys: &mut [Keyframe],
    frame: u64,
    value: Option<f64>,
    easing: Option<Easing>,
) -> bool {
    let Some(k) = keys.iter_mut().find(|k| k.frame == frame) else {
        return false;
    };
    if let Some(v) = value {
        k.value = v;
    }
    if let Some(e) = easing {
        k.easing = Some(e);
    }
    true
}

/// Sample a sorted keyframe list at clip-relative `frame`.
///
/// Returns `None` for fewer than two keys, so the caller keeps its own value. Outside the
/// key range the boundary value holds; inside, the earlier key's easing shapes the segment.
pub fn sample(keys: &[Keyframe], frame: f64) -> Option<f64> {
    if keys.len() < 2 {
        return None;
    }

    let first = &keys[0];
    let last = &keys[keys.len() - 1];
    if frame <= first.frame as f64 {
        return Some(first.value);
    }
    if frame >= last.frame as f64 {
        return Some(last.value);
    }

    let idx = keys.partition_point(|k| (k.frame as f64) <= frame);
    let a = &keys[idx - 1];
    let b = &keys[idx];
    let denom = b.frame.saturating_sub(a.frame);
    if denom == 0 {
        return Some(a.value);
    }

    let t = (frame - a.frame as f64) / (denom as f64);
    let te = a.easing_or_default().apply(t);
    Some(lerp(a.value, b.value, te))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframes.rs"]
mod tests;
