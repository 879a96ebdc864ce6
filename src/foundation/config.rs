use std::time::Duration;

use crate::foundation::error::{KeylineError, KeylineResult};

/// Default timeline scale used to convert pointer positions to frames.
pub const PIXELS_PER_FRAME: f64 = 2.0;

/// Default interval between applied drag ticks (~60 Hz).
pub const DRAG_THROTTLE_MS: u64 = 16;

/// Membership tier selecting the project duration cap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Up to 8 minutes per project.
    #[default]
    Standard,
    /// Up to 60 minutes per project.
    Pro,
}

impl Tier {
    /// Longest allowed project, in minutes.
    pub fn max_minutes(self) -> u64 {
        match self {
            Self::Standard => 8,
            Self::Pro => 60,
        }
    }

    /// Longest allowed project in frames at `fps`.
    pub fn max_duration_frames(self, fps: u32) -> u64 {
        u64::from(fps)
            .saturating_mul(60)
            .saturating_mul(self.max_minutes())
    }
}

/// Editor-wide settings shared by the store and the interaction controller.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Active duration-cap tier.
    pub tier: Tier,
    /// Fixed timeline zoom: pixels per frame.
    pub pixels_per_frame: f64,
    /// Minimum spacing between applied drag ticks, in milliseconds.
    pub drag_throttle_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tier: Tier::Standard,
            pixels_per_frame: PIXELS_PER_FRAME,
            drag_throttle_ms: DRAG_THROTTLE_MS,
        }
    }
}

impl EditorConfig {
    /// Parse a config from JSON; missing fields fall back to defaults.
    pub fn from_json(s: &str) -> KeylineResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check that the timeline scale is usable.
    pub fn validate(&self) -> KeylineResult<()> {
        if !self.pixels_per_frame.is_finite() || self.pixels_per_frame <= 0.0 {
            return Err(KeylineError::validation(
                "pixels_per_frame must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Drag throttle interval as a [`Duration`].
    pub fn drag_throttle(&self) -> Duration {
        Duration::from_millis(self.drag_throttle_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
