use std::fmt;

use crate::model::clip::{Filter, FilterKind};

/// Filter resolved to renderer units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum FilterDescriptor {
    /// Gaussian blur radius in pixels.
    Blur {
        /// Radius in px.
        radius_px: f64,
    },
    /// Desaturation amount.
    Grayscale {
        /// 0 to 100.
        percent: f64,
    },
    /// Sepia toning amount.
    Sepia {
        /// 0 to 100.
        percent: f64,
    },
    /// Contrast, 100 being unchanged.
    Contrast {
        /// 100 to 200.
        percent: f64,
    },
    /// Brightness, 100 being unchanged.
    Brightness {
        /// 100 to 200.
        percent: f64,
    },
}

impl FilterDescriptor {
    /// Map a clip filter's `0..=100` intensity onto the renderer's units.
    pub fn resolve(filter: &Filter) -> Self {
        let i = filter.intensity;
        match filter.kind {
            FilterKind::Blur => Self::Blur { radius_px: i / 10.0 },
            FilterKind::Grayscale => Self::Grayscale { percent: i },
            FilterKind::Sepia => Self::Sepia { percent: i },
            FilterKind::Contrast => Self::Contrast { percent: 100.0 + i },
            FilterKind::Brightness => Self::Brightness { percent: 100.0 + i },
        }
    }
}

/// CSS filter function syntax, e.g. `blur(2.5px)`.
impl fmt::Display for FilterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Blur { radius_px } => write!(f, "blur({radius_px}px)"),
            Self::Grayscale { percent } => write!(f, "grayscale({percent}%)"),
            Self::Sepia { percent } => write!(f, "sepia({percent}%)"),
            Self::Contrast { percent } => write!(f, "contrast({percent}%)"),
            Self::Brightness { percent } => write!(f, "brightness({percent}%)"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/filter.rs"]
mod tests;
