/// Easing tag stored on a keyframe. It shapes the segment from that key to the next one.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    /// Identity curve.
    #[default]
    Linear,
    /// Quadratic ease-in.
    EaseIn,
    /// Quadratic ease-out.
    EaseOut,
    /// Quadratic ease-in/out.
    EaseInOut,
}

impl Easing {
    /// Every easing, in authoring cycle order.
    pub const ALL: [Easing; 4] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
    ];

    /// Apply this easing to normalized progress `t` (clamped to `[0, 1]`).
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
        }
    }

    /// Next easing when a keyframe marker is clicked:
    /// `linear -> easeIn -> easeOut -> easeInOut -> linear`.
    pub fn cycle(self) -> Self {
        match self {
            Self::Linear => Self::EaseIn,
            Self::EaseIn => Self::EaseOut,
            Self::EaseOut => Self::EaseInOut,
            Self::EaseInOut => Self::Linear,
        }
    }
}

/// CSS-style cubic bezier timing curve with endpoints fixed at (0,0) and (1,1).
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    /// The standard `ease` curve used by transition ramps.
    pub(crate) const EASE: CubicBezier = CubicBezier::new(0.42, 0.0, 1.0, 1.0);

    pub(crate) const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub(crate) fn sample(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        let s = self.solve_x(t);
        eval_cubic(0.0, self.y1, self.y2, 1.0, s)
    }

    fn solve_x(self, target: f64) -> f64 {
        // Newton-Raphson with a bisection fallback; x(s) is monotonic for x1, x2 in [0, 1].
        let mut s = target;
        for _ in 0..8 {
            let x = eval_cubic(0.0, self.x1, self.x2, 1.0, s) - target;
            if x.abs() < 1e-9 {
                return s;
            }
            let dx = eval_cubic_derivative(0.0, self.x1, self.x2, 1.0, s);
            if dx.abs() < 1e-9 {
                break;
            }
            s = (s - x / dx).clamp(0.0, 1.0);
        }

        let mut lo = 0.0;
        let mut hi = 1.0;
        s = target;
        for _ in 0..48 {
            let x = eval_cubic(0.0, self.x1, self.x2, 1.0, s);
            if (x - target).abs() < 1e-9 {
                break;
            }
            if x < target {
                lo = s;
            } else {
                hi = s;
            }
            s = 0.5 * (lo + hi);
        }
        s
    }
}

fn eval_cubic(p0: f64, p1: f64, p2: f64, p3: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    inv * inv * inv * p0 + 3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s * p3
}

fn eval_cubic_derivative(p0: f64, p1: f64, p2: f64, p3: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * (p1 - p0) + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (p3 - p2)
}

/// Ease-in form of the standard curve. Exit ramps use it.
pub(crate) fn ramp_in(t: f64) -> f64 {
    CubicBezier::EASE.sample(t)
}

/// Ease-out form (mirrored standard curve). Entry ramps use it.
pub(crate) fn ramp_out(t: f64) -> f64 {
    1.0 - CubicBezier::EASE.sample(1.0 - t)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
