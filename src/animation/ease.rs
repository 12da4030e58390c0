use crate::foundation::error::{VizError, VizResult};

/// Timing curve of a transition, mapping linear progress `t` in `[0, 1]` to eased progress.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    /// Fast start, gentle landing; the default for boundary motion.
    OutCubic,
    /// CSS-style `cubic-bezier(x1, y1, x2, y2)` with fixed endpoints `(0,0)` and `(1,1)`.
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Ease {
    /// Curve used for swap travel.
    pub const SWAP: Ease = Ease::CubicBezier {
        x1: 0.8,
        y1: 0.4,
        x2: 0.3,
        y2: 1.0,
    };

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::CubicBezier { x1, y1, x2, y2 } => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let s = solve_bezier_param(x1, x2, t);
                bezier_coord(y1, y2, s)
            }
        }
    }

    pub fn validate(self) -> VizResult<()> {
        if let Self::CubicBezier { x1, y1, x2, y2 } = self {
            let finite = [x1, y1, x2, y2].iter().all(|v| v.is_finite());
            if !finite || !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
                return Err(VizError::validation(
                    "cubic-bezier x control points must be within [0, 1]",
                ));
            }
        }
        Ok(())
    }
}

// One coordinate of a cubic Bezier with endpoints 0 and 1.
fn bezier_coord(p1: f64, p2: f64, s: f64) -> f64 {
    let u = 1.0 - s;
    3.0 * u * u * s * p1 + 3.0 * u * s * s * p2 + s * s * s
}

fn bezier_slope(p1: f64, p2: f64, s: f64) -> f64 {
    let u = 1.0 - s;
    3.0 * u * u * p1 + 6.0 * u * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

// x(s) is monotonic for x1, x2 in [0, 1]; Newton first, bisection when the slope vanishes.
fn solve_bezier_param(x1: f64, x2: f64, x: f64) -> f64 {
    let mut s = x;
    for _ in 0..8 {
        let err = bezier_coord(x1, x2, s) - x;
        if err.abs() < 1e-7 {
            return s;
        }
        let slope = bezier_slope(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s = (s - err / slope).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..64 {
        let v = bezier_coord(x1, x2, s);
        if (v - x).abs() < 1e-7 {
            break;
        }
        if v < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    s
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
