use crate::constants::*;
use std::fmt;
use std::str::FromStr;

/// Control points of an easing curve, as configured by the user.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BezierCurve {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Default for BezierCurve {
    fn default() -> Self {
        let [x1, y1, x2, y2] = DEFAULT_BEZIER;
        Self { x1, y1, x2, y2 }
    }
}

impl BezierCurve {
    pub const LINEAR: BezierCurve = BezierCurve::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn is_finite(&self) -> bool {
        self.x1.is_finite() && self.y1.is_finite() && self.x2.is_finite() && self.y2.is_finite()
    }

    /// Copy with the x-coordinates pulled into [0, 1] so `Bx` stays monotonic.
    pub fn clamped(&self) -> Self {
        Self {
            x1: self.x1.clamp(0.0, 1.0),
            y1: self.y1,
            x2: self.x2.clamp(0.0, 1.0),
            y2: self.y2,
        }
    }

    pub fn is_in_domain(&self) -> bool {
        (0.0..=1.0).contains(&self.x1) && (0.0..=1.0).contains(&self.x2)
    }
}

impl fmt::Display for BezierCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cubic-bezier({}, {}, {}, {})",
            self.x1, self.y1, self.x2, self.y2
        )
    }
}

/// Named curves accepted by hosts (`--easing ease-out`, `set_easing("spin")`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EasingPreset {
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    Spin,
}

impl EasingPreset {
    pub fn curve(self) -> BezierCurve {
        match self {
            EasingPreset::Linear => BezierCurve::LINEAR,
            EasingPreset::Ease => BezierCurve::new(0.25, 0.1, 0.25, 1.0),
            EasingPreset::EaseIn => BezierCurve::new(0.42, 0.0, 1.0, 1.0),
            EasingPreset::EaseOut => BezierCurve::new(0.0, 0.0, 0.58, 1.0),
            EasingPreset::EaseInOut => BezierCurve::new(0.42, 0.0, 0.58, 1.0),
            EasingPreset::Spin => BezierCurve::default(),
        }
    }
}

impl FromStr for EasingPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(EasingPreset::Linear),
            "ease" => Ok(EasingPreset::Ease),
            "ease-in" => Ok(EasingPreset::EaseIn),
            "ease-out" => Ok(EasingPreset::EaseOut),
            "ease-in-out" => Ok(EasingPreset::EaseInOut),
            "spin" | "default" => Ok(EasingPreset::Spin),
            other => Err(format!("unknown easing preset '{other}'")),
        }
    }
}

/// Solver for one curve, with the polynomial coefficients precomputed.
/// Solves `Bx(u) = t` for `u`, then returns `By(u)`.
#[derive(Clone, Copy, Debug)]
pub struct CubicBezier {
    ax: f64,
    bx: f64,
    cx: f64,
    ay: f64,
    by: f64,
    cy: f64,
}

impl CubicBezier {
    /// Out-of-domain x-coordinates are clamped; the deceleration profile
    /// degrades but evaluation stays well defined.
    pub fn new(curve: BezierCurve) -> Self {
        let c = curve.clamped();
        let cx = 3.0 * c.x1;
        let bx = 3.0 * (c.x2 - c.x1) - cx;
        let ax = 1.0 - cx - bx;
        let cy = 3.0 * c.y1;
        let by = 3.0 * (c.y2 - c.y1) - cy;
        let ay = 1.0 - cy - by;
        Self {
            ax,
            bx,
            cx,
            ay,
            by,
            cy,
        }
    }

    #[inline]
    fn sample_x(&self, u: f64) -> f64 {
        ((self.ax * u + self.bx) * u + self.cx) * u
    }

    #[inline]
    fn sample_y(&self, u: f64) -> f64 {
        ((self.ay * u + self.by) * u + self.cy) * u
    }

    #[inline]
    fn slope_x(&self, u: f64) -> f64 {
        (3.0 * self.ax * u + 2.0 * self.bx) * u + self.cx
    }

    /// Curve parameter `u` with `Bx(u) = t`, for `t` in (0, 1).
    fn solve_u(&self, t: f64) -> f64 {
        let mut u = t;
        for _ in 0..BEZIER_NEWTON_ITERATIONS {
            let err = self.sample_x(u) - t;
            if err.abs() < BEZIER_EPSILON {
                return u;
            }
            let d = self.slope_x(u);
            if d.abs() < BEZIER_MIN_SLOPE {
                break;
            }
            u -= err / d;
            // Bx is only monotonic on [0, 1]; a root outside it is the wrong one
            if !(0.0..=1.0).contains(&u) {
                break;
            }
        }

        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        u = t;
        for _ in 0..BEZIER_BISECTION_ITERATIONS {
            let x = self.sample_x(u);
            if (x - t).abs() < BEZIER_EPSILON {
                return u;
            }
            if t > x {
                lo = u;
            } else {
                hi = u;
            }
            u = 0.5 * (lo + hi);
        }
        u
    }

    /// Progress in [0, 1] at normalized time `t`. Exact at both ends.
    pub fn evaluate(&self, t: f64) -> f64 {
        // NaN falls into the first arm
        if !(t > 0.0) {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        self.sample_y(self.solve_u(t)).clamp(0.0, 1.0)
    }
}

impl From<BezierCurve> for CubicBezier {
    fn from(curve: BezierCurve) -> Self {
        CubicBezier::new(curve)
    }
}
