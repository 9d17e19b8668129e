//! Declarative sweep animation: endpoints and duration as data.
//! The host's draw loop owns the clock and asks for a value each frame.

use std::time::Duration;

/// Cubic Bézier (0.42, 0, 0.58, 1): slow out of the start, slow into the end.
pub fn ease_in_out(t: f64) -> f64 {
    cubic_bezier(0.42, 0.0, 0.58, 1.0, t.clamp(0.0, 1.0))
}

/// A sweep from `from` to `to` on the ease-in-out curve, repeated forever.
/// Each pass restarts at `from`; it never runs backwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub from: f64,
    pub to: f64,
    /// Seconds for one pass from `from` to `to`.
    pub duration: f64,
}

impl Animation {
    pub fn repeating(from: f64, to: f64, duration: f64) -> Self {
        Self { from, to, duration }
    }

    /// Linear progress through the current pass. A non-positive or
    /// non-finite duration completes instantly.
    fn progress(&self, elapsed: Duration) -> f64 {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration).fract()
    }

    pub fn value_at(&self, elapsed: Duration) -> f64 {
        let eased = ease_in_out(self.progress(elapsed));
        self.from + (self.to - self.from) * eased
    }
}

fn bezier(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Solve x(s) = t for the curve parameter, then return y(s).
/// Newton first; bisection if the slope flattens out.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, t: f64) -> f64 {
    const EPSILON: f64 = 1e-7;

    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let mut s = t;
    for _ in 0..8 {
        let err = bezier(s, x1, x2) - t;
        if err.abs() < EPSILON {
            return bezier(s, y1, y2);
        }
        let slope = bezier_slope(s, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= err / slope;
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    s = t;
    for _ in 0..50 {
        let x = bezier(s, x1, x2);
        if (x - t).abs() < EPSILON {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    bezier(s, y1, y2)
}
