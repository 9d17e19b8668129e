//! Horizontal linear gradient for the shine band.

use crate::color::Rgba;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub color: Rgba,
    /// 0.0 is the leading edge, 1.0 the trailing edge.
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    stops: Vec<GradientStop>,
}

impl LinearGradient {
    /// Spread `colors` evenly: color `i` of `n` lands at `i / (n - 1)`.
    /// A single color sits at 0.0 and paints the whole band flat.
    pub fn evenly_spaced(colors: &[Rgba]) -> Self {
        let last = colors.len().saturating_sub(1);
        let stops = colors
            .iter()
            .enumerate()
            .map(|(i, &color)| GradientStop {
                color,
                position: if last == 0 {
                    0.0
                } else {
                    i as f64 / last as f64
                },
            })
            .collect();
        Self { stops }
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Color at `t`, clamped to the first/last stop outside `0.0..=1.0`.
    /// `None` only for an empty gradient.
    pub fn sample(&self, t: f64) -> Option<Rgba> {
        let first = self.stops.first()?;
        let last = self.stops.last()?;
        if t <= first.position {
            return Some(first.color);
        }
        if t >= last.position {
            return Some(last.color);
        }

        let upper = self.stops.iter().position(|s| s.position >= t)?;
        let hi = self.stops[upper];
        let lo = self.stops[upper.saturating_sub(1)];
        let span = hi.position - lo.position;
        if span <= 0.0 {
            return Some(hi.color);
        }
        Some(lo.color.lerp(hi.color, (t - lo.position) / span))
    }
}
