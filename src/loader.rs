//! The shadow loader: a rounded plate with a gradient shine band sweeping
//! across it, left to right, forever.
//!
//! The loader owns a single piece of state, whether it has appeared yet.
//! The first render flips it and records the clock reading; every later
//! frame asks the sweep animation where the band is at that point in time.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::animation::Animation;
use crate::color::Rgba;
use crate::config::LoaderConfig;
use crate::gradient::LinearGradient;

#[derive(Debug, Clone)]
pub struct Loader {
    config: LoaderConfig,
    gradient: LinearGradient,
    appeared_at: Option<Instant>,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    pub fn new() -> Self {
        Self::with_config(LoaderConfig::default())
    }

    pub fn with_config(config: LoaderConfig) -> Self {
        let gradient = LinearGradient::evenly_spaced(&config.gradient_colors);
        Self {
            config,
            gradient,
            appeared_at: None,
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn gradient(&self) -> &LinearGradient {
        &self.gradient
    }

    pub fn has_appeared(&self) -> bool {
        self.appeared_at.is_some()
    }

    /// Mark the loader as displayed. Only the first call does anything;
    /// returns whether this call was it.
    pub fn appear(&mut self, now: Instant) -> bool {
        if self.appeared_at.is_some() {
            return false;
        }
        debug!(
            duration = self.config.animation_duration,
            shadow_width = self.config.shadow_width,
            "loader appeared, starting sweep"
        );
        self.appeared_at = Some(now);
        true
    }

    /// Band fully off-screen to the left of a box `width` wide.
    pub fn left_offset(&self, width: f64) -> f64 {
        -(width / 2.0 + self.config.shadow_width)
    }

    /// Band fully off-screen to the right of a box `width` wide.
    pub fn right_offset(&self, width: f64) -> f64 {
        width / 2.0 + self.config.shadow_width
    }

    /// Offset the current state points at: left before appearing,
    /// right afterwards.
    pub fn offset(&self, width: f64) -> f64 {
        if self.has_appeared() {
            self.right_offset(width)
        } else {
            self.left_offset(width)
        }
    }

    pub fn sweep(&self, width: f64) -> Animation {
        Animation::repeating(
            self.left_offset(width),
            self.right_offset(width),
            self.config.animation_duration,
        )
    }

    /// Time since the first appearance, zero until then.
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.appeared_at
            .map(|start| now.saturating_duration_since(start))
            .unwrap_or_default()
    }

    /// Horizontal offset of the band's center from the box's center.
    pub fn current_offset(&self, width: f64, now: Instant) -> f64 {
        if !self.has_appeared() {
            return self.left_offset(width);
        }
        self.sweep(width).value_at(self.elapsed(now))
    }

    /// Draw one frame as of `now`. Cells outside the rounded plate are
    /// left as they were.
    pub fn render_at(&mut self, area: Rect, buf: &mut Buffer, now: Instant) {
        self.appear(now);

        if area.is_empty() {
            return;
        }

        // Geometry follows the granted box; only the drawing is clipped to
        // the buffer.
        let width = area.width as f64;
        let height = area.height as f64;
        let offset = self.current_offset(width, now);
        trace!(width, offset, "loader frame");

        let plate = RoundedRect::new(0.0, width, height, self.config.corner_radius);
        let shadow_width = self.config.shadow_width;
        let band_left = width / 2.0 - shadow_width / 2.0 + offset;
        let visible = shadow_width.is_finite() && shadow_width > 0.0 && offset.is_finite();
        let band = (visible && !self.gradient.is_empty()).then(|| {
            RoundedRect::new(band_left, shadow_width, height, self.config.corner_radius)
        });

        let visible_area = area.intersection(buf.area);
        for y in visible_area.top()..visible_area.bottom() {
            for x in visible_area.left()..visible_area.right() {
                let (col, row) = (x - area.x, y - area.y);
                let (px, py) = (col as f64 + 0.5, row as f64 + 0.5);
                if !plate.contains(px, py) {
                    continue;
                }
                let Some(cell) = buf.cell_mut((x, y)) else {
                    continue;
                };

                let backdrop = Rgba::from_terminal(cell.bg).unwrap_or(Rgba::BLACK);
                let base = self.config.background_color.over(backdrop);
                let color = band
                    .as_ref()
                    .filter(|band| band.contains(px, py))
                    .and_then(|_| self.gradient.sample((px - band_left) / shadow_width))
                    .map_or(base, |shine| shine.over(base));

                cell.set_char(' ').set_bg(color.to_terminal());
            }
        }
    }
}

impl Widget for &mut Loader {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_at(area, buf, Instant::now());
    }
}

/// Rounded rectangle spanning the full height, in cell units relative to
/// the loader's area.
#[derive(Debug, Clone, Copy)]
struct RoundedRect {
    x: f64,
    width: f64,
    height: f64,
    radius: f64,
}

impl RoundedRect {
    /// The radius can't exceed half the shorter side.
    fn new(x: f64, width: f64, height: f64, radius: f64) -> Self {
        let radius = radius.max(0.0).min(width / 2.0).min(height / 2.0);
        Self {
            x,
            width,
            height,
            radius,
        }
    }

    fn contains(&self, px: f64, py: f64) -> bool {
        if px < self.x || px > self.x + self.width || py < 0.0 || py > self.height {
            return false;
        }
        // max/min rather than clamp: rounding can cross the bounds by an ulp.
        let cx = px
            .max(self.x + self.radius)
            .min(self.x + self.width - self.radius);
        let cy = py.max(self.radius).min(self.height - self.radius);
        let (dx, dy) = (px - cx, py - cy);
        dx * dx + dy * dy <= self.radius * self.radius
    }
}
