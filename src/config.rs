//! Appearance parameters for the loader. Nothing here is validated: odd
//! values just make the loader look odd.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::color::Rgba;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    /// Fill of the base plate.
    pub background_color: Rgba,
    /// Colors of the shine band, leading edge first.
    pub gradient_colors: Vec<Rgba>,
    /// Seconds for one left-to-right sweep.
    pub animation_duration: f64,
    /// Applied to the base plate, the shine band and the clip mask.
    pub corner_radius: f64,
    /// Width of the shine band in cells.
    pub shadow_width: f64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            background_color: Rgba::BLACK,
            gradient_colors: vec![Rgba::CLEAR, Rgba::WHITE.opacity(0.7), Rgba::CLEAR],
            animation_duration: 2.0,
            corner_radius: 10.0,
            shadow_width: 80.0,
        }
    }
}

impl LoaderConfig {
    /// Blue plate with a yellow/green shine and a slower, wider sweep.
    pub fn preview() -> Self {
        Self {
            background_color: Rgba::BLUE,
            gradient_colors: vec![Rgba::YELLOW, Rgba::GREEN, Rgba::YELLOW],
            animation_duration: 3.0,
            corner_radius: 5.0,
            shadow_width: 120.0,
        }
    }

    pub fn with_background_color(mut self, color: Rgba) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_gradient_colors(mut self, colors: Vec<Rgba>) -> Self {
        self.gradient_colors = colors;
        self
    }

    pub fn with_animation_duration(mut self, seconds: f64) -> Self {
        self.animation_duration = seconds;
        self
    }

    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn with_shadow_width(mut self, width: f64) -> Self {
        self.shadow_width = width;
        self
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
        Self::from_toml(&contents).with_context(|| format!("parsing {:?}", path))
    }

    /// Like `load`, but a missing file means defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }
}

/// `~/.config/shadow-loader/config.toml`
pub fn default_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME env var not set")?;
    Ok(Path::new(&home)
        .join(".config")
        .join("shadow-loader")
        .join("config.toml"))
}
