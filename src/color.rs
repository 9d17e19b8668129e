//! RGBA colors with opacity, flattened to terminal RGB at draw time.

use anyhow::{Context, Result, bail};
use ratatui::style::Color;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
#[serde(try_from = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `0.0..=1.0`.
    pub a: f64,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const GRAY: Rgba = Rgba::rgb(128, 128, 128);
    pub const RED: Rgba = Rgba::rgb(255, 59, 48);
    pub const GREEN: Rgba = Rgba::rgb(52, 199, 89);
    pub const BLUE: Rgba = Rgba::rgb(0, 122, 255);
    pub const YELLOW: Rgba = Rgba::rgb(255, 204, 0);
    pub const CLEAR: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Scale the existing opacity, the way a view modifier would.
    pub fn opacity(self, opacity: f64) -> Self {
        Self {
            a: self.a * opacity,
            ..self
        }
    }

    /// Interpolate in premultiplied space so fading through `CLEAR`
    /// doesn't drag the color toward black.
    pub fn lerp(self, other: Rgba, t: f64) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let a = self.a + (other.a - self.a) * t;
        if a <= 0.0 {
            return Rgba::CLEAR;
        }
        let channel = |from: u8, to: u8| {
            let from = from as f64 * self.a;
            let to = to as f64 * other.a;
            to_u8((from + (to - from) * t) / a)
        };
        Rgba {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            a,
        }
    }

    /// Source-over compositing. The result is as opaque as the backdrop.
    pub fn over(self, backdrop: Rgba) -> Rgba {
        let src_a = self.a.clamp(0.0, 1.0);
        let dst_a = backdrop.a.clamp(0.0, 1.0);
        let a = src_a + dst_a * (1.0 - src_a);
        if a <= 0.0 {
            return Rgba::CLEAR;
        }
        let channel = |src: u8, dst: u8| {
            to_u8((src as f64 * src_a + dst as f64 * dst_a * (1.0 - src_a)) / a)
        };
        Rgba {
            r: channel(self.r, backdrop.r),
            g: channel(self.g, backdrop.g),
            b: channel(self.b, backdrop.b),
            a,
        }
    }

    /// Read back a cell color. Only RGB and the two fixed extremes have a
    /// known value; palette colors depend on the terminal theme.
    pub fn from_terminal(color: Color) -> Option<Rgba> {
        match color {
            Color::Rgb(r, g, b) => Some(Rgba::rgb(r, g, b)),
            Color::Black => Some(Rgba::BLACK),
            Color::White => Some(Rgba::WHITE),
            _ => None,
        }
    }

    /// Terminals have no alpha, so whatever opacity is left is dropped.
    pub fn to_terminal(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

fn to_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

fn named(name: &str) -> Option<Rgba> {
    let color = match name {
        "black" => Rgba::BLACK,
        "white" => Rgba::WHITE,
        "gray" | "grey" => Rgba::GRAY,
        "red" => Rgba::RED,
        "green" => Rgba::GREEN,
        "blue" => Rgba::BLUE,
        "yellow" => Rgba::YELLOW,
        "clear" | "transparent" => Rgba::CLEAR,
        _ => return None,
    };
    Some(color)
}

fn parse_hex(hex: &str) -> Result<Rgba> {
    // from_str_radix alone would take a sign, e.g. "+1".
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) || !(hex.len() == 6 || hex.len() == 8) {
        bail!("expected #rrggbb or #rrggbbaa, got #{hex}");
    }
    let byte = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).with_context(|| format!("invalid hex in #{hex}"))
    };
    let mut color = Rgba::rgb(byte(0)?, byte(2)?, byte(4)?);
    if hex.len() == 8 {
        color.a = byte(6)? as f64 / 255.0;
    }
    Ok(color)
}

/// Accepts `name`, `#rrggbb` or `#rrggbbaa`, each optionally followed by
/// `@opacity` (e.g. `white@0.7`).
impl FromStr for Rgba {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (base, opacity) = match s.split_once('@') {
            Some((base, opacity)) => {
                let opacity: f64 = opacity
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid opacity in {s:?}"))?;
                if !(0.0..=1.0).contains(&opacity) {
                    bail!("opacity must be between 0 and 1 in {s:?}");
                }
                (base.trim(), opacity)
            }
            None => (s, 1.0),
        };

        let color = match base.strip_prefix('#') {
            Some(hex) => parse_hex(hex)?,
            None => named(&base.to_ascii_lowercase())
                .with_context(|| format!("unknown color {base:?}"))?,
        };

        Ok(color.opacity(opacity))
    }
}

impl TryFrom<String> for Rgba {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

#[cfg(test)]
mod tests;
