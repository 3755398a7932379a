//! Color primitives
//!
//! Colors are kept as four `f64` channels in `[0, 1]`. Source values may be
//! written as `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` or
//! `rgba(r, g, b, a)` with 0-255 color channels and a 0-1 alpha.

use std::fmt;

/// An RGBA color with normalized channels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red channel
    pub r: f64,
    /// Green channel
    pub g: f64,
    /// Blue channel
    pub b: f64,
    /// Alpha channel
    pub a: f64,
}

impl Rgba {
    /// Opaque black
    pub const BLACK: Rgba = Rgba { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };

    /// Create a color from normalized channels
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from 8-bit channels
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
            a: f64::from(a) / 255.0,
        }
    }

    /// Convert to 8-bit channels, rounding to nearest
    pub fn to_rgba8(&self) -> [u8; 4] {
        [to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a)]
    }

    /// Whether the alpha channel is fully opaque
    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// Whether every channel lies in `[0, 1]`
    pub fn is_normalized(&self) -> bool {
        [self.r, self.g, self.b, self.a]
            .iter()
            .all(|c| c.is_finite() && (0.0..=1.0).contains(c))
    }

    /// Hex representation: `#rrggbb` when opaque, `#rrggbbaa` otherwise
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

fn to_u8(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Parse a color value
///
/// Returns `None` when the string is not a supported color notation or a
/// channel is out of range.
pub fn parse_color(value: &str) -> Option<Rgba> {
    let value = value.trim();
    if value.starts_with('#') {
        return parse_hex_color(value);
    }

    let lower = value.to_ascii_lowercase();
    let args = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    parse_rgb_function(args)
}

/// Parse a hex color string (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`)
pub fn parse_hex_color(hex: &str) -> Option<Rgba> {
    let hex = hex.trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let short = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);

    match hex.len() {
        3 => Some(Rgba::from_rgba8(short(0)?, short(1)?, short(2)?, 255)),
        4 => Some(Rgba::from_rgba8(short(0)?, short(1)?, short(2)?, short(3)?)),
        6 => Some(Rgba::from_rgba8(channel(0)?, channel(2)?, channel(4)?, 255)),
        8 => Some(Rgba::from_rgba8(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
        _ => None,
    }
}

fn parse_rgb_function(args: &str) -> Option<Rgba> {
    let parts: Vec<f64> = args
        .split(',')
        .map(|p| p.trim().parse::<f64>().ok())
        .collect::<Option<Vec<_>>>()?;

    let (rgb, alpha) = match parts.as_slice() {
        [r, g, b] => ([*r, *g, *b], 1.0),
        [r, g, b, a] => ([*r, *g, *b], *a),
        _ => return None,
    };

    if rgb.iter().any(|c| !(0.0..=255.0).contains(c)) || !(0.0..=1.0).contains(&alpha) {
        return None;
    }

    Some(Rgba::new(rgb[0] / 255.0, rgb[1] / 255.0, rgb[2] / 255.0, alpha))
}
