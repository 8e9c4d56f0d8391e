//! Color type and the handful of utilities button styles need.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// An HSLA color with every component normalized to `0.0..=1.0`.
///
/// Serialized as a hex string (`#RRGGBBAA`, alpha omitted when opaque) so
/// configuration files can use the familiar `#RGB` / `#RRGGBB` forms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hsla {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub a: f32,
}

impl Hsla {
    /// Strictly parse a hex color string.
    /// Supports formats: #RGB, #RRGGBB, #RRGGBBAA (leading `#` optional)
    pub fn parse(color: &str) -> Result<Self> {
        let digits = color.trim().trim_start_matches('#');
        let invalid = || Error::InvalidColor(color.to_string());

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>, doubled: bool| -> Result<u8> {
            let part = &digits[range];
            let part = if doubled { part.repeat(2) } else { part.to_string() };
            u8::from_str_radix(&part, 16).map_err(|_| invalid())
        };

        let (r, g, b, a) = match digits.len() {
            3 => (channel(0..1, true)?, channel(1..2, true)?, channel(2..3, true)?, 255),
            6 => (channel(0..2, false)?, channel(2..4, false)?, channel(4..6, false)?, 255),
            8 => (
                channel(0..2, false)?,
                channel(2..4, false)?,
                channel(4..6, false)?,
                channel(6..8, false)?,
            ),
            _ => return Err(invalid()),
        };

        Ok(rgb_to_hsla(r, g, b, a))
    }

    /// Whether the color is fully transparent.
    pub fn is_transparent(&self) -> bool {
        self.a <= f32::EPSILON
    }

    /// Convert back to 8-bit RGBA channels.
    pub fn to_rgba(&self) -> (u8, u8, u8, u8) {
        let (r, g, b) = if self.s == 0.0 {
            (self.l, self.l, self.l)
        } else {
            let q = if self.l < 0.5 {
                self.l * (1.0 + self.s)
            } else {
                self.l + self.s - self.l * self.s
            };
            let p = 2.0 * self.l - q;
            (
                hue_to_rgb(p, q, self.h + 1.0 / 3.0),
                hue_to_rgb(p, q, self.h),
                hue_to_rgb(p, q, self.h - 1.0 / 3.0),
            )
        };

        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (byte(r), byte(g), byte(b), byte(self.a))
    }

    /// Hex representation, `#rrggbb` when opaque and `#rrggbbaa` otherwise.
    pub fn to_hex(&self) -> String {
        let (r, g, b, a) = self.to_rgba();
        if a == 255 {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        }
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Hsla {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Hsla::parse(&value)
    }
}

impl From<Hsla> for String {
    fn from(color: Hsla) -> Self {
        color.to_hex()
    }
}

/// Parse a hex color string, falling back to opaque black on malformed input.
///
/// Use [`Hsla::parse`] when the input comes from a user.
pub fn hex(color: &str) -> Hsla {
    Hsla::parse(color).unwrap_or_else(|_| constants::black())
}

/// Convert RGB to HSLA
fn rgb_to_hsla(r: u8, g: u8, b: u8, a: u8) -> Hsla {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;
    let a = a as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        // Achromatic
        return Hsla { h: 0.0, s: 0.0, l, a };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        let h = (g - b) / d;
        if g < b { h + 6.0 } else { h }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsla { h: h / 6.0, s, l, a }
}

fn hue_to_rgb(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Create an HSLA color from components
/// h: 0-360, s: 0-100, l: 0-100, a: 0-1
pub fn hsla(h: f32, s: f32, l: f32, a: f32) -> Hsla {
    Hsla {
        h: h / 360.0,
        s: s / 100.0,
        l: l / 100.0,
        a,
    }
}

/// Common color constants
pub mod constants {
    use super::{hsla, Hsla};

    pub fn transparent() -> Hsla {
        Hsla { h: 0.0, s: 0.0, l: 0.0, a: 0.0 }
    }

    pub fn white() -> Hsla {
        hsla(0.0, 0.0, 100.0, 1.0)
    }

    pub fn black() -> Hsla {
        hsla(0.0, 0.0, 0.0, 1.0)
    }

    pub fn blue() -> Hsla {
        hsla(211.0, 100.0, 50.0, 1.0)
    }

    pub fn purple() -> Hsla {
        hsla(280.0, 68.0, 60.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_hex_parsing() {
        let white = hex("#ffffff");
        assert_abs_diff_eq!(white.l, 1.0, epsilon = 0.01);

        let black = hex("#000000");
        assert_abs_diff_eq!(black.l, 0.0, epsilon = 0.01);

        let red = hex("#ff0000");
        assert_abs_diff_eq!(red.h, 0.0, epsilon = 0.01);
        assert_abs_diff_eq!(red.s, 1.0, epsilon = 0.01);
    }

    #[test]
    fn test_short_hex() {
        let white = hex("#fff");
        assert_abs_diff_eq!(white.l, 1.0, epsilon = 0.01);
    }

    #[test]
    fn test_alpha_channel() {
        let half = Hsla::parse("#00000080").unwrap();
        assert_abs_diff_eq!(half.a, 128.0 / 255.0, epsilon = 0.001);
        assert_eq!(half.to_hex(), "#00000080");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(Hsla::parse("#12"), Err(Error::InvalidColor(_))));
        assert!(matches!(Hsla::parse("#gggggg"), Err(Error::InvalidColor(_))));
        assert!(matches!(Hsla::parse("#ffé"), Err(Error::InvalidColor(_))));
    }

    #[test]
    fn test_lenient_hex_falls_back_to_black() {
        assert_eq!(hex("nope"), constants::black());
    }

    #[test]
    fn test_hex_output_matches_input() {
        assert_eq!(hex("#3366cc").to_hex(), "#3366cc");
        assert_eq!(hex("#FF8800").to_hex(), "#ff8800");
    }

    #[test]
    fn test_serde_uses_hex_strings() {
        let color: Hsla = serde_json::from_str("\"#0af\"").unwrap();
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#00aaff\"");
        assert!(serde_json::from_str::<Hsla>("\"blue\"").is_err());
    }

    #[test]
    fn test_transparent() {
        assert!(constants::transparent().is_transparent());
        assert!(!Hsla::parse("#ffffff80").unwrap().is_transparent());
        assert!(Hsla::parse("#ffffff00").unwrap().is_transparent());
    }
}
