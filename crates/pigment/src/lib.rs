#![forbid(unsafe_code)]
// Allow these clippy lints for color/math code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]

//! # Pigment
//!
//! Deterministic color-space math for theme pipelines.
//!
//! Pigment provides:
//! - **Hex**: A validated 6-digit `#rrggbb` color value
//! - **Hsl**: Hue/saturation/lightness with CSS-style formatting (`"262 83% 58%"`)
//! - **WCAG contrast**: Relative luminance and contrast ratio per WCAG 2.x
//!
//! ## Example
//!
//! ```rust
//! use pigment::{Hex, hex_to_hsl, contrast_ratio};
//!
//! let hsl = hex_to_hsl("#7c3aed").unwrap();
//! assert_eq!(hsl.to_string(), "262 83% 58%");
//!
//! let bg: Hex = "#ffffff".parse().unwrap();
//! let fg: Hex = "#09090b".parse().unwrap();
//! assert!(contrast_ratio(&bg, &fg) > 4.5);
//! ```
//!
//! Conversions keep full floating-point precision internally; rounding to
//! integer degrees and percentages happens only when formatting. This keeps
//! the HEX -> HSL -> HEX round trip within one unit per 8-bit channel.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

// WCAG 2.x contrast thresholds.

/// Minimum contrast for normal text at level AA.
pub const WCAG_AA_NORMAL_TEXT: f64 = 4.5;
/// Minimum contrast for large text at level AA.
pub const WCAG_AA_LARGE_TEXT: f64 = 3.0;
/// Minimum contrast for normal text at level AAA.
pub const WCAG_AAA_NORMAL_TEXT: f64 = 7.0;
/// Minimum contrast for large text at level AAA.
pub const WCAG_AAA_LARGE_TEXT: f64 = 4.5;

/// Error returned for malformed HEX color input.
///
/// Invalid input is always surfaced to the caller; it is never silently
/// repaired to a guessed color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidColorError {
    /// Input does not start with `#`.
    #[error("hex color must start with '#', got {0:?}")]
    MissingHash(String),
    /// Input is not exactly six hex digits after `#`.
    #[error("hex color must have exactly 6 digits, got {0:?}")]
    WrongLength(String),
    /// Input contains a non-hexadecimal character.
    #[error("hex color contains non-hex characters: {0:?}")]
    NotHex(String),
}

/// A validated 6-digit HEX color in canonical `#rrggbb` form.
///
/// Construction always validates; once you hold a `Hex`, conversion through
/// [`Hex::to_hsl`] cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hex {
    r: u8,
    g: u8,
    b: u8,
}

impl Hex {
    /// Create a color from raw channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a strict `#rrggbb` string.
    ///
    /// Unlike lenient CSS parsers this rejects 3-digit shorthand and inputs
    /// without the leading `#`.
    pub fn parse(s: &str) -> Result<Self, InvalidColorError> {
        let Some(digits) = s.strip_prefix('#') else {
            return Err(InvalidColorError::MissingHash(s.to_string()));
        };
        if digits.len() != 6 {
            return Err(InvalidColorError::WrongLength(s.to_string()));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(InvalidColorError::NotHex(s.to_string()));
        }
        // Length and digit checks above make these infallible.
        let r = u8::from_str_radix(&digits[0..2], 16)
            .map_err(|_| InvalidColorError::NotHex(s.to_string()))?;
        let g = u8::from_str_radix(&digits[2..4], 16)
            .map_err(|_| InvalidColorError::NotHex(s.to_string()))?;
        let b = u8::from_str_radix(&digits[4..6], 16)
            .map_err(|_| InvalidColorError::NotHex(s.to_string()))?;
        Ok(Self { r, g, b })
    }

    /// Raw channel values.
    pub const fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Convert to HSL. Infallible for an already-validated color.
    pub fn to_hsl(&self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if (max - min).abs() < f64::EPSILON {
            // Achromatic: hue and saturation are zero by convention.
            return Hsl {
                h: 0.0,
                s: 0.0,
                l: l * 100.0,
            };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if (max - r).abs() < f64::EPSILON {
            ((g - b) / d).rem_euclid(6.0)
        } else if (max - g).abs() < f64::EPSILON {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl {
            h: h / 6.0 * 360.0,
            s: s * 100.0,
            l: l * 100.0,
        }
    }

    /// Relative luminance per WCAG (sRGB linear-light weighted sum).
    pub fn relative_luminance(&self) -> f64 {
        fn linearize(channel: u8) -> f64 {
            let c = f64::from(channel) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }

        0.2126 * linearize(self.r) + 0.7152 * linearize(self.g) + 0.0722 * linearize(self.b)
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Hex {
    type Err = InvalidColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<(u8, u8, u8)> for Hex {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

impl Serialize for Hex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Hex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(HexVisitor)
    }
}

struct HexVisitor;

impl Visitor<'_> for HexVisitor {
    type Value = Hex;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a '#rrggbb' hex color string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Hex::parse(v).map_err(E::custom)
    }
}

/// A color in HSL space.
///
/// `h` is in degrees `[0, 360)`, `s` and `l` are percentages `[0, 100]`.
/// Values keep full precision; [`fmt::Display`] renders the CSS custom
/// property form with integer rounding (`"240 10% 4%"`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue in degrees.
    pub h: f64,
    /// Saturation as a percentage.
    pub s: f64,
    /// Lightness as a percentage.
    pub l: f64,
}

impl Hsl {
    /// Create an HSL value from degrees and percentages.
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Convert back to a HEX color (inverse of [`Hex::to_hsl`]).
    pub fn to_hex(&self) -> Hex {
        let h = self.h.rem_euclid(360.0);
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Hex {
            r: ((r + m) * 255.0).round() as u8,
            g: ((g + m) * 255.0).round() as u8,
            b: ((b + m) * 255.0).round() as u8,
        }
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}% {}%",
            self.h.round() as i64,
            self.s.round() as i64,
            self.l.round() as i64
        )
    }
}

/// Returns true iff `s` matches `^#[0-9A-Fa-f]{6}$`.
pub fn is_valid_hex(s: &str) -> bool {
    Hex::parse(s).is_ok()
}

/// Convert a HEX string to HSL, validating first.
pub fn hex_to_hsl(s: &str) -> Result<Hsl, InvalidColorError> {
    Ok(Hex::parse(s)?.to_hsl())
}

/// Convert HSL components to a canonical HEX string.
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> Hex {
    Hsl::new(h, s, l).to_hex()
}

/// WCAG contrast ratio between two colors, in `[1, 21]`.
///
/// The ratio is symmetric: the lighter luminance always goes in the
/// numerator.
pub fn contrast_ratio(a: &Hex, b: &Hex) -> f64 {
    let la = a.relative_luminance();
    let lb = b.relative_luminance();
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Whether the pair meets WCAG AA for normal text.
pub fn meets_wcag_aa(a: &Hex, b: &Hex) -> bool {
    contrast_ratio(a, b) >= WCAG_AA_NORMAL_TEXT
}

/// Whether the pair meets WCAG AAA for normal text.
pub fn meets_wcag_aaa(a: &Hex, b: &Hex) -> bool {
    contrast_ratio(a, b) >= WCAG_AAA_NORMAL_TEXT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strict() {
        assert!(Hex::parse("#ff0080").is_ok());
        assert!(Hex::parse("#FF0080").is_ok());
        assert_eq!(
            Hex::parse("ff0080"),
            Err(InvalidColorError::MissingHash("ff0080".to_string()))
        );
        assert_eq!(
            Hex::parse("#f08"),
            Err(InvalidColorError::WrongLength("#f08".to_string()))
        );
        assert_eq!(
            Hex::parse("#ff008g"),
            Err(InvalidColorError::NotHex("#ff008g".to_string()))
        );
        assert!(Hex::parse("#ff00801").is_err());
        assert!(Hex::parse("").is_err());
        assert!(Hex::parse("#").is_err());
    }

    #[test]
    fn test_display_canonical_lowercase() {
        let c = Hex::parse("#FF0080").unwrap();
        assert_eq!(c.to_string(), "#ff0080");
    }

    #[test]
    fn test_hex_to_hsl_known_values() {
        assert_eq!(hex_to_hsl("#ffffff").unwrap().to_string(), "0 0% 100%");
        assert_eq!(hex_to_hsl("#000000").unwrap().to_string(), "0 0% 0%");
        assert_eq!(hex_to_hsl("#ff0000").unwrap().to_string(), "0 100% 50%");
        assert_eq!(hex_to_hsl("#00ff00").unwrap().to_string(), "120 100% 50%");
        assert_eq!(hex_to_hsl("#0000ff").unwrap().to_string(), "240 100% 50%");
        assert_eq!(hex_to_hsl("#7c3aed").unwrap().to_string(), "262 83% 58%");
    }

    #[test]
    fn test_hsl_to_hex_primaries() {
        assert_eq!(hsl_to_hex(0.0, 100.0, 50.0).to_string(), "#ff0000");
        assert_eq!(hsl_to_hex(120.0, 100.0, 50.0).to_string(), "#00ff00");
        assert_eq!(hsl_to_hex(240.0, 100.0, 50.0).to_string(), "#0000ff");
        assert_eq!(hsl_to_hex(0.0, 0.0, 100.0).to_string(), "#ffffff");
        assert_eq!(hsl_to_hex(360.0, 100.0, 50.0).to_string(), "#ff0000");
    }

    #[test]
    fn test_contrast_identity_is_one() {
        for hex in ["#000000", "#ffffff", "#7c3aed", "#ef4444"] {
            let c = Hex::parse(hex).unwrap();
            assert!((contrast_ratio(&c, &c) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_contrast_black_on_white_is_21() {
        let black = Hex::new(0, 0, 0);
        let white = Hex::new(255, 255, 255);
        assert!((contrast_ratio(&black, &white) - 21.0).abs() < 1e-9);
        // Symmetric in argument order.
        assert!((contrast_ratio(&white, &black) - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_wcag_thresholds() {
        let white = Hex::new(255, 255, 255);
        let near_black = Hex::parse("#09090b").unwrap();
        let light_gray = Hex::parse("#cccccc").unwrap();
        assert!(meets_wcag_aa(&white, &near_black));
        assert!(meets_wcag_aaa(&white, &near_black));
        assert!(!meets_wcag_aa(&white, &light_gray));
    }

    #[test]
    fn test_serde_round_trip() {
        let c: Hex = serde_json::from_str("\"#7c3aed\"").expect("parse hex");
        assert_eq!(c, Hex::parse("#7c3aed").unwrap());
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#7c3aed\"");
    }

    #[test]
    fn test_serde_rejects_malformed() {
        assert!(serde_json::from_str::<Hex>("\"7c3aed\"").is_err());
        assert!(serde_json::from_str::<Hex>("\"#7c3\"").is_err());
        assert!(serde_json::from_str::<Hex>("\"#zzzzzz\"").is_err());
        assert!(serde_json::from_str::<Hex>("42").is_err());
    }
}
