//! RGBA color values with CSS-style hex parsing.

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// An RGBA color with all components in `[0, 1]`.
///
/// Validated at construction; a `Color` value is always well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component.
    pub red: f64,
    /// Green component.
    pub green: f64,
    /// Blue component.
    pub blue: f64,
    /// Alpha component (1.0 = opaque).
    pub alpha: f64,
}

impl Color {
    /// Create a color from components in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidColor`] if any component is outside `[0, 1]`.
    pub fn new(red: f64, green: f64, blue: f64, alpha: f64) -> CoreResult<Self> {
        for (name, v) in [
            ("red", red),
            ("green", green),
            ("blue", blue),
            ("alpha", alpha),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(CoreError::InvalidColor(format!(
                    "invalid {name} component: {v}"
                )));
            }
        }

        Ok(Self {
            red,
            green,
            blue,
            alpha,
        })
    }

    /// Create an opaque color from byte components.
    #[must_use]
    pub fn from_rgb_bytes(r: u8, g: u8, b: u8) -> Self {
        Self {
            red: f64::from(r) / 255.0,
            green: f64::from(g) / 255.0,
            blue: f64::from(b) / 255.0,
            alpha: 1.0,
        }
    }

    /// Parse a CSS-style hex color: `#rgb`, `#rrggbb` or `#rrggbbaa`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidColor`] if the string is malformed.
    pub fn parse_hex(s: &str) -> CoreResult<Self> {
        let invalid = || CoreError::InvalidColor(format!("invalid color hex string: '{s}'"));

        let digits = s.strip_prefix('#').ok_or_else(invalid)?;

        let expanded: String = if digits.len() == 3 {
            digits.chars().flat_map(|c| [c, c]).collect()
        } else {
            digits.to_string()
        };

        let byte = |range: std::ops::Range<usize>| -> CoreResult<u8> {
            u8::from_str_radix(expanded.get(range).ok_or_else(invalid)?, 16)
                .map_err(|_| invalid())
        };

        match expanded.len() {
            6 => Ok(Self::from_rgb_bytes(byte(0..2)?, byte(2..4)?, byte(4..6)?)),
            8 => Self::from_rgb_bytes(byte(0..2)?, byte(2..4)?, byte(4..6)?)
                .with_alpha(f64::from(byte(6..8)?) / 255.0),
            _ => Err(invalid()),
        }
    }

    /// Lighten each RGB component by the given ratio, saturating at 1.0.
    #[must_use]
    pub fn lighten(&self, ratio: f64) -> Self {
        Self {
            red: (self.red + self.red * ratio).min(1.0),
            green: (self.green + self.green * ratio).min(1.0),
            blue: (self.blue + self.blue * ratio).min(1.0),
            alpha: self.alpha,
        }
    }

    /// Darken each RGB component by the given ratio, saturating at 0.0.
    #[must_use]
    pub fn darken(&self, ratio: f64) -> Self {
        Self {
            red: (self.red - self.red * ratio).max(0.0),
            green: (self.green - self.green * ratio).max(0.0),
            blue: (self.blue - self.blue * ratio).max(0.0),
            alpha: self.alpha,
        }
    }

    /// Replace the alpha component.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidColor`] if `alpha` is outside `[0, 1]`.
    pub fn with_alpha(&self, alpha: f64) -> CoreResult<Self> {
        Self::new(self.red, self.green, self.blue, alpha)
    }

    /// Render as a CSS `rgba(...)` expression.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.red * 255.0,
            self.green * 255.0,
            self.blue * 255.0,
            self.alpha
        )
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_out_of_range_components() {
        assert!(Color::new(1.5, 0.0, 0.0, 1.0).is_err());
        assert!(Color::new(0.0, -0.1, 0.0, 1.0).is_err());
        assert!(Color::new(0.0, 0.0, 0.0, 2.0).is_err());
        assert!(Color::new(0.2, 0.4, 0.6, 0.8).is_ok());
    }

    #[test]
    fn test_parse_hex_six_digits() {
        let c = Color::parse_hex("#ff8000").expect("valid hex");
        assert!((c.red - 1.0).abs() < 1e-9);
        assert!((c.green - 128.0 / 255.0).abs() < 1e-9);
        assert!((c.blue - 0.0).abs() < 1e-9);
        assert!((c.alpha - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_hex_three_digits_expands() {
        let c = Color::parse_hex("#fff").expect("valid hex");
        assert_eq!(c, Color::from_rgb_bytes(255, 255, 255));
    }

    #[test]
    fn test_parse_hex_eight_digits_carries_alpha() {
        let c = Color::parse_hex("#0069dba0").expect("valid hex");
        assert!((c.alpha - 160.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_hex_rejects_malformed() {
        assert!(Color::parse_hex("0069db").is_err());
        assert!(Color::parse_hex("#12345").is_err());
        assert!(Color::parse_hex("#gghhii").is_err());
        assert!(Color::parse_hex("#").is_err());
    }

    #[test]
    fn test_lighten_darken_saturate() {
        let c = Color::from_rgb_bytes(200, 200, 200);
        let lighter = c.lighten(1.0);
        assert!((lighter.red - 1.0).abs() < 1e-9);
        let darker = c.darken(1.0);
        assert!((darker.red - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_to_css() {
        let c = Color::from_rgb_bytes(255, 0, 0);
        assert_eq!(c.to_css(), "rgba(255, 0, 0, 1)");
    }
}
