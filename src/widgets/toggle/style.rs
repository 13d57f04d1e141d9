//! Style configuration for [`RippleToggle`](super::RippleToggle), including
//! resolution from string attributes.
//!
//! # Example
//! ```
//! use ripple_toggle::widgets::RippleStyle;
//!
//! let style = RippleStyle::from_attrs([
//!     ("ripple_color", "#FFE91E63"),
//!     ("radius", "12dp"),
//!     ("shadow_space", "not-a-number"), // logged, default kept
//! ]);
//! assert_eq!(style.corner_radius, 12.0);
//! assert_eq!(style.shadow_space, 20.0);
//! ```

use crate::error::{Error, Result};
use crate::widgets::Color;

/// Default ripple fill
pub const DEFAULT_RIPPLE_COLOR: Color = Color::from_argb_hex(0xFF2889C3);
/// Default corner rounding radius
pub const DEFAULT_CORNER_RADIUS: f32 = 20.0;
/// Default outer margin reserved for the shadow
pub const DEFAULT_SHADOW_SPACE: f32 = 20.0;

/// Appearance of a ripple toggle, fixed once the widget is built
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleStyle {
    /// Fill color of the ripple
    pub ripple_color: Color,
    /// Outer margin reserved for the drop shadow
    pub shadow_space: f32,
    /// Drop shadow tint
    pub shadow_color: Color,
    /// Base fill color
    pub background: Color,
    /// Corner rounding radius
    pub corner_radius: f32,
}

impl Default for RippleStyle {
    fn default() -> Self {
        Self {
            ripple_color: DEFAULT_RIPPLE_COLOR,
            shadow_space: DEFAULT_SHADOW_SPACE,
            shadow_color: Color::GRAY,
            background: Color::WHITE,
            corner_radius: DEFAULT_CORNER_RADIUS,
        }
    }
}

impl RippleStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a style from `(name, value)` attribute pairs.
    ///
    /// Unknown names and malformed values are logged and leave the default
    /// in place.
    pub fn from_attrs<I, K, V>(attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut style = Self::default();
        for (name, value) in attrs {
            if let Err(err) = style.apply_attr(name.as_ref(), value.as_ref()) {
                log::warn!("ignoring ripple style attribute: {}", err);
            }
        }
        style
    }

    /// Like [`from_attrs`](Self::from_attrs) but fails on the first bad attribute.
    pub fn try_from_attrs<I, K, V>(attrs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut style = Self::default();
        for (name, value) in attrs {
            style.apply_attr(name.as_ref(), value.as_ref())?;
        }
        Ok(style)
    }

    /// Apply a single attribute. The style is unchanged on error.
    pub fn apply_attr(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "ripple_color" | "rippleColor" => self.ripple_color = parse_color(name, value)?,
            "shadow_space" | "shadowSpace" => self.shadow_space = parse_dimension(name, value)?,
            "shadow_color" | "shadowColor" => self.shadow_color = parse_color(name, value)?,
            "def_bg" | "defBg" | "default_background" | "defaultBackground" => {
                self.background = parse_color(name, value)?
            }
            "radius" => self.corner_radius = parse_dimension(name, value)?,
            _ => return Err(Error::UnknownAttribute(name.to_string())),
        }
        Ok(())
    }
}

/// Parse `#RGB`, `#ARGB`, `#RRGGBB` or `#AARRGGBB`.
pub fn parse_color(attr: &str, value: &str) -> Result<Color> {
    let invalid = || Error::InvalidColor {
        attr: attr.to_string(),
        value: value.to_string(),
    };

    let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let raw = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;

    let argb = match hex.len() {
        3 => 0xFF00_0000 | expand_nibbles(raw, 3),
        4 => expand_nibbles(raw, 4),
        6 => 0xFF00_0000 | raw,
        8 => raw,
        _ => return Err(invalid()),
    };
    Ok(Color::from_argb_hex(argb))
}

/// Duplicate each 4-bit digit, so `0xF80` becomes `0xFF8800`.
fn expand_nibbles(raw: u32, digits: u32) -> u32 {
    (0..digits).fold(0, |acc, i| {
        let nibble = (raw >> ((digits - 1 - i) * 4)) & 0xF;
        (acc << 8) | (nibble << 4) | nibble
    })
}

/// Parse a non-negative dimension: a bare number or one suffixed with
/// `px`, `dp`, `dip` or `sp`. Density-independent units map 1:1 to pixels.
pub fn parse_dimension(attr: &str, value: &str) -> Result<f32> {
    let invalid = || Error::InvalidDimension {
        attr: attr.to_string(),
        value: value.to_string(),
    };

    let trimmed = value.trim();
    let number = ["dip", "dp", "px", "sp"]
        .iter()
        .find_map(|unit| trimmed.strip_suffix(unit))
        .unwrap_or(trimmed)
        .trim();

    let parsed: f32 = number.parse().map_err(|_| invalid())?;
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(invalid());
    }
    Ok(parsed)
}
