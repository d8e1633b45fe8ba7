//! Value types produced by the attribute resolvers.

use std::ops::BitOr;

/// A color value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create from 8-bit RGBA values.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create from hex digits (e.g., "#FF5733", "F53" or "FF573380").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
                Some(Self::from_rgba8(nibble(0)?, nibble(1)?, nibble(2)?, 255))
            }
            6 => Some(Self::from_rgba8(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Some(Self::from_rgba8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Look up a named color.
    pub fn from_name(name: &str) -> Option<Self> {
        let color = match name.to_ascii_lowercase().as_str() {
            "white" => Self::WHITE,
            "black" => Self::BLACK,
            "red" => Self::rgb(1.0, 0.0, 0.0),
            "green" => Self::rgb(0.0, 1.0, 0.0),
            "blue" => Self::rgb(0.0, 0.0, 1.0),
            "yellow" => Self::rgb(1.0, 1.0, 0.0),
            "cyan" => Self::rgb(0.0, 1.0, 1.0),
            "magenta" => Self::rgb(1.0, 0.0, 1.0),
            "gray" | "grey" => Self::rgb(0.5, 0.5, 0.5),
            "transparent" | "clear" => Self::TRANSPARENT,
            _ => return None,
        };
        Some(color)
    }

    /// Convert to 8-bit RGBA tuple.
    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (channel(self.r), channel(self.g), channel(self.b), channel(self.a))
    }

    /// Pack into a 32-bit ARGB value.
    pub fn to_argb32(&self) -> u32 {
        let (r, g, b, a) = self.to_rgba8();
        u32::from_be_bytes([a, r, g, b])
    }

    // Common colors
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A font reference. `family: None` selects the platform system font.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Font {
    pub family: Option<String>,
    pub size: f32,
}

/// How a dimension adapts across device classes and orientations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScaleMode {
    /// Scale along the axis the value belongs to.
    #[default]
    Default,
    /// Keep the nominal value.
    None,
    /// Scale by the horizontal factor.
    Horizontal,
    /// Scale by the vertical factor.
    Vertical,
    /// Scale by the average of both factors.
    Average,
    /// Scale by the smaller factor.
    Minimum,
    /// Scale by the larger factor.
    Maximum,
}

/// Scale modes for portrait and landscape orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScalePair {
    pub portrait: ScaleMode,
    pub landscape: ScaleMode,
}

impl ScalePair {
    pub const fn uniform(mode: ScaleMode) -> Self {
        Self { portrait: mode, landscape: mode }
    }
}

/// A pair of floats (width/height or x/y) for portrait and landscape.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloatPair {
    pub portrait: (f32, f32),
    pub landscape: (f32, f32),
}

impl FloatPair {
    pub const fn uniform(a: f32, b: f32) -> Self {
        Self { portrait: (a, b), landscape: (a, b) }
    }
}

/// A boolean with an optional tablet-specific override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoolPair {
    pub value: bool,
    pub tablet: Option<bool>,
}

impl BoolPair {
    /// Value that applies on tablets.
    pub fn tablet_value(&self) -> bool {
        self.tablet.unwrap_or(self.value)
    }
}

/// Packed horizontal and vertical alignment.
///
/// The horizontal component occupies bits 0-1 and the vertical component
/// bits 4-5, so any horizontal primitive ORed with any vertical primitive
/// can be split back with [`Alignment::HORIZONTAL_MASK`] and
/// [`Alignment::VERTICAL_MASK`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alignment(pub u8);

impl Alignment {
    pub const UNSPECIFIED: Self = Self(0);
    pub const LEFT: Self = Self(0x01);
    pub const RIGHT: Self = Self(0x02);
    pub const HCENTER: Self = Self(0x03);
    pub const TOP: Self = Self(0x10);
    pub const BOTTOM: Self = Self(0x20);
    pub const VCENTER: Self = Self(0x30);

    pub const TOP_LEFT: Self = Self(Self::TOP.0 | Self::LEFT.0);
    pub const TOP_RIGHT: Self = Self(Self::TOP.0 | Self::RIGHT.0);
    pub const BOTTOM_LEFT: Self = Self(Self::BOTTOM.0 | Self::LEFT.0);
    pub const BOTTOM_RIGHT: Self = Self(Self::BOTTOM.0 | Self::RIGHT.0);
    pub const CENTER: Self = Self(Self::HCENTER.0 | Self::VCENTER.0);

    pub const HORIZONTAL_MASK: u8 = 0x03;
    pub const VERTICAL_MASK: u8 = 0x30;

    /// The horizontal component alone.
    pub const fn horizontal(self) -> Self {
        Self(self.0 & Self::HORIZONTAL_MASK)
    }

    /// The vertical component alone.
    pub const fn vertical(self) -> Self {
        Self(self.0 & Self::VERTICAL_MASK)
    }
}

impl BitOr for Alignment {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// An image file together with its per-axis scale modes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Image {
    pub file: String,
    pub width_scale: ScaleMode,
    pub height_scale: ScaleMode,
}

impl Image {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            width_scale: ScaleMode::Default,
            height_scale: ScaleMode::Default,
        }
    }

    /// Resource name derived from the file name: the file stem, lowercased,
    /// with every character outside `[a-z0-9_]` replaced by `_`.
    pub fn resource_name(&self) -> String {
        let file = self.file.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(&self.file);
        let stem = match file.rfind('.') {
            Some(dot) if dot > 0 => &file[..dot],
            _ => file,
        };
        stem.chars()
            .map(|c| match c.to_ascii_lowercase() {
                c @ ('a'..='z' | '0'..='9' | '_') => c,
                _ => '_',
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("#FF0000"), Some(Color::rgb(1.0, 0.0, 0.0)));
        assert_eq!(Color::from_hex("fff"), Some(Color::WHITE));
        assert_eq!(Color::from_hex("#00000000"), Some(Color::TRANSPARENT));
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#GG0000"), None);
    }

    #[test]
    fn test_color_to_argb32() {
        let color = Color::from_hex("#3B82F6").unwrap();
        assert_eq!(color.to_argb32(), 0xFF3B82F6);
    }

    #[test]
    fn test_bool_pair_tablet_fallback() {
        let pair = BoolPair { value: true, tablet: None };
        assert!(pair.tablet_value());
        let pair = BoolPair { value: true, tablet: Some(false) };
        assert!(!pair.tablet_value());
    }

    #[test]
    fn test_image_resource_name() {
        assert_eq!(Image::new("res/Button-Bg@2x.png").resource_name(), "button_bg_2x");
        assert_eq!(Image::new("icon").resource_name(), "icon");
    }
}
