use crate::errors::AttributeError;
use crate::types::Color;

/// Parse a color: `#RGB`, `#RRGGBB`, `#RRGGBBAA` or a color name.
pub fn parse_color(name: &str, value: &str) -> Result<Color, AttributeError> {
    let value = value.trim();
    let color = if value.starts_with('#') {
        Color::from_hex(value)
    } else {
        Color::from_name(value)
    };
    color.ok_or_else(|| AttributeError::invalid(name, value, "a color ('#RRGGBB' or a color name)"))
}
