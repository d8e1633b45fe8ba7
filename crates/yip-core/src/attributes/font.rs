use super::lexer::{number_list, split_list};
use crate::errors::AttributeError;
use crate::types::Font;

const EXPECTED: &str = "a font ('size' or 'family,size')";

/// Parse a font: `size` for the system font, or `family,size`.
///
/// The family `system` is the same as omitting it.
pub fn parse_font(name: &str, value: &str) -> Result<Font, AttributeError> {
    let parts = split_list(value);
    let (family, size) = match parts.as_slice() {
        [size] => (None, *size),
        [family, size] if !family.is_empty() => {
            let family = (!family.eq_ignore_ascii_case("system")).then(|| family.to_string());
            (family, *size)
        }
        _ => return Err(AttributeError::invalid(name, value, EXPECTED)),
    };

    match number_list(size).as_deref() {
        Some(&[size]) if size > 0.0 => Ok(Font { family, size }),
        _ => Err(AttributeError::invalid(name, value, EXPECTED)),
    }
}
