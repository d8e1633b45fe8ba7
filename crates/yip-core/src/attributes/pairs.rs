use super::lexer::{number_list, split_list};
use crate::errors::AttributeError;
use crate::types::{BoolPair, FloatPair};

/// Parse a single boolean (`true`/`false`, `yes`/`no`, `1`/`0`).
pub fn parse_bool(name: &str, value: &str) -> Result<bool, AttributeError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(AttributeError::invalid(name, value, "a boolean")),
    }
}

/// Parse `value` (applies everywhere) or `value,tablet`.
pub fn parse_bool_pair(name: &str, value: &str) -> Result<BoolPair, AttributeError> {
    match split_list(value).as_slice() {
        [single] => Ok(BoolPair {
            value: parse_bool(name, single)?,
            tablet: None,
        }),
        [phone, tablet] => Ok(BoolPair {
            value: parse_bool(name, phone)?,
            tablet: Some(parse_bool(name, tablet)?),
        }),
        _ => Err(AttributeError::invalid(
            name,
            value,
            "a boolean or a 'phone,tablet' boolean pair",
        )),
    }
}

/// Parse `a,b` (landscape equals portrait) or `a,b,c,d` (portrait then
/// landscape).
pub fn parse_float_pair(name: &str, value: &str) -> Result<FloatPair, AttributeError> {
    match number_list(value).as_deref() {
        Some(&[a, b]) => Ok(FloatPair::uniform(a, b)),
        Some(&[a, b, c, d]) => Ok(FloatPair {
            portrait: (a, b),
            landscape: (c, d),
        }),
        _ => Err(AttributeError::invalid(
            name,
            value,
            "two numbers, or four numbers for portrait and landscape",
        )),
    }
}
