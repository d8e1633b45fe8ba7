use super::lexer::split_list;
use crate::errors::AttributeError;
use crate::types::{ScaleMode, ScalePair};

const EXPECTED: &str = "a scale mode (default, none, horizontal, vertical, average, min or max)";

/// Parse a single-axis scale mode.
pub fn parse_scale_mode(name: &str, value: &str) -> Result<ScaleMode, AttributeError> {
    let mode = match value.trim().to_ascii_lowercase().as_str() {
        "default" => ScaleMode::Default,
        "none" | "fixed" => ScaleMode::None,
        "h" | "horizontal" => ScaleMode::Horizontal,
        "v" | "vertical" => ScaleMode::Vertical,
        "avg" | "average" => ScaleMode::Average,
        "min" => ScaleMode::Minimum,
        "max" => ScaleMode::Maximum,
        _ => return Err(AttributeError::invalid(name, value, EXPECTED)),
    };
    Ok(mode)
}

/// Parse `mode` (both orientations) or `portrait,landscape`.
pub fn parse_scale_pair(name: &str, value: &str) -> Result<ScalePair, AttributeError> {
    match split_list(value).as_slice() {
        [mode] => Ok(ScalePair::uniform(parse_scale_mode(name, mode)?)),
        [portrait, landscape] => Ok(ScalePair {
            portrait: parse_scale_mode(name, portrait)?,
            landscape: parse_scale_mode(name, landscape)?,
        }),
        _ => Err(AttributeError::invalid(name, value, EXPECTED)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scale_mode_aliases() {
        assert_eq!(parse_scale_mode("s", "fixed"), Ok(ScaleMode::None));
        assert_eq!(parse_scale_mode("s", "H"), Ok(ScaleMode::Horizontal));
        assert_eq!(parse_scale_mode("s", "avg"), Ok(ScaleMode::Average));
        assert!(parse_scale_mode("s", "stretch").is_err());
    }

    #[test]
    fn test_parse_scale_pair() {
        assert_eq!(
            parse_scale_pair("fontScale", "min"),
            Ok(ScalePair::uniform(ScaleMode::Minimum))
        );
        assert_eq!(
            parse_scale_pair("fontScale", "h,v"),
            Ok(ScalePair {
                portrait: ScaleMode::Horizontal,
                landscape: ScaleMode::Vertical,
            })
        );
        assert!(parse_scale_pair("fontScale", "h,v,min").is_err());
    }
}
