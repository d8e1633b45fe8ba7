use crate::errors::AttributeError;
use crate::types::Alignment;

/// Parse an alignment name.
///
/// Names are matched case-insensitively with `-` and `_` ignored, so
/// `topLeft`, `top-left` and `TOP_LEFT` are the same value.
pub fn parse_alignment(name: &str, value: &str) -> Result<Alignment, AttributeError> {
    let normalized: String = value
        .trim()
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect();

    let alignment = match normalized.as_str() {
        "unspecified" | "default" => Alignment::UNSPECIFIED,
        "left" => Alignment::LEFT,
        "right" => Alignment::RIGHT,
        "hcenter" => Alignment::HCENTER,
        "top" => Alignment::TOP,
        "bottom" => Alignment::BOTTOM,
        "vcenter" => Alignment::VCENTER,
        "topleft" => Alignment::TOP_LEFT,
        "topright" => Alignment::TOP_RIGHT,
        "topcenter" => Alignment::TOP | Alignment::HCENTER,
        "bottomleft" => Alignment::BOTTOM_LEFT,
        "bottomright" => Alignment::BOTTOM_RIGHT,
        "bottomcenter" => Alignment::BOTTOM | Alignment::HCENTER,
        "centerleft" => Alignment::VCENTER | Alignment::LEFT,
        "centerright" => Alignment::VCENTER | Alignment::RIGHT,
        "center" => Alignment::CENTER,
        _ => return Err(AttributeError::invalid(name, value, "an alignment")),
    };
    Ok(alignment)
}
