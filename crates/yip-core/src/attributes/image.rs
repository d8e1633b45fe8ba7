use super::scale::parse_scale_mode;
use crate::errors::AttributeError;
use crate::types::{Image, ScaleMode};

/// Accumulates image attributes and rejects contradictory scale settings.
///
/// `scale` and `whscale` are two spellings of the same thing: they set both
/// axes at once. `wscale` and `hscale` set a single axis. Each axis can be
/// set at most once.
#[derive(Debug, Default)]
pub struct ImageBuilder {
    file: Option<String>,
    width_scale: Option<ScaleMode>,
    height_scale: Option<ScaleMode>,
}

impl ImageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one attribute. Returns `Ok(false)` if the name is not an image
    /// attribute.
    pub fn apply(&mut self, name: &str, value: &str) -> Result<bool, AttributeError> {
        match name {
            "file" => {
                if value.trim().is_empty() {
                    return Err(AttributeError::Empty { name: name.to_string() });
                }
                self.file = Some(value.trim().to_string());
            }
            "scale" | "whscale" => {
                let mode = parse_scale_mode(name, value)?;
                Self::set_axis(&mut self.width_scale, name, "width", mode)?;
                Self::set_axis(&mut self.height_scale, name, "height", mode)?;
            }
            "wscale" => {
                let mode = parse_scale_mode(name, value)?;
                Self::set_axis(&mut self.width_scale, name, "width", mode)?;
            }
            "hscale" => {
                let mode = parse_scale_mode(name, value)?;
                Self::set_axis(&mut self.height_scale, name, "height", mode)?;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn set_axis(
        slot: &mut Option<ScaleMode>,
        name: &str,
        axis: &'static str,
        mode: ScaleMode,
    ) -> Result<(), AttributeError> {
        if slot.is_some() {
            return Err(AttributeError::ContradictoryScale {
                name: name.to_string(),
                axis,
            });
        }
        *slot = Some(mode);
        Ok(())
    }

    /// Whether a `file` attribute was seen.
    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }

    /// Finish the image. Returns `None` if no file was given.
    pub fn build(self) -> Option<Image> {
        Some(Image {
            file: self.file?,
            width_scale: self.width_scale.unwrap_or_default(),
            height_scale: self.height_scale.unwrap_or_default(),
        })
    }
}
