use yip_core::{AttributeError, ErrorKind};

use super::{TextProps, WidgetBase, WidgetType};
use crate::xml::XmlAttribute;

/// Static text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Label {
    pub text: TextProps,
    /// Maximum number of lines; 0 means unlimited.
    pub lines: Option<u32>,
}

impl WidgetType for Label {
    fn parse_attribute(&mut self, base: &mut WidgetBase, attr: &XmlAttribute) -> Result<bool, ErrorKind> {
        match attr.name.as_str() {
            "lines" => {
                let lines = attr
                    .value
                    .trim()
                    .parse()
                    .map_err(|_| AttributeError::invalid(&attr.name, &attr.value, "a line count"))?;
                self.lines = Some(lines);
                Ok(true)
            }
            _ => self.text.parse_attribute(base, attr),
        }
    }

    fn after_parse_attributes(&self, base: &WidgetBase) -> Result<(), ErrorKind> {
        self.text.after_parse_attributes(base)
    }
}
