use yip_core::{parse_bool, ErrorKind};

use super::{WidgetBase, WidgetId, WidgetType};
use crate::xml::XmlAttribute;

/// A container positioning its children relative to itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    pub children: Vec<WidgetId>,
    /// Clip children to the group bounds.
    pub clip: bool,
}

impl WidgetType for Group {
    fn parse_attribute(&mut self, base: &mut WidgetBase, attr: &XmlAttribute) -> Result<bool, ErrorKind> {
        match attr.name.as_str() {
            "clip" => {
                self.clip = parse_bool(&attr.name, &attr.value)?;
                Ok(true)
            }
            _ => base.parse_attribute(attr),
        }
    }
}
