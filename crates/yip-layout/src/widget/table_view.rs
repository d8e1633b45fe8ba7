use yip_core::ErrorKind;

use super::{WidgetBase, WidgetType};
use crate::layout::LayoutId;
use crate::xml::XmlAttribute;

/// A scrolling list whose rows are instances of a cell sub-layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableView {
    /// The `cell` sub-layout, registered as a child of the owning layout.
    pub cell: Option<LayoutId>,
}

impl WidgetType for TableView {
    fn parse_attribute(&mut self, base: &mut WidgetBase, attr: &XmlAttribute) -> Result<bool, ErrorKind> {
        base.parse_attribute(attr)
    }
}
