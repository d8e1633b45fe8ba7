//! Recursive descent from the XML element tree into layouts and widgets.

use yip_core::{
    parse_bool_pair, parse_color, parse_float_pair, AttributeError, ErrorKind, ImageBuilder, LayoutError,
};

use crate::layout::{ImageResource, Layout, LayoutId, LocalizedString};
use crate::widget::{is_identifier, Widget, WidgetId, WidgetKind};
use crate::xml::{XmlAttribute, XmlElement};

const ROOT_TAG: &str = "layout";
const CELL_TAG: &str = "cell";

/// Builds the layout arena for one document.
pub(crate) struct Builder<'a> {
    file: &'a str,
    layouts: Vec<Layout>,
}

impl<'a> Builder<'a> {
    pub fn new(file: &'a str) -> Self {
        Self {
            file,
            layouts: Vec::new(),
        }
    }

    /// Consume the builder, naming cell layouts after their table views.
    pub fn finish(mut self) -> Vec<Layout> {
        // Parents precede their children in the arena.
        for index in 0..self.layouts.len() {
            let (Some(parent), Some(table)) = (self.layouts[index].parent(), self.layouts[index].table()) else {
                continue;
            };
            let owner = &self.layouts[parent.0];
            let name = format!("{}_{}_cell", owner.name(), owner.widget(table).id());
            self.layouts[index].set_name(name);
        }
        self.layouts
    }

    fn error(&self, line: u32, kind: impl Into<ErrorKind>) -> LayoutError {
        LayoutError::new(self.file, line, kind)
    }

    fn at(&self, line: u32) -> impl Fn(ErrorKind) -> LayoutError + '_ {
        move |kind| self.error(line, kind)
    }

    fn push_layout(&mut self, layout: Layout) -> LayoutId {
        self.layouts.push(layout);
        LayoutId(self.layouts.len() - 1)
    }

    /// Parse the document root: `size`, `portrait`, `landscape` and
    /// `bgcolor`, then the widget list.
    pub fn parse_top_level(&mut self, root: &XmlElement, name: &str) -> Result<LayoutId, LayoutError> {
        if root.name != ROOT_TAG {
            return Err(self.error(
                root.line,
                ErrorKind::UnexpectedRoot {
                    expected: ROOT_TAG.to_string(),
                    found: root.name.clone(),
                },
            ));
        }

        let mut layout = Layout::new(name, None, root.line);
        for attr in &root.attributes {
            let (key, value) = (attr.name.as_str(), attr.value.as_str());
            let result = match key {
                "size" => parse_float_pair(key, value).map(|size| layout.size = size),
                "portrait" => parse_bool_pair(key, value).map(|flag| layout.orientations.portrait = flag),
                "landscape" => parse_bool_pair(key, value).map(|flag| layout.orientations.landscape = flag),
                "bgcolor" => parse_color(key, value).map(|color| layout.background = Some(color)),
                _ => return Err(self.error(attr.line, ErrorKind::UnexpectedAttribute(key.to_string()))),
            };
            result.map_err(|e| self.error(attr.line, e))?;
        }
        layout.orientations.validate().map_err(self.at(root.line))?;

        let id = self.push_layout(layout);
        self.parse_widget_list(id, &root.children, None)?;
        self.layouts[id.0].allocate_ids();
        log::debug!(
            "layout '{}': {} widgets, {} strings, {} images",
            name,
            self.layouts[id.0].widget_count(),
            self.layouts[id.0].strings().len(),
            self.layouts[id.0].images().len()
        );
        Ok(id)
    }

    /// Parse a nested layout. Orientation is inherited from `parent`, size
    /// must be given explicitly.
    pub fn parse_sub_layout(&mut self, element: &XmlElement, parent: LayoutId) -> Result<LayoutId, LayoutError> {
        let mut layout = Layout::new(element.name.clone(), Some(parent), element.line);
        layout.orientations = self.layouts[parent.0].orientations;

        let mut has_size = false;
        for attr in &element.attributes {
            let (key, value) = (attr.name.as_str(), attr.value.as_str());
            let result = match key {
                "size" => parse_float_pair(key, value).map(|size| {
                    layout.size = size;
                    has_size = true;
                }),
                "bgcolor" => parse_color(key, value).map(|color| layout.background = Some(color)),
                _ => return Err(self.error(attr.line, ErrorKind::UnexpectedAttribute(key.to_string()))),
            };
            result.map_err(|e| self.error(attr.line, e))?;
        }
        if !has_size {
            return Err(self.error(
                element.line,
                ErrorKind::MissingAttribute {
                    element: element.name.clone(),
                    attribute: "size".to_string(),
                },
            ));
        }

        let id = self.push_layout(layout);
        self.parse_widget_list(id, &element.children, None)?;
        self.layouts[id.0].allocate_ids();
        self.layouts[parent.0].add_child(id);
        Ok(id)
    }

    /// Parse the children of a layout (`group` is `None`) or of a group.
    /// Declarations are only legal at layout level.
    fn parse_widget_list(
        &mut self,
        layout: LayoutId,
        elements: &[XmlElement],
        group: Option<WidgetId>,
    ) -> Result<(), LayoutError> {
        for element in elements {
            let result = match element.name.as_str() {
                "string" | "rawImage" | "import" if group.is_some() => Err(self.error(
                    element.line,
                    ErrorKind::MisplacedElement {
                        name: element.name.clone(),
                        context: "inside a group",
                    },
                )),
                "string" => self.parse_string(layout, element),
                "rawImage" => self.parse_raw_image(layout, element),
                "import" => self.parse_import(layout, element),
                _ => self.parse_widget(layout, element, group).map(|_| ()),
            };
            result.map_err(|e| e.within(element.describe()))?;
        }
        Ok(())
    }

    fn parse_widget(
        &mut self,
        layout: LayoutId,
        element: &XmlElement,
        group: Option<WidgetId>,
    ) -> Result<WidgetId, LayoutError> {
        let kind = WidgetKind::for_tag(&element.name)
            .ok_or_else(|| self.error(element.line, ErrorKind::UnknownElement(element.name.clone())))?;
        let mut widget = Widget::new(kind, layout, group, element.line);

        for attr in &element.attributes {
            let handled = widget.parse_attribute(attr).map_err(self.at(attr.line))?;
            if !handled {
                return Err(self.error(attr.line, ErrorKind::UnexpectedAttribute(attr.name.clone())));
            }
        }
        widget.after_parse_attributes().map_err(self.at(element.line))?;

        let (tag, id_line) = (widget.tag(), widget.base.id_line);
        let id = self.layouts[layout.0].add_widget(widget).map_err(self.at(id_line))?;
        log::trace!("parsed <{}> at line {}", tag, element.line);

        match tag {
            "group" => self.parse_widget_list(layout, &element.children, Some(id))?,
            "tableView" => self.parse_table_cell(layout, id, element)?,
            _ => {
                if let Some(child) = element.children.first() {
                    return Err(self.error(
                        child.line,
                        ErrorKind::MisplacedElement {
                            name: child.name.clone(),
                            context: "inside a widget that is not a group",
                        },
                    ));
                }
            }
        }
        Ok(id)
    }

    /// A table view takes at most one `<cell>` child, parsed as a sub-layout.
    fn parse_table_cell(&mut self, layout: LayoutId, table: WidgetId, element: &XmlElement) -> Result<(), LayoutError> {
        let mut cells = element.children.iter();
        let Some(cell) = cells.next() else {
            return Ok(());
        };
        if cell.name != CELL_TAG {
            return Err(self.error(
                cell.line,
                ErrorKind::MisplacedElement {
                    name: cell.name.clone(),
                    context: "inside a table view",
                },
            ));
        }
        if let Some(extra) = cells.next() {
            return Err(self.error(
                extra.line,
                ErrorKind::MisplacedElement {
                    name: extra.name.clone(),
                    context: "after the cell of a table view",
                },
            ));
        }

        let sub = self
            .parse_sub_layout(cell, layout)
            .map_err(|e| e.within(cell.describe()))?;
        self.layouts[sub.0].set_table(table);
        if let WidgetKind::TableView(view) = &mut self.layouts[layout.0].widget_mut(table).kind {
            view.cell = Some(sub);
        }
        Ok(())
    }

    fn parse_string(&mut self, layout: LayoutId, element: &XmlElement) -> Result<(), LayoutError> {
        let mut id = None;
        let mut text = None;
        for attr in &element.attributes {
            match attr.name.as_str() {
                "id" => id = Some(self.declaration_id(attr)?),
                "text" => {
                    if attr.value.is_empty() {
                        return Err(self.error(attr.line, AttributeError::Empty { name: attr.name.clone() }));
                    }
                    text = Some(attr.value.clone());
                }
                _ => return Err(self.error(attr.line, ErrorKind::UnexpectedAttribute(attr.name.clone()))),
            }
        }
        let (id, id_line) = id.ok_or_else(|| self.missing(element, "id"))?;
        let text = text.ok_or_else(|| self.missing(element, "text"))?;

        self.layouts[layout.0]
            .add_string(
                id,
                LocalizedString {
                    text,
                    line: element.line,
                },
            )
            .map_err(self.at(id_line))
    }

    fn parse_raw_image(&mut self, layout: LayoutId, element: &XmlElement) -> Result<(), LayoutError> {
        let mut id = None;
        let mut builder = ImageBuilder::new();
        for attr in &element.attributes {
            if attr.name == "id" {
                id = Some(self.declaration_id(attr)?);
                continue;
            }
            let handled = builder
                .apply(&attr.name, &attr.value)
                .map_err(|e| self.error(attr.line, e))?;
            if !handled {
                return Err(self.error(attr.line, ErrorKind::UnexpectedAttribute(attr.name.clone())));
            }
        }
        let (id, id_line) = id.ok_or_else(|| self.missing(element, "id"))?;
        let image = builder.build().ok_or_else(|| self.missing(element, "file"))?;

        self.layouts[layout.0]
            .add_image(
                id,
                ImageResource {
                    image,
                    line: element.line,
                },
            )
            .map_err(self.at(id_line))
    }

    fn parse_import(&mut self, layout: LayoutId, element: &XmlElement) -> Result<(), LayoutError> {
        let mut file = None;
        for attr in &element.attributes {
            match attr.name.as_str() {
                "file" => {
                    let value = attr.value.trim();
                    if value.is_empty() {
                        return Err(self.error(attr.line, AttributeError::Empty { name: attr.name.clone() }));
                    }
                    file = Some(value.to_string());
                }
                _ => return Err(self.error(attr.line, ErrorKind::UnexpectedAttribute(attr.name.clone()))),
            }
        }
        let file = file.ok_or_else(|| self.missing(element, "file"))?;
        if !self.layouts[layout.0].add_import(file.clone()) {
            log::debug!("{}({}): '{}' is already imported", self.file, element.line, file);
        }
        Ok(())
    }

    /// Validate the `id` of a `string` or `rawImage`, keeping its line.
    fn declaration_id(&self, attr: &XmlAttribute) -> Result<(String, u32), LayoutError> {
        let id = attr.value.trim();
        if id.is_empty() {
            return Err(self.error(attr.line, AttributeError::Empty { name: attr.name.clone() }));
        }
        if !is_identifier(id) {
            return Err(self.error(attr.line, ErrorKind::InvalidIdentifier(id.to_string())));
        }
        Ok((id.to_string(), attr.line))
    }

    fn missing(&self, element: &XmlElement, attribute: &str) -> LayoutError {
        self.error(
            element.line,
            ErrorKind::MissingAttribute {
                element: element.name.clone(),
                attribute: attribute.to_string(),
            },
        )
    }
}
