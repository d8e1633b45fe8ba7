//! Layout containers and the compilation arena that owns them.
//!
//! A [`Compilation`] owns every [`Layout`] produced from one document: the
//! root at index 0 followed by its sub-layouts. Layouts own their widgets in
//! an arena indexed by [`WidgetId`]; parents are referred to by id only.

use indexmap::{IndexMap, IndexSet};
use yip_core::{BoolPair, Color, ErrorKind, FloatPair, Image};

use crate::widget::{Widget, WidgetId, WidgetKind};

/// Index of a layout inside its [`Compilation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayoutId(pub usize);

impl LayoutId {
    pub const ROOT: Self = Self(0);
}

/// Orientation flags, each with an optional tablet override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Orientations {
    pub portrait: BoolPair,
    pub landscape: BoolPair,
}

impl Orientations {
    /// Whether either flag carries a tablet-specific value.
    pub fn has_tablet_override(&self) -> bool {
        self.portrait.tablet.is_some() || self.landscape.tablet.is_some()
    }

    /// At least one orientation must be enabled, for phones and, when
    /// overridden, for tablets.
    pub fn validate(&self) -> Result<(), ErrorKind> {
        if !self.portrait.value && !self.landscape.value {
            return Err(ErrorKind::NoOrientation);
        }
        if self.has_tablet_override() && !self.portrait.tablet_value() && !self.landscape.tablet_value() {
            return Err(ErrorKind::NoTabletOrientation);
        }
        Ok(())
    }
}

/// A `<string>` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalizedString {
    pub text: String,
    pub line: u32,
}

/// A `<rawImage>` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageResource {
    pub image: Image,
    pub line: u32,
}

/// One screen or cell template.
#[derive(Debug, Clone)]
pub struct Layout {
    name: String,
    /// Declaring layout, for sub-layouts.
    parent: Option<LayoutId>,
    /// Table view in the parent that declared this layout as its cell.
    table: Option<WidgetId>,
    line: u32,
    pub size: FloatPair,
    pub orientations: Orientations,
    pub background: Option<Color>,
    next_unique_id: usize,
    widgets: Vec<Widget>,
    top_level: Vec<WidgetId>,
    widget_ids: IndexMap<String, WidgetId>,
    strings: IndexMap<String, LocalizedString>,
    images: IndexMap<String, ImageResource>,
    imports: IndexSet<String>,
    children: Vec<LayoutId>,
}

impl Layout {
    pub(crate) fn new(name: impl Into<String>, parent: Option<LayoutId>, line: u32) -> Self {
        Self {
            name: name.into(),
            parent,
            table: None,
            line,
            size: FloatPair::default(),
            orientations: Orientations::default(),
            background: None,
            next_unique_id: 1,
            widgets: Vec::new(),
            top_level: Vec::new(),
            widget_ids: IndexMap::new(),
            strings: IndexMap::new(),
            images: IndexMap::new(),
            imports: IndexSet::new(),
            children: Vec::new(),
        }
    }

    /// Identifier used for generated class and resource names.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<LayoutId> {
        self.parent
    }

    /// The table view owning this layout as its cell, in the parent layout.
    pub fn table(&self) -> Option<WidgetId> {
        self.table
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn widget(&self, id: WidgetId) -> &Widget {
        &self.widgets[id.0]
    }

    /// All widgets with their ids, in document order (pre-order).
    pub fn widgets(&self) -> impl Iterator<Item = (WidgetId, &Widget)> {
        self.widgets.iter().enumerate().map(|(i, w)| (WidgetId(i), w))
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    /// Widgets declared directly under the layout element.
    pub fn top_level(&self) -> &[WidgetId] {
        &self.top_level
    }

    pub fn widget_for_id(&self, id: &str) -> Option<&Widget> {
        self.widget_id(id).map(|id| self.widget(id))
    }

    pub fn widget_id(&self, id: &str) -> Option<WidgetId> {
        self.widget_ids.get(id).copied()
    }

    pub fn strings(&self) -> &IndexMap<String, LocalizedString> {
        &self.strings
    }

    pub fn images(&self) -> &IndexMap<String, ImageResource> {
        &self.images
    }

    pub fn imports(&self) -> &IndexSet<String> {
        &self.imports
    }

    /// Sub-layouts declared in this layout, in declaration order.
    pub fn children(&self) -> &[LayoutId] {
        &self.children
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_table(&mut self, table: WidgetId) {
        self.table = Some(table);
    }

    pub(crate) fn widget_mut(&mut self, id: WidgetId) -> &mut Widget {
        &mut self.widgets[id.0]
    }

    /// Append a widget and link it to its parent group, or to the top level.
    /// An explicit id must be unique in the layout.
    pub(crate) fn add_widget(&mut self, widget: Widget) -> Result<WidgetId, ErrorKind> {
        let id = WidgetId(self.widgets.len());
        if widget.base.explicit_id {
            if self.widget_ids.contains_key(widget.id()) {
                return Err(ErrorKind::DuplicateWidgetId(widget.id().to_string()));
            }
            self.widget_ids.insert(widget.id().to_string(), id);
        }
        match widget.base.parent {
            Some(parent) => {
                if let WidgetKind::Group(group) = &mut self.widgets[parent.0].kind {
                    group.children.push(id);
                }
            }
            None => self.top_level.push(id),
        }
        self.widgets.push(widget);
        Ok(id)
    }

    pub(crate) fn add_string(&mut self, id: String, string: LocalizedString) -> Result<(), ErrorKind> {
        if self.strings.contains_key(&id) {
            return Err(ErrorKind::DuplicateStringId(id));
        }
        self.strings.insert(id, string);
        Ok(())
    }

    pub(crate) fn add_image(&mut self, id: String, image: ImageResource) -> Result<(), ErrorKind> {
        if self.images.contains_key(&id) {
            return Err(ErrorKind::DuplicateImageId(id));
        }
        self.images.insert(id, image);
        Ok(())
    }

    /// Returns `false` if the file was already imported.
    pub(crate) fn add_import(&mut self, file: String) -> bool {
        self.imports.insert(file)
    }

    pub(crate) fn add_child(&mut self, child: LayoutId) {
        self.children.push(child);
    }

    /// Give every widget without an explicit id a `widget<N>` id, in
    /// document order, skipping names already taken.
    pub(crate) fn allocate_ids(&mut self) {
        for index in 0..self.widgets.len() {
            if !self.widgets[index].base.id.is_empty() {
                continue;
            }
            let id = loop {
                let candidate = format!("widget{}", self.next_unique_id);
                self.next_unique_id += 1;
                if !self.widget_ids.contains_key(&candidate) {
                    break candidate;
                }
            };
            log::trace!("layout '{}': allocated id '{}' for line {}", self.name, id, self.widgets[index].base.line);
            self.widget_ids.insert(id.clone(), WidgetId(index));
            self.widgets[index].base.id = id;
        }
    }
}

/// Every layout produced from one source document.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub file: String,
    layouts: Vec<Layout>,
}

impl Compilation {
    pub(crate) fn new(file: impl Into<String>, layouts: Vec<Layout>) -> Self {
        Self {
            file: file.into(),
            layouts,
        }
    }

    pub fn root(&self) -> &Layout {
        &self.layouts[LayoutId::ROOT.0]
    }

    pub fn layout(&self, id: LayoutId) -> &Layout {
        &self.layouts[id.0]
    }

    /// All layouts, the root first; a parent always precedes its children.
    pub fn layouts(&self) -> impl Iterator<Item = (LayoutId, &Layout)> {
        self.layouts.iter().enumerate().map(|(i, l)| (LayoutId(i), l))
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// The layout itself, then each enclosing layout up to the root.
    pub fn ancestors(&self, id: LayoutId) -> impl Iterator<Item = LayoutId> + '_ {
        std::iter::successors(Some(id), move |id| self.layout(*id).parent())
    }

    /// Look a string up in `layout` and then its ancestors. Returns the
    /// declaring layout alongside the string.
    pub fn find_string(&self, layout: LayoutId, id: &str) -> Option<(LayoutId, &LocalizedString)> {
        self.ancestors(layout)
            .find_map(|owner| self.layout(owner).strings.get(id).map(|string| (owner, string)))
    }

    /// Look an image up in `layout` and then its ancestors.
    pub fn find_image(&self, layout: LayoutId, id: &str) -> Option<(LayoutId, &ImageResource)> {
        self.ancestors(layout)
            .find_map(|owner| self.layout(owner).images.get(id).map(|image| (owner, image)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orientations(portrait: (bool, Option<bool>), landscape: (bool, Option<bool>)) -> Orientations {
        Orientations {
            portrait: BoolPair { value: portrait.0, tablet: portrait.1 },
            landscape: BoolPair { value: landscape.0, tablet: landscape.1 },
        }
    }

    fn label(id: Option<&str>) -> Widget {
        let mut widget = Widget::new(WidgetKind::for_tag("label").unwrap(), LayoutId::ROOT, None, 1);
        if let Some(id) = id {
            widget.base.id = id.to_string();
            widget.base.explicit_id = true;
        }
        widget
    }

    #[test]
    fn test_orientation_gate() {
        assert_eq!(orientations((false, None), (false, None)).validate(), Err(ErrorKind::NoOrientation));
        assert_eq!(orientations((true, None), (false, None)).validate(), Ok(()));
        assert_eq!(orientations((false, None), (true, None)).validate(), Ok(()));
    }

    #[test]
    fn test_tablet_orientation_gate() {
        assert_eq!(
            orientations((true, Some(false)), (false, None)).validate(),
            Err(ErrorKind::NoTabletOrientation)
        );
        assert_eq!(orientations((true, Some(false)), (false, Some(true))).validate(), Ok(()));
    }

    #[test]
    fn test_duplicate_declarations() {
        let mut layout = Layout::new("main", None, 1);
        let string = LocalizedString { text: "Hi".into(), line: 2 };
        assert!(layout.add_string("hello".into(), string.clone()).is_ok());
        assert_eq!(
            layout.add_string("hello".into(), string),
            Err(ErrorKind::DuplicateStringId("hello".into()))
        );
        assert!(layout.add_import("a.xml".into()));
        assert!(!layout.add_import("a.xml".into()));
    }

    #[test]
    fn test_duplicate_widget_id() {
        let mut layout = Layout::new("main", None, 1);
        layout.add_widget(label(Some("title"))).unwrap();
        assert_eq!(
            layout.add_widget(label(Some("title"))),
            Err(ErrorKind::DuplicateWidgetId("title".into()))
        );
    }

    #[test]
    fn test_auto_ids_skip_explicit_ones() {
        let mut layout = Layout::new("main", None, 1);
        for id in [None, Some("widget2"), None, Some("widget1")] {
            layout.add_widget(label(id)).unwrap();
        }
        layout.allocate_ids();
        let ids: Vec<&str> = layout.widgets().map(|(_, w)| w.id()).collect();
        assert_eq!(ids, vec!["widget3", "widget2", "widget4", "widget1"]);
        assert_eq!(layout.widget_for_id("widget4").map(Widget::tag), Some("label"));
    }
}
