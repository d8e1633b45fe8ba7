//! Cross-reference checks run once every layout of a document is built.

use yip_core::{ErrorKind, LayoutError};

use crate::layout::{Compilation, LayoutId};
use crate::widget::{Widget, WidgetId};

/// Verify `@string` text, image references and `below` siblings.
///
/// Strings and images resolve in the widget's own layout first and then in
/// its ancestors. `below` must name a sibling declared earlier.
pub(crate) fn resolve(compilation: &Compilation) -> Result<(), LayoutError> {
    for (layout_id, layout) in compilation.layouts() {
        for (widget_id, widget) in layout.widgets() {
            check_widget(compilation, layout_id, widget_id, widget)
                .map_err(|(line, kind)| LayoutError::new(&compilation.file, line, kind).within(widget.describe()))?;
        }
    }
    Ok(())
}

fn check_widget(
    compilation: &Compilation,
    layout_id: LayoutId,
    widget_id: WidgetId,
    widget: &Widget,
) -> Result<(), (u32, ErrorKind)> {
    for reference in widget.string_refs() {
        if compilation.find_string(layout_id, &reference.id).is_none() {
            return Err((reference.line, ErrorKind::UnknownString(reference.id.clone())));
        }
    }
    for reference in widget.image_refs() {
        if compilation.find_image(layout_id, &reference.id).is_none() {
            return Err((reference.line, ErrorKind::UnknownImage(reference.id.clone())));
        }
    }
    if let Some(below) = &widget.base.below {
        let layout = compilation.layout(layout_id);
        let target = layout
            .widget_id(&below.id)
            .ok_or_else(|| (below.line, ErrorKind::UnknownWidget(below.id.clone())))?;
        if target >= widget_id {
            return Err((below.line, ErrorKind::ForwardReference(below.id.clone())));
        }
        if layout.widget(target).base.parent != widget.base.parent {
            return Err((below.line, ErrorKind::NotASibling(below.id.clone())));
        }
    }
    Ok(())
}
