//! Android view (Java) code generator.

use std::fmt::Write;

use indexmap::IndexMap;
use serde_json::json;
use yip_core::{Color, Font};
use yip_layout::{Compilation, TextProps, TextSource, Widget, WidgetKind};

use super::common::{
    aligned, class_name, float_literal, font_scale, pre_order, quoted, resolve_image, resolve_text,
    scale_factor, scale_factors, Axis, Dialect, Geometry,
};
use super::templates::TemplateEngine;
use super::{check_unique_classes, CodeGenerator, Field, GeneratedFile, GeneratedProject, LayoutSource, Scope};
use crate::context::ProjectContext;
use crate::error::{CodegenError, Result};

/// Android view code generator.
pub struct AndroidGenerator<'a> {
    engine: TemplateEngine<'a>,
}

impl<'a> AndroidGenerator<'a> {
    /// Create a new Android generator.
    pub fn new() -> Result<Self> {
        let mut engine = TemplateEngine::new();
        Self::register_templates(&mut engine)?;
        Ok(Self { engine })
    }

    fn register_templates(engine: &mut TemplateEngine) -> Result<()> {
        engine.register_template(
            "android_layout",
            r#"// Generated by yip from {{source}}. Do not edit.

package {{package}};

import android.content.Context;
import android.graphics.Typeface;
import android.text.InputType;
import android.util.TypedValue;
import android.view.View;
import android.widget.FrameLayout;

public class {{class}} extends FrameLayout
{
{{#each fields}}
    public final {{type}} {{name}};
{{/each}}

    public {{class}}(Context context)
    {
        super(context);
{{#if background}}
        setBackgroundColor({{background}});
{{/if}}
{{indent init_code 8}}
    }

    public static boolean supportsPortrait(boolean isTablet)
    {
        return isTablet ? {{portrait_tablet}} : {{portrait}};
    }

    public static boolean supportsLandscape(boolean isTablet)
    {
        return isTablet ? {{landscape_tablet}} : {{landscape}};
    }

    @Override
    protected void onLayout(boolean changed, int left, int top, int right, int bottom)
    {
        float width = right - left;
        float height = bottom - top;
        boolean isLandscape = width > height;
        float horzScale = {{horz_scale}};
        float vertScale = {{vert_scale}};

{{indent layout_code 8}}
    }
}
"#,
        )?;

        engine.register_template(
            "android_strings",
            r#"<?xml version="1.0" encoding="utf-8"?>
<!-- Generated by yip. Do not edit. -->
<resources>
{{#each strings}}
    <string name="{{name}}">{{value}}</string>
{{/each}}
</resources>
"#,
        )
    }

    /// Java class generated for the scope's layout.
    pub fn class_name(&self, scope: &Scope) -> String {
        class_name("", scope.layout().name(), "Layout")
    }

    /// Allocation, then the shared base properties, then the variant's own.
    /// Localized text is recorded in `translations` under its resource name.
    pub fn generate_init_code(
        &self,
        scope: &Scope,
        widget: &Widget,
        out: &mut String,
        translations: &mut IndexMap<String, String>,
    ) -> Result<()> {
        let var = variable(widget);
        writeln!(out, "{} = new {}(context);", var, widget_class(widget))?;

        self.generate_base_init_code(scope, widget, out)?;

        match &widget.kind {
            WidgetKind::Group(group) => {
                if group.clip {
                    writeln!(out, "{}.setClipChildren(true);", var)?;
                }
            }
            WidgetKind::Button(button) => {
                self.generate_text_init_code(scope, widget, &button.text, out, translations)?;
                if let Some(image) = &button.background_image {
                    let image = resolve_image(scope, image)?;
                    writeln!(out, "{}.setBackgroundResource(R.drawable.{});", var, image.resource_name())?;
                }
            }
            WidgetKind::Image(view) => {
                if let Some(image) = &view.image {
                    let image = resolve_image(scope, image)?;
                    writeln!(out, "{}.setImageResource(R.drawable.{});", var, image.resource_name())?;
                }
                writeln!(out, "{}.setScaleType(android.widget.ImageView.ScaleType.FIT_XY);", var)?;
            }
            WidgetKind::Label(label) => {
                self.generate_text_init_code(scope, widget, &label.text, out, translations)?;
                if let Some(lines) = label.lines.filter(|lines| *lines > 0) {
                    writeln!(out, "{}.setMaxLines({});", var, lines)?;
                }
            }
            WidgetKind::TextField(field) => {
                self.generate_text_init_code(scope, widget, &field.text, out, translations)?;
                if let Some(source) = &field.placeholder {
                    let key = localize(scope, widget, source, "_placeholder", translations)?;
                    writeln!(out, "{}.setHint(R.string.{});", var, key)?;
                }
                if field.secure {
                    writeln!(
                        out,
                        "{}.setInputType(InputType.TYPE_CLASS_TEXT | InputType.TYPE_TEXT_VARIATION_PASSWORD);",
                        var
                    )?;
                }
            }
            WidgetKind::TableView(_) => {}
        }
        Ok(())
    }

    fn generate_base_init_code(&self, scope: &Scope, widget: &Widget, out: &mut String) -> Result<()> {
        let var = variable(widget);
        writeln!(out, "{}.setTag({});", var, quoted(widget.id()))?;
        if !widget.base.visible {
            writeln!(out, "{}.setVisibility(View.GONE);", var)?;
        }
        if let Some(color) = &widget.base.background {
            writeln!(out, "{}.setBackgroundColor({});", var, color_literal(color))?;
        }
        match widget.base.parent {
            Some(parent) => writeln!(out, "{}.addView({});", variable(scope.layout().widget(parent)), var)?,
            None => writeln!(out, "addView({});", var)?,
        }
        Ok(())
    }

    fn generate_text_init_code(
        &self,
        scope: &Scope,
        widget: &Widget,
        text: &TextProps,
        out: &mut String,
        translations: &mut IndexMap<String, String>,
    ) -> Result<()> {
        let var = variable(widget);
        if let Some(source) = &text.text {
            let key = localize(scope, widget, source, "", translations)?;
            writeln!(out, "{}.setText(R.string.{});", var, key)?;
        }
        writeln!(out, "{}.setTextColor({});", var, color_literal(&text.text_color))?;
        if let Some(Font { family: Some(family), .. }) = &text.font {
            writeln!(
                out,
                "{}.setTypeface(Typeface.create({}, Typeface.NORMAL));",
                var,
                quoted(family)
            )?;
        }
        Ok(())
    }

    /// View placement, then variant extras: font sizing and button image
    /// placement.
    pub fn generate_layout_code(&self, scope: &Scope, widget: &Widget, out: &mut String) -> Result<()> {
        let var = variable(widget);
        let geometry = Geometry::of(&widget.base, Dialect::Java);
        let (parent_width, parent_height) = match widget.base.parent {
            Some(parent) => {
                let parent = variable(scope.layout().widget(parent));
                (format!("{}.getWidth()", parent), format!("{}.getHeight()", parent))
            }
            None => ("width".to_string(), "height".to_string()),
        };

        if let Some(text) = widget.kind.text() {
            // Measuring depends on the text size.
            generate_font_code(&var, text, out)?;
        }

        writeln!(out, "{{")?;
        if geometry.width.is_none() || geometry.height.is_none() {
            writeln!(
                out,
                "    {}.measure(View.MeasureSpec.UNSPECIFIED, View.MeasureSpec.UNSPECIFIED);",
                var
            )?;
        }
        let (width, height) = match &widget.kind {
            WidgetKind::Image(view) => {
                let (width_scale, height_scale) = match &view.image {
                    Some(image) => {
                        let image = resolve_image(scope, image)?;
                        (image.width_scale, image.height_scale)
                    }
                    None => Default::default(),
                };
                (
                    geometry.width.clone().unwrap_or_else(|| {
                        format!(
                            "{}.getMeasuredWidth() * {}",
                            var,
                            scale_factor(width_scale, Axis::Horizontal, Dialect::Java)
                        )
                    }),
                    geometry.height.clone().unwrap_or_else(|| {
                        format!(
                            "{}.getMeasuredHeight() * {}",
                            var,
                            scale_factor(height_scale, Axis::Vertical, Dialect::Java)
                        )
                    }),
                )
            }
            _ => (
                geometry.width.clone().unwrap_or_else(|| format!("{}.getMeasuredWidth()", var)),
                geometry.height.clone().unwrap_or_else(|| format!("{}.getMeasuredHeight()", var)),
            ),
        };
        writeln!(out, "    float w = {};", width)?;
        writeln!(out, "    float h = {};", height)?;

        let alignment = widget.base.alignment;
        writeln!(
            out,
            "    float x = {};",
            aligned(alignment.horizontal(), &geometry.x, "w", &parent_width)
        )?;
        match &widget.base.below {
            Some(below) => writeln!(out, "    float y = this.{}.getBottom() + {};", below.id, geometry.y)?,
            None => writeln!(
                out,
                "    float y = {};",
                aligned(alignment.vertical(), &geometry.y, "h", &parent_height)
            )?,
        }
        writeln!(
            out,
            "    {}.measure(View.MeasureSpec.makeMeasureSpec((int)w, View.MeasureSpec.EXACTLY), \
             View.MeasureSpec.makeMeasureSpec((int)h, View.MeasureSpec.EXACTLY));",
            var
        )?;
        writeln!(out, "    {}.layout((int)x, (int)y, (int)(x + w), (int)(y + h));", var)?;
        writeln!(out, "}}")?;

        if let WidgetKind::Button(button) = &widget.kind {
            if let Some(image) = &button.image {
                let drawable = format!("R.drawable.{}", resolve_image(scope, image)?.resource_name());
                let (left, right) = if button.image_on_right {
                    ("0", drawable.as_str())
                } else {
                    (drawable.as_str(), "0")
                };
                writeln!(
                    out,
                    "{}.setCompoundDrawablesWithIntrinsicBounds({}, 0, {}, 0);",
                    var, left, right
                )?;
            }
        }
        Ok(())
    }

    /// Generate init and layout code for every widget, in pre-order.
    pub fn generate_layout(
        &self,
        scope: &Scope,
        translations: &mut IndexMap<String, String>,
    ) -> Result<LayoutSource> {
        let layout = scope.layout();
        let mut source = LayoutSource::default();
        for id in pre_order(layout) {
            let widget = layout.widget(id);
            source.fields.push(Field {
                class: widget_class(widget).to_string(),
                name: widget.id().to_string(),
            });
            self.generate_init_code(scope, widget, &mut source.init_code, translations)?;
            self.generate_layout_code(scope, widget, &mut source.layout_code)?;
        }
        Ok(source)
    }

    fn generate_class(&self, scope: &Scope, translations: &mut IndexMap<String, String>) -> Result<GeneratedFile> {
        let layout = scope.layout();
        let class = self.class_name(scope);
        let source = self.generate_layout(scope, translations)?;
        let (horz_scale, vert_scale) = scale_factors(&layout.size, "width", "height");
        let orientations = &layout.orientations;

        let data = json!({
            "source": scope.compilation.file,
            "package": scope.project.android_package,
            "class": class,
            "fields": source.fields,
            "background": layout.background.as_ref().map(color_literal),
            "init_code": source.init_code,
            "layout_code": source.layout_code,
            "horz_scale": horz_scale,
            "vert_scale": vert_scale,
            "portrait": orientations.portrait.value,
            "portrait_tablet": orientations.portrait.tablet_value(),
            "landscape": orientations.landscape.value,
            "landscape_tablet": orientations.landscape.tablet_value(),
        });

        Ok(GeneratedFile {
            path: format!("android/src/{}/{}.java", scope.project.android_package_dir(), class),
            content: self.engine.render("android_layout", &data)?,
        })
    }

    /// Render the `strings.xml` resource file.
    pub fn generate_strings(&self, translations: &IndexMap<String, String>) -> Result<String> {
        let strings: Vec<_> = translations
            .iter()
            .map(|(name, value)| json!({ "name": name, "value": escape_resource(value) }))
            .collect();
        self.engine.render("android_strings", &json!({ "strings": strings }))
    }
}

impl<'a> CodeGenerator for AndroidGenerator<'a> {
    fn framework_name(&self) -> &'static str {
        "Android"
    }

    fn generate_project(&self, compilations: &[Compilation], project: &ProjectContext) -> Result<GeneratedProject> {
        check_unique_classes(compilations, project, |scope| self.class_name(scope))?;
        let mut files = Vec::new();
        let mut translations = IndexMap::new();
        for compilation in compilations {
            log::debug!("{}: generating Android sources", compilation.file);
            for (id, _) in compilation.layouts() {
                files.push(self.generate_class(&Scope::new(compilation, id, project), &mut translations)?);
            }
        }
        log::debug!("{} localized strings", translations.len());
        files.push(GeneratedFile {
            path: "android/res/values/strings.xml".to_string(),
            content: self.generate_strings(&translations)?,
        });
        Ok(GeneratedProject { files })
    }
}

/// Record translated text under its resource name, returning the name.
///
/// A name may be recorded again with the same text, as happens for a string
/// referenced by several widgets. Different text under one name is an error.
fn localize(
    scope: &Scope,
    widget: &Widget,
    source: &TextSource,
    suffix: &str,
    translations: &mut IndexMap<String, String>,
) -> Result<String> {
    let text = resolve_text(scope, widget, source, suffix)?;
    let translated = scope.project.translate(text.text);
    match translations.get(&text.key) {
        Some(existing) if existing != translated => {
            return Err(CodegenError::ConflictingStringKey {
                key: text.key,
                element: widget.describe(),
                layout: scope.layout().name().to_string(),
            });
        }
        Some(_) => {}
        None => {
            translations.insert(text.key.clone(), translated.to_string());
        }
    }
    Ok(text.key)
}

fn variable(widget: &Widget) -> String {
    format!("this.{}", widget.id())
}

fn widget_class(widget: &Widget) -> &str {
    if let Some(class) = &widget.base.android_class {
        return class;
    }
    match widget.kind {
        WidgetKind::Group(_) => "android.widget.FrameLayout",
        WidgetKind::Button(_) => "android.widget.Button",
        WidgetKind::Image(_) => "android.widget.ImageView",
        WidgetKind::Label(_) => "android.widget.TextView",
        WidgetKind::TextField(_) => "android.widget.EditText",
        WidgetKind::TableView(_) => "android.widget.ListView",
    }
}

fn color_literal(color: &Color) -> String {
    format!("0x{:08X}", color.to_argb32())
}

fn generate_font_code(var: &str, text: &TextProps, out: &mut String) -> Result<()> {
    if let Some(font) = &text.font {
        let scale = font_scale(text, Dialect::Java);
        writeln!(
            out,
            "{}.setTextSize(TypedValue.COMPLEX_UNIT_PX, {} * {});",
            var,
            float_literal(font.size),
            scale
        )?;
    }
    Ok(())
}

/// Escape text for an Android string resource.
fn escape_resource(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '@' | '?' if out.is_empty() => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}
