//! UIKit (Objective-C) code generator.

use std::fmt::Write;

use serde_json::json;
use yip_core::{BoolPair, Color, Font};
use yip_layout::{Compilation, TextProps, TextSource, Widget, WidgetKind};

use super::common::{
    aligned, class_name, float_literal, font_scale, oriented, pre_order, quoted, resolve_image,
    resolve_text, scale_factor, scale_factors, scaled, Axis, Dialect, Geometry,
};
use super::templates::TemplateEngine;
use super::{check_unique_classes, CodeGenerator, Field, GeneratedFile, GeneratedProject, LayoutSource, Scope};
use crate::context::ProjectContext;
use crate::error::Result;

/// UIKit code generator.
pub struct IosGenerator<'a> {
    engine: TemplateEngine<'a>,
}

impl<'a> IosGenerator<'a> {
    /// Create a new UIKit generator.
    pub fn new() -> Result<Self> {
        let mut engine = TemplateEngine::new();
        Self::register_templates(&mut engine)?;
        Ok(Self { engine })
    }

    fn register_templates(engine: &mut TemplateEngine) -> Result<()> {
        engine.register_template(
            "ios_header",
            r#"// Generated by yip from {{source}}. Do not edit.

#import <UIKit/UIKit.h>

@interface {{class}} : {{superclass}}
{{#each fields}}
@property (nonatomic, strong) {{type}} * {{name}};
{{/each}}
@end
"#,
        )?;

        engine.register_template(
            "ios_view_controller",
            r#"// Generated by yip from {{source}}. Do not edit.

#import "{{class}}.h"
{{#each imports}}
#import "{{this}}.h"
{{/each}}

@implementation {{class}}

-(void)loadView
{
    self.view = [[UIView alloc] initWithFrame:[UIScreen mainScreen].bounds];
{{#if background}}
    self.view.backgroundColor = {{background}};
{{/if}}
{{indent init_code 4}}
}

-(void)viewWillLayoutSubviews
{
    [super viewWillLayoutSubviews];

    CGSize parentSize = self.view.bounds.size;
    BOOL isLandscape = parentSize.width > parentSize.height;
    CGFloat horzScale = {{horz_scale}};
    CGFloat vertScale = {{vert_scale}};

{{indent layout_code 4}}
}

-(UIInterfaceOrientationMask)supportedInterfaceOrientations
{
    if (UI_USER_INTERFACE_IDIOM() == UIUserInterfaceIdiomPad)
        return {{tablet_orientations}};
    return {{phone_orientations}};
}

@end
"#,
        )?;

        engine.register_template(
            "ios_cell",
            r#"// Generated by yip from {{source}}. Do not edit.

#import "{{class}}.h"
{{#each imports}}
#import "{{this}}.h"
{{/each}}

@implementation {{class}}

-(id)initWithStyle:(UITableViewCellStyle)style reuseIdentifier:(NSString *)reuseIdentifier
{
    self = [super initWithStyle:style reuseIdentifier:reuseIdentifier];
    if (self)
    {
{{#if background}}
        self.contentView.backgroundColor = {{background}};
{{/if}}
{{indent init_code 8}}
    }
    return self;
}

-(void)layoutSubviews
{
    [super layoutSubviews];

    CGSize parentSize = self.contentView.bounds.size;
    BOOL isLandscape = parentSize.width > parentSize.height;
    CGFloat horzScale = {{horz_scale}};
    CGFloat vertScale = {{vert_scale}};

{{indent layout_code 4}}
}

@end
"#,
        )
    }

    /// Objective-C class generated for the scope's layout.
    pub fn class_name(&self, scope: &Scope) -> String {
        let suffix = if scope.is_view_controller { "ViewController" } else { "" };
        class_name(&scope.project.ios_class_prefix, scope.layout().name(), suffix)
    }

    /// Allocation, then the shared base properties, then the variant's own.
    pub fn generate_init_code(&self, scope: &Scope, widget: &Widget, out: &mut String) -> Result<()> {
        let var = variable(widget);
        let class = widget_class(widget);
        match &widget.kind {
            WidgetKind::Image(_) => writeln!(out, "{} = [[{} alloc] initWithImage:nil];", var, class)?,
            WidgetKind::TableView(_) => writeln!(
                out,
                "{} = [[{} alloc] initWithFrame:CGRectZero style:UITableViewStylePlain];",
                var, class
            )?,
            _ => writeln!(out, "{} = [[{} alloc] initWithFrame:CGRectZero];", var, class)?,
        }

        self.generate_base_init_code(scope, widget, out)?;

        match &widget.kind {
            WidgetKind::Group(group) => {
                if group.clip {
                    writeln!(out, "{}.clipsToBounds = YES;", var)?;
                }
            }
            WidgetKind::Button(button) => {
                if let Some(source) = &button.text.text {
                    let text = text_expression(scope, widget, source, "")?;
                    writeln!(out, "[{} setTitle:{} forState:UIControlStateNormal];", var, text)?;
                }
                writeln!(
                    out,
                    "[{} setTitleColor:{} forState:UIControlStateNormal];",
                    var,
                    color_expression(&button.text.text_color)
                )?;
                if let Some(image) = &button.image {
                    let image = resolve_image(scope, image)?;
                    writeln!(
                        out,
                        "[{} setImage:[UIImage imageNamed:@\"{}\"] forState:UIControlStateNormal];",
                        var,
                        image.resource_name()
                    )?;
                }
                if let Some(image) = &button.background_image {
                    let image = resolve_image(scope, image)?;
                    writeln!(
                        out,
                        "[{} setBackgroundImage:[UIImage imageNamed:@\"{}\"] forState:UIControlStateNormal];",
                        var,
                        image.resource_name()
                    )?;
                }
            }
            WidgetKind::Image(view) => {
                if let Some(image) = &view.image {
                    let image = resolve_image(scope, image)?;
                    writeln!(out, "{}.image = [UIImage imageNamed:@\"{}\"];", var, image.resource_name())?;
                }
            }
            WidgetKind::Label(label) => {
                self.generate_text_init_code(scope, widget, &label.text, out)?;
                if let Some(lines) = label.lines {
                    writeln!(out, "{}.numberOfLines = {};", var, lines)?;
                }
            }
            WidgetKind::TextField(field) => {
                self.generate_text_init_code(scope, widget, &field.text, out)?;
                if let Some(source) = &field.placeholder {
                    let text = text_expression(scope, widget, source, "_placeholder")?;
                    writeln!(out, "{}.placeholder = {};", var, text)?;
                }
                if field.secure {
                    writeln!(out, "{}.secureTextEntry = YES;", var)?;
                }
            }
            WidgetKind::TableView(table) => {
                if let Some(cell) = table.cell {
                    let cell_scope = Scope::new(scope.compilation, cell, scope.project);
                    writeln!(
                        out,
                        "[{} registerClass:[{} class] forCellReuseIdentifier:@\"{}\"];",
                        var,
                        self.class_name(&cell_scope),
                        cell_scope.layout().name()
                    )?;
                }
            }
        }
        Ok(())
    }

    fn generate_base_init_code(&self, scope: &Scope, widget: &Widget, out: &mut String) -> Result<()> {
        let var = variable(widget);
        writeln!(out, "{}.accessibilityIdentifier = @\"{}\";", var, widget.id())?;
        if !widget.base.visible {
            writeln!(out, "{}.hidden = YES;", var)?;
        }
        if let Some(color) = &widget.base.background {
            writeln!(out, "{}.backgroundColor = {};", var, color_expression(color))?;
        }
        writeln!(out, "[{} addSubview:{}];", container(scope, widget), var)?;
        Ok(())
    }

    fn generate_text_init_code(&self, scope: &Scope, widget: &Widget, text: &TextProps, out: &mut String) -> Result<()> {
        let var = variable(widget);
        if let Some(source) = &text.text {
            writeln!(out, "{}.text = {};", var, text_expression(scope, widget, source, "")?)?;
        }
        writeln!(out, "{}.textColor = {};", var, color_expression(&text.text_color))?;
        Ok(())
    }

    /// Frame computation, then variant extras: font sizing, row height and
    /// button image placement.
    pub fn generate_layout_code(&self, scope: &Scope, widget: &Widget, out: &mut String) -> Result<()> {
        let var = variable(widget);
        let geometry = Geometry::of(&widget.base, Dialect::ObjC);
        let (parent_width, parent_height) = match widget.base.parent {
            Some(parent) => {
                let parent = variable(scope.layout().widget(parent));
                (format!("{}.bounds.size.width", parent), format!("{}.bounds.size.height", parent))
            }
            None => ("parentSize.width".to_string(), "parentSize.height".to_string()),
        };

        writeln!(out, "{{")?;
        match (&geometry.width, &geometry.height, &widget.kind) {
            (Some(width), Some(height), _) => {
                writeln!(out, "    CGFloat w = {};", width)?;
                writeln!(out, "    CGFloat h = {};", height)?;
            }
            (_, _, WidgetKind::Image(view)) => {
                // Unsized images take the bitmap size, scaled like the image resource.
                let (width_scale, height_scale) = match &view.image {
                    Some(image) => {
                        let image = resolve_image(scope, image)?;
                        (image.width_scale, image.height_scale)
                    }
                    None => Default::default(),
                };
                let width = geometry.width.clone().unwrap_or_else(|| {
                    format!(
                        "{}.image.size.width * {}",
                        var,
                        scale_factor(width_scale, Axis::Horizontal, Dialect::ObjC)
                    )
                });
                let height = geometry.height.clone().unwrap_or_else(|| {
                    format!(
                        "{}.image.size.height * {}",
                        var,
                        scale_factor(height_scale, Axis::Vertical, Dialect::ObjC)
                    )
                });
                writeln!(out, "    CGFloat w = {};", width)?;
                writeln!(out, "    CGFloat h = {};", height)?;
            }
            _ => {
                writeln!(out, "    [{} sizeToFit];", var)?;
                let width = geometry.width.clone().unwrap_or_else(|| format!("{}.frame.size.width", var));
                let height = geometry.height.clone().unwrap_or_else(|| format!("{}.frame.size.height", var));
                writeln!(out, "    CGFloat w = {};", width)?;
                writeln!(out, "    CGFloat h = {};", height)?;
            }
        }

        let alignment = widget.base.alignment;
        writeln!(
            out,
            "    CGFloat x = {};",
            aligned(alignment.horizontal(), &geometry.x, "w", &parent_width)
        )?;
        match &widget.base.below {
            Some(below) => {
                let below = scope
                    .layout()
                    .widget_for_id(&below.id)
                    .map(variable)
                    .unwrap_or_else(|| format!("self.{}", below.id));
                writeln!(out, "    CGFloat y = CGRectGetMaxY({}.frame) + {};", below, geometry.y)?;
            }
            None => writeln!(
                out,
                "    CGFloat y = {};",
                aligned(alignment.vertical(), &geometry.y, "h", &parent_height)
            )?,
        }
        writeln!(out, "    {}.frame = CGRectMake(x, y, w, h);", var)?;
        writeln!(out, "}}")?;

        match &widget.kind {
            WidgetKind::Button(button) => {
                generate_font_code(&format!("{}.titleLabel", var), &button.text, out)?;
                if button.image_on_right && button.image.is_some() {
                    writeln!(out, "{{")?;
                    writeln!(out, "    CGFloat imageWidth = {}.imageView.image.size.width;", var)?;
                    writeln!(out, "    CGFloat titleWidth = {}.titleLabel.intrinsicContentSize.width;", var)?;
                    writeln!(
                        out,
                        "    {}.imageEdgeInsets = UIEdgeInsetsMake(0.0f, titleWidth, 0.0f, -titleWidth);",
                        var
                    )?;
                    writeln!(
                        out,
                        "    {}.titleEdgeInsets = UIEdgeInsetsMake(0.0f, -imageWidth, 0.0f, imageWidth);",
                        var
                    )?;
                    writeln!(out, "}}")?;
                }
            }
            WidgetKind::Label(label) => generate_font_code(&var, &label.text, out)?,
            WidgetKind::TextField(field) => generate_font_code(&var, &field.text, out)?,
            WidgetKind::TableView(table) => {
                if let Some(cell) = table.cell {
                    let size = &scope.compilation.layout(cell).size;
                    let height = oriented(
                        scaled(size.portrait.1, "vertScale"),
                        scaled(size.landscape.1, "vertScale"),
                    );
                    writeln!(out, "{}.rowHeight = {};", var, height)?;
                }
            }
            WidgetKind::Group(_) | WidgetKind::Image(_) => {}
        }
        Ok(())
    }

    /// Generate init and layout code for every widget, in pre-order.
    pub fn generate_layout(&self, scope: &Scope) -> Result<LayoutSource> {
        let layout = scope.layout();
        let mut source = LayoutSource::default();
        for id in pre_order(layout) {
            let widget = layout.widget(id);
            source.fields.push(Field {
                class: widget_class(widget).to_string(),
                name: widget.id().to_string(),
            });
            self.generate_init_code(scope, widget, &mut source.init_code)?;
            self.generate_layout_code(scope, widget, &mut source.layout_code)?;
        }
        Ok(source)
    }

    fn generate_files(&self, scope: &Scope, files: &mut Vec<GeneratedFile>) -> Result<()> {
        let layout = scope.layout();
        let class = self.class_name(scope);
        let source = self.generate_layout(scope)?;
        let (horz_scale, vert_scale) = scale_factors(&layout.size, "parentSize.width", "parentSize.height");
        let imports: Vec<String> = layout
            .children()
            .iter()
            .map(|child| self.class_name(&Scope::new(scope.compilation, *child, scope.project)))
            .collect();

        let superclass = if scope.is_view_controller { "UIViewController" } else { "UITableViewCell" };
        let orientations = layout.orientations;
        let data = json!({
            "source": scope.compilation.file,
            "class": class,
            "superclass": superclass,
            "fields": source.fields,
            "imports": imports,
            "background": layout.background.as_ref().map(color_expression),
            "init_code": source.init_code,
            "layout_code": source.layout_code,
            "horz_scale": horz_scale,
            "vert_scale": vert_scale,
            "phone_orientations": orientation_mask(orientations.portrait, orientations.landscape, false),
            "tablet_orientations": orientation_mask(orientations.portrait, orientations.landscape, true),
        });

        let implementation = if scope.is_view_controller { "ios_view_controller" } else { "ios_cell" };
        files.push(GeneratedFile {
            path: format!("ios/{}.h", class),
            content: self.engine.render("ios_header", &data)?,
        });
        files.push(GeneratedFile {
            path: format!("ios/{}.m", class),
            content: self.engine.render(implementation, &data)?,
        });
        Ok(())
    }
}

impl<'a> CodeGenerator for IosGenerator<'a> {
    fn framework_name(&self) -> &'static str {
        "UIKit"
    }

    fn generate_project(&self, compilations: &[Compilation], project: &ProjectContext) -> Result<GeneratedProject> {
        check_unique_classes(compilations, project, |scope| self.class_name(scope))?;
        let mut files = Vec::new();
        for compilation in compilations {
            log::debug!("{}: generating UIKit sources", compilation.file);
            for (id, _) in compilation.layouts() {
                self.generate_files(&Scope::new(compilation, id, project), &mut files)?;
            }
        }
        Ok(GeneratedProject { files })
    }
}

fn variable(widget: &Widget) -> String {
    format!("self.{}", widget.id())
}

fn container(scope: &Scope, widget: &Widget) -> String {
    match widget.base.parent {
        Some(parent) => variable(scope.layout().widget(parent)),
        None if scope.is_view_controller => "self.view".to_string(),
        None => "self.contentView".to_string(),
    }
}

fn widget_class(widget: &Widget) -> &str {
    if let Some(class) = &widget.base.ios_class {
        return class;
    }
    match widget.kind {
        WidgetKind::Group(_) => "UIView",
        WidgetKind::Button(_) => "UIButton",
        WidgetKind::Image(_) => "UIImageView",
        WidgetKind::Label(_) => "UILabel",
        WidgetKind::TextField(_) => "UITextField",
        WidgetKind::TableView(_) => "UITableView",
    }
}

fn text_expression(scope: &Scope, widget: &Widget, source: &TextSource, suffix: &str) -> Result<String> {
    let text = resolve_text(scope, widget, source, suffix)?;
    Ok(if text.is_reference {
        format!("NSLocalizedString(@{}, nil)", quoted(text.text))
    } else {
        format!("@{}", quoted(text.text))
    })
}

fn color_expression(color: &Color) -> String {
    format!(
        "[UIColor colorWithRed:{} green:{} blue:{} alpha:{}]",
        float_literal(color.r),
        float_literal(color.g),
        float_literal(color.b),
        float_literal(color.a)
    )
}

fn font_expression(font: &Font, scale: &str) -> String {
    let size = format!("{} * {}", float_literal(font.size), scale);
    match &font.family {
        Some(family) => format!("[UIFont fontWithName:@{} size:{}]", quoted(family), size),
        None => format!("[UIFont systemFontOfSize:{}]", size),
    }
}

fn generate_font_code(target: &str, text: &TextProps, out: &mut String) -> Result<()> {
    if let Some(font) = &text.font {
        let scale = font_scale(text, Dialect::ObjC);
        writeln!(out, "{}.font = {};", target, font_expression(font, &scale))?;
    }
    Ok(())
}

fn orientation_mask(portrait: BoolPair, landscape: BoolPair, tablet: bool) -> &'static str {
    let pick = |flag: BoolPair| if tablet { flag.tablet_value() } else { flag.value };
    match (pick(portrait), pick(landscape)) {
        (true, true) => "UIInterfaceOrientationMaskPortrait | UIInterfaceOrientationMaskLandscape",
        (false, true) => "UIInterfaceOrientationMaskLandscape",
        _ => "UIInterfaceOrientationMaskPortrait",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yip_layout::{compile, LayoutId};

    fn generate(source: &str) -> (String, String) {
        let compilation = compile(source, "main.xml").unwrap();
        let project = ProjectContext::default();
        let scope = Scope::new(&compilation, LayoutId::ROOT, &project);
        let source = IosGenerator::new().unwrap().generate_layout(&scope).unwrap();
        (source.init_code, source.layout_code)
    }

    #[test]
    fn test_button_allocation_precedes_base_init() {
        let (init, _) = generate(r#"<layout size="320,480" portrait="true"><button id="ok" text="OK"/></layout>"#);
        let lines: Vec<&str> = init.lines().collect();
        assert_eq!(lines[0], "self.ok = [[UIButton alloc] initWithFrame:CGRectZero];");
        assert_eq!(lines[1], "self.ok.accessibilityIdentifier = @\"ok\";");
        assert_eq!(lines[2], "[self.view addSubview:self.ok];");
        assert_eq!(lines[3], "[self.ok setTitle:@\"OK\" forState:UIControlStateNormal];");
    }

    #[test]
    fn test_image_allocates_then_defers_to_base() {
        let (init, _) = generate(
            r#"<layout size="320,480" portrait="true"><rawImage id="logo" file="Logo.png"/><image id="pic" image="logo" visible="false"/></layout>"#,
        );
        let lines: Vec<&str> = init.lines().collect();
        assert_eq!(lines[0], "self.pic = [[UIImageView alloc] initWithImage:nil];");
        assert_eq!(lines[1], "self.pic.accessibilityIdentifier = @\"pic\";");
        assert_eq!(lines[2], "self.pic.hidden = YES;");
        assert_eq!(lines[4], "self.pic.image = [UIImage imageNamed:@\"logo\"];");
    }

    #[test]
    fn test_group_children_are_added_to_the_group() {
        let (init, layout) = generate(
            r#"<layout size="320,480" portrait="true"><group id="box" clip="true"><label id="caption" text="Hi" align="right"/></group></layout>"#,
        );
        assert!(init.contains("self.box.clipsToBounds = YES;"));
        assert!(init.contains("[self.box addSubview:self.caption];"));
        assert!(layout.contains("CGFloat x = self.box.bounds.size.width - w - 0.0f;"));
    }

    #[test]
    fn test_string_reference_is_localized() {
        let (init, _) = generate(
            r#"<layout size="320,480" portrait="true"><string id="hello" text="Hello"/><label text="@hello"/></layout>"#,
        );
        assert!(init.contains("self.widget1.text = NSLocalizedString(@\"Hello\", nil);"));
    }

    #[test]
    fn test_layout_code_scales_and_sizes_fonts() {
        let (_, layout) = generate(
            r#"<layout size="320,480" portrait="true"><label id="l" pos="10,20" size="100,30" font="Helvetica,12" fontScale="min"/></layout>"#,
        );
        assert!(layout.contains("CGFloat w = 100.0f * horzScale;"));
        assert!(layout.contains("CGFloat y = 20.0f * vertScale;"));
        assert!(layout.contains("self.l.frame = CGRectMake(x, y, w, h);"));
        assert!(layout.contains(
            "self.l.font = [UIFont fontWithName:@\"Helvetica\" size:12.0f * MIN(horzScale, vertScale)];"
        ));
    }

    #[test]
    fn test_button_image_on_right_layered_after_frame() {
        let (_, layout) = generate(
            r#"<layout size="320,480" portrait="true"><rawImage id="arrow" file="arrow.png"/><button id="next" image="arrow" imageOnRight="true"/></layout>"#,
        );
        let frame = layout.find("self.next.frame").unwrap();
        let insets = layout.find("self.next.imageEdgeInsets").unwrap();
        assert!(frame < insets);
    }

    #[test]
    fn test_below_uses_sibling_frame() {
        let (_, layout) = generate(
            r#"<layout size="320,480" portrait="true"><label id="a" size="10,10"/><label id="b" below="a" pos="0,5" size="10,10"/></layout>"#,
        );
        assert!(layout.contains("CGFloat y = CGRectGetMaxY(self.a.frame) + 5.0f * vertScale;"));
    }

    #[test]
    fn test_row_height_follows_cell_orientations() {
        let source = r#"<layout size="320,480,480,320" portrait="true" landscape="true">
            <tableView id="list" size="320,400">
                <cell size="320,44,480,60"><label id="name" text="x"/></cell>
            </tableView>
        </layout>"#;
        let (_, layout) = generate(source);
        assert!(layout.contains("self.list.rowHeight = (isLandscape ? 60.0f * vertScale : 44.0f * vertScale);"));

        let (_, layout) = generate(
            r#"<layout size="320,480" portrait="true"><tableView id="list"><cell size="320,44"/></tableView></layout>"#,
        );
        assert!(layout.contains("self.list.rowHeight = 44.0f * vertScale;"));
    }

    #[test]
    fn test_templates_register() {
        let mut engine = TemplateEngine::new();
        assert!(IosGenerator::register_templates(&mut engine).is_ok());
    }

    #[test]
    fn test_orientation_mask() {
        let yes = BoolPair { value: true, tablet: None };
        let phone_only = BoolPair { value: true, tablet: Some(false) };
        assert_eq!(
            orientation_mask(yes, yes, false),
            "UIInterfaceOrientationMaskPortrait | UIInterfaceOrientationMaskLandscape"
        );
        assert_eq!(orientation_mask(yes, phone_only, true), "UIInterfaceOrientationMaskPortrait");
    }
}
