use std::collections::HashSet;

use proptest::prelude::*;
use yip_core::{Alignment, AttributeError, Color, ErrorKind, LayoutError, ScaleMode};
use yip_layout::{compile, LayoutId, TextSource, WidgetKind};

const LOGIN: &str = include_str!("fixtures/login.xml");
const MINIMAL: &str = include_str!("fixtures/minimal.xml");

fn layout(body: &str) -> String {
    format!("<layout size=\"320,480\" portrait=\"true\">\n{}\n</layout>", body)
}

fn compile_err(source: &str) -> LayoutError {
    compile(source, "test.xml").unwrap_err()
}

#[test]
fn test_minimal_button() {
    let compilation = compile(MINIMAL, "minimal.xml").unwrap();
    assert_eq!(compilation.len(), 1);
    let root = compilation.root();
    assert_eq!(root.name(), "minimal");
    assert_eq!(root.top_level().len(), 1);

    let button = root.widget_for_id("ok").unwrap();
    assert_eq!(button.tag(), "button");
    match &button.kind {
        WidgetKind::Button(button) => {
            assert_eq!(button.text.text, Some(TextSource::Literal("OK".into())));
            assert_eq!(button.text.text_color, Color::WHITE);
        }
        other => panic!("expected a button, got {:?}", other),
    }
}

#[test]
fn test_login_fixture_structure() {
    let compilation = compile(LOGIN, "layouts/login.xml").unwrap();
    let root = compilation.root();

    assert_eq!(root.name(), "login");
    assert_eq!(root.size.landscape, (480.0, 320.0));
    assert!(root.orientations.portrait.tablet_value());
    assert!(!root.orientations.landscape.tablet_value());
    assert_eq!(root.background, Color::from_hex("#202020"));

    let strings: Vec<&str> = root.strings().keys().map(String::as_str).collect();
    assert_eq!(strings, vec!["title", "userHint"]);
    let logo = &root.images()["logo"].image;
    assert_eq!((logo.width_scale, logo.height_scale), (ScaleMode::Minimum, ScaleMode::Minimum));
    assert_eq!(root.imports().len(), 1);

    let ids: Vec<&str> = root.widgets().map(|(_, w)| w.id()).collect();
    assert_eq!(ids, vec!["header", "widget1", "form", "user", "password", "ok", "recent"]);
    let top: Vec<&str> = root.top_level().iter().map(|id| root.widget(*id).id()).collect();
    assert_eq!(top, vec!["header", "widget1", "form", "recent"]);

    let form = root.widget_for_id("form").unwrap();
    let children: Vec<&str> = form.children().iter().map(|id| root.widget(*id).id()).collect();
    assert_eq!(children, vec!["user", "password", "ok"]);
    assert_eq!(root.widget_for_id("ok").unwrap().base.parent, root.widget_id("form"));
    assert_eq!(root.widget_for_id("header").unwrap().base.alignment, Alignment::TOP | Alignment::HCENTER);
}

#[test]
fn test_table_cell_is_a_child_layout() {
    let compilation = compile(LOGIN, "login.xml").unwrap();
    assert_eq!(compilation.len(), 2);
    let root = compilation.root();
    assert_eq!(root.children(), &[LayoutId(1)]);

    let cell = compilation.layout(LayoutId(1));
    assert_eq!(cell.name(), "login_recent_cell");
    assert_eq!(cell.parent(), Some(LayoutId::ROOT));
    assert_eq!(cell.orientations, root.orientations);
    assert_eq!(cell.size.portrait, (320.0, 44.0));

    let ids: Vec<&str> = cell.widgets().map(|(_, w)| w.id()).collect();
    assert_eq!(ids, vec!["widget1", "widget2"]);

    match &root.widget_for_id("recent").unwrap().kind {
        WidgetKind::TableView(view) => assert_eq!(view.cell, Some(LayoutId(1))),
        other => panic!("expected a table view, got {:?}", other),
    }
}

#[test]
fn test_lookups_walk_ancestors() {
    let compilation = compile(LOGIN, "login.xml").unwrap();
    let cell = LayoutId(1);
    assert_eq!(compilation.find_image(cell, "logo").map(|(owner, _)| owner), Some(LayoutId::ROOT));
    assert_eq!(compilation.find_string(cell, "entry").map(|(owner, _)| owner), Some(cell));
    assert!(compilation.find_string(LayoutId::ROOT, "entry").is_none());
}

#[test]
fn test_wrong_root() {
    let err = compile_err("<screen size=\"1,1\"/>");
    assert_eq!(
        err.kind,
        ErrorKind::UnexpectedRoot {
            expected: "layout".into(),
            found: "screen".into(),
        }
    );
}

#[test]
fn test_unknown_element_reports_line() {
    let err = compile_err(&layout("  <label/>\n  <slider/>"));
    assert_eq!(err.kind, ErrorKind::UnknownElement("slider".into()));
    assert_eq!(err.line, 3);
    assert_eq!(
        err.to_string(),
        "test.xml(3): unknown element 'slider'\n    in <slider> at line 3"
    );
}

#[test]
fn test_reserved_widget_id_reports_its_line() {
    let err = compile_err(&layout("  <group id=\"form\">\n    <button id=\"view\"/>\n  </group>"));
    assert_eq!(err.kind, ErrorKind::ReservedIdentifier("view".into()));
    assert_eq!(err.line, 3);
    assert!(err.context.iter().any(|element| element.starts_with("<group id=\"form\">")));

    // String ids are not variables in the generated code.
    assert!(compile(&layout("  <string id=\"title\" text=\"Hi\"/>"), "test.xml").is_ok());
}

#[test]
fn test_unexpected_attribute_reports_its_line() {
    let err = compile_err(&layout("  <button id=\"ok\"\n    colour=\"red\"/>"));
    assert_eq!(err.kind, ErrorKind::UnexpectedAttribute("colour".into()));
    assert_eq!(err.line, 3);

    let err = compile_err("<layout size=\"1,1\" portrait=\"true\" theme=\"dark\"/>");
    assert_eq!(err.kind, ErrorKind::UnexpectedAttribute("theme".into()));
}

#[test]
fn test_malformed_attribute_value() {
    let err = compile_err(&layout("  <label size=\"wide\"/>"));
    assert!(matches!(err.kind, ErrorKind::Attribute(AttributeError::InvalidValue { .. })));
    assert_eq!(err.line, 2);
}

#[test]
fn test_orientation_gate() {
    let err = compile_err("<layout size=\"1,1\" portrait=\"false\" landscape=\"false\"/>");
    assert_eq!(err.kind, ErrorKind::NoOrientation);
    assert!(compile("<layout size=\"1,1\" portrait=\"false\" landscape=\"true\"/>", "a.xml").is_ok());
    assert!(compile("<layout size=\"1,1\" portrait=\"true\" landscape=\"false\"/>", "a.xml").is_ok());

    let err = compile_err("<layout size=\"1,1\" portrait=\"true,false\" landscape=\"false\"/>");
    assert_eq!(err.kind, ErrorKind::NoTabletOrientation);
}

#[test]
fn test_duplicate_ids() {
    let err = compile_err(&layout("  <string id=\"a\" text=\"x\"/>\n  <string id=\"a\" text=\"y\"/>"));
    assert_eq!(err.kind, ErrorKind::DuplicateStringId("a".into()));
    assert_eq!(err.line, 3);

    let err = compile_err(&layout("  <rawImage id=\"a\" file=\"a.png\"/>\n  <rawImage id=\"a\" file=\"b.png\"/>"));
    assert_eq!(err.kind, ErrorKind::DuplicateImageId("a".into()));

    let err = compile_err(&layout("  <label id=\"a\"/>\n  <group>\n    <button id=\"a\"/>\n  </group>"));
    assert_eq!(err.kind, ErrorKind::DuplicateWidgetId("a".into()));
    assert_eq!(err.line, 4);
    assert_eq!(err.context.len(), 2);

    let ok = compile(&layout("  <string id=\"a\" text=\"x\"/>\n  <string id=\"b\" text=\"x\"/>"), "a.xml");
    assert!(ok.is_ok());
}

#[test]
fn test_string_declaration_requires_text() {
    let err = compile_err(&layout("  <string id=\"a\"/>"));
    assert_eq!(
        err.kind,
        ErrorKind::MissingAttribute {
            element: "string".into(),
            attribute: "text".into(),
        }
    );
    let err = compile_err(&layout("  <string id=\"a\" text=\"\"/>"));
    assert_eq!(err.kind, ErrorKind::Attribute(AttributeError::Empty { name: "text".into() }));
    let err = compile_err(&layout("  <string id=\"not valid\" text=\"x\"/>"));
    assert_eq!(err.kind, ErrorKind::InvalidIdentifier("not valid".into()));
}

#[test]
fn test_contradictory_image_scale() {
    let err = compile_err(&layout("  <rawImage id=\"a\" file=\"a.png\" wscale=\"h\" whscale=\"v\"/>"));
    assert!(matches!(
        err.kind,
        ErrorKind::Attribute(AttributeError::ContradictoryScale { .. })
    ));
}

#[test]
fn test_font_scale_without_font() {
    let err = compile_err(&layout("  <label text=\"Hi\" fontScale=\"min\"/>"));
    assert_eq!(err.kind, ErrorKind::FontScaleWithoutFont);
    assert_eq!(err.line, 2);
    assert!(compile(&layout("  <label text=\"Hi\" font=\"12\" fontScale=\"min\"/>"), "a.xml").is_ok());
}

#[test]
fn test_misplaced_declarations() {
    let err = compile_err(&layout("  <group>\n    <string id=\"a\" text=\"x\"/>\n  </group>"));
    assert!(matches!(err.kind, ErrorKind::MisplacedElement { ref name, .. } if name == "string"));
    assert_eq!(err.line, 3);

    let err = compile_err(&layout("  <button>\n    <label/>\n  </button>"));
    assert!(matches!(err.kind, ErrorKind::MisplacedElement { ref name, .. } if name == "label"));
}

#[test]
fn test_sub_layout_requires_size() {
    let err = compile_err(&layout("  <tableView id=\"list\">\n    <cell/>\n  </tableView>"));
    assert_eq!(
        err.kind,
        ErrorKind::MissingAttribute {
            element: "cell".into(),
            attribute: "size".into(),
        }
    );
    assert_eq!(err.line, 3);
    assert_eq!(
        err.context.as_slice(),
        &["<cell> at line 3".to_string(), "<tableView id=\"list\"> at line 2".to_string()]
    );
}

#[test]
fn test_table_view_takes_one_cell() {
    let err = compile_err(&layout(
        "  <tableView>\n    <cell size=\"1,1\"/>\n    <cell size=\"1,1\"/>\n  </tableView>",
    ));
    assert!(matches!(err.kind, ErrorKind::MisplacedElement { .. }));
    assert_eq!(err.line, 4);
}

#[test]
fn test_unresolved_references() {
    let err = compile_err(&layout("  <label text=\"@missing\"/>"));
    assert_eq!(err.kind, ErrorKind::UnknownString("missing".into()));

    let err = compile_err(&layout("  <image image=\"missing\"/>"));
    assert_eq!(err.kind, ErrorKind::UnknownImage("missing".into()));

    let err = compile_err(&layout("  <label below=\"nobody\"/>"));
    assert_eq!(err.kind, ErrorKind::UnknownWidget("nobody".into()));
}

#[test]
fn test_child_layout_strings_are_not_visible_to_parent() {
    let err = compile_err(&layout(
        "  <label text=\"@entry\"/>\n  <tableView>\n    <cell size=\"1,1\">\n      <string id=\"entry\" text=\"x\"/>\n    </cell>\n  </tableView>",
    ));
    assert_eq!(err.kind, ErrorKind::UnknownString("entry".into()));
    assert_eq!(err.line, 2);
}

#[test]
fn test_below_must_be_an_earlier_sibling() {
    let err = compile_err(&layout("  <label id=\"a\" below=\"b\"/>\n  <label id=\"b\"/>"));
    assert_eq!(err.kind, ErrorKind::ForwardReference("b".into()));

    let err = compile_err(&layout("  <label id=\"a\"/>\n  <group>\n    <label below=\"a\"/>\n  </group>"));
    assert_eq!(err.kind, ErrorKind::NotASibling("a".into()));
    assert_eq!(err.line, 4);
}

#[test]
fn test_escaped_text_literal() {
    let compilation = compile(&layout("  <label id=\"handle\" text=\"@@yip\"/>"), "a.xml").unwrap();
    let label = compilation.root().widget_for_id("handle").unwrap();
    assert_eq!(
        label.kind.text().and_then(|t| t.text.clone()),
        Some(TextSource::Literal("@yip".into()))
    );
}

proptest! {
    #[test]
    fn test_auto_ids_are_unique_and_increasing(slots in prop::collection::vec(prop::option::of(1u8..16), 0..12)) {
        let mut taken = HashSet::new();
        let mut body = String::new();
        let mut explicit = Vec::new();
        for slot in slots {
            match slot.filter(|n| taken.insert(*n)) {
                Some(n) => {
                    body.push_str(&format!("<label id=\"widget{}\"/>", n));
                    explicit.push(true);
                }
                None => {
                    body.push_str("<label/>");
                    explicit.push(false);
                }
            }
        }

        let compilation = compile(&layout(&body), "a.xml").unwrap();
        let root = compilation.root();
        let ids: Vec<&str> = root.widgets().map(|(_, w)| w.id()).collect();

        let unique: HashSet<&str> = ids.iter().copied().collect();
        prop_assert_eq!(unique.len(), ids.len());

        let auto: Vec<u32> = ids
            .iter()
            .zip(&explicit)
            .filter(|(_, explicit)| !**explicit)
            .map(|(id, _)| id.trim_start_matches("widget").parse().unwrap())
            .collect();
        prop_assert!(auto.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
