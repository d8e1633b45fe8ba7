//! A minimal element tree on top of `quick-xml`, with 1-based line numbers
//! for every element and attribute.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use yip_core::{ErrorKind, LayoutError};

/// An attribute together with the line it appears on.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlAttribute {
    pub name: String,
    pub value: String,
    pub line: u32,
}

/// An element with its attributes (in document order) and child elements.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub line: u32,
    pub attributes: Vec<XmlAttribute>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Find an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&XmlAttribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// Human-readable description used in error context trails.
    pub fn describe(&self) -> String {
        match self.attribute("id") {
            Some(id) => format!("<{} id=\"{}\"> at line {}", self.name, id.value, self.line),
            None => format!("<{}> at line {}", self.name, self.line),
        }
    }
}

/// Byte offsets of line starts, for offset → line lookups.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    fn line_of(&self, offset: usize) -> u32 {
        self.starts.partition_point(|&start| start <= offset) as u32
    }
}

/// Parse a document into its root element.
pub fn parse(source: &str, file: &str) -> Result<XmlElement, LayoutError> {
    let lines = LineIndex::new(source);
    let mut reader = Reader::from_str(source);
    reader.trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let start = reader.buffer_position();
        let event = reader.read_event().map_err(|e| {
            LayoutError::new(file, lines.line_of(reader.buffer_position()), ErrorKind::Xml(e.to_string()))
        })?;
        let end = reader.buffer_position();

        match event {
            Event::Start(tag) => {
                let element = read_element(&tag, source, start, end, &lines, file)?;
                stack.push(element);
            }
            Event::Empty(tag) => {
                let element = read_element(&tag, source, start, end, &lines, file)?;
                attach(&mut stack, &mut root, element, file)?;
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| {
                    LayoutError::new(file, lines.line_of(start), ErrorKind::Xml("unexpected closing tag".into()))
                })?;
                attach(&mut stack, &mut root, element, file)?;
            }
            Event::Text(text) => {
                let content = text.unescape().map_err(|e| {
                    LayoutError::new(file, lines.line_of(start), ErrorKind::Xml(e.to_string()))
                })?;
                if !content.trim().is_empty() {
                    let offset = source
                        .get(start..end)
                        .and_then(|raw| raw.find(|c: char| !c.is_whitespace()))
                        .map_or(start, |skip| start + skip);
                    return Err(LayoutError::new(file, lines.line_of(offset), ErrorKind::UnexpectedText));
                }
            }
            Event::CData(_) => {
                return Err(LayoutError::new(file, lines.line_of(start), ErrorKind::UnexpectedText));
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes carry no layout data.
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(LayoutError::new(
            file,
            open.line,
            ErrorKind::Xml(format!("element '{}' is never closed", open.name)),
        ));
    }

    root.ok_or_else(|| LayoutError::new(file, 1, ErrorKind::Xml("document has no root element".into())))
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
    file: &str,
) -> Result<(), LayoutError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else if root.is_some() {
        return Err(LayoutError::new(
            file,
            element.line,
            ErrorKind::Xml("document has more than one root element".into()),
        ));
    } else {
        *root = Some(element);
    }
    Ok(())
}

fn read_element(
    tag: &BytesStart<'_>,
    source: &str,
    start: usize,
    end: usize,
    lines: &LineIndex,
    file: &str,
) -> Result<XmlElement, LayoutError> {
    // `start` may sit before whitespace that the reader skipped.
    let tag_start = source
        .get(start..end)
        .and_then(|raw| raw.find('<'))
        .map_or(start, |skip| start + skip);
    let line = lines.line_of(tag_start);
    let offsets = attribute_offsets(source.get(tag_start..end).unwrap_or(""));

    let mut attributes = Vec::new();
    for (index, attr) in tag.attributes().enumerate() {
        let attr = attr.map_err(|e| LayoutError::new(file, line, ErrorKind::Xml(e.to_string())))?;
        let value = attr
            .unescape_value()
            .map_err(|e| LayoutError::new(file, line, ErrorKind::Xml(e.to_string())))?;
        let attr_line = offsets
            .get(index)
            .map_or(line, |offset| lines.line_of(tag_start + offset));
        attributes.push(XmlAttribute {
            name: String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            value: value.into_owned(),
            line: attr_line,
        });
    }

    Ok(XmlElement {
        name: String::from_utf8_lossy(tag.name().as_ref()).into_owned(),
        line,
        attributes,
        children: Vec::new(),
    })
}

/// Offsets of each attribute name inside the raw text of a start tag, in
/// document order. Quoted values are skipped so their contents never count.
fn attribute_offsets(tag: &str) -> Vec<usize> {
    let bytes = tag.as_bytes();
    let is_space = |b: u8| b.is_ascii_whitespace();
    let mut offsets = Vec::new();

    // Skip '<' and the element name.
    let mut i = 1;
    while i < bytes.len() && !is_space(bytes[i]) && bytes[i] != b'>' && bytes[i] != b'/' {
        i += 1;
    }

    loop {
        while i < bytes.len() && is_space(bytes[i]) {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] == b'>' || bytes[i] == b'/' {
            break;
        }
        offsets.push(i);
        while i < bytes.len() && bytes[i] != b'=' && !is_space(bytes[i]) && bytes[i] != b'>' {
            i += 1;
        }
        while i < bytes.len() && is_space(bytes[i]) {
            i += 1;
        }
        if i < bytes.len() && bytes[i] == b'=' {
            i += 1;
        }
        while i < bytes.len() && is_space(bytes[i]) {
            i += 1;
        }
        if i < bytes.len() && (bytes[i] == b'"' || bytes[i] == b'\'') {
            let quote = bytes[i];
            i += 1;
            while i < bytes.len() && bytes[i] != quote {
                i += 1;
            }
            i += 1;
        }
    }

    offsets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tree_with_lines() {
        let source = "<?xml version=\"1.0\"?>\n<layout size=\"320,480\">\n  <group id=\"g\">\n    <button/>\n  </group>\n</layout>\n";
        let root = parse(source, "main.xml").unwrap();
        assert_eq!(root.name, "layout");
        assert_eq!(root.line, 2);
        assert_eq!(root.children[0].name, "group");
        assert_eq!(root.children[0].line, 3);
        assert_eq!(root.children[0].children[0].name, "button");
        assert_eq!(root.children[0].children[0].line, 4);
    }

    #[test]
    fn test_attribute_lines() {
        let source = "<layout\n  size=\"320,480\"\n  portrait=\"true\"/>";
        let root = parse(source, "main.xml").unwrap();
        assert_eq!(root.attributes[0].name, "size");
        assert_eq!(root.attributes[0].line, 2);
        assert_eq!(root.attributes[1].name, "portrait");
        assert_eq!(root.attributes[1].line, 3);
    }

    #[test]
    fn test_attribute_offsets_skip_quoted_values() {
        let offsets = attribute_offsets("<button text=\"a b='c'\" id='x'/>");
        assert_eq!(offsets, vec![8, 23]);
    }

    #[test]
    fn test_unescaped_values() {
        let root = parse("<layout text=\"a &amp; b\"/>", "main.xml").unwrap();
        assert_eq!(root.attributes[0].value, "a & b");
    }

    #[test]
    fn test_text_content_rejected() {
        let err = parse("<layout>\n  hello\n</layout>", "main.xml").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedText);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_mismatched_tags_rejected() {
        let err = parse("<layout>\n<group>\n</layout>", "main.xml").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Xml(_)));
    }

    #[test]
    fn test_unclosed_root_rejected() {
        let err = parse("<layout>\n<group/>\n", "main.xml").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Xml(_)));
    }

    #[test]
    fn test_describe_uses_id() {
        let root = parse("<button id=\"ok\"/>", "main.xml").unwrap();
        assert_eq!(root.describe(), "<button id=\"ok\"> at line 1");
    }
}
