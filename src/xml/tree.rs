use std::borrow::Cow;

use quick_xml::escape::unescape;
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// SEC-003: Maximum element nesting depth.
/// Dropping and comparing trees is recursive, so unbounded nesting would let a
/// crafted document overflow the stack.
const MAX_DEPTH: usize = 1024;

/// A syntax error reported while building the tree.
///
/// `offset` is a byte offset into the source text; use [`super::locate`] to turn
/// it into a line/column pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub offset: usize,
    pub message: String,
}

impl SyntaxError {
    fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

/// Kind of a child node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    CData,
    Comment,
}

/// A child node of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Character data with entity references already resolved.
    Text(String),
    CData(String),
    Comment(String),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Element(_) => NodeKind::Element,
            Node::Text(_) => NodeKind::Text,
            Node::CData(_) => NodeKind::CData,
            Node::Comment(_) => NodeKind::Comment,
        }
    }

    /// Returns the character content of a text or CDATA node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(value) | Node::CData(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }
}

/// A single `name="value"` attribute, value unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// An element with its attributes and ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
}

impl Element {
    fn new(name: String) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Qualified name as written in the source, prefix included.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All attributes in source order. Duplicates are kept.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Value of the first attribute called `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child elements in document order, skipping text and comments.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// First child element called `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| element.name == name)
    }

    /// Every child element called `name`, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements().filter(move |element| element.name == name)
    }
}

/// A parsed document: the top-level elements in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    /// Builds the tree for `text`.
    ///
    /// Lenient where feeds in the wild need it:
    /// - whitespace-only text nodes are dropped
    /// - unknown entity references are kept verbatim
    /// - duplicate attributes are accepted
    ///
    /// Strict about structure: mismatched end tags, invalid element names and
    /// elements still open at end of input are [`SyntaxError`]s.
    pub fn parse(text: &str) -> Result<Self, SyntaxError> {
        // Default config: end names are checked, text is not trimmed
        let mut reader = Reader::from_str(text);

        let mut open: Vec<Element> = Vec::new();
        let mut elements = Vec::new();

        loop {
            let offset = reader.buffer_position() as usize;
            let event = reader
                .read_event()
                .map_err(|e| SyntaxError::new(reader.error_position() as usize, e.to_string()))?;

            match event {
                Event::Start(start) => {
                    if open.len() >= MAX_DEPTH {
                        return Err(SyntaxError::new(
                            offset,
                            format!("nesting depth exceeds maximum of {MAX_DEPTH} levels"),
                        ));
                    }
                    open.push(element_from(&start, &reader, offset)?);
                }
                Event::Empty(start) => {
                    let element = element_from(&start, &reader, offset)?;
                    close(&mut open, &mut elements, element);
                }
                Event::End(_) => {
                    // The reader already matched the name against the open element
                    let element = open
                        .pop()
                        .ok_or_else(|| SyntaxError::new(offset, "unexpected end tag"))?;
                    close(&mut open, &mut elements, element);
                }
                Event::Text(content) => {
                    if content.iter().all(u8::is_ascii_whitespace) {
                        continue;
                    }
                    if let Some(parent) = open.last_mut() {
                        let raw = String::from_utf8_lossy(&content);
                        parent.children.push(Node::Text(unescape_lenient(&raw)));
                    }
                }
                Event::CData(content) => {
                    if let Some(parent) = open.last_mut() {
                        let value = String::from_utf8_lossy(&content).into_owned();
                        parent.children.push(Node::CData(value));
                    }
                }
                Event::Comment(content) => {
                    if let Some(parent) = open.last_mut() {
                        let value = String::from_utf8_lossy(&content).into_owned();
                        parent.children.push(Node::Comment(value));
                    }
                }
                Event::Eof => break,
                // Declarations, processing instructions and DOCTYPE carry nothing we read
                _ => {}
            }
        }

        if let Some(unclosed) = open.last() {
            return Err(SyntaxError::new(
                text.len(),
                format!("unexpected end of data, expected </{}>", unclosed.name),
            ));
        }

        Ok(Self { elements })
    }

    /// The first top-level element.
    pub fn root(&self) -> Option<&Element> {
        self.elements.first()
    }

    /// First top-level element called `name`, wherever it sits among its siblings.
    pub fn element(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find(|element| element.name == name)
    }
}

/// Attaches a finished element to its parent, or to the document when it is top-level.
fn close(open: &mut [Element], elements: &mut Vec<Element>, element: Element) {
    match open.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None => elements.push(element),
    }
}

fn element_from(
    start: &BytesStart<'_>,
    reader: &Reader<&[u8]>,
    offset: usize,
) -> Result<Element, SyntaxError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let valid_start = name
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == ':');
    if !valid_start {
        return Err(SyntaxError::new(
            offset,
            format!("invalid element name '{name}'"),
        ));
    }

    let mut element = Element::new(name);
    let mut attributes = start.attributes();
    attributes.with_checks(false);

    for attr in attributes {
        let attr = attr.map_err(|e| {
            SyntaxError::new(attribute_error_offset(offset, &e), e.to_string())
        })?;
        let value = match attr.decode_and_unescape_value(reader.decoder()) {
            Ok(value) => value.into_owned(),
            Err(e) => {
                tracing::debug!(error = %e, "Keeping attribute value with unresolved entity verbatim");
                String::from_utf8_lossy(&attr.value).into_owned()
            }
        };
        element.attributes.push(Attribute {
            name: String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            value,
        });
    }

    Ok(element)
}

/// Absolute offset of an attribute error. quick-xml counts from the byte after `<`.
fn attribute_error_offset(tag_offset: usize, error: &AttrError) -> usize {
    let position = match *error {
        AttrError::ExpectedEq(position)
        | AttrError::ExpectedValue(position)
        | AttrError::UnquotedValue(position)
        | AttrError::ExpectedQuote(position, _)
        | AttrError::Duplicated(position, _) => position,
    };
    tag_offset + 1 + position
}

/// Resolves the predefined and numeric entities, keeping the raw text when an
/// unknown entity (e.g. `&nbsp;` without a DTD) shows up.
fn unescape_lenient(raw: &str) -> String {
    match unescape(raw) {
        Ok(Cow::Borrowed(value)) => value.to_owned(),
        Ok(Cow::Owned(value)) => value,
        Err(e) => {
            tracing::debug!(error = %e, "Keeping text with unresolved entity verbatim");
            raw.to_owned()
        }
    }
}
