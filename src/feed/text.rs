use std::borrow::Cow;

use crate::xml::{Element, Node};

/// Resolves the text value of `element`.
///
/// A single fragment is borrowed as-is. Feeds that split a value across
/// several CDATA sections (or mix CDATA with plain text) get one owned string
/// with the fragments joined in order, no separator. A child element such as
/// the `<b>` in `Hello <b>bold</b> world` contributes its first text node.
/// Comments are skipped. No text at all yields `""`.
pub fn text_of(element: &Element) -> Cow<'_, str> {
    let mut fragments = element.children().iter().filter_map(fragment);

    let Some(first) = fragments.next() else {
        return Cow::Borrowed("");
    };
    let rest = fragments;
    if rest.clone().next().is_none() {
        return Cow::Borrowed(first);
    }

    let capacity = first.len() + rest.clone().map(str::len).sum::<usize>();
    let mut merged = String::with_capacity(capacity);
    merged.push_str(first);
    rest.for_each(|fragment| merged.push_str(fragment));
    Cow::Owned(merged)
}

/// The piece of text `node` adds to its parent's value.
fn fragment(node: &Node) -> Option<&str> {
    match node {
        Node::Text(value) | Node::CData(value) => Some(value),
        // Only plain text counts here, a CDATA section inside the child does not
        Node::Element(child) => Some(
            child
                .children()
                .iter()
                .find_map(|inner| match inner {
                    Node::Text(value) => Some(value.as_str()),
                    _ => None,
                })
                .unwrap_or(""),
        ),
        Node::Comment(_) => None,
    }
}

/// Resolves the text of the first child called `name`.
///
/// `None` means the child is missing, which callers treat differently from an
/// empty element.
pub fn child_text<'a>(parent: &'a Element, name: &str) -> Option<Cow<'a, str>> {
    parent.child(name).map(text_of)
}

/// Owned variant of [`child_text`] for filling record fields.
pub fn child_string(parent: &Element, name: &str) -> Option<String> {
    child_text(parent, name).map(Cow::into_owned)
}
