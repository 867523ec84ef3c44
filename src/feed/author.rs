use crate::feed::text::{child_string, text_of};
use crate::xml::Element;

/// Author fields resolved from an `<author>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub uri: Option<String>,
    pub email: Option<String>,
}

/// Resolves the `<author>` child of `parent`.
///
/// Atom writes a structured person (`<name>`, `<uri>`, `<email>`). Plenty of
/// feeds put a bare string there instead, in which case the whole element's
/// text becomes the name. No `<author>` child at all yields `None`.
pub fn resolve(parent: &Element) -> Option<Author> {
    let author = parent.child("author")?;

    match child_string(author, "name") {
        Some(name) => Some(Author {
            name,
            uri: child_string(author, "uri"),
            email: child_string(author, "email"),
        }),
        None => Some(Author {
            name: text_of(author).into_owned(),
            ..Author::default()
        }),
    }
}
