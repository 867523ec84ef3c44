use crate::feed::model::{Attributes, Extension};
use crate::feed::text::text_of;
use crate::xml::{Element, NodeKind};

/// Copies every attribute of `element`, in source order.
pub fn copy_attributes(element: &Element) -> Attributes {
    let mut attributes = Attributes::default();
    for attr in element.attributes() {
        attributes.insert(attr.name.as_str(), attr.value.as_str());
    }
    attributes
}

/// Whether `element` looks like a flat extension element.
///
/// The `:` test is a plain substring check on the qualified name, not a
/// namespace lookup. Extensions with nested elements are not surfaced.
fn is_extension(element: &Element) -> bool {
    element.name().contains(':')
        && element
            .children()
            .iter()
            .all(|node| matches!(node.kind(), NodeKind::Text | NodeKind::CData | NodeKind::Comment))
}

/// Harvests the flat namespaced children of `element` as opaque extensions.
///
/// Returns `None` when there is no candidate, so the record field stays absent
/// rather than holding an empty list.
pub fn harvest(element: &Element) -> Option<Vec<Extension>> {
    let extensions: Vec<Extension> = element
        .elements()
        .filter(|child| is_extension(child))
        .map(|child| Extension {
            name: child.name().to_owned(),
            value: text_of(child).into_owned(),
            attributes: (!child.attributes().is_empty()).then(|| copy_attributes(child)),
        })
        .collect();

    if extensions.is_empty() {
        None
    } else {
        tracing::trace!(element = element.name(), count = extensions.len(), "Harvested extensions");
        Some(extensions)
    }
}
