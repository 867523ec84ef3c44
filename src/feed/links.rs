//! Link, enclosure and category extraction.

use crate::feed::model::{Category, Enclosure, Link};
use crate::feed::text::text_of;
use crate::xml::Element;

fn attribute_string(element: &Element, name: &str) -> Option<String> {
    element.attribute(name).map(str::to_owned)
}

/// Atom feed-level link: `href` of the first `<link>`.
///
/// A first link without `href` yields `None` even if a later one has it.
pub fn atom_feed_link(feed: &Element) -> Option<String> {
    feed.child("link")
        .and_then(|link| attribute_string(link, "href"))
}

/// Every `<link>` child of an Atom entry, in document order.
pub fn atom_links(entry: &Element) -> Vec<Link> {
    entry.children_named("link").map(atom_link).collect()
}

fn atom_link(element: &Element) -> Link {
    // Not valid Atom, but some feeds write <link>http://example.com</link>
    let has_text = element.children().iter().any(|node| node.as_text().is_some());

    Link {
        rel: attribute_string(element, "rel"),
        href: attribute_string(element, "href"),
        media_type: attribute_string(element, "type"),
        hreflang: attribute_string(element, "hreflang"),
        title: attribute_string(element, "title"),
        length: attribute_string(element, "length"),
        text: has_text.then(|| text_of(element).into_owned()),
    }
}

/// Picks the entry's main link out of its link collection.
///
/// The first link whose `rel` is missing or `alternate` wins (Atom's default
/// relation is `alternate`); its `href` is used, else its inline text.
pub fn primary_link(links: &[Link]) -> Option<String> {
    links
        .iter()
        .find(|link| matches!(link.rel.as_deref(), None | Some("alternate")))
        .and_then(|link| link.href.as_ref().or(link.text.as_ref()))
        .cloned()
}

/// RSS `<enclosure>`: the first one only.
///
/// `length` must be a whole unsigned integer; anything else (`"1024kb"`, `""`,
/// overflow) drops the field, never the enclosure.
pub fn enclosure(item: &Element) -> Option<Enclosure> {
    let element = item.child("enclosure")?;

    let length = element
        .attribute("length")
        .and_then(|raw| match raw.parse::<u64>() {
            Ok(length) => Some(length),
            Err(e) => {
                tracing::debug!(length = raw, error = %e, "Ignoring unparsable enclosure length");
                None
            }
        });

    Some(Enclosure {
        url: attribute_string(element, "url"),
        media_type: attribute_string(element, "type"),
        length,
    })
}

/// RSS `<category>` children as categories, empty ones included.
///
/// `None` when the item has no category at all.
pub fn categories(item: &Element) -> Option<Vec<Category>> {
    let categories: Vec<Category> = item
        .children_named("category")
        .map(|element| Category {
            name: text_of(element).into_owned(),
        })
        .collect();

    (!categories.is_empty()).then_some(categories)
}
