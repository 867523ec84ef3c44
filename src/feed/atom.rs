use crate::feed::author::{self, Author};
use crate::feed::model::{Feed, FeedKind, Item};
use crate::feed::text::child_string;
use crate::feed::{extensions, links, ParseOptions};
use crate::xml::Element;

/// Extracts an Atom 1.0 feed from its `<feed>` root.
pub(crate) fn extract(root: &Element, options: &ParseOptions) -> Feed {
    let mut feed = Feed::new(FeedKind::Atom);
    feed.title = child_string(root, "title");
    feed.id = child_string(root, "id");
    feed.link = links::atom_feed_link(root);

    if let Some(Author { name, uri, email }) = author::resolve(root) {
        feed.author = Some(name);
        feed.author_uri = uri;
        feed.author_email = email;
    }

    if options.extract_extensions {
        feed.extensions = extensions::harvest(root);
    }

    feed.items = root
        .children_named("entry")
        .map(|entry| extract_entry(entry, options))
        .collect();

    tracing::debug!(items = feed.items.len(), "Extracted Atom feed");
    feed
}

fn extract_entry(element: &Element, options: &ParseOptions) -> Item {
    let links = links::atom_links(element);

    let mut item = Item {
        id: child_string(element, "id"),
        link: links::primary_link(&links),
        links: Some(links),
        title: child_string(element, "title"),
        date: child_string(element, "published"),
        ..Item::default()
    };

    if let Some(date) = child_string(element, "updated") {
        item.date = Some(date);
    }

    if let Some(Author { name, uri, email }) = author::resolve(element) {
        item.author = Some(name);
        item.author_uri = uri;
        item.author_email = email;
    }

    if options.extract_content {
        item.summary = child_string(element, "summary");
        item.content = child_string(element, "content");
    }

    if options.extract_extensions {
        item.extensions = extensions::harvest(element);
    }

    item
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::model::Link;
    use crate::xml::Document;
    use pretty_assertions::assert_eq;

    fn extract_text(text: &str, options: &ParseOptions) -> Feed {
        let doc = Document::parse(text).unwrap();
        extract(doc.root().unwrap(), options)
    }

    #[test]
    fn test_feed_fields() {
        let feed = extract_text(
            r#"<feed xmlns="http://www.w3.org/2005/Atom">
                <title>Example</title>
                <id>urn:uuid:1</id>
                <link href="https://example.com" rel="alternate"/>
                <link href="https://example.com/feed.xml" rel="self"/>
                <author><name>Jane</name><email>jane@example.com</email></author>
            </feed>"#,
            &ParseOptions::default(),
        );

        assert_eq!(feed.kind, FeedKind::Atom);
        assert_eq!(feed.title.as_deref(), Some("Example"));
        assert_eq!(feed.id.as_deref(), Some("urn:uuid:1"));
        assert_eq!(feed.link.as_deref(), Some("https://example.com"));
        assert_eq!(feed.author.as_deref(), Some("Jane"));
        assert_eq!(feed.author_uri, None);
        assert_eq!(feed.author_email.as_deref(), Some("jane@example.com"));
        assert_eq!(feed.description, None);
    }

    #[test]
    fn test_entry_fields() {
        let feed = extract_text(
            r#"<feed><entry>
                <id>e1</id>
                <title>First</title>
                <link rel="self" href="http://example.com/self"/>
                <link rel="alternate" href="http://example.com/1"/>
                <published>2024-01-01T00:00:00Z</published>
                <author>Bare Name</author>
                <summary>Short</summary>
                <content type="html">Long</content>
            </entry></feed>"#,
            &ParseOptions::default(),
        );

        let item = &feed.items[0];
        assert_eq!(item.id.as_deref(), Some("e1"));
        assert_eq!(item.title.as_deref(), Some("First"));
        assert_eq!(item.link.as_deref(), Some("http://example.com/1"));
        assert_eq!(
            item.links.as_deref(),
            Some(
                &[
                    Link {
                        rel: Some("self".to_string()),
                        href: Some("http://example.com/self".to_string()),
                        ..Link::default()
                    },
                    Link {
                        rel: Some("alternate".to_string()),
                        href: Some("http://example.com/1".to_string()),
                        ..Link::default()
                    },
                ][..]
            )
        );
        assert_eq!(item.date.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(item.author.as_deref(), Some("Bare Name"));
        assert_eq!(item.summary.as_deref(), Some("Short"));
        assert_eq!(item.content.as_deref(), Some("Long"));
        assert_eq!(item.description, None);
        assert_eq!(item.enclosure, None);
        assert_eq!(item.categories, None);
    }

    #[test]
    fn test_updated_overrides_published() {
        let feed = extract_text(
            "<feed><entry><updated>new</updated><published>old</published></entry></feed>",
            &ParseOptions::default(),
        );
        assert_eq!(feed.items[0].date.as_deref(), Some("new"));
    }

    #[test]
    fn test_entry_without_links_has_empty_collection() {
        let feed = extract_text("<feed><entry><id>1</id></entry></feed>", &ParseOptions::default());
        assert_eq!(feed.items[0].links.as_deref(), Some(&[][..]));
        assert_eq!(feed.items[0].link, None);
    }

    #[test]
    fn test_content_suppressed() {
        let options = ParseOptions::default().extract_content(false);
        let feed = extract_text(
            "<feed><entry><summary>S</summary><content>C</content></entry></feed>",
            &options,
        );
        assert_eq!(feed.items[0].summary, None);
        assert_eq!(feed.items[0].content, None);
    }

    #[test]
    fn test_entry_author_structured() {
        let feed = extract_text(
            "<feed><entry><author><name>N</name><uri>http://n</uri></author></entry></feed>",
            &ParseOptions::default(),
        );
        assert_eq!(feed.items[0].author.as_deref(), Some("N"));
        assert_eq!(feed.items[0].author_uri.as_deref(), Some("http://n"));
        assert_eq!(feed.items[0].author_email, None);
    }
}
