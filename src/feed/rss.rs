use crate::feed::model::{Feed, FeedKind, Item};
use crate::feed::text::child_string;
use crate::feed::{extensions, links, FeedError, ParseOptions};
use crate::xml::Element;

/// Extracts an RSS 2.0 feed from its `<rss>` root.
pub(crate) fn extract(rss: &Element, options: &ParseOptions) -> Result<Feed, FeedError> {
    let channel = rss.child("channel").ok_or(FeedError::InvalidRssStructure)?;

    let mut feed = Feed::new(FeedKind::Rss);
    feed.title = child_string(channel, "title");
    feed.description = child_string(channel, "description");
    feed.link = child_string(channel, "link");
    feed.author = child_string(channel, "author");

    if options.extract_extensions {
        feed.extensions = extensions::harvest(channel);
    }

    feed.items = channel
        .children_named("item")
        .map(|item| extract_item(item, options))
        .collect();

    tracing::debug!(items = feed.items.len(), "Extracted RSS feed");
    Ok(feed)
}

fn extract_item(element: &Element, options: &ParseOptions) -> Item {
    let mut item = Item {
        categories: links::categories(element),
        id: child_string(element, "guid"),
        link: child_string(element, "link"),
        date: child_string(element, "pubDate"),
        ..Item::default()
    };

    // Dublin Core date overrides pubDate
    if let Some(date) = child_string(element, "dc:date") {
        item.date = Some(date);
    }

    item.title = child_string(element, "title");
    item.author = child_string(element, "author");
    item.enclosure = links::enclosure(element);

    if options.extract_content {
        item.description = child_string(element, "description");
        item.content = child_string(element, "content:encoded");
    }

    if options.extract_extensions {
        item.extensions = extensions::harvest(element);
    }

    item
}
