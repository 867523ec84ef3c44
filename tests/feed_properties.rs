//! Property tests for feed extraction invariants.
//!
//! Documents are generated from small, XML-safe text fragments so every case
//! is well-formed and the expected record can be computed directly.

use fastfeed::{parse, FeedKind};
use proptest::prelude::*;

/// Text that needs no escaping and is not whitespace-only.
fn fragment() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 .,!?-]{0,15}"
}

fn rss_with_titles(titles: &[String]) -> String {
    let items: String = titles
        .iter()
        .map(|title| format!("<item><title>{title}</title></item>"))
        .collect();
    format!("<rss version=\"2.0\"><channel><title>Feed</title>{items}</channel></rss>")
}

fn atom_with_ids(ids: &[String]) -> String {
    let entries: String = ids
        .iter()
        .map(|id| format!("<entry><id>{id}</id></entry>"))
        .collect();
    format!("<feed xmlns=\"http://www.w3.org/2005/Atom\"><title>Feed</title>{entries}</feed>")
}

proptest! {
    #[test]
    fn rss_items_follow_document_order(titles in prop::collection::vec(fragment(), 0..12)) {
        let feed = parse(&rss_with_titles(&titles)).unwrap();

        prop_assert_eq!(feed.kind, FeedKind::Rss);
        let extracted: Vec<String> = feed
            .items
            .iter()
            .map(|item| item.title.clone().unwrap_or_default())
            .collect();
        prop_assert_eq!(extracted, titles);
    }

    #[test]
    fn atom_entries_follow_document_order(ids in prop::collection::vec(fragment(), 0..12)) {
        let feed = parse(&atom_with_ids(&ids)).unwrap();

        prop_assert_eq!(feed.kind, FeedKind::Atom);
        let extracted: Vec<String> = feed
            .items
            .iter()
            .map(|item| item.id.clone().unwrap_or_default())
            .collect();
        prop_assert_eq!(extracted, ids);
    }

    #[test]
    fn cdata_fragments_concatenate_without_separator(parts in prop::collection::vec(fragment(), 1..6)) {
        let title: String = parts.iter().map(|part| format!("<![CDATA[{part}]]>")).collect();
        let xml = format!("<rss><channel><title>{title}</title></channel></rss>");

        let feed = parse(&xml).unwrap();
        prop_assert_eq!(feed.title, Some(parts.concat()));
    }

    #[test]
    fn parsing_is_idempotent(titles in prop::collection::vec(fragment(), 0..8)) {
        let xml = rss_with_titles(&titles);
        prop_assert_eq!(parse(&xml), parse(&xml));
    }

    #[test]
    fn enclosure_length_present_iff_integer(length in "[0-9a-z]{0,8}") {
        let xml = format!(
            r#"<rss><channel><item><enclosure url="u" length="{length}"/></item></channel></rss>"#
        );
        let feed = parse(&xml).unwrap();
        let enclosure = feed.items[0].enclosure.clone().unwrap();

        prop_assert_eq!(enclosure.length, length.parse::<u64>().ok());
        let is_numeric = !length.is_empty() && length.bytes().all(|b| b.is_ascii_digit());
        prop_assert_eq!(enclosure.length.is_some(), is_numeric);
    }

    #[test]
    fn fallback_date_always_wins(primary in fragment(), fallback in fragment()) {
        let rss = format!(
            "<rss><channel><item><dc:date>{fallback}</dc:date><pubDate>{primary}</pubDate></item></channel></rss>"
        );
        let atom = format!(
            "<feed><entry><updated>{fallback}</updated><published>{primary}</published></entry></feed>"
        );

        prop_assert_eq!(parse(&rss).unwrap().items[0].date.clone(), Some(fallback.clone()));
        prop_assert_eq!(parse(&atom).unwrap().items[0].date.clone(), Some(fallback));
    }
}
