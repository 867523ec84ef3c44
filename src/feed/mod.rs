//! Feed extraction: RSS 2.0 and Atom 1.0 documents into normalized records.
//!
//! - **Dialect detection**: the first top-level `<rss>`, else `<feed>`, picked by [`FeedKind::detect`]
//! - **Extraction**: one extractor per dialect, reached through [`FeedKind::extract`]
//! - **Field resolution**: shared helpers for text, authors, links, enclosures,
//!   categories and namespaced extensions
//!
//! # Example
//!
//! ```
//! use fastfeed::{parse, FeedKind};
//!
//! let feed = parse("<rss><channel><title>T</title><item><guid>g1</guid></item></channel></rss>")?;
//! assert_eq!(feed.kind, FeedKind::Rss);
//! assert_eq!(feed.items[0].id.as_deref(), Some("g1"));
//! # Ok::<(), fastfeed::FeedError>(())
//! ```

mod atom;
mod author;
mod dialect;
mod error;
mod extensions;
mod links;
mod model;
mod rss;
mod text;

pub use error::FeedError;
pub use model::{Attributes, Category, Enclosure, Extension, Feed, FeedKind, Item, Link};

use crate::xml::Document;

/// What to extract besides the always-present metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Body fields: `description`/`content` for RSS, `summary`/`content` for Atom.
    pub extract_content: bool,
    /// Flat namespaced elements at feed and item level.
    pub extract_extensions: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            extract_content: true,
            extract_extensions: false,
        }
    }
}

impl ParseOptions {
    pub fn extract_content(mut self, enabled: bool) -> Self {
        self.extract_content = enabled;
        self
    }

    pub fn extract_extensions(mut self, enabled: bool) -> Self {
        self.extract_extensions = enabled;
        self
    }
}

/// Parses a feed with the default options (content on, extensions off).
pub fn parse(xml: &str) -> Result<Feed, FeedError> {
    parse_with_options(xml, &ParseOptions::default())
}

/// Parses an RSS or Atom document into a [`Feed`].
///
/// # Errors
///
/// - [`FeedError::MalformedDocument`] if the text is not well-formed XML
/// - [`FeedError::UnrecognizedFeedType`] if no top-level element is `<rss>` or `<feed>`
/// - [`FeedError::InvalidRssStructure`] if an RSS document has no `<channel>`
pub fn parse_with_options(xml: &str, options: &ParseOptions) -> Result<Feed, FeedError> {
    let document = Document::parse(xml).map_err(|e| FeedError::malformed(xml, e))?;

    // Stray top-level elements before the feed element are tolerated
    let root = document
        .element("rss")
        .or_else(|| document.element("feed"))
        .or_else(|| document.root())
        .ok_or(FeedError::UnrecognizedFeedType { root: None })?;

    let kind = FeedKind::detect(root)?;
    tracing::trace!(?kind, bytes = xml.len(), "Detected feed dialect");
    kind.extract(root, options)
}
