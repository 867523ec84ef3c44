use crate::feed::model::{Feed, FeedKind};
use crate::feed::{atom, rss, FeedError, ParseOptions};
use crate::xml::Element;

impl FeedKind {
    /// Picks the dialect from the root element name.
    pub fn detect(root: &Element) -> Result<Self, FeedError> {
        match root.name() {
            "rss" => Ok(FeedKind::Rss),
            "feed" => Ok(FeedKind::Atom),
            other => Err(FeedError::UnrecognizedFeedType {
                root: Some(other.to_owned()),
            }),
        }
    }

    /// Runs this dialect's extractor over `root`.
    pub fn extract(self, root: &Element, options: &ParseOptions) -> Result<Feed, FeedError> {
        match self {
            FeedKind::Rss => rss::extract(root, options),
            FeedKind::Atom => Ok(atom::extract(root, options)),
        }
    }
}
