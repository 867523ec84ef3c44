//! Generic XML document tree consumed by the feed extractors.
//!
//! The extractors never see raw XML. They walk the owned tree built here:
//!
//! - [`tree`] - Builds a [`Document`] from a `quick-xml` event stream
//! - [`locate`] - Maps a byte offset back to a line/column pair for diagnostics
//!
//! The tree keeps qualified names verbatim (`dc:date` stays `dc:date`); no
//! namespace resolution takes place.

mod locate;
mod tree;

pub use locate::locate;
pub use tree::{Attribute, Document, Element, Node, NodeKind, SyntaxError};
