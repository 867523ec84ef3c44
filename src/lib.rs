//! Fast RSS 2.0 / Atom 1.0 extraction into normalized, serializable records.
//!
//! - [`feed`] - Dialect detection and per-field extraction
//! - [`xml`] - The document tree the extractors walk
//! - [`config`] - Optional TOML defaults used by the `fastfeed` binary

pub mod config;
pub mod feed;
pub mod xml;

pub use feed::{
    parse, parse_with_options, Attributes, Category, Enclosure, Extension, Feed, FeedError,
    FeedKind, Item, Link, ParseOptions,
};
