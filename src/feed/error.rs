use thiserror::Error;

use crate::xml::{locate, SyntaxError};

/// Errors that end a [`parse`](crate::parse) call.
///
/// Missing or unparsable fields are never errors; they are left out of the
/// record. Only document-level problems surface here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// The input is not well-formed XML.
    #[error("Error on line {line} column {column}: {message}")]
    MalformedDocument {
        line: usize,
        column: usize,
        message: String,
    },

    /// The root element is neither `<rss>` nor `<feed>`.
    /// `root` is `None` when the document has no element at all.
    #[error("Invalid feed.")]
    UnrecognizedFeedType { root: Option<String> },

    /// An `<rss>` root without a `<channel>` child.
    #[error("Invalid RSS channel.")]
    InvalidRssStructure,
}

impl FeedError {
    /// Wraps a tree-builder error, locating its offset in `text`.
    pub(crate) fn malformed(text: &str, error: SyntaxError) -> Self {
        let (line, column) = locate(text, error.offset);
        FeedError::MalformedDocument {
            line,
            column,
            message: error.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_carries_location() {
        let text = "<rss>\n  <channel>";
        let error = SyntaxError {
            offset: text.len(),
            message: "unexpected end of data".to_string(),
        };

        let err = FeedError::malformed(text, error);
        assert_eq!(
            err,
            FeedError::MalformedDocument {
                line: 2,
                column: 11,
                message: "unexpected end of data".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "Error on line 2 column 11: unexpected end of data"
        );
    }

    #[test]
    fn test_classification_messages() {
        let err = FeedError::UnrecognizedFeedType {
            root: Some("nonsense".to_string()),
        };
        assert_eq!(err.to_string(), "Invalid feed.");
        assert_eq!(FeedError::InvalidRssStructure.to_string(), "Invalid RSS channel.");
    }
}
