// ABOUTME: Error types for podcast feed reading.
// ABOUTME: ReaderError wraps one FailureKind: transport/tokenizer, structural, or semantic.

use thiserror::Error;

use crate::builders::Entity;

/// The document could not be retrieved or tokenized.
#[derive(Debug, Error)]
pub enum IoFailure {
    /// Reading from the file system or the response body failed.
    #[error("read failed: {0}")]
    Read(#[from] std::io::Error),

    /// The HTTP request failed or returned a non-success status.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The URI could not be turned into something we can open.
    #[error("invalid URI: {0}")]
    InvalidUri(String),

    /// The tokenizer rejected the byte stream.
    #[error("malformed XML at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },
}

/// A nesting rule of the RSS document was violated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StructuralError {
    #[error("document root must be <rss>, found <{found}>")]
    UnexpectedRoot { found: String },

    #[error("<rss> must be the document root, found it inside <{parent}>")]
    NestedRoot { parent: String },

    #[error("document has more than one root element, found <{found}> after </rss>")]
    MultipleRoots { found: String },

    #[error("document has no <rss> root element")]
    MissingRoot,

    #[error("<{element}> must be a direct child of <{expected}>, found it inside {}", describe_parent(.found))]
    MisplacedContainer {
        element: &'static str,
        expected: &'static str,
        found: Option<String>,
    },

    #[error("<rss> must contain exactly one <channel>")]
    DuplicateChannel,

    #[error("document ended with {depth} unclosed element(s)")]
    Unclosed { depth: usize },

    #[error("end tag </{name}> has no matching start tag")]
    UnbalancedEnd { name: String },

    #[error("no open {entity} builder")]
    InactiveBuilder { entity: Entity },
}

fn describe_parent(found: &Option<String>) -> String {
    match found {
        Some(parent) => format!("<{parent}>"),
        None => "the document".to_string(),
    }
}

/// The document is well nested but its content is not a usable podcast.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SemanticValidationError {
    #[error("channel has no title")]
    MissingTitle,

    #[error("channel title is empty")]
    EmptyTitle,
}

/// The specific cause wrapped by a [`ReaderError`].
#[derive(Debug, Error)]
pub enum FailureKind {
    #[error(transparent)]
    Io(#[from] IoFailure),

    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error(transparent)]
    Semantic(#[from] SemanticValidationError),
}

/// The single failure type returned by the reader.
#[derive(Debug, Error)]
#[error("podcast reader: {uri}: {kind}")]
pub struct ReaderError {
    pub uri: String,
    #[source]
    pub kind: FailureKind,
}

impl ReaderError {
    pub fn new(uri: impl Into<String>, kind: impl Into<FailureKind>) -> Self {
        Self {
            uri: uri.into(),
            kind: kind.into(),
        }
    }

    pub fn kind(&self) -> &FailureKind {
        &self.kind
    }

    pub fn is_io(&self) -> bool {
        matches!(self.kind, FailureKind::Io(_))
    }

    pub fn is_structural(&self) -> bool {
        matches!(self.kind, FailureKind::Structural(_))
    }

    pub fn is_semantic(&self) -> bool {
        matches!(self.kind, FailureKind::Semantic(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_error_classifies_kind() {
        let err = ReaderError::new("feed.xml", StructuralError::MissingRoot);
        assert!(err.is_structural());
        assert!(!err.is_io());
        assert!(!err.is_semantic());

        let err = ReaderError::new("feed.xml", SemanticValidationError::EmptyTitle);
        assert!(err.is_semantic());
    }

    #[test]
    fn test_display_includes_uri_and_cause() {
        let err = ReaderError::new(
            "https://example.com/feed.xml",
            StructuralError::MisplacedContainer {
                element: "channel",
                expected: "rss",
                found: Some("feed".to_string()),
            },
        );
        assert_eq!(
            err.to_string(),
            "podcast reader: https://example.com/feed.xml: <channel> must be a direct child of <rss>, found it inside <feed>"
        );
    }

    #[test]
    fn test_misplaced_container_without_parent() {
        let err = StructuralError::MisplacedContainer {
            element: "item",
            expected: "channel",
            found: None,
        };
        assert_eq!(
            err.to_string(),
            "<item> must be a direct child of <channel>, found it inside the document"
        );
    }
}
