//! Error types for the trackpoint parser.
//!
//! Only fatal conditions live here. Missing attributes, non-numeric
//! augmentation sources and odd timestamp shapes are not errors.

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while parsing an activity file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed XML reported by the tokenizer
    #[error("XML error at byte {position}: {source}")]
    Xml {
        /// Byte offset reported by the tokenizer
        position: usize,
        /// Underlying tokenizer error
        #[source]
        source: quick_xml::Error,
    },

    /// Malformed attribute markup on a start tag
    #[error("Malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Document ended while tags were still open
    #[error("Unexpected end of document at depth {depth}: open path '{open}'")]
    UnexpectedEof {
        /// Number of tags still open
        depth: usize,
        /// Pipe-joined path of the open tags
        open: String,
    },

    /// Document contained no root element
    #[error("Document contains no root element")]
    EmptyDocument,

    /// Format selector could not be resolved
    #[error("Unknown track format: {0}")]
    UnknownDialect(String),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn xml(position: usize, source: quick_xml::Error) -> Self {
        Error::Xml { position, source }
    }
}
