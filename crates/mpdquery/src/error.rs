//! Error types for mpdquery

use std::fmt;
use thiserror::Error;

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// `<?xml` without a closing `?>`
    MalformedDeclaration,
    /// `<!--` without a closing `-->`
    UnterminatedComment,
    /// No `<` ... `>` pair where an element was expected
    NoNodeContent,
    /// The closing tag of an element is missing
    NoClosingTag { name: String },
    /// A tag carries no name
    EmptyNodeContent,
    /// A token inside a tag is neither an attribute nor part of a value
    UnparsableAttribute { token: String },
    MaxDepthExceeded { max: u16 },
    MaxSizeExceeded { max: usize },
    /// The path expression is empty
    InvalidPath,
    /// A path segment is empty
    InvalidExpression,
    /// `[@` without a closing `]`
    UnterminatedPredicate,
    /// A predicate without `=`
    InvalidAttributeSelector { selector: String },
}

impl ErrorKind {
    /// Whether the error comes from evaluating a query rather than parsing a document
    pub const fn is_query_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPath
                | Self::InvalidExpression
                | Self::UnterminatedPredicate
                | Self::InvalidAttributeSelector { .. }
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedDeclaration => write!(f, "xml declaration has no closing ?>"),
            Self::UnterminatedComment => write!(f, "comment has no closing -->"),
            Self::NoNodeContent => write!(f, "no node content found"),
            Self::NoClosingTag { name } => write!(f, "no closing tag found for: {name}"),
            Self::EmptyNodeContent => write!(f, "there is no node content to parse"),
            Self::UnparsableAttribute { token } => write!(f, "unparsable attribute: {token}"),
            Self::MaxDepthExceeded { max } => write!(f, "max depth exceeded: {max}"),
            Self::MaxSizeExceeded { max } => write!(f, "max size exceeded: {max}"),
            Self::InvalidPath => write!(f, "invalid path"),
            Self::InvalidExpression => write!(f, "invalid expression"),
            Self::UnterminatedPredicate => {
                write!(f, "attribute selector has no closing bracket")
            }
            Self::InvalidAttributeSelector { selector } => write!(
                f,
                "invalid attribute selector: {selector}, expected [@attrName=\"attrValue\"]"
            ),
        }
    }
}

/// Main error type for mpdquery
#[derive(Error, Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    offset: Option<usize>,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            offset: None,
            message,
        }
    }

    pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            offset: None,
            message: message.into(),
        }
    }

    /// Create error at a byte offset of the preprocessed document
    pub fn at(kind: ErrorKind, offset: usize) -> Self {
        Self::new(kind).with_offset(offset)
    }

    /// Attach an offset unless one is already set
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset.get_or_insert(offset);
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            Some(offset) => write!(f, "error at byte {offset}: {}", self.message),
            None => write!(f, "error: {}", self.message),
        }
    }
}

/// Result type alias for mpdquery
pub type Result<T> = std::result::Result<T, Error>;
