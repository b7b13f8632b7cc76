//! Error types surfaced by parsing and configuration.
//!
//! Structural errors carry the 1-based line number at which the grammar was
//! violated. I/O failures from the line source are forwarded untouched so
//! callers can inspect the original [`std::io::Error`].

use thiserror::Error;

use crate::queries::Tag;

/// Errors returned by a parse pass.
///
/// Every variant is fatal: the pass stops at the first error and the mapping
/// being filled must not be relied upon.
///
/// # Examples
/// ```
/// use tagged_queries::{ParseError, parse_str};
///
/// let err = parse_str("select 1").unwrap_err();
/// assert!(matches!(err, ParseError::TagMissing { line: 1 }));
/// assert_eq!(err.to_string(), "query without tag at line 1");
/// ```
#[derive(Debug, Error)]
pub enum ParseError {
    /// A query line appeared before any tag declaration in its source.
    #[error("query without tag at line {line}")]
    TagMissing {
        /// Line on which the orphaned query text appeared.
        line: usize,
    },

    /// A tag declaration directly followed another one, leaving the first
    /// tag without query text.
    #[error("tag `{tag}` overwritten at line {line}")]
    TagOverwritten {
        /// Line holding the second tag declaration.
        line: usize,
        /// The earlier tag that never received a query.
        tag: Tag,
    },

    /// Reading the underlying source failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Line number of a structural error, or `None` for I/O failures.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::TagMissing { line } | Self::TagOverwritten { line, .. } => Some(*line),
            Self::Io(_) => None,
        }
    }
}

/// Errors raised while building a [`Syntax`](crate::Syntax) or
/// [`ParserConfig`](crate::ParserConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A line marker was empty, contained whitespace, or clashed with
    /// another marker.
    #[error("invalid marker: {0}")]
    InvalidMarker(String),

    /// The requested log level is not recognised.
    #[error("unknown log level '{0}', expected one of: off, debug, trace")]
    InvalidLogLevel(String),
}
