//! Line classifier turning one raw line into a [`Line`].
//!
//! Classification never fails: every input is blank, a comment, a tag
//! declaration or query text.

use crate::syntax::Syntax;

/// Category assigned to a single input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Empty or whitespace-only.
    Blank,
    /// Starts with the comment marker; the rest is discarded.
    Comment,
    /// Starts with the tag marker and declares a tag name.
    Tag,
    /// Anything else: a fragment of query text.
    Query,
}

/// A classified line borrowing its value from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Classification of the line.
    pub kind: LineKind,
    /// Tag name for [`LineKind::Tag`], query fragment for
    /// [`LineKind::Query`], empty otherwise.
    pub value: &'a str,
}

impl<'a> Line<'a> {
    const fn new(kind: LineKind, value: &'a str) -> Self {
        Self { kind, value }
    }

    /// Whether the accumulator ignores this line entirely.
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self.kind, LineKind::Blank | LineKind::Comment)
    }
}

/// Classify a line (without its terminator) under `syntax`.
///
/// Markers are recognised after leading whitespace. A tag name is trimmed;
/// a query fragment keeps its content verbatim, minus the query prefix when
/// one is present.
///
/// # Examples
/// ```
/// use tagged_queries::{LineKind, Syntax, classify};
///
/// let syntax = Syntax::default();
/// let line = classify("@find-user ", &syntax);
/// assert_eq!(line.kind, LineKind::Tag);
/// assert_eq!(line.value, "find-user");
///
/// let line = classify("> -- not a comment", &syntax);
/// assert_eq!(line.kind, LineKind::Query);
/// assert_eq!(line.value, " -- not a comment");
/// ```
#[must_use]
pub fn classify<'a>(raw: &'a str, syntax: &Syntax) -> Line<'a> {
    let content = raw.trim_start();
    if content.is_empty() {
        return Line::new(LineKind::Blank, "");
    }
    if content.starts_with(syntax.comment_marker()) {
        return Line::new(LineKind::Comment, "");
    }
    if let Some(name) = content.strip_prefix(syntax.tag_marker()) {
        return Line::new(LineKind::Tag, name.trim());
    }
    Line::new(LineKind::Query, strip_query_prefix(raw, content, syntax))
}

fn strip_query_prefix<'a>(raw: &'a str, content: &'a str, syntax: &Syntax) -> &'a str {
    let prefix = syntax.query_prefix();
    if prefix.is_empty() {
        return raw;
    }
    content.strip_prefix(prefix).unwrap_or(raw)
}
