//! State machine folding classified lines into [`Queries`].
//!
//! One [`Accumulator`] covers exactly one source. Its memory of the current
//! tag and of the previous meaningful line never leaks into another source,
//! even when several accumulators write into the same mapping in turn.

use crate::errors::ParseError;
use crate::line::{LineKind, classify};
use crate::queries::{Queries, Tag};
use crate::syntax::Syntax;

/// Folds lines of one source into a shared [`Queries`] mapping.
///
/// Blank and comment lines are ignored entirely: they neither reset the
/// current tag nor count as the "previous line" for the adjacency rule.
///
/// # Examples
/// ```
/// use tagged_queries::{Accumulator, Queries, Syntax};
///
/// let syntax = Syntax::default();
/// let mut queries = Queries::new();
/// let mut acc = Accumulator::new(&mut queries, &syntax);
/// for line in ["@count", "select count(*)", "from users"] {
///     acc.feed(line).expect("well-formed line");
/// }
/// assert_eq!(acc.finish(), 3);
/// assert_eq!(queries.get("count"), Some("select count(*) from users"));
/// ```
#[derive(Debug)]
pub struct Accumulator<'q> {
    queries: &'q mut Queries,
    syntax: &'q Syntax,
    last_tag: Option<Tag>,
    last_kind: Option<LineKind>,
    line_number: usize,
}

impl<'q> Accumulator<'q> {
    /// Start a pass writing into `queries`.
    pub fn new(queries: &'q mut Queries, syntax: &'q Syntax) -> Self {
        Self {
            queries,
            syntax,
            last_tag: None,
            last_kind: None,
            line_number: 0,
        }
    }

    /// Consume one line.
    ///
    /// # Errors
    ///
    /// - [`ParseError::TagOverwritten`] when a tag declaration directly
    ///   follows another one.
    /// - [`ParseError::TagMissing`] when query text appears with no tag in
    ///   effect. A tag declared with an empty name counts as no tag.
    pub fn feed(&mut self, raw: &str) -> Result<(), ParseError> {
        self.line_number += 1;
        let line = classify(raw, self.syntax);
        match line.kind {
            LineKind::Blank | LineKind::Comment => return Ok(()),
            LineKind::Tag => self.declare(line.value)?,
            LineKind::Query => self.extend(line.value)?,
        }
        self.last_kind = Some(line.kind);
        Ok(())
    }

    /// End the pass, returning the number of lines consumed.
    #[must_use]
    pub fn finish(self) -> usize {
        self.line_number
    }

    /// Tag currently receiving query text.
    #[must_use]
    pub fn current_tag(&self) -> Option<&Tag> {
        self.last_tag.as_ref()
    }

    fn declare(&mut self, name: &str) -> Result<(), ParseError> {
        if self.last_kind == Some(LineKind::Tag) {
            return Err(ParseError::TagOverwritten {
                line: self.line_number,
                tag: self.last_tag.take().unwrap_or_default(),
            });
        }
        self.last_tag = (!name.is_empty()).then(|| Tag::from(name));
        Ok(())
    }

    fn extend(&mut self, fragment: &str) -> Result<(), ParseError> {
        let Some(tag) = self.last_tag.as_ref() else {
            return Err(ParseError::TagMissing {
                line: self.line_number,
            });
        };
        if self.last_kind == Some(LineKind::Tag) {
            self.queries.replace(tag, fragment);
        } else {
            self.queries.append(tag, fragment);
        }
        Ok(())
    }
}
