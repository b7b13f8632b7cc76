//! Line sources feeding the accumulator: readers, strings and directories.
//!
//! Directory access goes through `cap-std` so every file is opened relative
//! to the directory handle obtained up front.

use std::io::{self, BufRead, BufReader, Read};

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, File};
use tracing::{debug, trace};

use crate::accumulator::Accumulator;
use crate::errors::ParseError;
use crate::queries::Queries;
use crate::syntax::Syntax;

/// Parser bound to a particular [`Syntax`].
///
/// The free functions in this crate use [`Syntax::default`]; build a
/// `Parser` to work with other markers.
///
/// # Examples
/// ```
/// use tagged_queries::{Parser, Syntax};
///
/// let parser = Parser::new(Syntax::new("#", "name:", "").expect("valid markers"));
/// let queries = parser.parse_str("name: ping\nselect 1\n").expect("valid input");
/// assert_eq!(queries.get("ping"), Some("select 1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parser {
    syntax: Syntax,
}

impl Parser {
    /// Create a parser using `syntax`.
    #[must_use]
    pub const fn new(syntax: Syntax) -> Self {
        Self { syntax }
    }

    /// Markers this parser recognises.
    #[must_use]
    pub const fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    /// Fold a sequence of lines into `queries`.
    ///
    /// The sequence is consumed in order until it ends or an error occurs.
    ///
    /// # Errors
    ///
    /// Returns the first structural error, or the first I/O error yielded by
    /// `lines`, unchanged.
    pub fn parse_lines<I, S>(&self, lines: I, queries: &mut Queries) -> Result<(), ParseError>
    where
        I: IntoIterator<Item = io::Result<S>>,
        S: AsRef<str>,
    {
        let mut acc = Accumulator::new(queries, &self.syntax);
        for line in lines {
            acc.feed(line?.as_ref())?;
        }
        let consumed = acc.finish();
        trace!(lines = consumed, "source exhausted");
        Ok(())
    }

    /// Parse `reader` into a fresh mapping.
    ///
    /// # Errors
    ///
    /// See [`Parser::parse_lines`]. Invalid UTF-8 is reported as an I/O
    /// error of kind [`io::ErrorKind::InvalidData`].
    pub fn parse_reader(&self, reader: impl Read) -> Result<Queries, ParseError> {
        let mut queries = Queries::new();
        self.parse_reader_into(reader, &mut queries)?;
        Ok(queries)
    }

    /// Parse `reader` into an existing mapping, overwriting tags it
    /// redeclares.
    ///
    /// # Errors
    ///
    /// See [`Parser::parse_reader`].
    pub fn parse_reader_into(
        &self,
        reader: impl Read,
        queries: &mut Queries,
    ) -> Result<(), ParseError> {
        self.parse_lines(BufReader::new(reader).lines(), queries)
    }

    /// Parse an in-memory string.
    ///
    /// # Errors
    ///
    /// Returns a structural [`ParseError`]; strings never fail to read.
    pub fn parse_str(&self, text: &str) -> Result<Queries, ParseError> {
        let mut queries = Queries::new();
        self.parse_lines(text.lines().map(Ok::<_, io::Error>), &mut queries)?;
        Ok(queries)
    }

    /// Parse every file directly inside `dir` into one mapping.
    ///
    /// Subdirectories are skipped and not descended into, as are entries
    /// whose names are not valid UTF-8. Files are visited in lexical order of
    /// their names; each gets its own accumulator, so a tag redeclared by a
    /// later file replaces the earlier definition.
    ///
    /// The directory handle is only used for listing. Each file is opened by
    /// its full path, so symlinks pointing outside `dir` are followed.
    ///
    /// # Errors
    ///
    /// Stops at the first failure: listing or opening the directory, opening
    /// or reading a file, or a structural error inside a file.
    pub fn parse_directory(&self, dir: impl AsRef<Utf8Path>) -> Result<Queries, ParseError> {
        let path = dir.as_ref();
        let handle = Dir::open_ambient_dir(path, ambient_authority())?;
        let mut queries = Queries::new();
        for name in sorted_file_names(&handle)? {
            debug!(dir = %path, file = %name, "parsing query file");
            let file = File::open_ambient(path.join(&name), ambient_authority())?;
            self.parse_reader_into(file, &mut queries)?;
        }
        debug!(dir = %path, tags = queries.len(), "parsed query directory");
        Ok(queries)
    }
}

fn sorted_file_names(dir: &Dir) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in dir.entries()? {
        let entry = entry?;
        let Ok(name) = entry.file_name() else {
            trace!("skipping entry with a non-UTF-8 name");
            continue;
        };
        if entry.file_type()?.is_dir() {
            trace!(entry = %name, "skipping subdirectory");
            continue;
        }
        names.push(name);
    }
    names.sort_unstable();
    Ok(names)
}

/// Parse `reader` with the default syntax.
///
/// # Errors
///
/// See [`Parser::parse_reader`].
pub fn parse_reader(reader: impl Read) -> Result<Queries, ParseError> {
    Parser::default().parse_reader(reader)
}

/// Parse `reader` into an existing mapping with the default syntax.
///
/// # Errors
///
/// See [`Parser::parse_reader_into`].
pub fn parse_reader_into(reader: impl Read, queries: &mut Queries) -> Result<(), ParseError> {
    Parser::default().parse_reader_into(reader, queries)
}

/// Parse a string with the default syntax.
///
/// # Errors
///
/// See [`Parser::parse_str`].
pub fn parse_str(text: &str) -> Result<Queries, ParseError> {
    Parser::default().parse_str(text)
}

/// Fold a sequence of lines into `queries` with the default syntax.
///
/// # Errors
///
/// See [`Parser::parse_lines`].
pub fn parse_lines<I, S>(lines: I, queries: &mut Queries) -> Result<(), ParseError>
where
    I: IntoIterator<Item = io::Result<S>>,
    S: AsRef<str>,
{
    Parser::default().parse_lines(lines, queries)
}

/// Parse every file in `dir` with the default syntax.
///
/// # Errors
///
/// See [`Parser::parse_directory`].
pub fn parse_directory(dir: impl AsRef<Utf8Path>) -> Result<Queries, ParseError> {
    Parser::default().parse_directory(dir)
}
