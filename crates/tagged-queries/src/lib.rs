//! Load tagged query text from plain files.
//!
//! A query file pairs tag declarations with the lines of query text that
//! follow them:
//!
//! ```text
//! -- users.sql
//! @find-user
//! select *
//! from users
//! where id = $1
//!
//! @count-users
//! select count(*) from users
//! ```
//!
//! Parsing yields a [`Queries`] mapping in which continuation lines are
//! joined with single spaces, so `find-user` maps to
//! `select * from users where id = $1`.
//!
//! Blank lines and `--` comments are ignored. A query line must follow a
//! tag, and a tag must not directly follow another tag. A line starting with
//! `>` is always query text, which lets queries contain lines that would
//! otherwise read as comments or tags; the `>` itself is dropped.
//!
//! # Configuration
//!
//! Markers can be changed with [`Syntax`] or through the `TAGGED_QUERIES_*`
//! environment variables read by [`ParserConfig::from_env`].

mod accumulator;
pub mod config;
mod errors;
mod line;
pub mod logging;
mod queries;
mod source;
mod syntax;

pub use accumulator::Accumulator;
pub use config::{LogLevel, ParserConfig};
pub use errors::{ConfigError, ParseError};
pub use line::{Line, LineKind, classify};
pub use queries::{Queries, Tag};
pub use source::{
    Parser, parse_directory, parse_lines, parse_reader, parse_reader_into, parse_str,
};
pub use syntax::{DEFAULT_COMMENT_MARKER, DEFAULT_QUERY_PREFIX, DEFAULT_TAG_MARKER, Syntax};
