//! Parser configuration read from environment variables.
//!
//! All settings can be overridden via environment variables prefixed with
//! `TAGGED_QUERIES_`.

use std::env;
use std::str::FromStr;

use crate::errors::ConfigError;
use crate::source::Parser;
use crate::syntax::Syntax;

const LOG_LEVEL_VAR: &str = "TAGGED_QUERIES_LOG_LEVEL";
const COMMENT_MARKER_VAR: &str = "TAGGED_QUERIES_COMMENT_MARKER";
const TAG_MARKER_VAR: &str = "TAGGED_QUERIES_TAG_MARKER";
const QUERY_PREFIX_VAR: &str = "TAGGED_QUERIES_QUERY_PREFIX";

/// How much of this crate's own tracing output to show.
///
/// The parser only emits `debug` and `trace` events, so those are the only
/// levels worth distinguishing. Defaults to `Off`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// No output from this crate.
    #[default]
    Off,
    /// One event per file opened by a directory parse, plus a summary.
    Debug,
    /// Adds skipped directory entries and per-source line counts.
    Trace,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "off" | "none" => Ok(Self::Off),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(ConfigError::InvalidLogLevel(s.to_owned())),
        }
    }
}

impl LogLevel {
    /// `EnvFilter` directive limited to this crate's target.
    #[must_use]
    pub const fn directive(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Debug => "tagged_queries=debug",
            Self::Trace => "tagged_queries=trace",
        }
    }
}

/// Configuration for parsing and logging.
///
/// # Environment Variables
///
/// - `TAGGED_QUERIES_LOG_LEVEL`: `off` (default), `debug` or `trace`
/// - `TAGGED_QUERIES_COMMENT_MARKER`: comment marker, default `--`
/// - `TAGGED_QUERIES_TAG_MARKER`: tag marker, default `@`
/// - `TAGGED_QUERIES_QUERY_PREFIX`: query prefix, default `>`; set it to an
///   empty string to disable prefix stripping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserConfig {
    /// Markers used to classify lines.
    pub syntax: Syntax,
    /// Verbosity of this crate's tracing events.
    pub log_level: LogLevel,
}

impl ParserConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`ParserConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value. Missing variables fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLogLevel`] for an unknown level and
    /// [`ConfigError::InvalidMarker`] when the resulting markers are invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let log_level = match lookup(LOG_LEVEL_VAR) {
            Some(val) => val.parse()?,
            None => LogLevel::default(),
        };

        let defaults = Syntax::default();
        let syntax = Syntax::new(
            lookup(COMMENT_MARKER_VAR).unwrap_or_else(|| defaults.comment_marker().to_owned()),
            lookup(TAG_MARKER_VAR).unwrap_or_else(|| defaults.tag_marker().to_owned()),
            lookup(QUERY_PREFIX_VAR).unwrap_or_else(|| defaults.query_prefix().to_owned()),
        )?;

        Ok(Self { syntax, log_level })
    }

    /// Apply optional overrides to an existing configuration.
    ///
    /// Overrides take precedence over environment-based values.
    #[must_use]
    pub fn apply_overrides(mut self, log_level: Option<LogLevel>, syntax: Option<Syntax>) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }

        if let Some(syntax) = syntax {
            self.syntax = syntax;
        }

        self
    }

    /// Create a new configuration with the specified log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Build a [`Parser`] using the configured markers.
    #[must_use]
    pub fn parser(&self) -> Parser {
        Parser::new(self.syntax.clone())
    }
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn log_level_parses_valid_values() {
        assert_eq!("off".parse::<LogLevel>().ok(), Some(LogLevel::Off));
        assert_eq!("none".parse::<LogLevel>().ok(), Some(LogLevel::Off));
        assert_eq!("Debug".parse::<LogLevel>().ok(), Some(LogLevel::Debug));
        assert_eq!(" TRACE ".parse::<LogLevel>().ok(), Some(LogLevel::Trace));
    }

    #[test]
    fn log_level_rejects_levels_the_crate_never_emits() {
        let err = "info".parse::<LogLevel>().unwrap_err();
        assert_eq!(err, ConfigError::InvalidLogLevel("info".to_owned()));
    }

    #[test]
    fn directives_target_this_crate() {
        assert_eq!(LogLevel::Off.directive(), "off");
        assert_eq!(LogLevel::Debug.directive(), "tagged_queries=debug");
        assert_eq!(LogLevel::Trace.directive(), "tagged_queries=trace");
    }

    #[test]
    fn missing_variables_use_defaults() {
        let config = ParserConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ParserConfig::default());
        assert_eq!(config.log_level, LogLevel::Off);
    }

    #[test]
    fn variables_override_defaults() {
        let config = ParserConfig::from_lookup(lookup_from(&[
            ("TAGGED_QUERIES_LOG_LEVEL", "debug"),
            ("TAGGED_QUERIES_COMMENT_MARKER", "#"),
            ("TAGGED_QUERIES_TAG_MARKER", "name:"),
            ("TAGGED_QUERIES_QUERY_PREFIX", ""),
        ]))
        .unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.syntax.comment_marker(), "#");
        assert_eq!(config.syntax.tag_marker(), "name:");
        assert_eq!(config.syntax.query_prefix(), "");
    }

    #[test]
    fn invalid_markers_are_reported() {
        let err = ParserConfig::from_lookup(lookup_from(&[("TAGGED_QUERIES_TAG_MARKER", "--")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMarker(_)));
    }

    #[test]
    fn invalid_log_level_is_reported() {
        let err = ParserConfig::from_lookup(lookup_from(&[("TAGGED_QUERIES_LOG_LEVEL", "chatty")]))
            .unwrap_err();
        assert!(err.to_string().contains("unknown log level"));
    }

    #[test]
    fn apply_overrides_updates_selected_fields() {
        let custom = Syntax::new("#", ":", "").unwrap();
        let config =
            ParserConfig::default().apply_overrides(Some(LogLevel::Trace), Some(custom.clone()));
        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.syntax, custom);

        let config = ParserConfig::default().apply_overrides(None, None);
        assert_eq!(config, ParserConfig::default());
    }

    #[test]
    fn parser_uses_configured_syntax() {
        let syntax = Syntax::new("#", ":", "").unwrap();
        let config = ParserConfig::default().apply_overrides(None, Some(syntax));
        let queries = config.parser().parse_str("# c\n:one\nselect 1\n").unwrap();
        assert_eq!(queries.get("one"), Some("select 1"));
    }
}
