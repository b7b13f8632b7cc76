//! Markers that drive line classification.

use crate::errors::ConfigError;

/// Default comment marker.
pub const DEFAULT_COMMENT_MARKER: &str = "--";
/// Default tag-declaration marker.
pub const DEFAULT_TAG_MARKER: &str = "@";
/// Default query prefix.
pub const DEFAULT_QUERY_PREFIX: &str = ">";

/// The set of markers recognised at the start of a line.
///
/// Markers are matched after any leading whitespace. The comment marker takes
/// priority over the tag marker, which in turn takes priority over the query
/// prefix. An empty query prefix disables prefix stripping.
///
/// # Examples
/// ```
/// use tagged_queries::Syntax;
///
/// let syntax = Syntax::new("#", ":", "").expect("markers are valid");
/// assert_eq!(syntax.tag_marker(), ":");
/// assert!(Syntax::new("", ":", "").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syntax {
    comment_marker: String,
    tag_marker: String,
    query_prefix: String,
}

impl Default for Syntax {
    fn default() -> Self {
        Self {
            comment_marker: DEFAULT_COMMENT_MARKER.to_owned(),
            tag_marker: DEFAULT_TAG_MARKER.to_owned(),
            query_prefix: DEFAULT_QUERY_PREFIX.to_owned(),
        }
    }
}

impl Syntax {
    /// Build a syntax from explicit markers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMarker`] when the comment or tag marker
    /// is empty, when any marker contains whitespace, or when a marker starts
    /// with one checked before it (the tag marker with the comment marker, the
    /// query prefix with either), since such lines could never be reached.
    pub fn new(
        comment_marker: impl Into<String>,
        tag_marker: impl Into<String>,
        query_prefix: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let syntax = Self {
            comment_marker: comment_marker.into(),
            tag_marker: tag_marker.into(),
            query_prefix: query_prefix.into(),
        };
        syntax.validate()?;
        Ok(syntax)
    }

    /// Check the marker invariants described on [`Syntax::new`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMarker`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_marker("comment", &self.comment_marker)?;
        require_marker("tag", &self.tag_marker)?;
        if self.query_prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidMarker(format!(
                "query prefix '{}' must not contain whitespace",
                self.query_prefix
            )));
        }
        reject_shadowed("tag marker", &self.tag_marker, "comment marker", &self.comment_marker)?;
        if !self.query_prefix.is_empty() {
            reject_shadowed(
                "query prefix",
                &self.query_prefix,
                "comment marker",
                &self.comment_marker,
            )?;
            reject_shadowed("query prefix", &self.query_prefix, "tag marker", &self.tag_marker)?;
        }
        Ok(())
    }

    /// Marker introducing a comment line.
    #[must_use]
    pub fn comment_marker(&self) -> &str {
        &self.comment_marker
    }

    /// Marker introducing a tag declaration.
    #[must_use]
    pub fn tag_marker(&self) -> &str {
        &self.tag_marker
    }

    /// Prefix stripped from query lines, empty when disabled.
    #[must_use]
    pub fn query_prefix(&self) -> &str {
        &self.query_prefix
    }

    /// Replace the comment marker.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMarker`] if the result is invalid.
    pub fn with_comment_marker(mut self, marker: impl Into<String>) -> Result<Self, ConfigError> {
        self.comment_marker = marker.into();
        self.validate()?;
        Ok(self)
    }

    /// Replace the tag marker.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMarker`] if the result is invalid.
    pub fn with_tag_marker(mut self, marker: impl Into<String>) -> Result<Self, ConfigError> {
        self.tag_marker = marker.into();
        self.validate()?;
        Ok(self)
    }

    /// Replace the query prefix; pass an empty string to disable it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMarker`] if the result is invalid.
    pub fn with_query_prefix(mut self, prefix: impl Into<String>) -> Result<Self, ConfigError> {
        self.query_prefix = prefix.into();
        self.validate()?;
        Ok(self)
    }
}

fn require_marker(name: &str, marker: &str) -> Result<(), ConfigError> {
    if marker.is_empty() {
        return Err(ConfigError::InvalidMarker(format!(
            "{name} marker must not be empty"
        )));
    }
    if marker.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidMarker(format!(
            "{name} marker '{marker}' must not contain whitespace"
        )));
    }
    Ok(())
}

/// Lines are tested against the comment marker, then the tag marker, then
/// the query prefix; a marker starting with an earlier one is unreachable.
fn reject_shadowed(
    name: &str,
    marker: &str,
    earlier_name: &str,
    earlier: &str,
) -> Result<(), ConfigError> {
    if marker.starts_with(earlier) {
        return Err(ConfigError::InvalidMarker(format!(
            "{name} '{marker}' starts with {earlier_name} '{earlier}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_markers() {
        let syntax = Syntax::default();
        assert_eq!(syntax.comment_marker(), "--");
        assert_eq!(syntax.tag_marker(), "@");
        assert_eq!(syntax.query_prefix(), ">");
        assert!(syntax.validate().is_ok());
    }

    #[rstest]
    #[case("", "@", ">", "comment marker must not be empty")]
    #[case("--", "", ">", "tag marker must not be empty")]
    #[case("- -", "@", ">", "comment marker '- -' must not contain whitespace")]
    #[case("--", "@ ", ">", "tag marker '@ ' must not contain whitespace")]
    #[case("--", "@", "\t>", "query prefix '\t>' must not contain whitespace")]
    #[case("#", "#", "", "tag marker '#' starts with comment marker '#'")]
    #[case("#", "#name:", "", "tag marker '#name:' starts with comment marker '#'")]
    #[case("--", "@", "--", "query prefix '--' starts with comment marker '--'")]
    #[case("--", "@", "--x", "query prefix '--x' starts with comment marker '--'")]
    #[case("--", "@", "@>", "query prefix '@>' starts with tag marker '@'")]
    #[case("--", "name:", "name:", "query prefix 'name:' starts with tag marker 'name:'")]
    fn rejects_invalid_markers(
        #[case] comment: &str,
        #[case] tag: &str,
        #[case] prefix: &str,
        #[case] message: &str,
    ) {
        let Err(ConfigError::InvalidMarker(found)) = Syntax::new(comment, tag, prefix) else {
            panic!("expected marker error");
        };
        assert_eq!(found, message);
    }

    #[rstest]
    #[case("#", "!", "-")]
    #[case("--", "-", ">")]
    #[case("--", "@", "-")]
    #[case("--", "@@", "@")]
    fn markers_reachable_in_classification_order_are_accepted(
        #[case] comment: &str,
        #[case] tag: &str,
        #[case] prefix: &str,
    ) {
        assert!(Syntax::new(comment, tag, prefix).is_ok());
    }

    #[test]
    fn empty_query_prefix_is_allowed() {
        assert!(Syntax::new("--", "@", "").is_ok());
    }

    #[test]
    fn builders_revalidate() {
        assert!(Syntax::default().with_tag_marker("--").is_err());
        let Ok(syntax) = Syntax::default().with_query_prefix("|") else {
            panic!("pipe prefix should be accepted");
        };
        assert_eq!(syntax.query_prefix(), "|");
    }
}
