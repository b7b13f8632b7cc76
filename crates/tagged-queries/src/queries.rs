//! The tag-to-query mapping produced by a parse.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::collections::hash_map;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier naming a single query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// Return the tag name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the tag name is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Tag {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Tag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Mapping from [`Tag`] to accumulated query text.
///
/// Lookups accept plain string slices:
///
/// ```
/// use tagged_queries::parse_str;
///
/// let queries = parse_str("@one\nselect 1\n").expect("valid input");
/// assert_eq!(queries.get("one"), Some("select 1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Queries(HashMap<Tag, String>);

impl Queries {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Query text stored under `tag`.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.0.get(tag).map(String::as_str)
    }

    /// Whether `tag` has an entry.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains_key(tag)
    }

    /// Number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no tags were collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over entries in arbitrary order.
    pub fn iter(&self) -> hash_map::Iter<'_, Tag, String> {
        self.0.iter()
    }

    /// Tag names in sorted order.
    #[must_use]
    pub fn tags(&self) -> Vec<&Tag> {
        let mut tags: Vec<&Tag> = self.0.keys().collect();
        tags.sort_unstable();
        tags
    }

    /// Consume the wrapper and return the underlying map.
    #[must_use]
    pub fn into_inner(self) -> HashMap<Tag, String> {
        self.0
    }

    /// Start a fresh slot for `tag`, discarding any earlier text.
    pub(crate) fn replace(&mut self, tag: &Tag, fragment: &str) {
        self.0.insert(tag.clone(), fragment.to_owned());
    }

    /// Append a continuation fragment, separated by a single space unless
    /// the stored text is empty.
    pub(crate) fn append(&mut self, tag: &Tag, fragment: &str) {
        let text = self.0.entry(tag.clone()).or_default();
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(fragment);
    }
}

impl IntoIterator for Queries {
    type Item = (Tag, String);
    type IntoIter = hash_map::IntoIter<Tag, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Queries {
    type Item = (&'a Tag, &'a String);
    type IntoIter = hash_map::Iter<'a, Tag, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(Tag, String)> for Queries {
    fn from_iter<I: IntoIterator<Item = (Tag, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
