//! Configuration options for decoding.
//!
//! This module provides types to customize how lines are routed:
//!
//! - [`DecodeOptions`]: main configuration struct
//! - [`NestedSearch`]: how far a name is searched for among nested records
//!
//! ## Examples
//!
//! ```rust
//! use mparse::{decode_with_options, DecodeOptions, NestedSearch};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Default)]
//! struct Note { title: String, body: String }
//!
//! let options = DecodeOptions::new()
//!     .with_marker('#')
//!     .with_default_field("body")
//!     .with_nested_search(NestedSearch::AllSiblings);
//!
//! let mut note = Note::default();
//! decode_with_options("#title Groceries\nmilk\neggs", &mut note, options).unwrap();
//! assert_eq!(note.title, "Groceries");
//! assert_eq!(note.body, "milk\neggs");
//! ```

/// Which nested records a name is searched for in when the current record
/// does not own it.
///
/// # Examples
///
/// ```rust
/// use mparse::NestedSearch;
///
/// assert_eq!(NestedSearch::default(), NestedSearch::FirstOnly);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NestedSearch {
    /// Descend only into the first nested record field at each level.
    /// A name that lives only in a later sibling is never reached.
    #[default]
    FirstOnly,
    /// Try every nested record field in declaration order until one owns
    /// the name.
    AllSiblings,
}

/// Configuration options for decoding.
///
/// # Examples
///
/// ```rust
/// use mparse::DecodeOptions;
///
/// let options = DecodeOptions::new();
/// assert_eq!(options.marker, '/');
/// assert_eq!(options.default_field, "default");
/// assert!(!options.strict_default);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DecodeOptions {
    pub marker: char,
    pub nested_search: NestedSearch,
    pub default_field: String,
    pub strict_default: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            marker: '/',
            nested_search: NestedSearch::default(),
            default_field: "default".to_string(),
            strict_default: false,
        }
    }
}

impl DecodeOptions {
    /// Creates default options: `/` marker, first-only nested search, lines
    /// accumulated into the field named `default`, unroutable lines dropped.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the character that marks a line as addressing a field.
    #[must_use]
    pub fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }

    #[must_use]
    pub fn with_nested_search(mut self, nested_search: NestedSearch) -> Self {
        self.nested_search = nested_search;
        self
    }

    /// Designates the accumulator field by name.
    ///
    /// The name is matched case-insensitively when decoding, like any other
    /// field name, and is stored as given.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mparse::DecodeOptions;
    ///
    /// let options = DecodeOptions::new().with_default_field("Notes");
    /// assert_eq!(options.default_field, "Notes");
    /// ```
    #[must_use]
    pub fn with_default_field(mut self, name: impl Into<String>) -> Self {
        self.default_field = name.into();
        self
    }

    /// Fails the decode with [`Error::UnroutableDefault`](crate::Error::UnroutableDefault)
    /// instead of dropping a line when no accumulator field exists.
    #[must_use]
    pub fn strict_default(mut self, strict: bool) -> Self {
        self.strict_default = strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let options = DecodeOptions::new()
            .with_marker('!')
            .with_nested_search(NestedSearch::AllSiblings)
            .with_default_field("REST")
            .strict_default(true);

        assert_eq!(options.marker, '!');
        assert_eq!(options.nested_search, NestedSearch::AllSiblings);
        assert_eq!(options.default_field, "REST");
        assert!(options.strict_default);
    }
}
