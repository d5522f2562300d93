//! Field name index.
//!
//! This module provides [`FieldIndex`], an ordered map from a field's
//! effective (lowercase) name to its [`FieldKind`], built from the shape of a
//! [`Record`].
//!
//! ## Build modes
//!
//! - **Flat**: only the record's immediate fields. Nested record fields are
//!   skipped entirely.
//! - **Recursive**: immediate fields plus, for every nested record field, the
//!   recursive index of that record merged into the same namespace.
//!
//! Entries are merged by overwrite in declaration order, so on a name
//! collision the last field visited wins.
//!
//! ## Examples
//!
//! ```rust
//! use mparse::{FieldIndex, FieldKind, Record, Value};
//!
//! let inner = Record::new("Inner").with_field("A", Value::from(""));
//! let outer = Record::new("Outer")
//!     .with_field("In", Value::from(inner))
//!     .with_field("abc", Value::from(false));
//!
//! let flat = FieldIndex::build(&outer, false);
//! assert!(!flat.contains("a"));
//!
//! let all = FieldIndex::build(&outer, true);
//! assert_eq!(all.get("a"), Some(FieldKind::Text));
//! assert_eq!(all.get("abc"), Some(FieldKind::Bool));
//! ```

use crate::value::{FieldKind, Record, Value};
use indexmap::IndexMap;

/// An ordered map of effective field names to field kinds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldIndex(IndexMap<String, FieldKind>);

impl FieldIndex {
    /// Creates an empty `FieldIndex`.
    #[must_use]
    pub fn new() -> Self {
        FieldIndex(IndexMap::new())
    }

    /// Indexes the fields of `record`, descending into nested records when
    /// `recursive` is set.
    #[must_use]
    pub fn build(record: &Record, recursive: bool) -> Self {
        let mut index = FieldIndex::new();
        index.extend_from(record, recursive);
        log::trace!(
            "indexed {} names from {} (recursive: {})",
            index.len(),
            record.name(),
            recursive
        );
        index
    }

    /// Indexes any value. Values that are not records yield an empty index.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mparse::{FieldIndex, Value};
    ///
    /// assert!(FieldIndex::of(&Value::from(3i32), true).is_empty());
    /// ```
    #[must_use]
    pub fn of(value: &Value, recursive: bool) -> Self {
        match value {
            Value::Record(record) => Self::build(record, recursive),
            _ => Self::new(),
        }
    }

    fn extend_from(&mut self, record: &Record, recursive: bool) {
        for field in record.fields() {
            match field.value() {
                Value::Record(nested) => {
                    if recursive {
                        self.extend_from(nested, true);
                    }
                }
                value => {
                    self.insert(field.effective_name(), value.kind());
                }
            }
        }
    }

    /// Inserts a name, replacing any earlier entry while keeping its position.
    pub fn insert(&mut self, name: String, kind: FieldKind) -> Option<FieldKind> {
        self.0.insert(name, kind)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<FieldKind> {
        self.0.get(name).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the names, in first-insertion order.
    pub fn names(&self) -> indexmap::map::Keys<'_, String, FieldKind> {
        self.0.keys()
    }

    /// Returns an iterator over the entries, in first-insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, FieldKind> {
        self.0.iter()
    }
}

impl IntoIterator for FieldIndex {
    type Item = (String, FieldKind);
    type IntoIter = indexmap::map::IntoIter<String, FieldKind>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, FieldKind)> for FieldIndex {
    fn from_iter<T: IntoIterator<Item = (String, FieldKind)>>(iter: T) -> Self {
        FieldIndex(IndexMap::from_iter(iter))
    }
}
