//! Error and diagnostic types for record decoding.
//!
//! Decoding distinguishes two classes of problems:
//!
//! - **Errors** ([`Error`]): structural failures that abort the call before the
//!   target record is touched, such as a target that is not a record.
//! - **Diagnostics** ([`Diagnostic`]): content-level anomalies that are absorbed
//!   while decoding. A value that does not parse becomes the zero value of its
//!   field, and a line with nowhere to go is dropped. These never fail the call,
//!   but they are collected in a [`Report`] for callers that want to see them.
//!
//! ## Examples
//!
//! ```rust
//! use mparse::{decode, Error};
//!
//! let mut n = 0i32;
//! let err = decode("/n 1", &mut n).unwrap_err();
//! assert!(matches!(err, Error::NotAStruct { .. }));
//! ```

use crate::value::FieldKind;
use std::fmt;
use thiserror::Error;

/// Represents all structural failures that can occur while decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The target is an empty indirection with no record behind it.
    #[error("decode target is not a reference to a record")]
    NotAPointer,

    /// The target does not have a record shape.
    #[error("decode target is not a struct, found {found}")]
    NotAStruct { found: String },

    /// A line could not be routed to any default accumulator (strict mode only).
    #[error("no default field to accept line {line}: {text:?}")]
    UnroutableDefault { line: usize, text: String },

    /// A field absent from the serialized record could not be restored on
    /// write-back. Fields left out by `skip_serializing` or
    /// `skip_serializing_if` need `#[serde(default)]`.
    #[error("field `{field}` is omitted when serialized and has no #[serde(default)]")]
    MissingField { field: String },

    /// IO error while reading input
    #[error("IO error: {0}")]
    Io(String),

    /// Error raised by a `Serialize` or `Deserialize` implementation
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a not-a-struct error naming the shape that was found instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mparse::Error;
    ///
    /// let err = Error::not_a_struct("i32");
    /// assert!(err.to_string().contains("i32"));
    /// ```
    pub fn not_a_struct(found: &str) -> Self {
        Error::NotAStruct {
            found: found.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    fn missing_field(field: &'static str) -> Self {
        Error::MissingField {
            field: field.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// A value that failed to parse as its field's scalar kind.
///
/// The field keeps the zero value of its kind; this type only carries the
/// failure signal.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot parse {text:?} as {kind}")]
pub struct CoercionFailure {
    pub kind: FieldKind,
    pub text: String,
}

/// A content-level anomaly absorbed during decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A line was headed for the default accumulator but none exists, so it
    /// was dropped. `line` is 1-based.
    UnroutableDefault { line: usize, text: String },

    /// A marked line named an indexed field that the nested search could not
    /// reach from the top-level record, so its value was dropped.
    UnreachableField { line: usize, field: String },

    /// A value did not parse and its field was set to the zero value.
    CoercionFailure {
        line: usize,
        field: String,
        kind: FieldKind,
        text: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnroutableDefault { line, text } => {
                write!(f, "line {}: dropped {:?}, no default field", line, text)
            }
            Diagnostic::UnreachableField { line, field } => {
                write!(f, "line {}: field {} is not reachable, dropped", line, field)
            }
            Diagnostic::CoercionFailure {
                line,
                field,
                kind,
                text,
            } => write!(
                f,
                "line {}: cannot parse {:?} as {} for field {}, using zero value",
                line, text, kind, field
            ),
        }
    }
}

/// Diagnostics collected over one decode call.
///
/// # Examples
///
/// ```rust
/// use mparse::{decode_with_options, DecodeOptions, Diagnostic};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize, Default)]
/// struct Job { retries: u8 }
///
/// let mut job = Job::default();
/// let report = decode_with_options("/retries many", &mut job, DecodeOptions::new()).unwrap();
/// assert_eq!(job.retries, 0);
/// assert!(matches!(report.diagnostics()[0], Diagnostic::CoercionFailure { .. }));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    diagnostics: Vec<Diagnostic>,
}

impl Report {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Returns the diagnostics in the order they occurred.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns `true` if the call absorbed no anomalies.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns the number of lines dropped for lack of a default field.
    #[must_use]
    pub fn dropped_lines(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::UnroutableDefault { .. }))
            .count()
    }
}

impl IntoIterator for Report {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}
