//! # mparse
//!
//! Decode slash-marked text into Serde-compatible Rust records.
//!
//! ## The format
//!
//! Input is a block of lines. A line that starts with `/` addresses a field
//! by name, and the rest of the line is its value. Every other line is
//! collected into the record's `default` field:
//!
//! ```text
//! /title Weekly sync
//! /attendees 4
//! Discussed the release plan.
//! /unknown lines like this one are kept too
//! ```
//!
//! There is no quoting, escaping, or nesting syntax. The record's own shape
//! is the schema.
//!
//! ## Key Features
//!
//! - **Case-insensitive names**: `/Title`, `/title`, and `/TITLE` all match a
//!   field named `title`
//! - **Serde renames**: `#[serde(rename = "...")]` replaces a field's name
//!   for matching
//! - **Nested records**: names that the top-level record does not own are
//!   searched for in its first nested record field
//! - **Lenient values**: text that does not parse as the field's type sets
//!   the field to zero instead of failing; the failure is reported in a
//!   [`Report`]
//!
//! ## Quick Start
//!
//! ```rust
//! use mparse::decode;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Default, Debug)]
//! struct Inner {
//!     a: String,
//!     b: bool,
//! }
//!
//! #[derive(Serialize, Deserialize, Default, Debug)]
//! struct Message {
//!     #[serde(rename = "some text")]
//!     inner: Inner,
//!     c: i64,
//!     #[serde(rename = "default")]
//!     d: String,
//!     #[serde(rename = "abc")]
//!     a: bool,
//! }
//!
//! let text = "/a true\n/b true\n/c 12312412\n/d test1\n/d test2\nmsg";
//!
//! let mut message = Message::default();
//! decode(text, &mut message).unwrap();
//!
//! assert_eq!(message.inner.a, "true");
//! assert!(message.inner.b);
//! assert_eq!(message.c, 12312412);
//! assert_eq!(message.d, "/d test1\n/d test2\nmsg");
//! assert!(!message.a);
//! ```
//!
//! ## How records are read and written
//!
//! A record is any type that implements both `Serialize` and `Deserialize`
//! and serializes as a struct. Decoding captures the record into a [`Value`]
//! tree, routes lines into that tree, and deserializes the tree back into the
//! record. Fields that keep no data in the Serde data model
//! (`#[serde(skip)]`) cannot be addressed, and they come back as their
//! `Default` value.
//!
//! The same holds for fields left out by `#[serde(skip_serializing)]`, or by
//! `#[serde(skip_serializing_if = "...")]` while the condition is true, but
//! only if they also carry `#[serde(default)]`. Without it such a field
//! cannot be restored and decoding fails with [`Error::MissingField`].
//!
//! ## Errors
//!
//! Only structural problems fail a decode: a target that is not a struct
//! ([`Error::NotAStruct`]), an empty `Option` ([`Error::NotAPointer`]), or a
//! field that serialization omits and has no default ([`Error::MissingField`]).
//! The target is untouched when an error is returned.

pub mod coerce;
pub mod de;
pub mod error;
pub mod index;
pub mod options;
pub mod resolve;
pub mod ser;
pub mod value;

pub use coerce::{coerce, parse_bool};
pub use de::{from_value, ValueDeserializer};
pub use error::{CoercionFailure, Diagnostic, Error, Report, Result};
pub use index::FieldIndex;
pub use options::{DecodeOptions, NestedSearch};
pub use resolve::Decoder;
pub use ser::{to_value, ValueSerializer};
pub use value::{Field, FieldKind, Number, Record, Value, Width};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Decode `text` into an existing record, updating it in place.
///
/// Fields that no line addresses keep their current values.
///
/// # Examples
///
/// ```rust
/// use mparse::decode;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Config { host: String, port: u16 }
///
/// let mut config = Config { host: "localhost".to_string(), port: 80 };
/// decode("/port 8080", &mut config).unwrap();
/// assert_eq!(config.host, "localhost");
/// assert_eq!(config.port, 8080);
/// ```
///
/// # Errors
///
/// Returns an error if `target` does not have a record shape, or if its
/// `Serialize`/`Deserialize` implementation fails.
pub fn decode<T>(text: &str, target: &mut T) -> Result<()>
where
    T: Serialize + DeserializeOwned,
{
    decode_with_options(text, target, DecodeOptions::default()).map(|_| ())
}

/// Decode `text` into an existing record with custom options, returning the
/// diagnostics absorbed along the way.
///
/// # Errors
///
/// As [`decode`], plus [`Error::UnroutableDefault`] when
/// [`DecodeOptions::strict_default`] is set.
pub fn decode_with_options<T>(text: &str, target: &mut T, options: DecodeOptions) -> Result<Report>
where
    T: Serialize + DeserializeOwned,
{
    Decoder::new(options).decode(text, target)
}

/// Decode `text` into a dynamic record.
///
/// # Errors
///
/// Same as [`decode_with_options`].
pub fn decode_value(text: &str, target: &mut Value, options: DecodeOptions) -> Result<Report> {
    Decoder::new(options).decode_value(text, target)
}

/// Decode `text` into a fresh `T::default()`.
///
/// # Examples
///
/// ```rust
/// use mparse::from_str;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("/x 1\n/Y 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if `T` does not have a record shape.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(text: &str) -> Result<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    from_str_with_options(text, DecodeOptions::default())
}

/// Decode `text` into a fresh `T::default()` with custom options.
///
/// # Errors
///
/// Same as [`decode_with_options`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(text: &str, options: DecodeOptions) -> Result<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    let mut value = T::default();
    decode_with_options(text, &mut value, options)?;
    Ok(value)
}

/// Decode a fresh `T::default()` from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use mparse::from_reader;
/// use serde::{Deserialize, Serialize};
/// use std::io::Cursor;
///
/// #[derive(Serialize, Deserialize, Default)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_reader(Cursor::new(b"/x 1\n/y 2")).unwrap();
/// assert_eq!((point.x, point.y), (1, 2));
/// ```
///
/// # Errors
///
/// Returns an error if reading fails or the input is not valid UTF-8, or for
/// any reason [`from_str`] would.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: Serialize + DeserializeOwned + Default,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Decode a fresh `T::default()` from bytes of text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, or for any reason
/// [`from_str`] would.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    let s = std::str::from_utf8(v).map_err(Error::custom)?;
    from_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn test_from_str_point() {
        let point: Point = from_str("/x 1\n/y -2").unwrap();
        assert_eq!(point, Point { x: 1, y: -2 });
    }

    #[test]
    fn test_decode_keeps_untouched_fields() {
        let mut point = Point { x: 5, y: 6 };
        decode("/y 7", &mut point).unwrap();
        assert_eq!(point, Point { x: 5, y: 7 });
    }

    #[test]
    fn test_from_slice_rejects_bad_utf8() {
        let result: Result<Point> = from_slice(&[0x2f, 0x78, 0x20, 0xff]);
        assert!(matches!(result, Err(Error::Custom(_))));
    }

    #[test]
    fn test_from_reader() {
        let point: Point = from_reader(&b"/X 3"[..]).unwrap();
        assert_eq!(point, Point { x: 3, y: 0 });
    }

    #[test]
    fn test_non_struct_target() {
        let mut list = vec![1u8];
        assert_eq!(
            decode("/x 1", &mut list),
            Err(Error::not_a_struct("sequence"))
        );
        assert_eq!(list, vec![1u8]);
    }
}
