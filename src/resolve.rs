//! Line resolution and field assignment.
//!
//! This module provides the [`Decoder`], which walks the input line by line
//! and routes each line to a field of the target record.
//!
//! ## Routing
//!
//! Every line is trimmed first. A line that starts with the marker (`/` by
//! default) is split into a name token and a value:
//!
//! ```text
//! /Name   some value here
//!  ^^^^   ^^^^^^^^^^^^^^^
//!  name   value (rest of line, trimmed)
//! ```
//!
//! If the lowercased name appears in the record's recursive [`FieldIndex`],
//! the value is assigned to that field. Any other line (unmarked, blank, a
//! bare marker, or an unknown name) is appended verbatim to the default
//! accumulator, one line per entry, joined by `\n`.
//!
//! ## Assignment
//!
//! A name is looked up in the record's own fields first. If the record does
//! not own it, the search continues in nested records as selected by
//! [`NestedSearch`]: by default, only the first nested record field at each
//! level is descended into.

use crate::coerce::coerce;
use crate::de::from_value;
use crate::error::{Diagnostic, Report};
use crate::index::FieldIndex;
use crate::options::{DecodeOptions, NestedSearch};
use crate::ser::to_value;
use crate::value::{Field, Record, Value};
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Decodes marked text into records.
///
/// A `Decoder` holds only its options; every call builds a fresh index and
/// touches nothing but the target it is given.
///
/// # Examples
///
/// ```rust
/// use mparse::{DecodeOptions, Decoder};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize, Default)]
/// struct Ticket { id: u32, default: String }
///
/// let decoder = Decoder::new(DecodeOptions::new());
/// let mut ticket = Ticket::default();
/// let report = decoder.decode("/ID 42\nprinter on fire", &mut ticket).unwrap();
///
/// assert_eq!(ticket.id, 42);
/// assert_eq!(ticket.default, "printer on fire");
/// assert!(report.is_clean());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    #[must_use]
    pub fn new(options: DecodeOptions) -> Self {
        Decoder { options }
    }

    #[must_use]
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decodes `text` into `target`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAStruct`] or [`Error::NotAPointer`] when `target`
    /// has no record shape, [`Error::MissingField`] when a field its
    /// `Serialize` impl leaves out has no `#[serde(default)]`,
    /// [`Error::UnroutableDefault`] in strict mode, and
    /// [`Error::Custom`] when the record's own `Serialize` or `Deserialize`
    /// implementation fails. `target` is left unchanged on error.
    pub fn decode<T>(&self, text: &str, target: &mut T) -> Result<Report>
    where
        T: Serialize + DeserializeOwned,
    {
        let mut value = to_value(&*target)?;
        if has_omitted_fields(&value) {
            // write-back of the untouched capture must succeed before any routing
            from_value::<T>(value.clone())?;
        }
        let report = self.resolve_root(text, &mut value)?;
        *target = from_value(value)?;
        Ok(report)
    }

    /// Decodes `text` into a dynamic record.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mparse::{Decoder, Record, Value};
    ///
    /// let mut value = Value::from(
    ///     Record::new("Msg")
    ///         .with_field("to", Value::from(""))
    ///         .with_field("default", Value::from("")),
    /// );
    /// Decoder::default().decode_value("/to ops\nhello", &mut value).unwrap();
    ///
    /// let record = value.as_record().unwrap();
    /// assert_eq!(record.get("to").and_then(Value::as_str), Some("ops"));
    /// assert_eq!(record.get("default").and_then(Value::as_str), Some("hello"));
    /// ```
    ///
    /// # Errors
    ///
    /// Same as [`Decoder::decode`]. `target` is left unchanged on error.
    pub fn decode_value(&self, text: &str, target: &mut Value) -> Result<Report> {
        let mut scratch = target.clone();
        let report = self.resolve_root(text, &mut scratch)?;
        *target = scratch;
        Ok(report)
    }

    fn resolve_root(&self, text: &str, root: &mut Value) -> Result<Report> {
        let record = root_record(root)?;
        self.resolve(text, record)
    }

    /// Routes every line of `text` into `record`.
    ///
    /// # Errors
    ///
    /// Only fails in strict mode, with [`Error::UnroutableDefault`]. Lines
    /// before the failing one have already been applied.
    pub fn resolve(&self, text: &str, record: &mut Record) -> Result<Report> {
        let index = FieldIndex::build(record, true);
        let default_field = self.options.default_field.to_lowercase();
        let mut report = Report::new();

        for (i, raw) in text.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.trim();

            if let Some((name, value)) = self.split_marked(line) {
                if index.contains(&name) {
                    log::trace!("line {}: routing {:?} to field {}", line_no, value, name);
                    self.assign(record, &name, value, line_no, &mut report);
                    continue;
                }
            }

            self.accumulate_default(record, &default_field, line, line_no, &mut report)?;
        }

        Ok(report)
    }

    /// Splits a marked line into its lowercased name token and value.
    fn split_marked<'a>(&self, line: &'a str) -> Option<(String, &'a str)> {
        let rest = line.strip_prefix(self.options.marker)?.trim_start();
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        if end == 0 {
            return None;
        }
        Some((rest[..end].to_lowercase(), rest[end..].trim()))
    }

    fn assign(
        &self,
        record: &mut Record,
        name: &str,
        text: &str,
        line: usize,
        report: &mut Report,
    ) {
        match self.locate(record, name) {
            Some(field) => Self::write(field, text, line, report),
            None => {
                log::debug!(
                    "line {}: field {} is not reachable from {}, value dropped",
                    line,
                    name,
                    record.name()
                );
                report.push(Diagnostic::UnreachableField {
                    line,
                    field: name.to_string(),
                });
            }
        }
    }

    fn accumulate_default(
        &self,
        record: &mut Record,
        name: &str,
        line: &str,
        line_no: usize,
        report: &mut Report,
    ) -> Result<()> {
        match self.locate(record, name) {
            Some(field) => {
                let mut text = field.value().as_str().unwrap_or_default().to_string();
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(line);
                Self::write(field, &text, line_no, report);
                Ok(())
            }
            None if self.options.strict_default => Err(Error::UnroutableDefault {
                line: line_no,
                text: line.to_string(),
            }),
            None => {
                log::debug!("line {}: no {} field, dropped {:?}", line_no, name, line);
                report.push(Diagnostic::UnroutableDefault {
                    line: line_no,
                    text: line.to_string(),
                });
                Ok(())
            }
        }
    }

    /// Finds the slot for `name`: a scalar field of `record` itself, or else
    /// a field found by searching nested records.
    fn locate<'r>(&self, record: &'r mut Record, name: &str) -> Option<&'r mut Field> {
        if FieldIndex::build(record, false).contains(name) {
            return record
                .fields_mut()
                .iter_mut()
                .find(|f| !f.value().is_record() && f.effective_name() == name);
        }

        let mut nested = record
            .fields_mut()
            .iter_mut()
            .filter_map(|f| f.value_mut().as_record_mut());

        match self.options.nested_search {
            NestedSearch::FirstOnly => nested.next().and_then(|r| self.locate(r, name)),
            NestedSearch::AllSiblings => nested.find_map(|r| self.locate(r, name)),
        }
    }

    fn write(field: &mut Field, text: &str, line: usize, report: &mut Report) {
        if let Err(failure) = coerce(field.value_mut(), text) {
            log::debug!("line {}: field {}: {}", line, field.name(), failure);
            report.push(Diagnostic::CoercionFailure {
                line,
                field: field.name().to_string(),
                kind: failure.kind,
                text: failure.text,
            });
        }
    }
}

/// Returns `true` if serialization left a field out anywhere in the tree
/// of records reachable through fields.
fn has_omitted_fields(value: &Value) -> bool {
    match value {
        Value::Record(record) => {
            !record.omitted().is_empty()
                || record.fields().iter().any(|f| has_omitted_fields(f.value()))
        }
        Value::Option(Some(inner)) => has_omitted_fields(inner),
        _ => false,
    }
}

/// Returns the record a decode call writes into.
fn root_record(value: &mut Value) -> Result<&mut Record> {
    match value {
        Value::Record(record) => Ok(record),
        Value::Option(None) => Err(Error::NotAPointer),
        Value::Option(Some(inner)) => root_record(inner),
        other => Err(Error::not_a_struct(&other.type_name())),
    }
}
