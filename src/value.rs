//! Dynamic value representation for decoded records.
//!
//! This module provides the [`Value`] enum, a lossless image of the Serde data
//! model. A record is captured into a `Value` tree before its fields are
//! resolved, and the tree is deserialized back into the record afterwards.
//!
//! ## Core Types
//!
//! - [`Value`]: any Serde value (unit, bool, number, char, string, bytes,
//!   option, sequence, map, record, enum variant)
//! - [`Record`]: a named, ordered list of [`Field`]s
//! - [`Number`]: a numeric value that remembers its width and signedness
//! - [`FieldKind`]: the coercion class of a field slot
//!
//! ## Examples
//!
//! ```rust
//! use mparse::{Record, Value, FieldKind};
//!
//! let record = Record::new("Job")
//!     .with_field("name", Value::from("build"))
//!     .with_field("retries", Value::from(3u8));
//!
//! let value = Value::from(record);
//! let retries = value.as_record().and_then(|r| r.get("retries")).unwrap();
//! assert_eq!(retries.kind().to_string(), "u8");
//! assert_eq!(value.kind(), FieldKind::Record);
//! ```

use serde::{Serialize, Serializer};
use std::fmt;

/// A dynamically-typed image of any value in the Serde data model.
///
/// Newtype structs are transparent: `struct Meters(f64)` is captured as a
/// plain `f64` number, so it coerces like one.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Unit,
    Bool(bool),
    Number(Number),
    Char(char),
    String(String),
    Bytes(Vec<u8>),
    Option(Option<Box<Value>>),
    Seq(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Record(Record),
    Variant { name: String, value: Box<Value> },
}

/// Bit width of a numeric field. `isize`/`usize` are captured as 64-bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Width {
    W8,
    W16,
    W32,
    W64,
    W128,
}

impl Width {
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Width::W8 => 8,
            Width::W16 => 16,
            Width::W32 => 32,
            Width::W64 => 64,
            Width::W128 => 128,
        }
    }
}

/// The coercion class of a field slot.
///
/// Nested records are indexed by their own fields; every other kind is
/// indexed by the field's effective name. `Other` slots (sequences, maps,
/// options, enums, chars, bytes) match lines but are never written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Bool,
    Signed(Width),
    Unsigned(Width),
    Float(Width),
    Text,
    Record,
    Other,
}

impl FieldKind {
    /// Returns `true` for kinds the coercer writes to.
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        !matches!(self, FieldKind::Record | FieldKind::Other)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Bool => write!(f, "bool"),
            FieldKind::Signed(w) => write!(f, "i{}", w.bits()),
            FieldKind::Unsigned(w) => write!(f, "u{}", w.bits()),
            FieldKind::Float(w) => write!(f, "f{}", w.bits()),
            FieldKind::Text => write!(f, "string"),
            FieldKind::Record => write!(f, "record"),
            FieldKind::Other => write!(f, "other"),
        }
    }
}

/// A numeric value tagged with the exact Rust type it came from.
///
/// # Examples
///
/// ```rust
/// use mparse::{Number, FieldKind, Width};
///
/// assert_eq!(Number::from(7i16).kind(), FieldKind::Signed(Width::W16));
/// assert_eq!(Number::from(7u16).zero(), Number::U16(0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    F32(f32),
    F64(f64),
}

impl Number {
    /// Returns the field kind this number coerces as.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Number::I8(_) => FieldKind::Signed(Width::W8),
            Number::I16(_) => FieldKind::Signed(Width::W16),
            Number::I32(_) => FieldKind::Signed(Width::W32),
            Number::I64(_) => FieldKind::Signed(Width::W64),
            Number::I128(_) => FieldKind::Signed(Width::W128),
            Number::U8(_) => FieldKind::Unsigned(Width::W8),
            Number::U16(_) => FieldKind::Unsigned(Width::W16),
            Number::U32(_) => FieldKind::Unsigned(Width::W32),
            Number::U64(_) => FieldKind::Unsigned(Width::W64),
            Number::U128(_) => FieldKind::Unsigned(Width::W128),
            Number::F32(_) => FieldKind::Float(Width::W32),
            Number::F64(_) => FieldKind::Float(Width::W64),
        }
    }

    /// Returns the zero value of the same type.
    #[must_use]
    pub const fn zero(&self) -> Number {
        match self {
            Number::I8(_) => Number::I8(0),
            Number::I16(_) => Number::I16(0),
            Number::I32(_) => Number::I32(0),
            Number::I64(_) => Number::I64(0),
            Number::I128(_) => Number::I128(0),
            Number::U8(_) => Number::U8(0),
            Number::U16(_) => Number::U16(0),
            Number::U32(_) => Number::U32(0),
            Number::U64(_) => Number::U64(0),
            Number::U128(_) => Number::U128(0),
            Number::F32(_) => Number::F32(0.0),
            Number::F64(_) => Number::F64(0.0),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I8(n) => write!(f, "{}", n),
            Number::I16(n) => write!(f, "{}", n),
            Number::I32(n) => write!(f, "{}", n),
            Number::I64(n) => write!(f, "{}", n),
            Number::I128(n) => write!(f, "{}", n),
            Number::U8(n) => write!(f, "{}", n),
            Number::U16(n) => write!(f, "{}", n),
            Number::U32(n) => write!(f, "{}", n),
            Number::U64(n) => write!(f, "{}", n),
            Number::U128(n) => write!(f, "{}", n),
            Number::F32(n) => write!(f, "{}", n),
            Number::F64(n) => write!(f, "{}", n),
        }
    }
}

macro_rules! impl_from_number {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number::$variant(value)
                }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::$variant(value))
                }
            }
        )*
    };
}

impl_from_number! {
    i8 => I8, i16 => I16, i32 => I32, i64 => I64, i128 => I128,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64, u128 => U128,
    f32 => F32, f64 => F64,
}

/// One named slot of a [`Record`].
///
/// The name is the field's serialized name: the declared name, or the
/// `#[serde(rename = "...")]` override when one is present.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    name: String,
    value: Value,
}

impl Field {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Field {
            name: name.into(),
            value,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The lowercase name lines are matched against.
    #[must_use]
    pub fn effective_name(&self) -> String {
        self.name.to_lowercase()
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.value.kind()
    }

    pub(crate) fn into_parts(self) -> (String, Value) {
        (self.name, self.value)
    }
}

/// A struct value: a type name and its fields in declaration order.
///
/// Fields that serialization left out (`skip_serializing_if`) are not
/// fields of the record; their names are kept in [`Record::omitted`].
///
/// # Examples
///
/// ```rust
/// use mparse::{Record, Value};
///
/// let mut record = Record::new("Point");
/// record.push("x", Value::from(1i32));
/// record.push("y", Value::from(2i32));
///
/// let names: Vec<_> = record.fields().iter().map(|f| f.name()).collect();
/// assert_eq!(names, vec!["x", "y"]);
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Record {
    name: String,
    fields: Vec<Field>,
    omitted: Vec<String>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Record {
            name: name.into(),
            fields: Vec::new(),
            omitted: Vec::new(),
        }
    }

    /// Builder form of [`Record::push`].
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        self.fields.push(Field::new(name, value));
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut [Field] {
        &mut self.fields
    }

    /// Returns the value of the first field with exactly this serialized name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.value)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields
            .iter_mut()
            .find(|f| f.name == name)
            .map(|f| &mut f.value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Names of fields the record's `Serialize` impl skipped, in order.
    #[must_use]
    pub fn omitted(&self) -> &[String] {
        &self.omitted
    }

    pub(crate) fn omit(&mut self, name: impl Into<String>) {
        self.omitted.push(name.into());
    }

    pub(crate) fn into_fields(self) -> Vec<Field> {
        self.fields
    }
}

impl Value {
    /// Returns the coercion class of this value when it sits in a field slot.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            Value::Bool(_) => FieldKind::Bool,
            Value::Number(n) => n.kind(),
            Value::String(_) => FieldKind::Text,
            Value::Record(_) => FieldKind::Record,
            _ => FieldKind::Other,
        }
    }

    /// Short description of the value's shape, used in error messages.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Value::Unit => "unit".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Number(n) => n.kind().to_string(),
            Value::Char(_) => "char".to_string(),
            Value::String(_) => "string".to_string(),
            Value::Bytes(_) => "bytes".to_string(),
            Value::Option(_) => "option".to_string(),
            Value::Seq(_) => "sequence".to_string(),
            Value::Map(_) => "map".to_string(),
            Value::Record(r) => format!("struct {}", r.name),
            Value::Variant { name, .. } => format!("enum variant {}", name),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    #[inline]
    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::{SerializeMap, SerializeSeq};

        match self {
            Value::Unit => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => match *n {
                Number::I8(v) => serializer.serialize_i8(v),
                Number::I16(v) => serializer.serialize_i16(v),
                Number::I32(v) => serializer.serialize_i32(v),
                Number::I64(v) => serializer.serialize_i64(v),
                Number::I128(v) => serializer.serialize_i128(v),
                Number::U8(v) => serializer.serialize_u8(v),
                Number::U16(v) => serializer.serialize_u16(v),
                Number::U32(v) => serializer.serialize_u32(v),
                Number::U64(v) => serializer.serialize_u64(v),
                Number::U128(v) => serializer.serialize_u128(v),
                Number::F32(v) => serializer.serialize_f32(v),
                Number::F64(v) => serializer.serialize_f64(v),
            },
            Value::Char(c) => serializer.serialize_char(*c),
            Value::String(s) => serializer.serialize_str(s),
            Value::Bytes(b) => serializer.serialize_bytes(b),
            Value::Option(None) => serializer.serialize_none(),
            Value::Option(Some(v)) => serializer.serialize_some(v.as_ref()),
            Value::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Value::Record(record) => {
                let mut map = serializer.serialize_map(Some(record.len()))?;
                for field in &record.fields {
                    map.serialize_entry(&field.name, &field.value)?;
                }
                map.end()
            }
            Value::Variant { name, value } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(name, value.as_ref())?;
                map.end()
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Char(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Seq(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(Value::from(true).kind(), FieldKind::Bool);
        assert_eq!(Value::from(1i64).kind(), FieldKind::Signed(Width::W64));
        assert_eq!(Value::from(1u32).kind(), FieldKind::Unsigned(Width::W32));
        assert_eq!(Value::from(1.5f32).kind(), FieldKind::Float(Width::W32));
        assert_eq!(Value::from("x").kind(), FieldKind::Text);
        assert_eq!(Value::from(Record::new("R")).kind(), FieldKind::Record);
        assert_eq!(Value::from('c').kind(), FieldKind::Other);
        assert_eq!(Value::Seq(vec![]).kind(), FieldKind::Other);
        assert_eq!(Value::Option(None).kind(), FieldKind::Other);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(FieldKind::Signed(Width::W128).to_string(), "i128");
        assert_eq!(FieldKind::Unsigned(Width::W8).to_string(), "u8");
        assert_eq!(FieldKind::Float(Width::W64).to_string(), "f64");
        assert_eq!(FieldKind::Text.to_string(), "string");
        assert!(FieldKind::Bool.is_scalar());
        assert!(!FieldKind::Other.is_scalar());
    }

    #[test]
    fn test_number_zero_keeps_width() {
        assert_eq!(Number::I8(-4).zero(), Number::I8(0));
        assert_eq!(Number::U128(9).zero(), Number::U128(0));
        assert_eq!(Number::F32(1.5).zero(), Number::F32(0.0));
    }

    #[test]
    fn test_record_lookup() {
        let mut record = Record::new("Test")
            .with_field("A", Value::from("x"))
            .with_field("b", Value::from(false));

        assert_eq!(record.len(), 2);
        assert_eq!(record.get("A").and_then(Value::as_str), Some("x"));
        assert!(record.get("a").is_none());

        *record.get_mut("b").unwrap() = Value::from(true);
        assert_eq!(record.get("b").and_then(Value::as_bool), Some(true));
        assert_eq!(record.fields()[0].effective_name(), "a");
    }

    #[test]
    fn test_as_number() {
        assert_eq!(Value::from(9u16).as_number(), Some(&Number::U16(9)));
        assert_eq!(Value::from("9").as_number(), None);
    }

    #[test]
    fn test_type_name() {
        assert_eq!(Value::from(3i32).type_name(), "i32");
        assert_eq!(Value::Record(Record::new("Job")).type_name(), "struct Job");
        assert_eq!(Value::Seq(vec![]).type_name(), "sequence");
    }
}
