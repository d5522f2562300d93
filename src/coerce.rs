//! String-to-scalar coercion.
//!
//! [`coerce`] writes a line's value text into a field slot according to the
//! slot's [`FieldKind`]. Coercion is lenient: text that does not parse leaves
//! the slot at the zero value of its type. The failure is still returned as a
//! [`CoercionFailure`] so the decoder can record it.
//!
//! | Kind | Accepted text |
//! |------|---------------|
//! | bool | `1 t T TRUE true True 0 f F FALSE false False` |
//! | signed | base-10 with optional `+`/`-`, within the slot's width |
//! | unsigned | base-10 digits, within the slot's width |
//! | float | decimal, exponent, `inf`, `infinity`, `nan`; no hexadecimal form such as `0x1p-2` |
//! | string | anything, stored verbatim |
//!
//! Slots of any other kind are left untouched.

use crate::error::CoercionFailure;
use crate::value::{Number, Value};
use std::str::FromStr;

/// Coerces `text` into `slot`, keeping the slot's type.
///
/// # Examples
///
/// ```rust
/// use mparse::{coerce, Value};
///
/// let mut slot = Value::from(0u16);
/// coerce(&mut slot, "8080").unwrap();
/// assert_eq!(slot, Value::from(8080u16));
///
/// assert!(coerce(&mut slot, "99999").is_err());
/// assert_eq!(slot, Value::from(0u16));
/// ```
///
/// # Errors
///
/// Returns a [`CoercionFailure`] when the text does not parse; the slot has
/// already been set to its zero value.
pub fn coerce(slot: &mut Value, text: &str) -> Result<(), CoercionFailure> {
    let kind = slot.kind();
    let parsed = match slot {
        Value::Bool(b) => {
            let parsed = parse_bool(text);
            *b = parsed.unwrap_or(false);
            parsed.is_some()
        }
        Value::Number(n) => {
            let parsed = parse_number(n, text);
            let zero = n.zero();
            *n = parsed.unwrap_or(zero);
            parsed.is_some()
        }
        Value::String(s) => {
            text.clone_into(s);
            true
        }
        _ => true,
    };

    if parsed {
        Ok(())
    } else {
        Err(CoercionFailure {
            kind,
            text: text.to_string(),
        })
    }
}

/// Parses the boolean literals accepted by the decoder.
///
/// # Examples
///
/// ```rust
/// use mparse::parse_bool;
///
/// assert_eq!(parse_bool("T"), Some(true));
/// assert_eq!(parse_bool("False"), Some(false));
/// assert_eq!(parse_bool("yes"), None);
/// ```
#[must_use]
pub fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Parses `text` as a number of the same type as `current`.
fn parse_number(current: &Number, text: &str) -> Option<Number> {
    match current {
        Number::I8(_) => parse::<i8>(text).map(Number::I8),
        Number::I16(_) => parse::<i16>(text).map(Number::I16),
        Number::I32(_) => parse::<i32>(text).map(Number::I32),
        Number::I64(_) => parse::<i64>(text).map(Number::I64),
        Number::I128(_) => parse::<i128>(text).map(Number::I128),
        Number::U8(_) => parse_unsigned::<u8>(text).map(Number::U8),
        Number::U16(_) => parse_unsigned::<u16>(text).map(Number::U16),
        Number::U32(_) => parse_unsigned::<u32>(text).map(Number::U32),
        Number::U64(_) => parse_unsigned::<u64>(text).map(Number::U64),
        Number::U128(_) => parse_unsigned::<u128>(text).map(Number::U128),
        Number::F32(_) => parse::<f32>(text).map(Number::F32),
        Number::F64(_) => parse::<f64>(text).map(Number::F64),
    }
}

fn parse<T: FromStr>(text: &str) -> Option<T> {
    text.parse().ok()
}

// Unsigned text carries no sign, not even `+`.
fn parse_unsigned<T: FromStr>(text: &str) -> Option<T> {
    if text.starts_with('+') {
        return None;
    }
    parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{FieldKind, Record, Width};

    #[test]
    fn test_bool_literals() {
        for text in ["1", "t", "T", "TRUE", "true", "True"] {
            let mut slot = Value::from(false);
            coerce(&mut slot, text).unwrap();
            assert_eq!(slot, Value::from(true), "{}", text);
        }
        for text in ["0", "f", "F", "FALSE", "false", "False"] {
            let mut slot = Value::from(true);
            coerce(&mut slot, text).unwrap();
            assert_eq!(slot, Value::from(false), "{}", text);
        }
    }

    #[test]
    fn test_bad_bool_is_false() {
        let mut slot = Value::from(true);
        let err = coerce(&mut slot, "tRuE").unwrap_err();
        assert_eq!(slot, Value::from(false));
        assert_eq!(err.kind, FieldKind::Bool);
        assert_eq!(err.text, "tRuE");
    }

    #[test]
    fn test_signed() {
        let mut slot = Value::from(0i64);
        coerce(&mut slot, "-12312412").unwrap();
        assert_eq!(slot, Value::from(-12312412i64));

        coerce(&mut slot, "+5").unwrap();
        assert_eq!(slot, Value::from(5i64));

        assert!(coerce(&mut slot, "12abc").is_err());
        assert_eq!(slot, Value::from(0i64));
    }

    #[test]
    fn test_signed_out_of_range_is_zero() {
        let mut slot = Value::from(7i8);
        let err = coerce(&mut slot, "300").unwrap_err();
        assert_eq!(slot, Value::from(0i8));
        assert_eq!(err.kind, FieldKind::Signed(Width::W8));
    }

    #[test]
    fn test_unsigned_rejects_signs() {
        let mut slot = Value::from(1u32);
        assert!(coerce(&mut slot, "-1").is_err());
        assert_eq!(slot, Value::from(0u32));

        slot = Value::from(1u32);
        assert!(coerce(&mut slot, "+1").is_err());
        assert_eq!(slot, Value::from(0u32));

        coerce(&mut slot, "4294967295").unwrap();
        assert_eq!(slot, Value::from(u32::MAX));
    }

    #[test]
    fn test_float() {
        let mut slot = Value::from(0.0f64);
        coerce(&mut slot, "1.5e3").unwrap();
        assert_eq!(slot, Value::from(1500.0f64));

        coerce(&mut slot, "-inf").unwrap();
        assert_eq!(slot, Value::from(f64::NEG_INFINITY));

        assert!(coerce(&mut slot, "0x1p-2").is_err());
        assert_eq!(slot, Value::from(0.0f64));

        let mut small = Value::from(2.0f32);
        assert!(coerce(&mut small, "one point five").is_err());
        assert_eq!(small, Value::from(0.0f32));
    }

    #[test]
    fn test_text_is_verbatim() {
        let mut slot = Value::from("old");
        coerce(&mut slot, "  spaced  /text ").unwrap();
        assert_eq!(slot.as_str(), Some("  spaced  /text "));
    }

    #[test]
    fn test_other_kinds_are_untouched() {
        let mut seq = Value::Seq(vec![Value::from(1i32)]);
        coerce(&mut seq, "2").unwrap();
        assert_eq!(seq, Value::Seq(vec![Value::from(1i32)]));

        let mut record = Value::from(Record::new("R"));
        coerce(&mut record, "x").unwrap();
        assert_eq!(record, Value::from(Record::new("R")));
    }
}
