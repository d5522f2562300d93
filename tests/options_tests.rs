use mparse::{
    decode, decode_value, decode_with_options, from_str_with_options, DecodeOptions, Decoder,
    Error, NestedSearch, Record, Value,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
struct Left {
    l: String,
}

#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
struct Right {
    r: u16,
    notes: String,
}

#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
struct Pair {
    left: Left,
    right: Right,
}

#[test]
fn test_all_siblings_search() {
    let options = DecodeOptions::new().with_nested_search(NestedSearch::AllSiblings);
    let v: Pair = from_str_with_options("/l one\n/r 2", options).unwrap();
    assert_eq!(v.left.l, "one");
    assert_eq!(v.right.r, 2);
}

#[test]
fn test_all_siblings_finds_default_in_later_sibling() {
    let options = DecodeOptions::new()
        .with_nested_search(NestedSearch::AllSiblings)
        .with_default_field("notes");
    let v: Pair = from_str_with_options("hello\nworld", options).unwrap();
    assert_eq!(v.right.notes, "hello\nworld");
}

#[test]
fn test_first_only_is_the_default() {
    let mut v = Pair::default();
    decode("/r 2", &mut v).unwrap();
    assert_eq!(v.right.r, 0);
}

#[test]
fn test_custom_marker() {
    #[derive(Serialize, Deserialize, Default)]
    struct Doc {
        title: String,
        default: String,
    }

    let options = DecodeOptions::new().with_marker('@');
    let v: Doc = from_str_with_options("@title Hi\n/title ignored", options).unwrap();
    assert_eq!(v.title, "Hi");
    assert_eq!(v.default, "/title ignored");
}

#[test]
fn test_designated_default_field() {
    #[derive(Serialize, Deserialize, Default)]
    struct Mail {
        subject: String,
        #[serde(rename = "Body")]
        body: String,
        default: String,
    }

    let options = DecodeOptions::new().with_default_field("BODY");
    let v: Mail = from_str_with_options("/subject hi\nline one\nline two", options).unwrap();
    assert_eq!(v.subject, "hi");
    assert_eq!(v.body, "line one\nline two");
    assert_eq!(v.default, "");
}

#[test]
fn test_strict_default_rejects_and_leaves_target_unchanged() {
    #[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
    struct Point {
        x: i32,
        y: i32,
    }

    let original = Point { x: 1, y: 1 };
    let mut v = original.clone();
    let options = DecodeOptions::new().strict_default(true);
    let err = decode_with_options("/x 5\nstray line", &mut v, options).unwrap_err();

    assert_eq!(
        err,
        Error::UnroutableDefault {
            line: 2,
            text: "stray line".to_string()
        }
    );
    assert_eq!(v, original);
}

#[test]
fn test_strict_default_passes_when_accumulator_exists() {
    #[derive(Serialize, Deserialize, Default)]
    struct Note {
        default: String,
    }

    let options = DecodeOptions::new().strict_default(true);
    let v: Note = from_str_with_options("anything", options).unwrap();
    assert_eq!(v.default, "anything");
}

#[test]
fn test_dynamic_record() {
    let mut value = Value::from(
        Record::new("Dyn")
            .with_field("Count", Value::from(0u32))
            .with_field("default", Value::from("")),
    );

    let report = decode_value("/count 7\n/count x", &mut value, DecodeOptions::new()).unwrap();
    let record = value.as_record().unwrap();
    assert_eq!(record.get("Count"), Some(&Value::from(0u32)));
    assert_eq!(report.diagnostics().len(), 1);
}

#[test]
fn test_decoder_is_reusable() {
    let decoder = Decoder::new(DecodeOptions::new().with_nested_search(NestedSearch::AllSiblings));
    let mut a = Pair::default();
    let mut b = Pair::default();
    decoder.decode("/r 1", &mut a).unwrap();
    decoder.decode("/l x", &mut b).unwrap();
    assert_eq!(a.right.r, 1);
    assert_eq!(a.left.l, "");
    assert_eq!(b.left.l, "x");
    assert_eq!(b.right.r, 0);
}

#[test]
fn test_default_field_set_on_the_struct() {
    #[derive(Serialize, Deserialize, Default)]
    struct Mail {
        #[serde(rename = "Body")]
        body: String,
    }

    let mut options = DecodeOptions::new();
    options.default_field = "BODY".to_string();
    let v: Mail = from_str_with_options("line one\nline two", options).unwrap();
    assert_eq!(v.body, "line one\nline two");
}
