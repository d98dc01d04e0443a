//! # Codec Contract Tests
//!
//! End-to-end checks of the public `encode` / `dumps` / `loads` surface:
//! round-tripping, decimal exactness, identifier stability, recovery
//! toggles, debug formatting, key order, and failure modes.

use std::str::FromStr;

use asjson::{
    dumps, dumps_with, encode, loads, loads_with, AsjsonError, DumpOptions, LoadOptions,
    ObjectId, SerializationError, Value,
};
use chrono::{FixedOffset, NaiveDate, TimeZone};
use rust_decimal::Decimal;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2013, 1, 27).unwrap()
}

fn created() -> Value {
    let dt = date().and_hms_micro_opt(6, 48, 0, 38835).unwrap();
    [("created", Value::from(vec![Value::from(dt), Value::from(date())]))]
        .into_iter()
        .collect()
}

// ---------------------------------------------------------------------------
// Round trip
// ---------------------------------------------------------------------------

#[test]
fn test_round_trip_mixed_structure() {
    let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
    let value: Value = [
        ("name", Value::from("widget")),
        ("count", Value::from(3)),
        ("ratio", Value::from(0.25)),
        ("active", Value::from(true)),
        ("missing", Value::Null),
        ("day", Value::from(date())),
        ("local", Value::from(date().and_hms_opt(23, 59, 59).unwrap())),
        ("shipped", Value::from(ist.with_ymd_and_hms(2013, 1, 27, 6, 48, 0).unwrap())),
        ("history", created()),
    ]
    .into_iter()
    .collect();

    let text = dumps(&value).unwrap();
    assert_eq!(loads(&text).unwrap(), value);
}

#[test]
fn test_aware_timestamp_keeps_offset_through_round_trip() {
    let minus_four = FixedOffset::west_opt(4 * 3600).unwrap();
    let dt = minus_four.with_ymd_and_hms(2020, 2, 29, 12, 0, 0).unwrap();
    let text = dumps(&Value::from(dt)).unwrap();
    assert_eq!(text, r#""2020-02-29T12:00:00-04:00""#);

    let back = loads(&text).unwrap().as_datetime_tz().unwrap();
    assert_eq!(back, dt);
    assert_eq!(back.offset().local_minus_utc(), -4 * 3600);
}

// ---------------------------------------------------------------------------
// One-way types
// ---------------------------------------------------------------------------

#[test]
fn test_decimal_precision() {
    let value = Value::from(Decimal::from_str("3.14").unwrap());
    assert_eq!(dumps(&value).unwrap(), r#""3.14""#);
    assert_eq!(encode(&value).unwrap(), serde_json::json!("3.14"));
}

#[test]
fn test_decimal_is_not_recovered() {
    let value = Value::from(Decimal::from_str("-12.500").unwrap());
    let text = dumps(&value).unwrap();
    assert_eq!(text, r#""-12.500""#);
    assert_eq!(loads(&text).unwrap(), Value::from("-12.500"));
}

#[test]
fn test_object_id_stability() {
    let id = ObjectId::from_str("5f2b6e0a9d1c4b3a2e1f0d9c").unwrap();
    let text = dumps(&Value::from(id)).unwrap();
    assert_eq!(text, r#""5f2b6e0a9d1c4b3a2e1f0d9c""#);
    assert_eq!(loads(&text).unwrap(), Value::from("5f2b6e0a9d1c4b3a2e1f0d9c"));
}

// ---------------------------------------------------------------------------
// Recovery
// ---------------------------------------------------------------------------

#[test]
fn test_recovery_toggles_on_z_suffixed_input() {
    let text = r#"{"created": ["2013-01-27T06:48:00.038835Z", "2013-01-27"]}"#;

    let both = loads(text).unwrap();
    let items = both.get("created").and_then(Value::as_array).unwrap();
    assert_eq!(
        items[0].as_datetime(),
        Some(date().and_hms_micro_opt(6, 48, 0, 38835).unwrap())
    );
    assert_eq!(items[1].as_date(), Some(date()));

    let no_datetime = loads_with(text, &LoadOptions::new().parse_datetime(false)).unwrap();
    let items = no_datetime.get("created").and_then(Value::as_array).unwrap();
    assert_eq!(items[0].as_str(), Some("2013-01-27T06:48:00.038835Z"));
    assert_eq!(items[1].as_date(), Some(date()));

    let no_date = loads_with(text, &LoadOptions::new().parse_date(false)).unwrap();
    let items = no_date.get("created").and_then(Value::as_array).unwrap();
    assert!(items[0].as_datetime().is_some());
    assert_eq!(items[1].as_str(), Some("2013-01-27"));

    let neither = loads_with(text, &LoadOptions::plain()).unwrap();
    let reference: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(neither, Value::from(reference));
}

#[test]
fn test_z_suffixed_text_decodes_to_naive_source() {
    let text = r#"{"created": ["2013-01-27T06:48:00.038835Z", "2013-01-27Z"]}"#;
    assert_eq!(loads(text).unwrap(), created());
}

#[test]
fn test_legacy_z_suffixed_date_is_recovered() {
    let value = loads(r#"["2013-01-27Z"]"#).unwrap();
    assert_eq!(value, Value::from(vec![Value::from(date())]));
}

#[test]
fn test_non_recognition_safety() {
    let value = loads(r#"{"x": "not-a-date"}"#).unwrap();
    let expected: Value = [("x", "not-a-date")].into_iter().collect();
    assert_eq!(value, expected);

    let near_misses = loads(r#"["2013-13-01", "2013-01-27T25:00:00", "2013-01-27 06:48:00"]"#).unwrap();
    for item in near_misses.as_array().unwrap() {
        assert!(item.as_str().is_some(), "expected plain string, got {item:?}");
    }
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

#[test]
fn test_debug_formatting_sorts_and_indents() {
    let value: Value = [("zeta", 1), ("alpha", 2), ("mid", 3)].into_iter().collect();
    let text = dumps_with(&value, &DumpOptions::new().debug(true)).unwrap();

    assert!(text.contains("\n  \"alpha\": 2"));
    let positions: Vec<usize> = ["alpha", "mid", "zeta"]
        .iter()
        .map(|k| text.find(&format!("\"{k}\"")).unwrap())
        .collect();
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);
    assert_eq!(loads(&text).unwrap(), value);
}

#[test]
fn test_debug_matches_reference_layout() {
    let text = dumps_with(&created(), &DumpOptions::new().debug(true)).unwrap();
    assert_eq!(
        text,
        "{\n  \"created\": [\n    \"2013-01-27T06:48:00.038835\",\n    \"2013-01-27\"\n  ]\n}"
    );
}

#[test]
fn test_key_order_preservation() {
    let value: Value = [("b", 1), ("a", 2)].into_iter().collect();
    assert_eq!(dumps(&value).unwrap(), r#"{"b": 1, "a": 2}"#);
}

#[test]
fn test_output_is_plain_json() {
    let value: Value = [
        ("id", Value::from(ObjectId::from_bytes([7; 12]))),
        ("price", Value::from(Decimal::new(1999, 2))),
        ("day", Value::from(date())),
    ]
    .into_iter()
    .collect();
    let text = dumps(&value).unwrap();
    let plain: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        plain,
        serde_json::json!({
            "id": "070707070707070707070707",
            "price": "19.99",
            "day": "2013-01-27"
        })
    );
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn test_fallback_failure_names_type() {
    let value = Value::from(vec![Value::from(1), Value::Binary(vec![0xff])]);
    let err = dumps(&value).unwrap_err();
    assert!(matches!(
        err,
        AsjsonError::Serialization(SerializationError::Unsupported { type_name: "binary" })
    ));
    assert!(err.to_string().contains("binary"));
    assert!(encode(&value).is_err());
}

#[test]
fn test_parse_error_reports_position() {
    let err = loads("{\n  \"a\": x\n}").unwrap_err();
    match err {
        AsjsonError::Parse(e) => assert_eq!(e.line(), 2),
        other => panic!("Expected Parse, got: {other}"),
    }
}
