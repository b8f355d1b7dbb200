//! Primitive field validators shared by every validation path, plus the
//! small helpers for reading fields out of untyped records.

use serde_json::{Map, Value};

pub const MAX_TTL: i64 = 2_147_483_647;
const MAX_U16: i64 = 65_535;
const MAX_U8: i64 = 255;

pub fn is_valid_ttl(ttl: i64) -> bool {
    (0..=MAX_TTL).contains(&ttl)
}

pub fn is_valid_port(port: i64) -> bool {
    (0..=MAX_U16).contains(&port)
}

pub fn is_valid_priority(priority: i64) -> bool {
    (0..=MAX_U16).contains(&priority)
}

pub fn is_valid_weight(weight: i64) -> bool {
    (0..=MAX_U16).contains(&weight)
}

pub fn is_valid_caa_flags(flags: i64) -> bool {
    (0..=MAX_U8).contains(&flags)
}

/// NAPTR flags: `S`, `A`, `U`, `P` (any case) or empty
pub fn is_valid_naptr_flags(flags: &str) -> bool {
    matches!(flags.to_ascii_uppercase().as_str(), "S" | "A" | "U" | "P" | "")
}

pub fn is_valid_tlsa_usage(usage: i64) -> bool {
    (0..=3).contains(&usage)
}

pub fn is_valid_tlsa_selector(selector: i64) -> bool {
    (0..=1).contains(&selector)
}

pub fn is_valid_tlsa_matching_type(matching_type: i64) -> bool {
    (0..=2).contains(&matching_type)
}

/// Hex digits only; the empty string is not hex
pub fn is_valid_hex_string(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Printable ASCII (0x20..=0x7E); the empty string is valid
pub fn is_valid_text_record(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7e).contains(&b))
}

/// Integral JSON number as `i64` (`3.0` counts, `3.5` does not)
pub fn as_integer(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Render a value the way diagnostics print it: strings bare, a missing
/// value as `undefined`, anything else as JSON
pub fn describe_value(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Loose truthiness: `null`, `false`, `0` and `""` are falsy
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The record's fields, when `value` is an object tagged `tag`
pub(crate) fn record_of<'a>(value: &'a Value, tag: &str) -> Option<&'a Map<String, Value>> {
    value
        .as_object()
        .filter(|r| r.get("type").and_then(Value::as_str) == Some(tag))
}

/// Integer field within `range`
pub(crate) fn int_in(
    record: &Map<String, Value>,
    key: &str,
    range: std::ops::RangeInclusive<i64>,
) -> bool {
    field_int(record, key).is_some_and(|n| range.contains(&n))
}

pub(crate) fn field_str<'a>(record: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    record.get(key).and_then(Value::as_str)
}

pub(crate) fn field_int(record: &Map<String, Value>, key: &str) -> Option<i64> {
    record.get(key).and_then(as_integer)
}

/// First of `keys` holding a non-empty string
pub(crate) fn first_str<'a>(record: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| field_str(record, key).filter(|s| !s.is_empty()))
}

/// First of `keys` holding an integer
pub(crate) fn first_int(record: &Map<String, Value>, keys: &[&str]) -> Option<i64> {
    keys.iter().find_map(|key| field_int(record, key))
}

/// Absent TTL is fine; a present one must be a valid TTL integer
pub(crate) fn ttl_ok(record: &Map<String, Value>) -> bool {
    record
        .get("ttl")
        .is_none_or(|ttl| as_integer(ttl).is_some_and(is_valid_ttl))
}

/// JSON rendering of a byte buffer: an array of integers in `0..=255`
pub(crate) fn is_byte_buffer(value: &Value) -> bool {
    value.as_array().is_some_and(|items| {
        items
            .iter()
            .all(|b| as_integer(b).is_some_and(|b| (0..=MAX_U8).contains(&b)))
    })
}

/// Array whose every element is a string
pub(crate) fn is_string_array(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_array)
        .is_some_and(|items| items.iter().all(Value::is_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ttl_boundaries() {
        assert!(is_valid_ttl(0));
        assert!(is_valid_ttl(2_147_483_647));
        assert!(!is_valid_ttl(2_147_483_648));
        assert!(!is_valid_ttl(-1));
    }

    #[test]
    fn test_sixteen_bit_ranges() {
        assert!(is_valid_port(0));
        assert!(is_valid_port(65535));
        assert!(!is_valid_port(65536));
        assert!(is_valid_priority(10));
        assert!(!is_valid_priority(-1));
        assert!(is_valid_weight(65535));
        assert!(!is_valid_weight(70000));
    }

    #[test]
    fn test_caa_and_naptr_flags() {
        assert!(is_valid_caa_flags(128));
        assert!(!is_valid_caa_flags(256));
        assert!(is_valid_naptr_flags("u"));
        assert!(is_valid_naptr_flags("S"));
        assert!(is_valid_naptr_flags(""));
        assert!(!is_valid_naptr_flags("X"));
        assert!(!is_valid_naptr_flags("SU"));
    }

    #[test]
    fn test_tlsa_ranges() {
        assert!(is_valid_tlsa_usage(3));
        assert!(!is_valid_tlsa_usage(4));
        assert!(is_valid_tlsa_selector(1));
        assert!(!is_valid_tlsa_selector(2));
        assert!(is_valid_tlsa_matching_type(2));
        assert!(!is_valid_tlsa_matching_type(3));
    }

    #[test]
    fn test_hex_and_text() {
        assert!(!is_valid_hex_string(""));
        assert!(is_valid_hex_string("abcDEF0123"));
        assert!(!is_valid_hex_string("abcg"));
        assert!(is_valid_text_record(""));
        assert!(is_valid_text_record("v=spf1 include:_spf.example.com ~all"));
        assert!(!is_valid_text_record("tab\there"));
        assert!(!is_valid_text_record("caf\u{e9}"));
    }

    #[test]
    fn test_integer_extraction() {
        assert_eq!(as_integer(&json!(3)), Some(3));
        assert_eq!(as_integer(&json!(3.0)), Some(3));
        assert_eq!(as_integer(&json!(-7)), Some(-7));
        assert_eq!(as_integer(&json!(3.5)), None);
        assert_eq!(as_integer(&json!("3")), None);
        assert_eq!(as_integer(&Value::Null), None);
    }

    #[test]
    fn test_describe_value() {
        assert_eq!(describe_value(None), "undefined");
        assert_eq!(describe_value(Some(&json!("A"))), "A");
        assert_eq!(describe_value(Some(&json!(42))), "42");
        assert_eq!(describe_value(Some(&Value::Null)), "null");
    }

    #[test]
    fn test_ttl_field() {
        let with = |v: Value| v.as_object().cloned().unwrap();
        assert!(ttl_ok(&with(json!({}))));
        assert!(ttl_ok(&with(json!({"ttl": 300}))));
        assert!(!ttl_ok(&with(json!({"ttl": -1}))));
        assert!(!ttl_ok(&with(json!({"ttl": "300"}))));
        assert!(!ttl_ok(&with(json!({"ttl": null}))));
    }

    #[test]
    fn test_byte_buffer() {
        assert!(is_byte_buffer(&json!([0, 17, 255])));
        assert!(is_byte_buffer(&json!([])));
        assert!(!is_byte_buffer(&json!([256])));
        assert!(!is_byte_buffer(&json!("00ff")));
    }
}
