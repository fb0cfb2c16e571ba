//! Payload sanitization
//!
//! Events must never carry personal data or bulky values. Keys that look
//! personal are removed, long strings are cut and long arrays are dropped.

use farm_sdk::util::truncate_chars;
use serde_json::{Map, Value};

/// Key fragments that mark a field as personal, matched case-insensitively
pub const PII_FRAGMENTS: &[&str] = &[
    "email", "phone", "mobile", "address", "name", "location", "ip", "aadhaar", "password", "token",
];

pub const MAX_STRING_CHARS: usize = 100;

/// Arrays longer than this are dropped entirely
pub const MAX_ARRAY_LEN: usize = 10;

/// Deepest object level kept; the payload itself is level 1
pub const MAX_DEPTH: usize = 5;

pub fn is_pii_key(key: &str) -> bool {
    let key = key.to_lowercase();
    PII_FRAGMENTS.iter().any(|fragment| key.contains(fragment))
}

/// Sanitize an event payload. Applying it twice gives the same result.
pub fn sanitize_payload(payload: &Map<String, Value>) -> Map<String, Value> {
    sanitize_object(payload, 1)
}

fn sanitize_object(object: &Map<String, Value>, level: usize) -> Map<String, Value> {
    object
        .iter()
        .filter(|(key, _)| !is_pii_key(key))
        .filter_map(|(key, value)| sanitize_value(value, level).map(|v| (key.clone(), v)))
        .collect()
}

/// `level` is the level of the object holding `value`
fn sanitize_value(value: &Value, level: usize) -> Option<Value> {
    match value {
        Value::Array(items) if items.len() > MAX_ARRAY_LEN => None,
        Value::Array(items) => Some(Value::Array(
            items
                .iter()
                .filter(|item| !item.is_array())
                .filter_map(|item| sanitize_value(item, level))
                .collect(),
        )),
        Value::Object(_) if level >= MAX_DEPTH => None,
        Value::Object(object) => Some(Value::Object(sanitize_object(object, level + 1))),
        Value::String(s) => Some(Value::String(truncate_chars(s, MAX_STRING_CHARS))),
        Value::Null => None,
        other => Some(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {}", other),
        }
    }

    #[test]
    fn test_pii_keys_removed_at_every_level() {
        let payload = object(json!({
            "Email": "a@b.com",
            "feature": "upload",
            "context": {
                "userPhone": "9876543210",
                "crop": "wheat",
                "farm": {"home_address": "Village road", "acres": 2}
            },
            "steps": [{"auth_token": "abc", "step": 1}]
        }));

        assert_eq!(
            Value::Object(sanitize_payload(&payload)),
            json!({
                "feature": "upload",
                "context": {"crop": "wheat", "farm": {"acres": 2}},
                "steps": [{"step": 1}]
            })
        );
    }

    #[test]
    fn test_key_matching() {
        assert!(is_pii_key("MOBILE_NUMBER"));
        assert!(is_pii_key("farmer_name"));
        assert!(is_pii_key("AadhaarNo"));
        assert!(is_pii_key("client_ip"));
        assert!(!is_pii_key("feature"));
        assert!(!is_pii_key("crop"));
    }

    #[test]
    fn test_long_strings_truncated() {
        let long = "a".repeat(150);
        let exact = "b".repeat(100);
        let payload = object(json!({"query": long, "exact": exact, "tags": [long]}));

        let clean = sanitize_payload(&payload);
        let expected = format!("{}...", "a".repeat(100));
        assert_eq!(clean["query"], json!(expected));
        assert_eq!(clean["exact"], json!(exact));
        assert_eq!(clean["tags"], json!([expected]));
    }

    #[test]
    fn test_multibyte_strings_truncated_by_character() {
        let hindi = "गेहूं".repeat(40);
        let clean = sanitize_payload(&object(json!({"query": hindi})));
        let text = clean["query"].as_str().unwrap();

        assert_eq!(text.chars().count(), MAX_STRING_CHARS + 3);
        assert!(text.ends_with("..."));
    }

    #[test]
    fn test_long_arrays_dropped() {
        let payload = object(json!({
            "eleven": (0..11).collect::<Vec<_>>(),
            "ten": (0..10).collect::<Vec<_>>(),
            "mixed": [1, null, [2, 3], "x", {"ok": true}]
        }));

        let clean = sanitize_payload(&payload);
        assert!(!clean.contains_key("eleven"));
        assert_eq!(clean["ten"].as_array().unwrap().len(), 10);
        assert_eq!(clean["mixed"], json!([1, "x", {"ok": true}]));
    }

    #[test]
    fn test_nulls_and_deep_objects_dropped() {
        let payload = object(json!({
            "missing": null,
            "count": 3,
            "flag": false,
            "l2": {"l3": {"l4": {"l5": {"kept": 1, "l6": {"gone": 1}}}}}
        }));

        let clean = sanitize_payload(&payload);
        assert!(!clean.contains_key("missing"));
        assert_eq!(clean["count"], json!(3));
        assert_eq!(clean["flag"], json!(false));
        assert_eq!(clean["l2"]["l3"]["l4"]["l5"], json!({"kept": 1}));
    }

    #[test]
    fn test_idempotent() {
        let payload = object(json!({
            "phone": "1",
            "query": "x".repeat(250),
            "list": ["y".repeat(120), null, 4],
            "nested": {"a": {"b": {"c": {"d": {"e": 1}}}}, "token_id": 9},
            "big": (0..20).collect::<Vec<_>>()
        }));

        let once = sanitize_payload(&payload);
        let twice = sanitize_payload(&once);
        assert_eq!(once, twice);
    }
}
