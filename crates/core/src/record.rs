//! `Record`: the flat, string-keyed mapping passed in and out of the lab.
//!
//! Backed by `serde_json::Map` with `preserve_order`, so iteration follows
//! insertion order while equality compares keys and values only.

use serde_json::Value;

/// An insertion-ordered `String -> Value` mapping.
pub type Record = serde_json::Map<String, Value>;

/// Build a record from key/value pairs, keeping their order.
pub fn from_pairs<K, V, I>(pairs: I) -> Record
where
    K: Into<String>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// The single-entry `{"error": message}` shape.
pub fn error_record(message: impl Into<String>) -> Record {
    let mut record = Record::new();
    record.insert("error".into(), Value::String(message.into()));
    record
}
