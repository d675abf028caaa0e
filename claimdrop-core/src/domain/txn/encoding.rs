//! Canonical msgpack: map keys sorted, zero/empty fields omitted.

use crate::foundation::ClaimError;
use crate::serde_err;
use rmpv::Value;

pub(crate) fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Nil => true,
        Value::Boolean(flag) => !flag,
        Value::Integer(int) => int.as_u64() == Some(0),
        Value::String(text) => text.as_bytes().is_empty(),
        Value::Binary(bytes) => bytes.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Map(entries) => entries.is_empty(),
        _ => false,
    }
}

/// Build a canonical map from `(key, value)` pairs.
pub(crate) fn canonical_map(entries: Vec<(&'static str, Value)>) -> Value {
    let mut entries = entries.into_iter().filter(|(_, value)| !is_empty_value(value)).collect::<Vec<_>>();
    entries.sort_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));
    Value::Map(entries.into_iter().map(|(key, value)| (Value::from(key), value)).collect())
}

pub(crate) fn binary(bytes: &[u8]) -> Value {
    Value::Binary(bytes.to_vec())
}

pub(crate) fn encode_value(value: &Value) -> Result<Vec<u8>, ClaimError> {
    let mut buf = Vec::new();
    rmpv::encode::write_value(&mut buf, value).map_err(|err| serde_err!("msgpack", err))?;
    Ok(buf)
}

pub(crate) fn decode_value(bytes: &[u8]) -> Result<Value, ClaimError> {
    let mut cursor = bytes;
    rmpv::decode::read_value(&mut cursor).map_err(|err| serde_err!("msgpack", err))
}

/// Look up a string key in a decoded msgpack map.
pub(crate) fn map_get<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.as_map()?.iter().find(|(k, _)| k.as_str() == Some(key)).map(|(_, v)| v)
}
