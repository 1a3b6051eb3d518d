//! # Sorted JSON Rendering
//!
//! Every JSON document the suite emits (the remote mirror, the `remotes`
//! listing) is rendered with object keys in sorted order and four-space
//! indentation, followed by a trailing newline.
//!
//! Key order is enforced by rebuilding the value tree rather than relying
//! on `serde_json::Map`'s default ordering, which flips to insertion order
//! when any crate in the build enables `preserve_order`.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::error::RenderError;

const INDENT: &[u8] = b"    ";

/// Return a copy of `value` with every object's keys in sorted order.
pub fn sorted(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut out = Map::new();
            for key in keys {
                out.insert(key.clone(), sorted(&map[key]));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        other => other.clone(),
    }
}

/// Render `value` as sorted, four-space-indented JSON with a trailing newline.
pub fn to_sorted_pretty_string(value: &Value) -> Result<String, RenderError> {
    let value = sorted(value);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(String::from_utf8(buf)?)
}
