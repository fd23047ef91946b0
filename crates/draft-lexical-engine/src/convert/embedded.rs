use serde_json::Value;

use crate::json::to_json;
use crate::models::draft::RawDocument;

use super::{ConvertError, ConvertOptions, convert_document};

/// Field names whose values hold raw Draft payloads.
const RAW_KEYS: &[&str] = &[
    "raw",
    "rawtitle",
    "subrawtitle",
    "rawsubtitle",
    "rawcontact",
    "rawname",
    "rawemail",
    "rawmyname",
    "rawby",
];

/// Field names never descended into: fonts, ordering and styling metadata
/// whose shape can resemble a raw payload without being one.
const EXCLUDED_KEYS: &[&str] = &[
    "sectionorder",
    "titleFont",
    "bodyFont",
    "variables",
    "headerConfig",
    "titleStyle",
];

/// Walks an arbitrary JSON document and converts every embedded raw Draft
/// payload in place, leaving the surrounding structure untouched.
pub fn convert_embedded(value: Value, options: &ConvertOptions) -> Result<Value, ConvertError> {
    match value {
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (key, val) in map {
                let converted = if EXCLUDED_KEYS.contains(&key.as_str()) {
                    val
                } else if RAW_KEYS.contains(&key.as_str()) && val.is_object() {
                    let doc: RawDocument =
                        serde_json::from_value(val).map_err(ConvertError::EmbeddedPayload)?;
                    let root = convert_document(&doc, options)?;
                    to_json(&root, options.shorten_keys)
                } else {
                    convert_embedded(val, options)?
                };
                out.insert(key, converted);
            }
            Ok(Value::Object(out))
        }
        Value::Array(items) => Ok(Value::Array(
            items
                .into_iter()
                .map(|item| convert_embedded(item, options))
                .collect::<Result<Vec<_>, _>>()?,
        )),
        other => Ok(other),
    }
}
