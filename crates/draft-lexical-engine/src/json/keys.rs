//! Reversible key shortening for stored documents.

use serde_json::{Map, Value};

/// Long/short key pairs, applied recursively. Keys outside the table pass
/// through untouched in both directions.
const KEY_MAP: &[(&str, &str)] = &[
    ("format", "f"),
    ("indent", "i"),
    ("version", "v"),
    ("children", "c"),
    ("text", "tx"),
    ("type", "t"),
    ("style", "s"),
    ("mode", "m"),
    ("direction", "d"),
];

/// Replaces verbose keys with their storage-shortened forms.
pub fn shorten_keys(value: Value) -> Value {
    rename(value, |key| {
        KEY_MAP
            .iter()
            .find(|(long, _)| *long == key)
            .map(|(_, short)| *short)
    })
}

/// Restores storage-shortened keys to their verbose forms.
pub fn expand_keys(value: Value) -> Value {
    rename(value, |key| {
        KEY_MAP
            .iter()
            .find(|(_, short)| *short == key)
            .map(|(long, _)| *long)
    })
}

fn rename(value: Value, lookup: fn(&str) -> Option<&'static str>) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, val) in map {
                let key = lookup(&key).map(str::to_string).unwrap_or(key);
                out.insert(key, rename(val, lookup));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(|v| rename(v, lookup)).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn shortening_renames_known_keys_recursively() {
        let input = json!({
            "type": "root",
            "children": [{
                "type": "paragraph",
                "children": [{"text": "hi", "type": "text", "format": 1}],
            }],
        });

        assert_eq!(
            shorten_keys(input),
            json!({
                "t": "root",
                "c": [{
                    "t": "paragraph",
                    "c": [{"tx": "hi", "t": "text", "f": 1}],
                }],
            })
        );
    }

    #[test]
    fn unknown_keys_pass_through() {
        let input = json!({"listType": "bullet", "tag": "ul", "url": "https://x.test"});
        assert_eq!(shorten_keys(input.clone()), input);
    }

    #[test]
    fn expanding_inverts_shortening() {
        let input = json!({
            "type": "root",
            "defaults": {"direction": "ltr", "format": "", "indent": 0, "version": 1},
            "children": [
                {"type": "list", "listType": "number", "children": [
                    {"type": "listitem", "children": [{"text": "a", "type": "text"}]},
                ]},
            ],
        });

        assert_eq!(expand_keys(shorten_keys(input.clone())), input);
    }

    #[test]
    fn scalars_and_arrays_survive_untouched() {
        assert_eq!(shorten_keys(json!(42)), json!(42));
        assert_eq!(shorten_keys(json!([1, "two", null])), json!([1, "two", null]));
    }
}
