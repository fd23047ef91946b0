use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A raw Draft.js content state as stored: a flat block list plus the shared
/// entity table.
///
/// Block text is kept character-for-character; nothing here re-encodes or
/// normalizes whitespace.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDocument {
    pub blocks: Vec<RawBlock>,
    #[serde(rename = "entityMap", default)]
    pub entity_map: HashMap<String, RawEntity>,
}

/// One paragraph-equivalent unit of the source document.
///
/// The `type` string doubles as a marker bag: alignment, direction, indent
/// and line-height modifiers are embedded as substrings next to the base
/// type (`"header-two align-center direction-rtl"`).
#[derive(Debug, Clone, Deserialize)]
pub struct RawBlock {
    pub text: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub depth: u32,
    #[serde(rename = "inlineStyleRanges", default)]
    pub inline_style_ranges: Vec<StyleRange>,
    #[serde(rename = "entityRanges", default)]
    pub entity_ranges: Vec<EntityRange>,
    #[serde(default)]
    pub data: BlockData,
}

/// One inline style annotation. Ranges may overlap each other arbitrarily and
/// may run past the end of the block text; the segmenter clamps.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: String,
}

/// One entity annotation, pointing into the document's entity table.
#[derive(Debug, Clone, Deserialize)]
pub struct EntityRange {
    pub offset: usize,
    pub length: usize,
    #[serde(deserialize_with = "entity_key")]
    pub key: String,
}

/// Free-form per-block metadata. Only `className` is consumed (list items
/// carry their list style through it).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockData {
    #[serde(rename = "className", default)]
    pub class_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEntity {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

impl RawEntity {
    /// Link entities are stored with an uppercase `LINK` kind.
    pub fn is_link(&self) -> bool {
        self.kind.eq_ignore_ascii_case("link")
    }
}

/// Entity range keys are written as JSON numbers but index a string-keyed
/// entity map; accept both spellings and normalize to the map's form.
fn entity_key<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Key {
        Number(u64),
        String(String),
    }

    Ok(match Key::deserialize(deserializer)? {
        Key::Number(n) => n.to_string(),
        Key::String(s) => s,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_entity_keys_normalize_to_strings() {
        let block: RawBlock = serde_json::from_value(json!({
            "text": "see docs",
            "type": "unstyled",
            "entityRanges": [{"offset": 4, "length": 4, "key": 0}],
        }))
        .unwrap();

        assert_eq!(block.entity_ranges[0].key, "0");
    }

    #[test]
    fn string_entity_keys_pass_through() {
        let range: EntityRange =
            serde_json::from_value(json!({"offset": 0, "length": 1, "key": "abc"})).unwrap();
        assert_eq!(range.key, "abc");
    }

    #[test]
    fn missing_text_is_a_parse_error() {
        let result: Result<RawBlock, _> =
            serde_json::from_value(json!({"type": "unstyled"}));
        assert!(result.is_err());
    }

    #[test]
    fn fractional_offset_is_a_parse_error() {
        let result: Result<StyleRange, _> =
            serde_json::from_value(json!({"offset": 1.5, "length": 2, "style": "BOLD"}));
        assert!(result.is_err());
    }

    #[test]
    fn optional_block_fields_default() {
        let block: RawBlock =
            serde_json::from_value(json!({"text": "plain", "type": "unstyled"})).unwrap();
        assert_eq!(block.depth, 0);
        assert!(block.inline_style_ranges.is_empty());
        assert!(block.entity_ranges.is_empty());
        assert!(block.data.class_name.is_none());
    }

    #[test]
    fn link_kind_matches_case_insensitively() {
        let entity = RawEntity {
            kind: "LINK".to_string(),
            data: Value::Null,
        };
        assert!(entity.is_link());

        let entity = RawEntity {
            kind: "table".to_string(),
            data: Value::Null,
        };
        assert!(!entity.is_link());
    }
}
