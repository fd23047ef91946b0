use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::models::draft::RawEntity;
use crate::models::lexical::{
    EmbedNode, ImageNode, LexicalNode, TableCellNode, TableNode, TableRowNode,
};

use super::ConvertError;
use super::segments::segment;
use super::styles::StyleResolver;

#[derive(Debug, Deserialize)]
struct TableData {
    data: Vec<Map<String, Value>>,
    #[serde(default)]
    config: TableConfig,
}

#[derive(Debug, Default, Deserialize)]
struct TableConfig {
    #[serde(rename = "topRowColor", default)]
    top_row_color: Option<String>,
    #[serde(rename = "rowColor", default)]
    row_color: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    src: String,
    #[serde(default)]
    hyperlink: Value,
    config: ImageConfig,
}

#[derive(Debug, Deserialize)]
struct ImageConfig {
    size: ImageSize,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct ImageSize {
    width: Value,
    height: Value,
}

const WIDGET_KINDS: &[&str] = &["form", "gallery", "testimonial"];

/// Maps an atomic block's entity to its output node.
///
/// Unknown kinds degrade to a horizontal rule rather than failing the
/// document; kinds with a fixed data shape (table, image) do fail when the
/// shape is missing.
pub fn dispatch(
    key: &str,
    entity: &RawEntity,
    entities: &HashMap<String, RawEntity>,
    resolver: &StyleResolver,
) -> Result<LexicalNode, ConvertError> {
    let data = &entity.data;
    let node = match entity.kind.as_str() {
        "table" => convert_table(key, data, entities, resolver)?,
        "divider" => LexicalNode::HorizontalRule,
        "html" => LexicalNode::Embed(EmbedNode {
            kind: "html".to_string(),
            data: data.get("htmlCode").cloned().unwrap_or(Value::Null),
            config: data.get("config").cloned(),
        }),
        "TOKEN" => LexicalNode::Embed(EmbedNode {
            kind: "TOKEN".to_string(),
            data: data.get("texcontent").cloned().unwrap_or(Value::Null),
            config: None,
        }),
        "media" => match data.get("original_link").and_then(Value::as_str) {
            Some(link) if !link.is_empty() => LexicalNode::Embed(EmbedNode {
                kind: "media".to_string(),
                data: Value::from(media_url(link)),
                config: Some(data.clone()),
            }),
            _ => LexicalNode::HorizontalRule,
        },
        "image" => convert_image(key, data)?,
        kind if WIDGET_KINDS.contains(&kind) => LexicalNode::Embed(EmbedNode {
            kind: kind.to_string(),
            data: data.get("data").cloned().unwrap_or(Value::Null),
            config: data.get("config").cloned(),
        }),
        _ => LexicalNode::HorizontalRule,
    };
    Ok(node)
}

fn convert_table(
    key: &str,
    data: &Value,
    entities: &HashMap<String, RawEntity>,
    resolver: &StyleResolver,
) -> Result<LexicalNode, ConvertError> {
    let table: TableData =
        serde_json::from_value(data.clone()).map_err(|source| ConvertError::EntityData {
            key: key.to_string(),
            source,
        })?;
    let Some(first_row) = table.data.first() else {
        return Err(ConvertError::EmptyTable {
            key: key.to_string(),
        });
    };
    // One width per rendered column; the id field never renders.
    let col_widths = vec![92u32; first_row.len().saturating_sub(1)];

    let mut rows = Vec::with_capacity(table.data.len());
    for (row_index, row) in table.data.iter().enumerate() {
        let mut cells = Vec::new();
        for (name, value) in row {
            if name == "id" {
                continue;
            }
            let text = value.as_str().ok_or_else(|| ConvertError::CellText {
                key: key.to_string(),
            })?;
            cells.push(TableCellNode {
                background_color: if row_index == 0 {
                    table.config.top_row_color.clone()
                } else {
                    table.config.row_color.clone()
                },
                header: row_index == 0,
                children: segment(text, &[], &[], entities, resolver)?,
            });
        }
        rows.push(TableRowNode { cells });
    }

    Ok(LexicalNode::Table(TableNode { col_widths, rows }))
}

fn convert_image(key: &str, data: &Value) -> Result<LexicalNode, ConvertError> {
    let image: ImageData =
        serde_json::from_value(data.clone()).map_err(|source| ConvertError::EntityData {
            key: key.to_string(),
            source,
        })?;

    Ok(LexicalNode::Image(ImageNode {
        src: image.src,
        config: Value::Object(image.config.rest),
        hyperlink: image.hyperlink,
        width: image.config.size.width,
        height: image.config.size.height,
    }))
}

/// Rewrites YouTube watch/share/embed links to the privacy-enhanced embed
/// host; anything else passes through untouched.
fn media_url(url: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^.*(youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*")
            .expect("invalid media url regex")
    });

    if let Some(caps) = re.captures(url)
        && let Some(id) = caps.get(2)
        && id.as_str().len() == 11
    {
        return format!("https://www.youtube-nocookie.com/embed/{}", id.as_str());
    }

    url.to_string()
}
