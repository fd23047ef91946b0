//! JSON shape of the output tree.
//!
//! Node `type` tags are data-dependent (embed nodes carry their entity kind)
//! and the field layout varies per node, so serialization is written out with
//! exhaustive matches instead of derived. Fields whose value equals a known
//! default (empty style, zero format, absent target/title) are omitted; the
//! root carries a `defaults` block downstream consumers read them back from.

pub mod keys;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::models::lexical::{
    ElementNode, EmbedNode, ImageNode, LexicalNode, LinkRun, ListChild, ListItemNode, ListNode,
    RootNode, Run, TableCellNode, TableNode, TableRowNode, TextRun,
};

pub use keys::{expand_keys, shorten_keys};

/// Serializes a finished tree to a JSON value, optionally shortening keys
/// for storage.
pub fn to_json(root: &RootNode, shorten: bool) -> Value {
    let value = serde_json::to_value(root).expect("node tree serializes infallibly");
    if shorten { shorten_keys(value) } else { value }
}

impl Serialize for RootNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "root")?;
        map.serialize_entry("defaults", &RootDefaults)?;
        map.serialize_entry("children", &self.children)?;
        map.end()
    }
}

/// Per-node values downstream consumers assume when a field is omitted.
struct RootDefaults;

impl Serialize for RootDefaults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("direction", "ltr")?;
        map.serialize_entry("format", "")?;
        map.serialize_entry("indent", &0)?;
        map.serialize_entry("version", &1)?;
        map.end()
    }
}

impl Serialize for LexicalNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LexicalNode::Element(element) => element.serialize(serializer),
            LexicalNode::List(list) => list.serialize(serializer),
            LexicalNode::Table(table) => table.serialize(serializer),
            LexicalNode::Image(image) => image.serialize(serializer),
            LexicalNode::Embed(embed) => embed.serialize(serializer),
            LexicalNode::HorizontalRule => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("type", "horizontalrule")?;
                map.end()
            }
        }
    }
}

impl Serialize for Run {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Run::Text(text) => text.serialize(serializer),
            Run::Link(link) => link.serialize(serializer),
        }
    }
}

impl Serialize for TextRun {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("text", &self.text)?;
        map.serialize_entry("type", "text")?;
        if !self.style.is_empty() {
            map.serialize_entry("style", &self.style)?;
        }
        if self.format != 0 {
            map.serialize_entry("format", &self.format)?;
        }
        map.end()
    }
}

impl Serialize for LinkRun {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("children", &[&self.child])?;
        map.serialize_entry("type", "link")?;
        map.serialize_entry("rel", &self.rel)?;
        map.serialize_entry("target", &self.target)?;
        map.serialize_entry("title", &self.title)?;
        map.serialize_entry("url", &self.url)?;
        map.end()
    }
}

impl Serialize for ElementNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("children", &self.children)?;
        map.serialize_entry("type", self.kind.as_str())?;
        if let Some(format) = &self.format {
            map.serialize_entry("format", format)?;
        }
        if let Some(direction) = &self.direction {
            map.serialize_entry("direction", direction)?;
        }
        if let Some(indent) = self.indent.filter(|indent| *indent != 0) {
            map.serialize_entry("indent", &indent)?;
        }
        if let Some(style) = &self.style {
            map.serialize_entry("style", style)?;
        }
        map.end()
    }
}

impl Serialize for ListNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "list")?;
        map.serialize_entry("listType", self.kind.list_type())?;
        map.serialize_entry("start", &1)?;
        map.serialize_entry("tag", self.kind.tag())?;
        map.serialize_entry("children", &self.children)?;
        map.end()
    }
}

impl Serialize for ListChild {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ListChild::Item(item) => item.serialize(serializer),
            ListChild::List(list) => list.serialize(serializer),
        }
    }
}

impl Serialize for ListItemNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "listitem")?;
        map.serialize_entry("children", &self.children)?;
        if let Some(class_name) = &self.class_name {
            map.serialize_entry("className", class_name)?;
        }
        if let Some(direction) = &self.direction {
            map.serialize_entry("direction", direction)?;
        }
        map.end()
    }
}

impl Serialize for TableNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "table")?;
        map.serialize_entry("colWidths", &self.col_widths)?;
        map.serialize_entry("children", &self.rows)?;
        map.end()
    }
}

impl Serialize for TableRowNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "tablerow")?;
        map.serialize_entry("version", &1)?;
        map.serialize_entry("indent", &0)?;
        map.serialize_entry("direction", &Value::Null)?;
        map.serialize_entry("format", "")?;
        map.serialize_entry("children", &self.cells)?;
        map.end()
    }
}

impl Serialize for TableCellNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "tablecell")?;
        map.serialize_entry("colSpan", &1)?;
        map.serialize_entry("rowSpan", &1)?;
        map.serialize_entry("backgroundColor", &self.background_color)?;
        map.serialize_entry("headerState", if self.header { &3 } else { &0 })?;
        map.serialize_entry("children", &[CellParagraph(&self.children)])?;
        map.end()
    }
}

/// Cell content sits inside one untyped paragraph wrapper.
struct CellParagraph<'a>(&'a [Run]);

impl Serialize for CellParagraph<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("children", self.0)?;
        map.end()
    }
}

impl Serialize for ImageNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "image")?;
        map.serialize_entry("src", &self.src)?;
        map.serialize_entry("config", &self.config)?;
        map.serialize_entry("hyperlink", &self.hyperlink)?;
        map.serialize_entry("width", &self.width)?;
        map.serialize_entry("height", &self.height)?;
        map.serialize_entry("maxWidth", "inherit")?;
        map.end()
    }
}

impl Serialize for EmbedNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", &self.kind)?;
        map.serialize_entry("data", &self.data)?;
        if let Some(config) = &self.config {
            map.serialize_entry("config", config)?;
        }
        map.end()
    }
}
