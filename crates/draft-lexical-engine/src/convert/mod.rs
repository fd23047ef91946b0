pub mod blocks;
pub mod embedded;
pub mod entities;
pub mod lists;
pub mod segments;
pub mod styles;

use crate::models::draft::{RawBlock, RawDocument};
use crate::models::lexical::{ElementNode, LexicalNode, ListItemNode, ListKind, RootNode};

use lists::ListTreeBuilder;
use segments::segment;
use styles::{FontCatalog, StyleResolver};

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("entity range references missing entity {key:?}")]
    UnknownEntity { key: String },
    #[error("entity {key:?} carries malformed data: {source}")]
    EntityData {
        key: String,
        source: serde_json::Error,
    },
    #[error("table entity {key:?} has no rows")]
    EmptyTable { key: String },
    #[error("table entity {key:?} has a non-string cell")]
    CellText { key: String },
    #[error("embedded draft payload is not a valid document: {0}")]
    EmbeddedPayload(serde_json::Error),
}

/// Settings for one conversion pass.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Shorten output keys for storage (`format` -> `f`, ...).
    pub shorten_keys: bool,
    pub fonts: FontCatalog,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            shorten_keys: true,
            fonts: FontCatalog::default(),
        }
    }
}

/// What one source block becomes before list folding.
enum BlockOutcome {
    Node(LexicalNode),
    ListItem {
        kind: ListKind,
        depth: u32,
        item: ListItemNode,
    },
}

/// Converts a whole raw document into the output tree.
///
/// Blocks convert independently but feed the list builder strictly in
/// document order; any error aborts the document, partial trees are never
/// returned.
pub fn convert_document(
    doc: &RawDocument,
    options: &ConvertOptions,
) -> Result<RootNode, ConvertError> {
    let resolver = StyleResolver::new(options.fonts.clone());
    let mut builder = ListTreeBuilder::new();

    for block in &doc.blocks {
        match convert_block(block, doc, &resolver)? {
            BlockOutcome::Node(node) => builder.push_node(node),
            BlockOutcome::ListItem { kind, depth, item } => {
                builder.push_list_item(kind, depth, item)
            }
        }
    }

    Ok(RootNode {
        children: builder.finish(),
    })
}

fn convert_block(
    block: &RawBlock,
    doc: &RawDocument,
    resolver: &StyleResolver,
) -> Result<BlockOutcome, ConvertError> {
    if block.block_type == "atomic"
        && let Some(range) = block.entity_ranges.first()
    {
        let entity = doc
            .entity_map
            .get(&range.key)
            .ok_or_else(|| ConvertError::UnknownEntity {
                key: range.key.clone(),
            })?;
        if !entity.kind.is_empty() {
            return Ok(BlockOutcome::Node(entities::dispatch(
                &range.key,
                entity,
                &doc.entity_map,
                resolver,
            )?));
        }
    }

    if block.block_type.contains("list-item") {
        return convert_list_item(block, doc, resolver);
    }

    let node = ElementNode {
        kind: blocks::element_kind(&block.block_type),
        format: blocks::alignment(&block.block_type).map(str::to_string),
        direction: blocks::direction(&block.block_type).map(str::to_string),
        indent: blocks::indent(&block.block_type),
        style: blocks::line_height(&block.block_type).map(|h| format!("line-height: {h};")),
        children: segment(
            &block.text,
            &block.inline_style_ranges,
            &block.entity_ranges,
            &doc.entity_map,
            resolver,
        )?,
    };
    Ok(BlockOutcome::Node(LexicalNode::Element(node)))
}

fn convert_list_item(
    block: &RawBlock,
    doc: &RawDocument,
    resolver: &StyleResolver,
) -> Result<BlockOutcome, ConvertError> {
    let kind = if block.block_type == "unordered-list-item" {
        ListKind::Bullet
    } else {
        ListKind::Number
    };

    let item = ListItemNode {
        children: segment(
            &block.text,
            &block.inline_style_ranges,
            &block.entity_ranges,
            &doc.entity_map,
            resolver,
        )?,
        class_name: block
            .data
            .class_name
            .as_deref()
            .map(blocks::strip_list_class),
        direction: blocks::direction(&block.block_type).map(str::to_string),
    };

    Ok(BlockOutcome::ListItem {
        kind,
        depth: block.depth,
        item,
    })
}
