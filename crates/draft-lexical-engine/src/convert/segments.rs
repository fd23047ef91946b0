use std::collections::{BTreeSet, HashMap};

use serde::Deserialize;

use crate::models::draft::{EntityRange, RawEntity, StyleRange};
use crate::models::lexical::{LinkRun, Run, TextRun};

use super::ConvertError;
use super::styles::{ResolvedStyle, StyleResolver, format_bits, style_string};

/// Fields a link entity may carry. `url` falls back to `href`, `rel` to
/// `"noreferrer"`; empty strings count as absent.
#[derive(Debug, Default, Deserialize)]
struct LinkData {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    href: Option<String>,
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    rel: Option<String>,
}

/// Merges a block's style ranges and link-entity ranges into an ordered
/// sequence of non-overlapping runs.
///
/// Positions are Unicode scalar values. Out-of-bounds range positions are
/// ignored; styles accumulate as a set per position while overlapping link
/// ranges overwrite a single slot, so the last range processed wins.
pub fn segment(
    text: &str,
    style_ranges: &[StyleRange],
    entity_ranges: &[EntityRange],
    entities: &HashMap<String, RawEntity>,
    resolver: &StyleResolver,
) -> Result<Vec<Run>, ConvertError> {
    let chars: Vec<char> = text.chars().collect();
    let mut style_map: Vec<BTreeSet<ResolvedStyle>> = vec![BTreeSet::new(); chars.len()];
    let mut link_map: Vec<Option<&str>> = vec![None; chars.len()];

    for range in style_ranges {
        let Some(resolved) = resolver.resolve(&range.style) else {
            continue;
        };
        for slot in clamped(&mut style_map, range.offset, range.length) {
            slot.insert(resolved.clone());
        }
    }

    for range in entity_ranges {
        let entity = entities
            .get(&range.key)
            .ok_or_else(|| ConvertError::UnknownEntity {
                key: range.key.clone(),
            })?;
        if !entity.is_link() {
            continue;
        }
        for slot in clamped(&mut link_map, range.offset, range.length) {
            *slot = Some(range.key.as_str());
        }
    }

    if chars.is_empty() {
        return Ok(Vec::new());
    }

    let mut runs = Vec::new();
    let mut run_start = 0;
    for i in 1..chars.len() {
        if style_map[i] != style_map[i - 1] || link_map[i] != link_map[i - 1] {
            runs.push(close_run(
                &chars[run_start..i],
                &style_map[run_start],
                link_map[run_start],
                entities,
            )?);
            run_start = i;
        }
    }
    runs.push(close_run(
        &chars[run_start..],
        &style_map[run_start],
        link_map[run_start],
        entities,
    )?);

    Ok(runs)
}

fn close_run(
    chars: &[char],
    styles: &BTreeSet<ResolvedStyle>,
    link_key: Option<&str>,
    entities: &HashMap<String, RawEntity>,
) -> Result<Run, ConvertError> {
    let run = TextRun {
        text: chars.iter().collect(),
        format: format_bits(styles),
        style: style_string(styles),
    };

    let Some(key) = link_key else {
        return Ok(Run::Text(run));
    };

    let entity = entities
        .get(key)
        .ok_or_else(|| ConvertError::UnknownEntity { key: key.to_string() })?;
    let data: LinkData =
        serde_json::from_value(entity.data.clone()).map_err(|source| ConvertError::EntityData {
            key: key.to_string(),
            source,
        })?;

    Ok(Run::Link(LinkRun {
        child: run,
        url: non_empty(data.url)
            .or_else(|| non_empty(data.href))
            .unwrap_or_default(),
        target: non_empty(data.target),
        title: non_empty(data.title),
        rel: non_empty(data.rel).unwrap_or_else(|| "noreferrer".to_string()),
    }))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// In-bounds slots of a half-open range; positions past the end of the map
/// are ignored.
fn clamped<T>(map: &mut [T], offset: usize, length: usize) -> impl Iterator<Item = &mut T> {
    let start = offset.min(map.len());
    let end = offset.saturating_add(length).min(map.len());
    map[start..end].iter_mut()
}
