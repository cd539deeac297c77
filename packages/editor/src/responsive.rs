//! # Responsive Resolution
//!
//! Desktop values are canonical. A tablet or mobile view sees the desktop
//! values with that breakpoint's delta merged on top, key by key. An empty
//! delta resolves to exactly the desktop values.

use easel_model::{Content, Device, FieldMap, Node, NodeKind, StyleMap, Value};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Effective styles of `node` on `device`
pub fn resolve_styles(node: &Node, device: Device) -> Cow<'_, StyleMap> {
    overlay(&node.styles, delta(&node.responsive_styles, device))
}

/// Effective content of `node` on `device`
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedContent<'a> {
    /// Children never carry responsive variants
    Children(&'a [Node]),
    Fields(Cow<'a, FieldMap>),
}

pub fn resolve_content(node: &Node, device: Device) -> ResolvedContent<'_> {
    match node.content() {
        Content::Children(children) => ResolvedContent::Children(children),
        Content::Leaf(leaf) => {
            ResolvedContent::Fields(overlay(&leaf.fields, delta(&leaf.responsive_content, device)))
        }
    }
}

fn delta(deltas: &BTreeMap<Device, FieldMap>, device: Device) -> Option<&FieldMap> {
    if device.is_desktop() {
        None
    } else {
        deltas.get(&device)
    }
}

fn overlay<'a>(base: &'a FieldMap, delta: Option<&FieldMap>) -> Cow<'a, FieldMap> {
    match delta {
        Some(delta) if !delta.is_empty() => {
            let mut merged = base.clone();
            merged.extend(delta.iter().map(|(k, v)| (k.clone(), v.clone())));
            Cow::Owned(merged)
        }
        _ => Cow::Borrowed(base),
    }
}

/// Style properties whose value on `device` differs from the desktop baseline
pub fn overridden_properties(node: &Node, device: Device) -> Vec<&str> {
    delta(&node.responsive_styles, device)
        .map(|delta| {
            delta
                .iter()
                .filter(|(key, value)| node.styles.get(*key) != Some(*value))
                .map(|(key, _)| key.as_str())
                .collect()
        })
        .unwrap_or_default()
}

/// A node with every breakpoint merge already applied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub styles: StyleMap,
    pub content: ResolvedBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResolvedBody {
    Children(Vec<ResolvedNode>),
    Fields(FieldMap),
}

impl ResolvedNode {
    pub fn children(&self) -> &[ResolvedNode] {
        match &self.content {
            ResolvedBody::Children(children) => children,
            ResolvedBody::Fields(_) => &[],
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        match &self.content {
            ResolvedBody::Fields(fields) => fields.get(name),
            ResolvedBody::Children(_) => None,
        }
    }
}

pub fn resolve_node(node: &Node, device: Device) -> ResolvedNode {
    let content = match resolve_content(node, device) {
        ResolvedContent::Children(children) => {
            ResolvedBody::Children(children.iter().map(|child| resolve_node(child, device)).collect())
        }
        ResolvedContent::Fields(fields) => ResolvedBody::Fields(fields.into_owned()),
    };

    ResolvedNode {
        id: node.id().to_string(),
        name: node.name.clone(),
        kind: node.kind(),
        styles: resolve_styles(node, device).into_owned(),
        content,
    }
}

/// Resolve a whole element list, as a renderer paints it
pub fn resolve_tree(elements: &[Node], device: Device) -> Vec<ResolvedNode> {
    elements.iter().map(|node| resolve_node(node, device)).collect()
}
