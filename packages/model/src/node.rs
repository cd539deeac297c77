//! # Document nodes
//!
//! A [`Node`] is either a container (ordered children) or a leaf (a record of
//! content fields). Which one is decided by its [`NodeKind`] and can never
//! change afterwards: `kind` and `content` are private, constructors pick the
//! right [`Content`] shape, and deserialization rejects a node whose content
//! disagrees with its type.
//!
//! ## Wire shape
//!
//! ```text
//! {
//!   "id": "3f2a9c1e-4",
//!   "name": "Headline",
//!   "type": "text",
//!   "styles": { "color": "red", "fontSize": 12 },
//!   "responsiveStyles": { "mobile": { "fontSize": 10 } },
//!   "content": { "innerText": "Hello", "responsiveContent": { "mobile": { "innerText": "Hi" } } }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::{Device, ModelError, ModelResult};

/// Reserved id of the document root
pub const BODY_ID: &str = "__body";

/// Style property name → value. Values are opaque JSON to the engine.
pub type StyleMap = BTreeMap<String, Value>;

/// Leaf content field name → value, which may be structured (card features, media sources)
pub type FieldMap = BTreeMap<String, Value>;

/// Breakpoint → partial override delta
pub type ResponsiveMap = BTreeMap<Device, BTreeMap<String, Value>>;

/// Widget kinds. Containers hold children, everything else holds fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "__body")]
    Body,
    #[serde(rename = "container")]
    Container,
    #[serde(rename = "section")]
    Section,
    #[serde(rename = "2Col")]
    TwoColumns,
    #[serde(rename = "3Col")]
    ThreeColumns,
    #[serde(rename = "grid")]
    Grid,
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "link")]
    Link,
    #[serde(rename = "button")]
    Button,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "pattern")]
    Pattern,
    #[serde(rename = "card")]
    Card,
}

impl NodeKind {
    pub fn is_container(self) -> bool {
        matches!(
            self,
            NodeKind::Body
                | NodeKind::Container
                | NodeKind::Section
                | NodeKind::TwoColumns
                | NodeKind::ThreeColumns
                | NodeKind::Grid
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Body => "__body",
            NodeKind::Container => "container",
            NodeKind::Section => "section",
            NodeKind::TwoColumns => "2Col",
            NodeKind::ThreeColumns => "3Col",
            NodeKind::Grid => "grid",
            NodeKind::Text => "text",
            NodeKind::Link => "link",
            NodeKind::Button => "button",
            NodeKind::Image => "image",
            NodeKind::Video => "video",
            NodeKind::Pattern => "pattern",
            NodeKind::Card => "card",
        }
    }

    /// Label given to freshly created nodes
    pub fn default_name(self) -> &'static str {
        match self {
            NodeKind::Body => "Body",
            NodeKind::Container => "Container",
            NodeKind::Section => "Section",
            NodeKind::TwoColumns => "Two Columns",
            NodeKind::ThreeColumns => "Three Columns",
            NodeKind::Grid => "Grid",
            NodeKind::Text => "Text",
            NodeKind::Link => "Link",
            NodeKind::Button => "Button",
            NodeKind::Image => "Image",
            NodeKind::Video => "Video",
            NodeKind::Pattern => "Pattern",
            NodeKind::Card => "Card",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field record of a leaf node, with optional per-breakpoint deltas
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafContent {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub responsive_content: ResponsiveMap,

    #[serde(flatten)]
    pub fields: FieldMap,
}

impl LeafContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// A field's value when it is a JSON string
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name)?.as_str()
    }

    /// Override delta for a breakpoint, if one is recorded
    pub fn responsive(&self, device: Device) -> Option<&FieldMap> {
        self.responsive_content.get(&device)
    }
}

/// Either children or a leaf record, never both
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Children(Vec<Node>),
    Leaf(LeafContent),
}

impl Content {
    /// Empty content of the shape `kind` requires
    pub fn empty_for(kind: NodeKind) -> Self {
        if kind.is_container() {
            Content::Children(Vec::new())
        } else {
            Content::Leaf(LeafContent::new())
        }
    }

    pub fn is_children(&self) -> bool {
        matches!(self, Content::Children(_))
    }

    fn fits(&self, kind: NodeKind) -> bool {
        self.is_children() == kind.is_container()
    }
}

/// A single element of the document tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawNode")]
pub struct Node {
    id: String,
    pub name: String,
    #[serde(rename = "type")]
    kind: NodeKind,
    pub styles: StyleMap,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub responsive_styles: ResponsiveMap,
    content: Content,
}

impl Node {
    /// Create an empty node whose content shape matches `kind`
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: kind.default_name().to_string(),
            kind,
            styles: StyleMap::new(),
            responsive_styles: ResponsiveMap::new(),
            content: Content::empty_for(kind),
        }
    }

    /// The empty document root
    pub fn body() -> Self {
        Self::new(BODY_ID, NodeKind::Body)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        self.styles.insert(property.into(), value.into());
        self
    }

    pub fn with_styles(mut self, styles: StyleMap) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_responsive_style(
        mut self,
        device: Device,
        property: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.responsive_styles
            .entry(device)
            .or_default()
            .insert(property.into(), value.into());
        self
    }

    /// # Panics
    ///
    /// Panics if the node is a container.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        match &mut self.content {
            Content::Leaf(leaf) => {
                leaf.fields.insert(name.into(), value.into());
            }
            Content::Children(_) => panic!("{} node {} has no content fields", self.kind, self.id),
        }
        self
    }

    /// # Panics
    ///
    /// Panics if the node is a container.
    pub fn with_responsive_field(
        mut self,
        device: Device,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        match &mut self.content {
            Content::Leaf(leaf) => {
                leaf.responsive_content
                    .entry(device)
                    .or_default()
                    .insert(name.into(), value.into());
            }
            Content::Children(_) => panic!("{} node {} has no content fields", self.kind, self.id),
        }
        self
    }

    /// # Panics
    ///
    /// Panics if the node is a leaf.
    pub fn with_child(mut self, child: Node) -> Self {
        if let Err(e) = self.push_child(child) {
            panic!("{}", e);
        }
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn set_id(&mut self, id: String) {
        self.id = id;
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn children(&self) -> Option<&[Node]> {
        match &self.content {
            Content::Children(children) => Some(children),
            Content::Leaf(_) => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match &mut self.content {
            Content::Children(children) => Some(children),
            Content::Leaf(_) => None,
        }
    }

    pub fn leaf(&self) -> Option<&LeafContent> {
        match &self.content {
            Content::Leaf(leaf) => Some(leaf),
            Content::Children(_) => None,
        }
    }

    pub fn leaf_mut(&mut self) -> Option<&mut LeafContent> {
        match &mut self.content {
            Content::Leaf(leaf) => Some(leaf),
            Content::Children(_) => None,
        }
    }

    pub fn push_child(&mut self, child: Node) -> ModelResult<()> {
        match &mut self.content {
            Content::Children(children) => {
                children.push(child);
                Ok(())
            }
            Content::Leaf(_) => Err(ModelError::NotAContainer(self.id.clone())),
        }
    }

    /// Swap in new content, keeping the shape fixed by the node's kind
    pub fn replace_content(&mut self, content: Content) -> ModelResult<()> {
        if !content.fits(self.kind) {
            return Err(ModelError::content_mismatch(&self.id, self.kind));
        }
        self.content = content;
        Ok(())
    }

    /// Find this node or a descendant by id
    pub fn find(&self, id: &str) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.children()?.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Node> {
        if self.id == id {
            return Some(self);
        }
        self.children_mut()?
            .iter_mut()
            .find_map(|child| child.find_mut(id))
    }

    /// True if `id` is this node or any of its descendants
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: NodeKind,
    #[serde(default)]
    styles: StyleMap,
    #[serde(default)]
    responsive_styles: ResponsiveMap,
    content: Content,
}

impl TryFrom<RawNode> for Node {
    type Error = ModelError;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        if !raw.content.fits(raw.kind) {
            return Err(ModelError::content_mismatch(raw.id, raw.kind));
        }

        Ok(Self {
            id: raw.id,
            name: raw.name,
            kind: raw.kind,
            styles: raw.styles,
            responsive_styles: raw.responsive_styles,
            content: raw.content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_content_follows_kind() {
        let section = Node::new("s1", NodeKind::Section);
        assert!(section.children().is_some());
        assert!(section.leaf().is_none());

        let text = Node::new("t1", NodeKind::Text);
        assert!(text.children().is_none());
        assert!(text.leaf().is_some());
        assert_eq!(text.name, "Text");
    }

    #[test]
    fn test_replace_content_rejects_wrong_shape() {
        let mut text = Node::new("t1", NodeKind::Text);
        let result = text.replace_content(Content::Children(vec![]));
        assert!(matches!(result, Err(ModelError::ContentMismatch { .. })));

        let mut body = Node::body();
        assert!(body.replace_content(Content::Leaf(LeafContent::new())).is_err());
        assert!(body.replace_content(Content::Children(vec![])).is_ok());
    }

    #[test]
    fn test_push_child_into_leaf_fails() {
        let mut link = Node::new("l1", NodeKind::Link);
        let result = link.push_child(Node::new("t1", NodeKind::Text));
        assert!(matches!(result, Err(ModelError::NotAContainer(id)) if id == "l1"));
    }

    #[test]
    fn test_find_and_contains() {
        let tree = Node::body().with_child(
            Node::new("c1", NodeKind::Container)
                .with_child(Node::new("t1", NodeKind::Text).with_field("innerText", "hi")),
        );

        assert_eq!(tree.find("t1").unwrap().leaf().unwrap().get_str("innerText"), Some("hi"));
        assert!(tree.contains("c1"));
        assert!(!tree.find("c1").unwrap().contains(BODY_ID));
        assert!(tree.find("missing").is_none());
    }

    #[test]
    fn test_serialize_leaf_shape() {
        let node = Node::new("t1", NodeKind::Text)
            .with_style("color", "red")
            .with_field("innerText", "Hello")
            .with_responsive_field(Device::Mobile, "innerText", "Hi");

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["content"]["innerText"], "Hello");
        assert_eq!(json["content"]["responsiveContent"]["mobile"]["innerText"], "Hi");
        assert!(json.get("responsiveStyles").is_none());
    }

    #[test]
    fn test_deserialize_container_and_leaf() {
        let json = r#"{
            "id": "__body",
            "name": "Body",
            "type": "__body",
            "styles": {},
            "content": [
                {
                    "id": "t1",
                    "name": "Text",
                    "type": "text",
                    "styles": { "fontSize": "12px" },
                    "responsiveStyles": { "tablet": { "fontSize": "11px" } },
                    "content": { "innerText": "Hello" }
                }
            ]
        }"#;

        let body: Node = serde_json::from_str(json).unwrap();
        let text = body.find("t1").unwrap();
        assert_eq!(text.kind(), NodeKind::Text);
        assert_eq!(text.responsive_styles[&Device::Tablet]["fontSize"], "11px");
        assert_eq!(text.leaf().unwrap().get_str("innerText"), Some("Hello"));
    }

    #[test]
    fn test_structured_values_round_trip() {
        let json = r##"{
            "id": "k1",
            "name": "Pricing",
            "type": "card",
            "styles": { "color": "red", "fontSize": 12, "bold": true },
            "responsiveStyles": { "mobile": { "fontSize": 10, "margin": [0, 4] } },
            "content": {
                "title": "Pro",
                "price": 19.5,
                "features": ["a", "b"],
                "cta": { "label": "Buy", "href": "#buy" },
                "responsiveContent": { "mobile": { "features": ["a"] } }
            }
        }"##;

        let card: Node = serde_json::from_str(json).unwrap();
        assert_eq!(card.styles["fontSize"], 12);
        assert_eq!(card.styles["bold"], true);
        assert_eq!(card.responsive_styles[&Device::Mobile]["margin"], serde_json::json!([0, 4]));

        let leaf = card.leaf().unwrap();
        assert_eq!(leaf.get("features"), Some(&serde_json::json!(["a", "b"])));
        assert_eq!(leaf.get("price"), Some(&serde_json::json!(19.5)));
        assert_eq!(leaf.get_str("title"), Some("Pro"));
        assert_eq!(leaf.get_str("price"), None);
        assert_eq!(leaf.responsive(Device::Mobile).unwrap()["features"], serde_json::json!(["a"]));

        let reloaded: Node = serde_json::from_str(&serde_json::to_string(&card).unwrap()).unwrap();
        assert_eq!(reloaded, card);
    }

    #[test]
    fn test_deserialize_rejects_mismatched_content() {
        let json = r#"{ "id": "t1", "type": "text", "styles": {}, "content": [] }"#;
        assert!(serde_json::from_str::<Node>(json).is_err());

        let json = r#"{ "id": "c1", "type": "container", "styles": {}, "content": {} }"#;
        assert!(serde_json::from_str::<Node>(json).is_err());
    }
}
