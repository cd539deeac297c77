//! # Tree Mutations
//!
//! Structural and property edits on the element tree.
//!
//! ## Design Principles
//!
//! 1. **Total**: every mutation either applies fully or leaves the tree
//!    untouched. Missing targets are not errors.
//! 2. **Tree-only**: mutations see the element list, never the editor state.
//!    Selection and history are layered on top by the [`crate::Editor`].
//! 3. **Invariant-preserving**: ids stay unique, the body stays at the root,
//!    a node's content shape never changes, and no edit can create a cycle.
//!
//! ## Mutation Semantics
//!
//! ### Move
//! - Appends the node to the end of the target container
//! - No-op if the node already lives in the target
//! - No-op if the target is the node itself or one of its descendants
//!
//! ### Transfer
//! - Positional move: detach, then insert at `index` of the target, counted
//!   after the detach. Works within one container as a positional reorder
//!
//! ### Reorder
//! - Rearranges a container's children to match a permutation of their ids
//!
//! ### Delete
//! - Removes the node and all descendants. The body cannot be deleted

use easel_model::{tree, Content, Device, Node, NodeKind, ResponsiveMap, StyleMap, Value, BODY_ID};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Why a mutation left the tree unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoopReason {
    NotFound,
    NotAContainer,
    NotALeaf,
    AlreadyInPlace,
    WouldCreateCycle,
    ProtectedBody,
    DuplicateId,
    InvalidOrder,
    ShapeMismatch,
    DesktopBaseline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationOutcome {
    Applied,
    Noop(NoopReason),
}

impl MutationOutcome {
    pub fn is_applied(self) -> bool {
        matches!(self, MutationOutcome::Applied)
    }
}

fn noop(op: &'static str, node_id: &str, reason: NoopReason) -> MutationOutcome {
    debug!(op, node_id = %node_id, ?reason, "Mutation left the tree unchanged");
    MutationOutcome::Noop(reason)
}

/// Partial node update. Present fields overwrite, absent fields are kept.
///
/// `id` and `type` are deliberately absent: neither may change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsive_styles: Option<ResponsiveMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
}

impl NodePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_styles(mut self, styles: StyleMap) -> Self {
        self.styles = Some(styles);
        self
    }

    pub fn with_responsive_styles(mut self, responsive_styles: ResponsiveMap) -> Self {
        self.responsive_styles = Some(responsive_styles);
        self
    }

    pub fn with_content(mut self, content: Content) -> Self {
        self.content = Some(content);
        self
    }

    fn fits(&self, node: &Node) -> bool {
        self.content
            .as_ref()
            .map_or(true, |content| content.is_children() == node.is_container())
    }
}

/// Append `element` to the children of `container_id`
pub fn add_element(elements: &mut [Node], container_id: &str, element: Node) -> MutationOutcome {
    place(elements, "add_element", container_id, None, element)
}

/// Insert `element` at `index` (clamped) among the children of `container_id`
pub fn insert_element(
    elements: &mut [Node],
    container_id: &str,
    index: usize,
    element: Node,
) -> MutationOutcome {
    place(elements, "insert_element", container_id, Some(index), element)
}

fn place(
    elements: &mut [Node],
    op: &'static str,
    container_id: &str,
    index: Option<usize>,
    element: Node,
) -> MutationOutcome {
    if let Some(reason) = admission_check(elements, &element) {
        return noop(op, element.id(), reason);
    }

    let Some(container) = tree::find_mut(elements, container_id) else {
        return noop(op, container_id, NoopReason::NotFound);
    };
    let Some(children) = container.children_mut() else {
        return noop(op, container_id, NoopReason::NotAContainer);
    };

    let position = index.map_or(children.len(), |i| i.min(children.len()));
    children.insert(position, element);
    MutationOutcome::Applied
}

/// New subtrees may not bring a second body or reuse an id
fn admission_check(elements: &[Node], element: &Node) -> Option<NoopReason> {
    if holds_body(element) {
        return Some(NoopReason::ProtectedBody);
    }

    let mut known: HashSet<&str> = tree::node_ids(elements).into_iter().collect();
    let incoming = tree::node_ids(std::slice::from_ref(element));
    if incoming.into_iter().any(|id| !known.insert(id)) {
        return Some(NoopReason::DuplicateId);
    }

    None
}

fn holds_body(node: &Node) -> bool {
    node.kind() == NodeKind::Body || node.children().unwrap_or_default().iter().any(holds_body)
}

/// Shallow-merge `patch` into the node with `element_id`
pub fn update_element(elements: &mut [Node], element_id: &str, patch: NodePatch) -> MutationOutcome {
    let Some(current) = tree::find(elements, element_id) else {
        return noop("update_element", element_id, NoopReason::NotFound);
    };

    if !patch.fits(current) {
        warn!(node_id = %element_id, kind = %current.kind(), "Rejected content patch with the wrong shape");
        return MutationOutcome::Noop(NoopReason::ShapeMismatch);
    }

    if let Some(Content::Children(children)) = &patch.content {
        if let Some(reason) = replacement_check(elements, current, children) {
            return noop("update_element", element_id, reason);
        }
    }

    let Some(node) = tree::find_mut(elements, element_id) else {
        return noop("update_element", element_id, NoopReason::NotFound);
    };

    if let Some(name) = patch.name {
        node.name = name;
    }
    if let Some(styles) = patch.styles {
        node.styles = styles;
    }
    if let Some(responsive_styles) = patch.responsive_styles {
        node.responsive_styles = responsive_styles;
    }
    if let Some(content) = patch.content {
        if let Err(e) = node.replace_content(content) {
            // Shape was checked above
            unreachable!("{}", e);
        }
    }

    MutationOutcome::Applied
}

/// Replacement children may reuse the ids they replace, but no others
fn replacement_check(elements: &[Node], container: &Node, children: &[Node]) -> Option<NoopReason> {
    if children.iter().any(holds_body) {
        return Some(NoopReason::ProtectedBody);
    }

    let replaced: HashSet<&str> = tree::node_ids(container.children().unwrap_or_default())
        .into_iter()
        .collect();
    let mut known: HashSet<&str> = tree::node_ids(elements)
        .into_iter()
        .filter(|id| !replaced.contains(id))
        .collect();

    if tree::node_ids(children).into_iter().any(|id| !known.insert(id)) {
        return Some(NoopReason::DuplicateId);
    }
    None
}

/// Remove the node and its whole subtree
pub fn delete_element(elements: &mut Vec<Node>, element_id: &str) -> MutationOutcome {
    if element_id == BODY_ID {
        return noop("delete_element", element_id, NoopReason::ProtectedBody);
    }

    match detach(elements, element_id) {
        Some(_) => MutationOutcome::Applied,
        None => noop("delete_element", element_id, NoopReason::NotFound),
    }
}

/// Remove a node from wherever it lives and return it
fn detach(nodes: &mut Vec<Node>, id: &str) -> Option<Node> {
    if let Some(pos) = nodes.iter().position(|node| node.id() == id) {
        return Some(nodes.remove(pos));
    }

    nodes
        .iter_mut()
        .filter_map(Node::children_mut)
        .find_map(|children| detach(children, id))
}

/// Checks shared by Move and Transfer. Returns the current parent id.
fn relocation_check(
    elements: &[Node],
    op: &'static str,
    element_id: &str,
    target_container_id: &str,
) -> Result<String, MutationOutcome> {
    if element_id == BODY_ID {
        return Err(noop(op, element_id, NoopReason::ProtectedBody));
    }

    let Some(parent) = tree::find_parent(elements, element_id) else {
        return Err(noop(op, element_id, NoopReason::NotFound));
    };

    match tree::find(elements, target_container_id) {
        None => return Err(noop(op, target_container_id, NoopReason::NotFound)),
        Some(target) if !target.is_container() => {
            return Err(noop(op, target_container_id, NoopReason::NotAContainer))
        }
        Some(_) => {}
    }

    if tree::is_within(elements, element_id, target_container_id) {
        return Err(noop(op, element_id, NoopReason::WouldCreateCycle));
    }

    Ok(parent.id().to_string())
}

fn attach(elements: &mut [Node], target_container_id: &str, index: Option<usize>, node: Node) {
    match tree::find_mut(elements, target_container_id).and_then(Node::children_mut) {
        Some(children) => {
            let position = index.map_or(children.len(), |i| i.min(children.len()));
            children.insert(position, node);
        }
        // relocation_check proved the target is a container outside the moved subtree
        None => unreachable!("target container {} vanished during relocation", target_container_id),
    }
}

/// Move a node to the end of another container
pub fn move_element(
    elements: &mut Vec<Node>,
    element_id: &str,
    target_container_id: &str,
) -> MutationOutcome {
    let parent_id = match relocation_check(elements, "move_element", element_id, target_container_id) {
        Ok(parent_id) => parent_id,
        Err(outcome) => return outcome,
    };

    if parent_id == target_container_id {
        return noop("move_element", element_id, NoopReason::AlreadyInPlace);
    }

    let Some(node) = detach(elements, element_id) else {
        return noop("move_element", element_id, NoopReason::NotFound);
    };
    attach(elements, target_container_id, None, node);
    MutationOutcome::Applied
}

/// Move a node to `index` of a container (possibly its current one)
///
/// `index` is counted after the node has been removed from its old position.
pub fn transfer_element(
    elements: &mut Vec<Node>,
    element_id: &str,
    target_container_id: &str,
    index: usize,
) -> MutationOutcome {
    let parent_id =
        match relocation_check(elements, "transfer_element", element_id, target_container_id) {
            Ok(parent_id) => parent_id,
            Err(outcome) => return outcome,
        };

    if parent_id == target_container_id {
        let siblings = tree::find(elements, &parent_id)
            .and_then(Node::children)
            .unwrap_or_default();
        let current = siblings.iter().position(|node| node.id() == element_id);
        let last = siblings.len().saturating_sub(1);
        if current == Some(index.min(last)) {
            return noop("transfer_element", element_id, NoopReason::AlreadyInPlace);
        }
    }

    let Some(node) = detach(elements, element_id) else {
        return noop("transfer_element", element_id, NoopReason::NotFound);
    };
    attach(elements, target_container_id, Some(index), node);
    MutationOutcome::Applied
}

/// Rearrange a container's children to follow `order`
///
/// `order` must name every current child exactly once.
pub fn reorder_elements(elements: &mut [Node], container_id: &str, order: &[String]) -> MutationOutcome {
    let Some(container) = tree::find_mut(elements, container_id) else {
        return noop("reorder_elements", container_id, NoopReason::NotFound);
    };
    let Some(children) = container.children_mut() else {
        return noop("reorder_elements", container_id, NoopReason::NotAContainer);
    };

    if children.len() != order.len() {
        return noop("reorder_elements", container_id, NoopReason::InvalidOrder);
    }

    let mut expected: HashSet<&str> = children.iter().map(Node::id).collect();
    if !order.iter().all(|id| expected.remove(id.as_str())) {
        return noop("reorder_elements", container_id, NoopReason::InvalidOrder);
    }

    if children.iter().map(Node::id).eq(order.iter().map(String::as_str)) {
        return noop("reorder_elements", container_id, NoopReason::AlreadyInPlace);
    }

    let mut by_id: HashMap<String, Node> = std::mem::take(children)
        .into_iter()
        .map(|node| (node.id().to_string(), node))
        .collect();
    *children = order.iter().filter_map(|id| by_id.remove(id)).collect();
    MutationOutcome::Applied
}

/// Set one style property for a breakpoint
///
/// Desktop writes the base styles; other breakpoints write their delta.
pub fn set_style(
    elements: &mut [Node],
    element_id: &str,
    device: Device,
    property: &str,
    value: impl Into<Value>,
) -> MutationOutcome {
    let Some(node) = tree::find_mut(elements, element_id) else {
        return noop("set_style", element_id, NoopReason::NotFound);
    };

    let target = if device.is_desktop() {
        &mut node.styles
    } else {
        node.responsive_styles.entry(device).or_default()
    };
    target.insert(property.to_string(), value.into());
    MutationOutcome::Applied
}

/// Set one leaf content field for a breakpoint
pub fn set_field(
    elements: &mut [Node],
    element_id: &str,
    device: Device,
    field: &str,
    value: impl Into<Value>,
) -> MutationOutcome {
    let Some(node) = tree::find_mut(elements, element_id) else {
        return noop("set_field", element_id, NoopReason::NotFound);
    };
    let Some(leaf) = node.leaf_mut() else {
        return noop("set_field", element_id, NoopReason::NotALeaf);
    };

    let target = if device.is_desktop() {
        &mut leaf.fields
    } else {
        leaf.responsive_content.entry(device).or_default()
    };
    target.insert(field.to_string(), value.into());
    MutationOutcome::Applied
}

/// Clear a breakpoint's deltas back to the desktop baseline
///
/// The breakpoint key is kept with an empty delta.
pub fn reset_breakpoint(elements: &mut [Node], element_id: &str, device: Device) -> MutationOutcome {
    if device.is_desktop() {
        return noop("reset_breakpoint", element_id, NoopReason::DesktopBaseline);
    }

    let Some(node) = tree::find_mut(elements, element_id) else {
        return noop("reset_breakpoint", element_id, NoopReason::NotFound);
    };

    node.responsive_styles.insert(device, StyleMap::new());
    if let Some(leaf) = node.leaf_mut() {
        leaf.responsive_content.insert(device, Default::default());
    }
    MutationOutcome::Applied
}
