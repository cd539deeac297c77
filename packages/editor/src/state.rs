//! # Editor State
//!
//! Everything one history snapshot captures: the element tree, the selected
//! node, and the view modes.
//!
//! The selection is a value copy of the node, not a reference into the tree.
//! Edits that touch a single node re-synchronise it:
//! - editing the selected node refreshes the copy
//! - editing any other node clears the selection
//!
//! The second rule means an unrelated edit drops the selection rather than
//! leaving a copy that might be stale.

use easel_model::{tree, Device, Node};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    /// Root-anchored tree: a list holding the single body node
    pub elements: Vec<Node>,

    /// Copy of the selected node; `None` when nothing is selected
    pub selected_element: Option<Node>,

    pub device: Device,

    pub preview_mode: bool,

    pub live_mode: bool,

    /// Persisted document this state belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::with_elements(vec![Node::body()])
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_elements(elements: Vec<Node>) -> Self {
        Self {
            elements,
            selected_element: None,
            device: Device::Desktop,
            preview_mode: false,
            live_mode: false,
            page_id: None,
        }
    }

    pub fn body(&self) -> Option<&Node> {
        self.elements.first()
    }

    pub fn find(&self, id: &str) -> Option<&Node> {
        tree::find(&self.elements, id)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_element.as_ref().map(Node::id)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_id() == Some(id)
    }

    /// Apply the selection rule after an edit addressed to `edited_id`
    pub(crate) fn sync_selection_after_edit(&mut self, edited_id: &str) {
        self.selected_element = if self.is_selected(edited_id) {
            tree::find(&self.elements, edited_id).cloned()
        } else {
            None
        };
    }

    /// Drop the selection when its node is no longer in the tree
    pub(crate) fn drop_selection_if_detached(&mut self) {
        if let Some(id) = self.selected_id() {
            if tree::find(&self.elements, id).is_none() {
                self.selected_element = None;
            }
        }
    }
}
