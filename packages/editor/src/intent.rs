//! # Intents
//!
//! Everything a gesture, property panel, toolbar or loader can ask the editor
//! to do. Intents are plain data and travel as JSON:
//!
//! ```text
//! { "type": "ADD_ELEMENT", "containerId": "__body", "element": { ... } }
//! { "type": "CHANGE_DEVICE", "device": "mobile" }
//! { "type": "UNDO" }
//! ```

use easel_model::{Device, Node, Value};
use serde::{Deserialize, Serialize};

use crate::{EditorResult, NodePatch};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    #[serde(rename_all = "camelCase")]
    AddElement { container_id: String, element: Node },

    #[serde(rename_all = "camelCase")]
    InsertElement {
        container_id: String,
        index: usize,
        element: Node,
    },

    #[serde(rename_all = "camelCase")]
    UpdateElement { element_id: String, patch: NodePatch },

    #[serde(rename_all = "camelCase")]
    DeleteElement { element_id: String },

    #[serde(rename_all = "camelCase")]
    MoveElement {
        element_id: String,
        target_container_id: String,
    },

    #[serde(rename_all = "camelCase")]
    ReorderElements {
        container_id: String,
        order: Vec<String>,
    },

    #[serde(rename_all = "camelCase")]
    TransferElement {
        element_id: String,
        target_container_id: String,
        index: usize,
    },

    #[serde(rename_all = "camelCase")]
    SetStyle {
        element_id: String,
        device: Device,
        property: String,
        value: Value,
    },

    #[serde(rename_all = "camelCase")]
    SetField {
        element_id: String,
        device: Device,
        field: String,
        value: Value,
    },

    #[serde(rename_all = "camelCase")]
    ResetBreakpoint { element_id: String, device: Device },

    /// Select a node by value, or clear the selection with `None`
    ChangeClickedElement {
        #[serde(default)]
        element: Option<Node>,
    },

    ChangeDevice { device: Device },

    TogglePreviewMode,

    ToggleLiveMode,

    Undo,

    Redo,

    #[serde(rename_all = "camelCase")]
    LoadData {
        elements: Vec<Node>,
        #[serde(default)]
        with_live: bool,
    },

    #[serde(rename_all = "camelCase")]
    SetPageId { page_id: String },
}

impl Intent {
    /// Wire name, also used as the history label
    pub fn name(&self) -> &'static str {
        match self {
            Intent::AddElement { .. } => "ADD_ELEMENT",
            Intent::InsertElement { .. } => "INSERT_ELEMENT",
            Intent::UpdateElement { .. } => "UPDATE_ELEMENT",
            Intent::DeleteElement { .. } => "DELETE_ELEMENT",
            Intent::MoveElement { .. } => "MOVE_ELEMENT",
            Intent::ReorderElements { .. } => "REORDER_ELEMENTS",
            Intent::TransferElement { .. } => "TRANSFER_ELEMENT",
            Intent::SetStyle { .. } => "SET_STYLE",
            Intent::SetField { .. } => "SET_FIELD",
            Intent::ResetBreakpoint { .. } => "RESET_BREAKPOINT",
            Intent::ChangeClickedElement { .. } => "CHANGE_CLICKED_ELEMENT",
            Intent::ChangeDevice { .. } => "CHANGE_DEVICE",
            Intent::TogglePreviewMode => "TOGGLE_PREVIEW_MODE",
            Intent::ToggleLiveMode => "TOGGLE_LIVE_MODE",
            Intent::Undo => "UNDO",
            Intent::Redo => "REDO",
            Intent::LoadData { .. } => "LOAD_DATA",
            Intent::SetPageId { .. } => "SET_PAGE_ID",
        }
    }

    /// Intents that append a history snapshot
    pub fn is_undoable(&self) -> bool {
        self.is_tree_edit()
            || matches!(
                self,
                Intent::ChangeClickedElement { .. } | Intent::SetPageId { .. }
            )
    }

    /// Intents that go through the mutation engine
    pub fn is_tree_edit(&self) -> bool {
        matches!(
            self,
            Intent::AddElement { .. }
                | Intent::InsertElement { .. }
                | Intent::UpdateElement { .. }
                | Intent::DeleteElement { .. }
                | Intent::MoveElement { .. }
                | Intent::ReorderElements { .. }
                | Intent::TransferElement { .. }
                | Intent::SetStyle { .. }
                | Intent::SetField { .. }
                | Intent::ResetBreakpoint { .. }
        )
    }

    pub fn from_json(source: &str) -> EditorResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Decode a JSON array of intents
    pub fn list_from_json(source: &str) -> EditorResult<Vec<Self>> {
        Ok(serde_json::from_str(source)?)
    }
}
