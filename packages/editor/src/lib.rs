//! # Easel Editor
//!
//! Document state engine behind the page builder canvas.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ gestures / property panel / loader          │
//! │  emit Intent values (JSON-serializable)     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Editor::dispatch                    │
//! │  - tree mutations (add, move, reorder, ...) │
//! │  - selection + device/preview/live modes    │
//! │  - linear undo/redo over whole snapshots    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ responsive: per-breakpoint resolution       │
//! │  read by the renderer                       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Total edits**: a missing or invalid target is a no-op, never an error
//! 2. **Snapshots, not diffs**: history stores whole editor states
//! 3. **Desktop is canonical**: tablet and mobile only store deltas
//!
//! ## Usage
//!
//! ```rust
//! use easel_editor::{Editor, Intent, NodePatch};
//! use easel_model::{LeafContent, Content, Node, NodeKind, BODY_ID};
//!
//! let mut editor = Editor::new();
//!
//! editor.dispatch(Intent::AddElement {
//!     container_id: BODY_ID.to_string(),
//!     element: Node::new("t1", NodeKind::Text),
//! });
//! editor.dispatch(Intent::UpdateElement {
//!     element_id: "t1".to_string(),
//!     patch: NodePatch::new()
//!         .with_content(Content::Leaf(LeafContent::new().with_field("innerText", "hi"))),
//! });
//!
//! editor.dispatch(Intent::Undo);
//! assert_eq!(editor.state().find("t1").unwrap().leaf().unwrap().get("innerText"), None);
//! ```

mod editor;
mod errors;
mod history;
mod intent;
pub mod mutations;
pub mod responsive;
mod state;

pub use editor::{Editor, EditorOptions, Transition};
pub use errors::{EditorError, EditorResult};
pub use history::{History, HistoryEntry};
pub use intent::Intent;
pub use mutations::{MutationOutcome, NodePatch, NoopReason};
pub use responsive::{resolve_content, resolve_styles, resolve_tree, ResolvedContent, ResolvedNode};
pub use state::EditorState;
