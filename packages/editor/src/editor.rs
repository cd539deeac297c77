//! # Editor
//!
//! Single owner of the live [`EditorState`] and its [`History`]. Every change
//! goes through [`Editor::dispatch`]:
//!
//! - tree edits, selection and page-id changes compute the next state and
//!   record a snapshot, even when the tree edit turned out to be a no-op
//! - device and preview/live toggles change the live state in place
//! - undo/redo move the history pointer and restore that snapshot
//! - loading replaces state and history with a fresh seed

use easel_model::{validate, Device, IdGenerator, Node, NodeKind};
use tracing::{debug, info, instrument, warn};

use crate::mutations::{self, MutationOutcome};
use crate::{EditorResult, EditorState, History, Intent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorOptions {
    /// Maximum retained snapshots (0 = unlimited)
    pub history_limit: usize,

    /// Key the id generator seed is derived from
    pub id_seed: String,

    /// Breakpoint a fresh or freshly loaded editor starts on
    pub default_device: Device,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            history_limit: 0,
            id_seed: "easel".to_string(),
            default_device: Device::Desktop,
        }
    }
}

/// What a dispatched intent did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A snapshot was appended at `index`
    Recorded {
        index: usize,
        outcome: MutationOutcome,
    },

    /// Live state changed without a snapshot
    Applied,

    /// Undo or redo restored the snapshot at `index`
    Restored { index: usize },

    /// State and history were replaced by a load
    Reset,

    /// Nothing happened
    Ignored,
}

impl Transition {
    pub fn is_recorded(self) -> bool {
        matches!(self, Transition::Recorded { .. })
    }
}

pub struct Editor {
    state: EditorState,
    history: History,
    ids: IdGenerator,
    options: EditorOptions,
}

impl Editor {
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    pub fn with_options(options: EditorOptions) -> Self {
        let state = Self::seed_state(vec![Node::body()], &options);
        Self {
            history: History::with_max_levels(state.clone(), options.history_limit),
            ids: IdGenerator::new(&options.id_seed),
            state,
            options,
        }
    }

    /// Editor already holding `elements`, as if freshly loaded
    pub fn with_document(elements: Vec<Node>, options: EditorOptions) -> EditorResult<Self> {
        let mut editor = Self::with_options(options);
        editor.load(elements)?;
        Ok(editor)
    }

    fn seed_state(elements: Vec<Node>, options: &EditorOptions) -> EditorState {
        let mut state = EditorState::with_elements(elements);
        state.device = options.default_device;
        state
    }

    /// Apply one intent
    #[instrument(skip_all, fields(intent = intent.name()))]
    pub fn dispatch(&mut self, intent: Intent) -> Transition {
        match intent {
            Intent::Undo => self.undo(),
            Intent::Redo => self.redo(),

            Intent::ChangeDevice { device } => {
                self.state.device = device;
                Transition::Applied
            }
            Intent::TogglePreviewMode => {
                self.state.preview_mode = !self.state.preview_mode;
                Transition::Applied
            }
            Intent::ToggleLiveMode => {
                self.state.live_mode = !self.state.live_mode;
                Transition::Applied
            }

            Intent::LoadData {
                elements,
                with_live,
            } => match self.reset_to(elements, with_live) {
                Ok(()) => Transition::Reset,
                Err(_) => Transition::Ignored,
            },

            Intent::ChangeClickedElement { element } => {
                self.state.selected_element = element;
                self.record("CHANGE_CLICKED_ELEMENT", MutationOutcome::Applied)
            }
            Intent::SetPageId { page_id } => {
                self.state.page_id = Some(page_id);
                self.record("SET_PAGE_ID", MutationOutcome::Applied)
            }

            edit => self.apply_edit(edit),
        }
    }

    fn apply_edit(&mut self, intent: Intent) -> Transition {
        let label = intent.name();
        let state = &mut self.state;

        let outcome = match intent {
            Intent::AddElement {
                container_id,
                element,
            } => mutations::add_element(&mut state.elements, &container_id, element),
            Intent::InsertElement {
                container_id,
                index,
                element,
            } => mutations::insert_element(&mut state.elements, &container_id, index, element),
            Intent::UpdateElement { element_id, patch } => {
                let outcome = mutations::update_element(&mut state.elements, &element_id, patch);
                state.sync_selection_after_edit(&element_id);
                outcome
            }
            Intent::DeleteElement { element_id } => {
                let outcome = mutations::delete_element(&mut state.elements, &element_id);
                state.drop_selection_if_detached();
                outcome
            }
            Intent::MoveElement {
                element_id,
                target_container_id,
            } => mutations::move_element(&mut state.elements, &element_id, &target_container_id),
            Intent::ReorderElements {
                container_id,
                order,
            } => mutations::reorder_elements(&mut state.elements, &container_id, &order),
            Intent::TransferElement {
                element_id,
                target_container_id,
                index,
            } => mutations::transfer_element(
                &mut state.elements,
                &element_id,
                &target_container_id,
                index,
            ),
            Intent::SetStyle {
                element_id,
                device,
                property,
                value,
            } => {
                let outcome =
                    mutations::set_style(&mut state.elements, &element_id, device, &property, value);
                state.sync_selection_after_edit(&element_id);
                outcome
            }
            Intent::SetField {
                element_id,
                device,
                field,
                value,
            } => {
                let outcome =
                    mutations::set_field(&mut state.elements, &element_id, device, &field, value);
                state.sync_selection_after_edit(&element_id);
                outcome
            }
            Intent::ResetBreakpoint { element_id, device } => {
                let outcome = mutations::reset_breakpoint(&mut state.elements, &element_id, device);
                state.sync_selection_after_edit(&element_id);
                outcome
            }
            other => unreachable!("{} is not a tree edit", other.name()),
        };

        self.record(label, outcome)
    }

    fn record(&mut self, label: &'static str, outcome: MutationOutcome) -> Transition {
        let index = self.history.record(self.state.clone(), label);
        debug!(index, ?outcome, "Recorded snapshot");
        Transition::Recorded { index, outcome }
    }

    /// Step back one snapshot. No-op at the seed.
    pub fn undo(&mut self) -> Transition {
        match self.history.undo() {
            Some(previous) => {
                self.state = previous.clone();
                let index = self.history.current_index();
                debug!(index, "Undo");
                Transition::Restored { index }
            }
            None => {
                debug!("Nothing to undo");
                Transition::Ignored
            }
        }
    }

    /// Step forward one snapshot. No-op at the newest entry.
    pub fn redo(&mut self) -> Transition {
        match self.history.redo() {
            Some(next) => {
                self.state = next.clone();
                let index = self.history.current_index();
                debug!(index, "Redo");
                Transition::Restored { index }
            }
            None => {
                debug!("Nothing to redo");
                Transition::Ignored
            }
        }
    }

    /// Replace the document and start a fresh history holding it
    ///
    /// The page id survives; selection, modes and history do not.
    pub fn load(&mut self, elements: Vec<Node>) -> EditorResult<()> {
        self.reset_to(elements, false)
    }

    fn reset_to(&mut self, elements: Vec<Node>, live_mode: bool) -> EditorResult<()> {
        if let Err(e) = validate(&elements) {
            warn!(error = %e, "Rejected document load");
            return Err(e.into());
        }

        let page_id = self.state.page_id.take();
        self.state = Self::seed_state(elements, &self.options);
        self.state.page_id = page_id;
        self.state.live_mode = live_mode;
        self.history.reset(self.state.clone());
        self.ids.resume_after(&self.state.elements);

        info!(
            nodes = easel_model::tree::node_count(&self.state.elements),
            "Loaded document"
        );
        Ok(())
    }

    /// Select the node with `id`, or clear the selection if it does not exist
    pub fn select(&mut self, id: &str) -> Transition {
        let element = self.state.find(id).cloned();
        self.dispatch(Intent::ChangeClickedElement { element })
    }

    /// Live tree node behind the current selection
    pub fn selected_live(&self) -> Option<&Node> {
        self.state.selected_id().and_then(|id| self.state.find(id))
    }

    /// Fresh empty node of `kind` with a generated id
    pub fn create_node(&mut self, kind: NodeKind) -> Node {
        Node::new(self.ids.new_id(), kind)
    }

    /// Copy of a template subtree with fresh ids throughout
    pub fn instantiate(&mut self, template: &Node) -> Node {
        self.ids.instantiate(template)
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn elements(&self) -> &[Node] {
        &self.state.elements
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
