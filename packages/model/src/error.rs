use thiserror::Error;

use crate::NodeKind;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Duplicate node id: {0}")]
    DuplicateId(String),

    #[error("Node id must not be empty")]
    EmptyId,

    #[error("Body node {0} may only appear at the root")]
    NestedBody(String),

    #[error("Document has no body node")]
    MissingBody,

    #[error("Document must have exactly one root node, found {0}")]
    MultipleRoots(usize),

    #[error("Node {id} of type {kind} has the wrong content shape")]
    ContentMismatch { id: String, kind: NodeKind },

    #[error("Node {0} cannot have children")]
    NotAContainer(String),

    #[error("Unknown device: {0}")]
    UnknownDevice(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModelError {
    pub fn content_mismatch(id: impl Into<String>, kind: NodeKind) -> Self {
        Self::ContentMismatch {
            id: id.into(),
            kind,
        }
    }
}
