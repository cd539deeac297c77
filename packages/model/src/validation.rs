//! Tree invariant checks.
//!
//! [`validate`] is the gate used when a tree enters the engine from outside
//! (loading, decoding). [`diagnose`] reports every problem it can find,
//! including warnings that do not make a tree unusable.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::visitor::{walk_node, Visitor};
use crate::{Device, LeafContent, ModelError, ModelResult, Node, NodeKind, BODY_ID};

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Error,
    Warning,
}

/// A problem found in a document tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,

    /// Short rule name, e.g. `unique-ids`
    pub rule: String,

    pub message: String,

    /// Node the problem was found on, if any
    pub node_id: Option<String>,
}

impl Diagnostic {
    pub fn error(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            rule: rule.into(),
            message: message.into(),
            node_id: None,
        }
    }

    pub fn warning(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            rule: rule.into(),
            message: message.into(),
            node_id: None,
        }
    }

    pub fn on(mut self, node_id: impl Into<String>) -> Self {
        self.node_id = Some(node_id.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == DiagnosticLevel::Error
    }
}

/// Check the invariants the engine relies on: a single `__body` root of kind
/// body, no other body node, and globally unique non-empty ids.
///
/// Agrees with the errors [`diagnose`] reports.
pub fn validate(nodes: &[Node]) -> ModelResult<()> {
    let root = match nodes {
        [] => return Err(ModelError::MissingBody),
        [root] => root,
        _ => return Err(ModelError::MultipleRoots(nodes.len())),
    };

    if root.id() != BODY_ID || root.kind() != NodeKind::Body {
        return Err(ModelError::MissingBody);
    }

    let mut seen = HashSet::new();
    check_node(root, true, &mut seen)
}

fn check_node<'a>(node: &'a Node, is_root: bool, seen: &mut HashSet<&'a str>) -> ModelResult<()> {
    if node.id().is_empty() {
        return Err(ModelError::EmptyId);
    }
    if !seen.insert(node.id()) {
        return Err(ModelError::DuplicateId(node.id().to_string()));
    }
    if !is_root && node.kind() == NodeKind::Body {
        return Err(ModelError::NestedBody(node.id().to_string()));
    }

    node.children()
        .unwrap_or_default()
        .iter()
        .try_for_each(|child| check_node(child, false, seen))
}

/// Collect every error and warning in the tree
pub fn diagnose(nodes: &[Node]) -> Vec<Diagnostic> {
    let mut checker = Checker::default();

    match nodes {
        [] => checker.push(Diagnostic::error("single-root", "Document has no body node")),
        [_] => {}
        _ => checker.push(Diagnostic::error(
            "single-root",
            format!("Document must have exactly one root node, found {}", nodes.len()),
        )),
    }

    for (index, root) in nodes.iter().enumerate() {
        if index == 0 && (root.id() != BODY_ID || root.kind() != NodeKind::Body) {
            checker.push(
                Diagnostic::error(
                    "body-root",
                    format!("Root node must be {} of type {}", BODY_ID, NodeKind::Body),
                )
                .on(root.id()),
            );
        }
        checker.root = true;
        checker.visit_node(root);
    }

    checker.diagnostics
}

#[derive(Default)]
struct Checker {
    seen: HashSet<String>,
    diagnostics: Vec<Diagnostic>,
    root: bool,
}

impl Checker {
    fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

impl Visitor for Checker {
    fn visit_node(&mut self, node: &Node) {
        let is_root = std::mem::take(&mut self.root);

        if node.id().is_empty() {
            self.push(Diagnostic::error("empty-id", "Node has an empty id"));
        } else if !self.seen.insert(node.id().to_string()) {
            self.push(
                Diagnostic::error("unique-ids", format!("Duplicate node id: {}", node.id()))
                    .on(node.id()),
            );
        }

        if !is_root && node.kind() == NodeKind::Body {
            self.push(
                Diagnostic::error("nested-body", "Body node may only appear at the root")
                    .on(node.id()),
            );
        }

        if node.responsive_styles.contains_key(&Device::Desktop) {
            self.push(
                Diagnostic::warning(
                    "desktop-delta",
                    "Desktop style overrides are never applied; edit the base styles instead",
                )
                .on(node.id()),
            );
        }

        walk_node(self, node);
    }

    fn visit_leaf(&mut self, node: &Node, leaf: &LeafContent) {
        if leaf.responsive_content.contains_key(&Device::Desktop) {
            self.push(
                Diagnostic::warning(
                    "desktop-delta",
                    "Desktop content overrides are never applied; edit the base content instead",
                )
                .on(node.id()),
            );
        }
    }
}
