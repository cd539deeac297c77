//! Lookups over a root-anchored element list.
//!
//! The editor keeps its document as a list holding the single body node.
//! Every function here takes that list and searches at any depth.

use crate::visitor::{walk_elements, walk_node, Visitor};
use crate::Node;

pub fn find<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Node> {
    nodes.iter().find_map(|node| node.find(id))
}

pub fn find_mut<'a>(nodes: &'a mut [Node], id: &str) -> Option<&'a mut Node> {
    nodes.iter_mut().find_map(|node| node.find_mut(id))
}

/// The container whose children include `id`
pub fn find_parent<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Node> {
    nodes.iter().find_map(|node| parent_of(node, id))
}

fn holds_child(node: &Node, id: &str) -> bool {
    node.children()
        .map_or(false, |children| children.iter().any(|child| child.id() == id))
}

fn parent_of<'a>(node: &'a Node, id: &str) -> Option<&'a Node> {
    if holds_child(node, id) {
        return Some(node);
    }
    node.children()?.iter().find_map(|child| parent_of(child, id))
}

/// True if `id` is `ancestor_id` itself or lies anywhere beneath it
pub fn is_within(nodes: &[Node], ancestor_id: &str, id: &str) -> bool {
    find(nodes, ancestor_id).map_or(false, |ancestor| ancestor.contains(id))
}

struct IdCollector<'a> {
    ids: Vec<&'a str>,
}

impl<'a> IdCollector<'a> {
    fn collect(nodes: &'a [Node]) -> Vec<&'a str> {
        let mut collector = IdCollector { ids: Vec::new() };
        for node in nodes {
            collector.push(node);
        }
        collector.ids
    }

    fn push(&mut self, node: &'a Node) {
        self.ids.push(node.id());
        if let Some(children) = node.children() {
            for child in children {
                self.push(child);
            }
        }
    }
}

/// Every id in depth-first order
pub fn node_ids(nodes: &[Node]) -> Vec<&str> {
    IdCollector::collect(nodes)
}

struct Counter(usize);

impl Visitor for Counter {
    fn visit_node(&mut self, node: &Node) {
        self.0 += 1;
        walk_node(self, node);
    }
}

pub fn node_count(nodes: &[Node]) -> usize {
    let mut counter = Counter(0);
    walk_elements(&mut counter, nodes);
    counter.0
}
