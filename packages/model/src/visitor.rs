use crate::{Content, LeafContent, Node};

/// Visitor pattern for traversing the node tree immutably
///
/// The default implementations walk the entire tree depth-first, parents
/// before children. Override `visit_*` methods to act on specific nodes.
pub trait Visitor: Sized {
    fn visit_node(&mut self, node: &Node) {
        walk_node(self, node);
    }

    fn visit_leaf(&mut self, _node: &Node, _leaf: &LeafContent) {
        // Leaf record, no children to walk
    }
}

/// Mutable visitor pattern for transforming nodes in place
pub trait VisitorMut: Sized {
    fn visit_node_mut(&mut self, node: &mut Node) {
        walk_node_mut(self, node);
    }

    fn visit_leaf_mut(&mut self, _leaf: &mut LeafContent) {
        // Leaf record, no children to walk
    }
}

pub fn walk_elements<V: Visitor>(visitor: &mut V, nodes: &[Node]) {
    for node in nodes {
        visitor.visit_node(node);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &Node) {
    match node.content() {
        Content::Children(children) => {
            for child in children {
                visitor.visit_node(child);
            }
        }
        Content::Leaf(leaf) => visitor.visit_leaf(node, leaf),
    }
}

pub fn walk_elements_mut<V: VisitorMut>(visitor: &mut V, nodes: &mut [Node]) {
    for node in nodes {
        visitor.visit_node_mut(node);
    }
}

pub fn walk_node_mut<V: VisitorMut>(visitor: &mut V, node: &mut Node) {
    if let Some(children) = node.children_mut() {
        for child in children {
            visitor.visit_node_mut(child);
        }
    } else if let Some(leaf) = node.leaf_mut() {
        visitor.visit_leaf_mut(leaf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Device, NodeKind};

    struct KindCounter {
        containers: usize,
        leaves: usize,
    }

    impl Visitor for KindCounter {
        fn visit_node(&mut self, node: &Node) {
            if node.is_container() {
                self.containers += 1;
            }
            walk_node(self, node);
        }

        fn visit_leaf(&mut self, _node: &Node, _leaf: &LeafContent) {
            self.leaves += 1;
        }
    }

    struct DropMobileContent;

    impl VisitorMut for DropMobileContent {
        fn visit_leaf_mut(&mut self, leaf: &mut LeafContent) {
            leaf.responsive_content.remove(&Device::Mobile);
        }
    }

    fn sample() -> Vec<Node> {
        vec![Node::body()
            .with_child(
                Node::new("c1", NodeKind::Container)
                    .with_child(Node::new("t1", NodeKind::Text))
                    .with_child(Node::new("b1", NodeKind::Button)),
            )
            .with_child(
                Node::new("t2", NodeKind::Text).with_responsive_field(Device::Mobile, "innerText", "m"),
            )]
    }

    #[test]
    fn test_visitor_walks_every_node() {
        let mut counter = KindCounter {
            containers: 0,
            leaves: 0,
        };
        walk_elements(&mut counter, &sample());
        assert_eq!(counter.containers, 2);
        assert_eq!(counter.leaves, 3);
    }

    #[test]
    fn test_visitor_mut_reaches_nested_leaves() {
        let mut nodes = sample();
        walk_elements_mut(&mut DropMobileContent, &mut nodes);
        let t2 = nodes[0].find("t2").unwrap();
        assert!(t2.leaf().unwrap().responsive(Device::Mobile).is_none());
    }
}
