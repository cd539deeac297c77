use crc32fast::Hasher;

use crate::tree::node_ids;
use crate::visitor::{walk_node_mut, VisitorMut};
use crate::Node;

/// Derive a short id seed from a session key (usually the page id) using CRC32
pub fn get_seed(key: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential id generator for nodes created in an editing session
///
/// Ids look like `<seed>-<n>`. The counter only moves forward, so an id is
/// never handed out twice by the same generator.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    pub fn new(key: &str) -> Self {
        Self::from_seed(get_seed(key))
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate next sequential id
    pub fn new_id(&mut self) -> String {
        self.count = match self.count.checked_add(1) {
            Some(next) => next,
            None => {
                // Counter exhausted, continue under a seed derived from this one
                self.seed = get_seed(&self.seed);
                1
            }
        };
        format!("{}-{}", self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Skip past every id with this seed already present in `nodes`
    ///
    /// Suffixes too large to count past are ignored.
    pub fn resume_after(&mut self, nodes: &[Node]) {
        let prefix = format!("{}-", self.seed);
        let highest = node_ids(nodes)
            .into_iter()
            .filter_map(|id| id.strip_prefix(&prefix)?.parse::<u64>().ok())
            .filter(|n| *n < u64::MAX)
            .max();

        if let Some(highest) = highest {
            self.count = self.count.max(highest);
        }
    }

    /// Deep-copy a template, giving every node in the copy a fresh id
    pub fn instantiate(&mut self, template: &Node) -> Node {
        let mut copy = template.clone();
        Reassign { ids: self }.visit_node_mut(&mut copy);
        copy
    }
}

struct Reassign<'a> {
    ids: &'a mut IdGenerator,
}

impl VisitorMut for Reassign<'_> {
    fn visit_node_mut(&mut self, node: &mut Node) {
        node.set_id(self.ids.new_id());
        walk_node_mut(self, node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{tree, NodeKind};
    use std::collections::HashSet;

    #[test]
    fn test_seed_generation() {
        let seed1 = get_seed("page-42");
        let seed2 = get_seed("page-42");

        // Same key always generates same seed
        assert_eq!(seed1, seed2);

        // Different keys generate different seeds
        assert_ne!(seed1, get_seed("page-43"));
    }

    #[test]
    fn test_sequential_ids() {
        let mut ids = IdGenerator::new("page-42");

        let id1 = ids.new_id();
        let id2 = ids.new_id();

        assert!(id1.ends_with("-1"));
        assert!(id2.ends_with("-2"));
        assert!(id1.starts_with(ids.seed()));
    }

    #[test]
    fn test_resume_after_existing_ids() {
        let mut ids = IdGenerator::from_seed("abc".to_string());
        let nodes = vec![Node::body()
            .with_child(Node::new("abc-7", NodeKind::Text))
            .with_child(Node::new("abc-3", NodeKind::Text))
            .with_child(Node::new("other-99", NodeKind::Text))];

        ids.resume_after(&nodes);
        assert_eq!(ids.new_id(), "abc-8");
    }

    #[test]
    fn test_resume_after_huge_suffixes() {
        let mut ids = IdGenerator::from_seed("abc".to_string());
        let nodes = vec![Node::body()
            .with_child(Node::new("abc-4294967295", NodeKind::Text))
            .with_child(Node::new("abc-18446744073709551615", NodeKind::Text))
            .with_child(Node::new("abc-99999999999999999999", NodeKind::Text))];

        ids.resume_after(&nodes);
        assert_eq!(ids.new_id(), "abc-4294967296");
    }

    #[test]
    fn test_exhausted_counter_moves_to_new_seed() {
        let mut ids = IdGenerator::from_seed("abc".to_string());
        let nodes = vec![Node::body().with_child(Node::new("abc-18446744073709551614", NodeKind::Text))];
        ids.resume_after(&nodes);

        assert_eq!(ids.new_id(), "abc-18446744073709551615");
        let next = ids.new_id();
        assert_eq!(next, format!("{}-1", get_seed("abc")));
        assert_ne!(ids.seed(), "abc");
    }

    #[test]
    fn test_instantiate_template_twice() {
        let template = Node::new("tpl", NodeKind::Section)
            .with_child(Node::new("tpl-title", NodeKind::Text).with_field("innerText", "Hero"))
            .with_child(Node::new("tpl-cta", NodeKind::Button));

        let mut ids = IdGenerator::from_seed("s".to_string());
        let first = ids.instantiate(&template);
        let second = ids.instantiate(&template);

        let body = Node::body().with_child(first).with_child(second);
        let all = tree::node_ids(std::slice::from_ref(&body));
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(all.len(), unique.len());
        assert_eq!(body.find("s-2").unwrap().leaf().unwrap().get_str("innerText"), Some("Hero"));
    }
}
