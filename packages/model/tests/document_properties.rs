//! Property-based tests for the document model

use easel_model::{serializer, tree, validate, Device, IdGenerator, Node, NodeKind};
use proptest::prelude::*;
use std::collections::HashSet;

fn leaf_kind() -> impl Strategy<Value = NodeKind> {
    prop_oneof![
        Just(NodeKind::Text),
        Just(NodeKind::Link),
        Just(NodeKind::Button),
        Just(NodeKind::Image),
    ]
}

fn container_kind() -> impl Strategy<Value = NodeKind> {
    prop_oneof![
        Just(NodeKind::Container),
        Just(NodeKind::Section),
        Just(NodeKind::TwoColumns),
        Just(NodeKind::Grid),
    ]
}

fn device() -> impl Strategy<Value = Device> {
    prop_oneof![Just(Device::Tablet), Just(Device::Mobile)]
}

/// Arbitrary subtree with placeholder ids; ids are assigned afterwards
fn subtree() -> impl Strategy<Value = Node> {
    let leaf = (leaf_kind(), "[a-z ]{0,12}", device(), "[0-9]{1,2}px").prop_map(
        |(kind, body, device, size)| {
            Node::new("tmp", kind)
                .with_style("fontSize", "16px")
                .with_responsive_style(device, "fontSize", size)
                .with_field("innerText", body.clone())
                .with_responsive_field(device, "innerText", body.trim())
        },
    );

    leaf.prop_recursive(4, 32, 5, |inner| {
        (container_kind(), prop::collection::vec(inner, 0..5)).prop_map(|(kind, children)| {
            children
                .into_iter()
                .fold(Node::new("tmp", kind), |node, child| node.with_child(child))
        })
    })
}

fn document() -> impl Strategy<Value = Vec<Node>> {
    prop::collection::vec(subtree(), 0..4).prop_map(|children| {
        let mut ids = IdGenerator::new("props");
        let body = children
            .iter()
            .fold(Node::body(), |body, child| body.with_child(ids.instantiate(child)));
        vec![body]
    })
}

proptest! {
    #[test]
    fn stored_documents_round_trip(elements in document()) {
        prop_assert!(validate(&elements).is_ok());

        let json = serializer::to_json(&elements).unwrap();
        let decoded = serializer::from_json(&json).unwrap();
        prop_assert_eq!(decoded, elements);
    }

    #[test]
    fn instantiated_ids_are_unique(elements in document(), copies in 1usize..4) {
        let mut ids = IdGenerator::new("props");
        ids.resume_after(&elements);

        let mut seen: HashSet<String> = tree::node_ids(&elements)
            .into_iter()
            .map(str::to_string)
            .collect();
        for _ in 0..copies {
            let copy = ids.instantiate(&elements[0]);
            for id in tree::node_ids(std::slice::from_ref(&copy)) {
                prop_assert!(seen.insert(id.to_string()), "id {} handed out twice", id);
            }
        }
    }
}
