//! JSON codec for the persisted document.
//!
//! Only the element tree is stored. History and selection are session state
//! and never leave the editor.

use serde::Deserialize;

use crate::validation::validate;
use crate::{ModelResult, Node};

/// Stored documents are normally the element list, but a bare body object is
/// accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
enum Stored {
    Elements(Vec<Node>),
    Body(Node),
}

pub fn to_json(elements: &[Node]) -> ModelResult<String> {
    Ok(serde_json::to_string(elements)?)
}

pub fn to_json_pretty(elements: &[Node]) -> ModelResult<String> {
    Ok(serde_json::to_string_pretty(elements)?)
}

/// Decode and validate a stored document
pub fn from_json(source: &str) -> ModelResult<Vec<Node>> {
    let elements = decode(source)?;
    validate(&elements)?;
    Ok(elements)
}

/// Decode a stored document without checking tree invariants
///
/// Node shapes are still checked; use [`crate::diagnose`] on the result.
pub fn decode(source: &str) -> ModelResult<Vec<Node>> {
    Ok(match serde_json::from_str::<Stored>(source)? {
        Stored::Elements(elements) => elements,
        Stored::Body(body) => vec![body],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Device, ModelError, NodeKind};
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<Node> {
        vec![Node::body().with_child(
            Node::new("g1", NodeKind::Grid)
                .with_style("gap", "8px")
                .with_responsive_style(Device::Mobile, "gap", "4px")
                .with_child(
                    Node::new("card-1", NodeKind::Card)
                        .with_field("title", "Pricing")
                        .with_field("description", "Plans for everyone")
                        .with_responsive_field(Device::Tablet, "description", "Plans"),
                ),
        )]
    }

    #[test]
    fn test_round_trip_keeps_deltas() {
        let elements = sample();
        let json = to_json_pretty(&elements).unwrap();
        let decoded = from_json(&json).unwrap();
        assert_eq!(decoded, elements);
    }

    #[test]
    fn test_numeric_and_array_values_load() {
        let json = r#"[{
            "id": "__body",
            "type": "__body",
            "styles": { "padding": 0 },
            "content": [{
                "id": "k1",
                "type": "card",
                "styles": { "fontSize": 12 },
                "responsiveStyles": { "mobile": { "fontSize": 10 } },
                "content": { "features": ["a", "b"], "featured": true }
            }]
        }]"#;

        let elements = from_json(json).unwrap();
        let card = elements[0].find("k1").unwrap();
        assert_eq!(card.styles["fontSize"], 12);
        assert_eq!(card.responsive_styles[&Device::Mobile]["fontSize"], 10);
        assert_eq!(card.leaf().unwrap().get("featured"), Some(&serde_json::Value::Bool(true)));

        assert_eq!(from_json(&to_json(&elements).unwrap()).unwrap(), elements);
    }

    #[test]
    fn test_bare_body_accepted() {
        let json = serde_json::to_string(&Node::body()).unwrap();
        let decoded = from_json(&json).unwrap();
        assert_eq!(decoded, vec![Node::body()]);
    }

    #[test]
    fn test_invalid_document_rejected() {
        let json = r#"[{ "id": "root", "type": "container", "styles": {}, "content": [] }]"#;
        assert!(matches!(from_json(json), Err(ModelError::MissingBody)));

        assert!(matches!(from_json("not json"), Err(ModelError::Json(_))));
    }

    #[test]
    fn test_decode_skips_tree_checks() {
        let json = r#"[
            { "id": "a", "type": "container", "styles": {}, "content": [] },
            { "id": "a", "type": "container", "styles": {}, "content": [] }
        ]"#;
        assert_eq!(decode(json).unwrap().len(), 2);
        assert!(matches!(from_json(json), Err(ModelError::MultipleRoots(2))));
    }

    #[test]
    fn test_empty_breakpoint_survives_round_trip() {
        let mut node = Node::new("t1", NodeKind::Text);
        node.responsive_styles.insert(Device::Mobile, Default::default());
        let elements = vec![Node::body().with_child(node)];

        let decoded = from_json(&to_json(&elements).unwrap()).unwrap();
        let text = decoded[0].find("t1").unwrap();
        assert!(text.responsive_styles[&Device::Mobile].is_empty());
    }
}
