//! JSON view of a built tree.
//!
//! Mirrors the root's children: elements become objects with `type`, `tag`,
//! `attrs` (omitted when empty) and `children`; text becomes a bare string;
//! every other node is `{"type": KIND, "children": body}`.
//!
//! The tree is walked with an explicit stack and written out piece by piece,
//! since unclosed tags can nest far deeper than a recursive walk (or a nested
//! `serde_json::Value`) can handle.

use serde_json::{Map, Value, json};
use sprig_dom::{AttrValue, ElementData, MarkupTree, NodeId, NodeType, ValuePart};

enum Step {
    Node { id: NodeId, first: bool },
    CloseElement,
}

/// Steps for a run of siblings, ready to be popped in document order.
fn siblings(ids: &[NodeId]) -> impl Iterator<Item = Step> + '_ {
    ids.iter()
        .enumerate()
        .rev()
        .map(|(i, &id)| Step::Node { id, first: i == 0 })
}

/// The tree as compact JSON: an array of the root's children.
#[must_use]
pub fn tree_to_json(tree: &MarkupTree) -> String {
    let mut out = String::from("[");
    let mut pending: Vec<Step> = siblings(tree.top_level()).collect();
    while let Some(step) = pending.pop() {
        let (id, first) = match step {
            Step::CloseElement => {
                out.push_str("]}");
                continue;
            }
            Step::Node { id, first } => (id, first),
        };
        if !first {
            out.push(',');
        }
        let Some(node) = tree.get(id) else {
            out.push_str("null");
            continue;
        };
        let label = node.node_type.label();
        match &node.node_type {
            NodeType::Element(data) => {
                let head = element_head(label, data);
                out.push_str(head.strip_suffix('}').unwrap_or(&head));
                out.push_str(",\"children\":[");
                pending.push(Step::CloseElement);
                pending.extend(siblings(tree.children(id)));
            }
            NodeType::Text(text) => out.push_str(&json!(text).to_string()),
            NodeType::Doctype(body)
            | NodeType::Cdata(body)
            | NodeType::Comment(body)
            | NodeType::Entity(body) => {
                out.push_str(&json!({ "type": label, "children": body }).to_string());
            }
            NodeType::Root => out.push_str("null"),
        }
    }
    out.push(']');
    out
}

/// `{"type":..,"tag":..,"attrs":{..}}` for an element, without children.
fn element_head(label: &str, data: &ElementData) -> String {
    let mut object = Map::new();
    let _ = object.insert("type".to_string(), json!(label));
    let _ = object.insert("tag".to_string(), json!(data.tag_name));
    if !data.attrs.is_empty() {
        let attrs: Map<String, Value> = data
            .attrs
            .iter()
            .map(|(name, value)| (name.to_string(), attr_to_json(value)))
            .collect();
        let _ = object.insert("attrs".to_string(), Value::Object(attrs));
    }
    Value::Object(object).to_string()
}

fn attr_to_json(value: &AttrValue) -> Value {
    match value {
        AttrValue::Present => Value::Bool(true),
        AttrValue::Text(text) => json!(text),
        AttrValue::Mixed(parts) => Value::Array(
            parts
                .iter()
                .map(|part| match part {
                    ValuePart::Text(text) => json!(text),
                    ValuePart::Entity(name) => json!({ "type": "ENTITY", "children": name }),
                })
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use sprig_markup::parse;

    use super::*;

    fn parsed_json(markup: &str) -> Value {
        serde_json::from_str(&tree_to_json(&parse(markup))).unwrap()
    }

    #[test]
    fn elements_text_and_leaves() {
        assert_eq!(
            parsed_json(r#"<!DOCTYPE html><p hidden class="a">hi &amp;</p><!--c-->"#),
            json!([
                { "type": "DOCTYPE", "children": " html" },
                {
                    "type": "ELEMENT",
                    "tag": "p",
                    "attrs": { "hidden": true, "class": "a" },
                    "children": ["hi ", { "type": "ENTITY", "children": "amp" }]
                },
                { "type": "COMMENT", "children": "c" }
            ])
        );
    }

    #[test]
    fn nested_elements_and_siblings() {
        assert_eq!(
            parsed_json("<ul><li>one</li><li><b>two</b></li></ul><hr/>"),
            json!([
                {
                    "type": "ELEMENT",
                    "tag": "ul",
                    "children": [
                        { "type": "ELEMENT", "tag": "li", "children": ["one"] },
                        {
                            "type": "ELEMENT",
                            "tag": "li",
                            "children": [{ "type": "ELEMENT", "tag": "b", "children": ["two"] }]
                        }
                    ]
                },
                { "type": "ELEMENT", "tag": "hr", "children": [] }
            ])
        );
    }

    #[test]
    fn mixed_attribute_value_is_an_array() {
        assert_eq!(
            parsed_json(r#"<a title="x&amp;y"></a>"#),
            json!([{
                "type": "ELEMENT",
                "tag": "a",
                "attrs": { "title": ["x", { "type": "ENTITY", "children": "amp" }, "y"] },
                "children": []
            }])
        );
    }

    #[test]
    fn empty_input_is_an_empty_array() {
        assert_eq!(tree_to_json(&parse("")), "[]");
    }

    #[test]
    fn deeply_nested_tags_are_written_without_recursion() {
        let depth = 100_000;
        let json = tree_to_json(&parse(&"<a>".repeat(depth)));
        let element = r#"{"type":"ELEMENT","tag":"a","children":["#;
        assert!(json.starts_with(&format!("[{element}{element}")));
        assert_eq!(json.matches(element).count(), depth);
        assert!(json.ends_with(&format!("{}]", "]}".repeat(depth))));
    }
}
