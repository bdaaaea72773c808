//! Tests for arena construction and navigation of the markup tree.

use sprig_dom::{AttrValue, AttributesMap, ElementData, MarkupTree, NodeId, NodeType, ValuePart};

/// Helper to append an element node and return its NodeId.
fn append_element(tree: &mut MarkupTree, parent: NodeId, tag: &str) -> NodeId {
    tree.append(parent, NodeType::Element(ElementData::new(tag)))
}

// ========== construction ==========

#[test]
fn test_new_tree_has_only_root() {
    let tree = MarkupTree::new();
    assert_eq!(tree.len(), 1);
    assert!(tree.is_empty());
    assert_eq!(tree.root(), NodeId::ROOT);
    assert!(matches!(tree.get(NodeId::ROOT).unwrap().node_type, NodeType::Root));
    assert_eq!(tree.parent(NodeId::ROOT), None);
}

#[test]
fn test_append_keeps_document_order() {
    let mut tree = MarkupTree::new();
    let a = append_element(&mut tree, NodeId::ROOT, "a");
    let text = tree.append(NodeId::ROOT, NodeType::Text("hello".to_string()));
    let b = append_element(&mut tree, NodeId::ROOT, "b");

    assert_eq!(tree.top_level(), &[a, text, b]);
    assert!(!tree.is_empty());
    assert_eq!(tree.as_text(text), Some("hello"));
}

#[test]
#[should_panic(expected = "append to unknown node")]
fn test_append_to_unknown_parent_panics() {
    let mut tree = MarkupTree::new();
    let _ = tree.append(NodeId(42), NodeType::Comment(String::new()));
}

// ========== navigation ==========

#[test]
fn test_parent_links_reach_root_in_depth_steps() {
    let mut tree = MarkupTree::new();
    let html = append_element(&mut tree, NodeId::ROOT, "html");
    let body = append_element(&mut tree, html, "body");
    let p = append_element(&mut tree, body, "p");

    assert_eq!(tree.parent(p), Some(body));
    assert_eq!(tree.ancestors(p).collect::<Vec<_>>(), vec![body, html, NodeId::ROOT]);
    assert_eq!(tree.depth(p), 3);
    assert_eq!(tree.depth(NodeId::ROOT), 0);
}

#[test]
fn test_elements_by_tag_name_is_depth_first() {
    let mut tree = MarkupTree::new();
    let outer = append_element(&mut tree, NodeId::ROOT, "div");
    let inner = append_element(&mut tree, outer, "div");
    let span = append_element(&mut tree, outer, "span");
    let last = append_element(&mut tree, NodeId::ROOT, "div");

    assert_eq!(tree.elements_by_tag_name(NodeId::ROOT, "div"), vec![outer, inner, last]);
    assert_eq!(tree.elements_by_tag_name(outer, "span"), vec![span]);
    assert!(tree.elements_by_tag_name(span, "div").is_empty());
}

#[test]
fn test_text_content_concatenates_descendants() {
    let mut tree = MarkupTree::new();
    let p = append_element(&mut tree, NodeId::ROOT, "p");
    let _ = tree.append(p, NodeType::Text("Hello ".to_string()));
    let b = append_element(&mut tree, p, "b");
    let _ = tree.append(b, NodeType::Text("World".to_string()));
    let _ = tree.append(p, NodeType::Entity("nbsp".to_string()));

    assert_eq!(tree.text_content(p), "Hello World");
}

#[test]
fn test_node_type_labels() {
    assert_eq!(NodeType::Root.label(), "ROOT");
    assert_eq!(NodeType::Doctype(String::new()).label(), "DOCTYPE");
    assert_eq!(NodeType::Element(ElementData::new("a")).label(), "ELEMENT");
    assert_eq!(NodeType::Cdata(String::new()).label(), "CDATA");
    assert_eq!(NodeType::Comment(String::new()).label(), "COMMENT");
    assert_eq!(NodeType::Entity(String::new()).label(), "ENTITY");
    assert_eq!(NodeType::Text(String::new()).label(), "TEXT");
}

// ========== attributes ==========

#[test]
fn test_attribute_set_replaces_in_place() {
    let mut attrs = AttributesMap::default();
    attrs.set("id", AttrValue::Present);
    attrs.set("class", AttrValue::Text("a".to_string()));
    attrs.set("id", AttrValue::Text("main".to_string()));

    let names: Vec<&str> = attrs.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["id", "class"]);
    assert_eq!(attrs.len(), 2);
    assert_eq!(attrs.get("id").and_then(AttrValue::as_text), Some("main"));
    assert!(attrs.contains("class"));
    assert!(!attrs.contains("style"));
}

#[test]
fn test_attr_value_accessors() {
    let mixed = AttrValue::Mixed(vec![
        ValuePart::Text("a".to_string()),
        ValuePart::Entity("amp".to_string()),
    ]);
    assert_eq!(mixed.as_text(), None);
    assert_eq!(mixed.as_parts().map(<[ValuePart]>::len), Some(2));
    assert!(AttrValue::Present.is_present_only());
    assert!(!AttrValue::Text(String::new()).is_present_only());
}

#[test]
fn test_element_attrs_are_mutable_through_tree() {
    let mut tree = MarkupTree::new();
    let input = append_element(&mut tree, NodeId::ROOT, "input");
    tree.as_element_mut(input)
        .unwrap()
        .attrs
        .set("disabled", AttrValue::Present);

    let element = tree.as_element(input).unwrap();
    assert_eq!(element.tag_name, "input");
    assert_eq!(element.attrs.get("disabled"), Some(&AttrValue::Present));
    assert!(tree.as_element_mut(NodeId::ROOT).is_none());
}

// ========== traversal ==========

#[test]
fn test_descendants_are_in_document_order() {
    let mut tree = MarkupTree::new();
    let a = append_element(&mut tree, NodeId::ROOT, "a");
    let b = append_element(&mut tree, a, "b");
    let c = append_element(&mut tree, b, "c");
    let d = append_element(&mut tree, a, "d");
    let e = append_element(&mut tree, NodeId::ROOT, "e");

    let order: Vec<NodeId> = tree.descendants(NodeId::ROOT).collect();
    assert_eq!(order, vec![a, b, c, d, e]);
    let below_a: Vec<NodeId> = tree.descendants(a).collect();
    assert_eq!(below_a, vec![b, c, d]);
    assert_eq!(tree.descendants(c).count(), 0);
}

#[test]
fn test_deep_nesting_does_not_recurse() {
    let mut tree = MarkupTree::new();
    let mut current = NodeId::ROOT;
    for _ in 0..200_000 {
        current = append_element(&mut tree, current, "a");
    }
    let _ = tree.append(current, NodeType::Text("bottom".to_string()));

    assert_eq!(tree.text_content(NodeId::ROOT), "bottom");
    assert_eq!(tree.elements_by_tag_name(NodeId::ROOT, "a").len(), 200_000);
    assert_eq!(tree.depth(current), 200_000);
}
