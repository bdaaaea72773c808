use core::fmt::Write;

use sprig_dom::{AttrValue, MarkupTree, NodeId, NodeType, ValuePart};

/// Print a subtree to stdout, one node per line.
pub fn print_tree(tree: &MarkupTree, id: NodeId, indent: usize) {
    print!("{}", dump_tree(tree, id, indent));
}

/// Render a subtree as indented text, one node per line.
///
/// Elements show their attributes inline; entities are written back as
/// `&name;` and leaf bodies are quoted so surrounding spaces stay visible.
#[must_use]
pub fn dump_tree(tree: &MarkupTree, id: NodeId, indent: usize) -> String {
    let mut out = String::new();
    // Explicit stack: unclosed tags can nest deeper than the call stack allows.
    let mut pending = vec![(id, indent)];
    while let Some((id, indent)) = pending.pop() {
        write_node(tree, id, indent, &mut out);
        pending.extend(tree.children(id).iter().rev().map(|&child| (child, indent + 1)));
    }
    out
}

fn write_node(tree: &MarkupTree, id: NodeId, indent: usize, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let prefix = "  ".repeat(indent);
    let _ = match &node.node_type {
        NodeType::Root => writeln!(out, "{prefix}Root"),
        NodeType::Element(data) => {
            if data.attrs.is_empty() {
                writeln!(out, "{prefix}<{}>", data.tag_name)
            } else {
                let attrs: Vec<String> = data
                    .attrs
                    .iter()
                    .map(|(name, value)| format_attribute(name, value))
                    .collect();
                writeln!(out, "{prefix}<{} {}>", data.tag_name, attrs.join(" "))
            }
        }
        NodeType::Text(text) => {
            let display = text.replace('\n', "\\n").replace(' ', "\u{00B7}");
            writeln!(out, "{prefix}\"{display}\"")
        }
        NodeType::Entity(name) => writeln!(out, "{prefix}&{name};"),
        NodeType::Doctype(body) => writeln!(out, "{prefix}<!DOCTYPE {body:?}>"),
        NodeType::Comment(body) => writeln!(out, "{prefix}<!-- {body:?} -->"),
        NodeType::Cdata(body) => writeln!(out, "{prefix}<![CDATA[ {body:?} ]]>"),
    };
}

fn format_attribute(name: &str, value: &AttrValue) -> String {
    match value {
        AttrValue::Present => name.to_string(),
        AttrValue::Text(text) => format!("{name}=\"{text}\""),
        AttrValue::Mixed(parts) => {
            let joined: String = parts
                .iter()
                .map(|part| match part {
                    ValuePart::Text(text) => text.clone(),
                    ValuePart::Entity(entity) => format!("&{entity};"),
                })
                .collect();
            format!("{name}=\"{joined}\"")
        }
    }
}
