//! Property tests: arbitrary input never breaks the scanner or the builder.

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use sprig_dom::NodeId;
use sprig_markup::{Scanner, Token, TreeBuilder, build, scan};

/// Input assembled from markup fragments, so generated strings reach the
/// tag, attribute and declaration states far more often than random text.
#[derive(Debug, Clone)]
struct MarkupSoup(String);

const FRAGMENTS: &[&str] = &[
    "<", ">", "</", "/>", "<!", "<!--", "-->", "<![CDATA[", "]]>", "<!DOCTYPE", "&", ";",
    "=", "\"", "'", " ", "\n", "\t", "div", "a", "Z", "h1", "x", "é", "&amp;", "`",
];

impl Arbitrary for MarkupSoup {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 48;
        let mut text = String::new();
        for _ in 0..len {
            if let Some(fragment) = g.choose(FRAGMENTS) {
                text.push_str(fragment);
            }
        }
        Self(text)
    }
}

fn is_blank(text: &str) -> bool {
    text.chars()
        .all(|c| matches!(c, ' ' | '\n' | '\t' | '\x0C' | '\r'))
}

#[quickcheck]
fn scanning_any_string_emits_no_blank_text(input: String) -> bool {
    scan(&input).iter().all(|token| match token {
        Token::Text { text } => !is_blank(text),
        _ => true,
    })
}

#[quickcheck]
fn scanning_markup_soup_emits_no_blank_text(input: MarkupSoup) -> bool {
    scan(&input.0).iter().all(|token| match token {
        Token::Text { text } => !is_blank(text),
        _ => true,
    })
}

#[quickcheck]
fn every_node_reaches_the_root(input: MarkupSoup) -> bool {
    let tree = build(&scan(&input.0));
    (1..tree.len()).all(|index| {
        let id = NodeId(index);
        tree.ancestors(id).last() == Some(NodeId::ROOT) && tree.depth(id) <= index
    })
}

#[quickcheck]
fn children_point_back_to_their_parent(input: MarkupSoup) -> bool {
    let tree = build(&scan(&input.0));
    (0..tree.len()).all(|index| {
        let id = NodeId(index);
        tree.children(id)
            .iter()
            .all(|&child| tree.parent(child) == Some(id))
    })
}

#[quickcheck]
fn issue_reporting_does_not_change_the_tree(input: MarkupSoup) -> bool {
    let tokens = scan(&input.0);
    let plain = build(&tokens);
    let (reported, _) = TreeBuilder::new(&tokens).run_with_issues();
    plain.len() == reported.len()
        && (0..plain.len()).all(|index| {
            let id = NodeId(index);
            plain.get(id).map(|node| &node.node_type) == reported.get(id).map(|node| &node.node_type)
        })
}

#[quickcheck]
fn recovery_only_adds_tag_ends_and_trailing_text(input: MarkupSoup) -> bool {
    let mut scanner = Scanner::new(&input.0)
        .with_tag_end_recovery()
        .with_trailing_text();
    scanner.run();
    let recovered = scanner.into_tokens();
    let plain = scan(&input.0);
    let tree = TreeBuilder::new(&recovered)
        .with_attribute_list_recovery()
        .run();

    let mut extra = recovered.len().saturating_sub(plain.len());
    let mut plain_tokens = plain.iter().peekable();
    let mut keeps_plain_order = true;
    for token in &recovered {
        if plain_tokens.peek() == Some(&token) {
            let _ = plain_tokens.next();
        } else if extra > 0 && matches!(token, Token::OpenTagEnd | Token::Text { .. }) {
            extra -= 1;
        } else {
            keeps_plain_order = false;
        }
    }
    keeps_plain_order
        && plain_tokens.next().is_none()
        && (1..tree.len()).all(|index| tree.ancestors(NodeId(index)).last() == Some(NodeId::ROOT))
}
