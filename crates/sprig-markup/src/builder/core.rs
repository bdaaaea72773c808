use sprig_common::warning::warn_once;
use sprig_dom::{AttrValue, ElementData, MarkupTree, NodeId, NodeType, ValuePart};

use super::error::{BuildError, ParseIssue};
use crate::scanner::{Scanner, Token};

/// Single-pass tree builder.
///
/// Folds a token stream into a [`MarkupTree`] with one cursor (`current`)
/// and no stack of open elements: a close tag moves the cursor to the
/// current node's parent through the arena's parent link. Close tag names
/// are never matched against the element they close; strict mode and
/// [`TreeBuilder::run_with_issues`] only report the mismatch.
pub struct TreeBuilder<'t> {
    /// Input tokens from the scanner.
    tokens: &'t [Token],

    /// Current position in token stream.
    token_index: usize,

    tree: MarkupTree,

    /// Node that receives new children.
    current: NodeId,

    /// True between an opening tag's start and the end of its attribute list.
    in_tag: bool,

    /// Name of the attribute most recently started on `current`.
    active_attribute: Option<String>,

    /// Element and attribute whose value is being accumulated.
    value_target: Option<(NodeId, String)>,

    /// Close tag mismatches, in token order.
    issues: Vec<BuildError>,

    /// If true, the first close tag mismatch aborts [`TreeBuilder::try_run`].
    strict_mode: bool,

    /// If true, `/>` also ends the attribute list.
    recover_attribute_lists: bool,
}

impl<'t> TreeBuilder<'t> {
    /// Create a new builder over a token stream.
    #[must_use]
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            token_index: 0,
            tree: MarkupTree::new(),
            current: NodeId::ROOT,
            in_tag: false,
            active_attribute: None,
            value_target: None,
            issues: Vec::new(),
            strict_mode: false,
            recover_attribute_lists: false,
        }
    }

    /// End the attribute list on `/>` as well as on `>`.
    ///
    /// By default a self-closing tag only moves the cursor up, so content
    /// after `<input disabled/>` is still read as part of that attribute
    /// list and dropped.
    #[must_use]
    pub const fn with_attribute_list_recovery(mut self) -> Self {
        self.recover_attribute_lists = true;
        self
    }

    /// Enable strict mode: [`TreeBuilder::try_run`] fails on the first close
    /// tag whose name does not match the element it closes.
    #[must_use]
    pub const fn with_strict_mode(mut self) -> Self {
        self.strict_mode = true;
        self
    }

    /// Run the builder and return the tree. Never fails.
    #[must_use]
    pub fn run(mut self) -> MarkupTree {
        while self.token_index < self.tokens.len() {
            self.step();
        }
        self.tree
    }

    /// Run the builder and return both the tree and the close tag issues.
    ///
    /// The tree is identical to the one [`TreeBuilder::run`] returns. Each
    /// issue is also reported once through the shared warning system.
    #[must_use]
    pub fn run_with_issues(mut self) -> (MarkupTree, Vec<ParseIssue>) {
        while self.token_index < self.tokens.len() {
            self.step();
        }
        let issues: Vec<ParseIssue> = self.issues.iter().map(ParseIssue::from).collect();
        for issue in &issues {
            let _ = warn_once("Tree Builder", &issue.message);
        }
        (self.tree, issues)
    }

    /// Run the builder, honoring strict mode.
    ///
    /// # Errors
    ///
    /// In strict mode, returns the first [`BuildError`] encountered. Without
    /// strict mode this always succeeds.
    pub fn try_run(mut self) -> Result<MarkupTree, BuildError> {
        while self.token_index < self.tokens.len() {
            self.step();
            if self.strict_mode
                && let Some(error) = self.issues.pop()
            {
                return Err(error);
            }
        }
        Ok(self.tree)
    }

    fn step(&mut self) {
        let tokens = self.tokens;
        self.process_token(&tokens[self.token_index]);
        self.token_index += 1;
    }

    fn process_token(&mut self, token: &Token) {
        match token {
            Token::Doctype { text } => self.append_leaf(NodeType::Doctype(text.clone())),
            Token::Comment { text } => self.append_leaf(NodeType::Comment(text.clone())),
            Token::Cdata { text } => self.append_leaf(NodeType::Cdata(text.clone())),
            Token::Text { text } => {
                if Scanner::is_blank(text) {
                    return;
                }
                self.place_content(NodeType::Text(text.clone()), ValuePart::Text(text.clone()));
            }
            Token::Entity { text } => {
                self.place_content(
                    NodeType::Entity(text.clone()),
                    ValuePart::Entity(text.clone()),
                );
            }
            Token::OpenTagStart { tag } => {
                let element = NodeType::Element(ElementData::new(tag.as_str()));
                self.current = self.tree.append(self.current, element);
                self.in_tag = true;
            }
            Token::OpenTagEnd => self.close_attribute_list(),
            Token::SelfCloseTagEnd => {
                if self.recover_attribute_lists {
                    self.close_attribute_list();
                }
                self.move_to_parent();
            }
            Token::CloseTag { tag } => {
                self.check_close_tag(tag);
                self.move_to_parent();
            }
            Token::AttributeName { name } => {
                if let Some(element) = self.tree.as_element_mut(self.current) {
                    element.attrs.set(name, AttrValue::Present);
                }
                self.active_attribute = Some(name.clone());
            }
            Token::AttributeValueStart => {
                if let Some(name) = &self.active_attribute
                    && let Some(element) = self.tree.as_element_mut(self.current)
                {
                    element.attrs.set(name, AttrValue::Mixed(Vec::new()));
                    self.value_target = Some((self.current, name.clone()));
                }
            }
            Token::AttributeValueEnd => {
                if let Some((owner, name)) = self.value_target.take() {
                    self.reduce_value(owner, &name);
                }
                self.active_attribute = None;
            }
        }
    }

    fn append_leaf(&mut self, node_type: NodeType) {
        let _ = self.tree.append(self.current, node_type);
    }

    /// Text and entities go to `current`'s children unless an attribute value
    /// is open, in which case they go to the value. Inside a tag with an
    /// attribute but no open value, they are dropped.
    fn place_content(&mut self, node: NodeType, part: ValuePart) {
        if !self.in_tag || self.active_attribute.is_none() {
            self.append_leaf(node);
            return;
        }
        if let Some((owner, name)) = &self.value_target
            && let Some(AttrValue::Mixed(parts)) = self
                .tree
                .as_element_mut(*owner)
                .and_then(|element| element.attrs.get_mut(name))
        {
            parts.push(part);
        }
    }

    /// A value made of exactly one text run collapses to that string;
    /// anything else stays a list of parts.
    fn reduce_value(&mut self, owner: NodeId, name: &str) {
        let Some(value) = self
            .tree
            .as_element_mut(owner)
            .and_then(|element| element.attrs.get_mut(name))
        else {
            return;
        };
        let single = match value {
            AttrValue::Mixed(parts) if matches!(parts.as_slice(), [ValuePart::Text(_)]) => {
                parts.pop()
            }
            _ => None,
        };
        if let Some(ValuePart::Text(text)) = single {
            *value = AttrValue::Text(text);
        }
    }

    const fn close_attribute_list(&mut self) {
        self.in_tag = false;
    }

    fn move_to_parent(&mut self) {
        self.current = self.tree.parent(self.current).unwrap_or(NodeId::ROOT);
    }

    /// Whitespace between the name and `>` stays in the close tag's payload
    /// and is ignored here.
    fn check_close_tag(&mut self, found: &str) {
        let found = found.trim_end_matches(Scanner::is_whitespace);
        let token_index = self.token_index;
        if self.current == NodeId::ROOT {
            self.issues.push(BuildError::UnexpectedCloseTag {
                found: found.to_string(),
                token_index,
            });
        } else if let Some(element) = self.tree.as_element(self.current)
            && element.tag_name != found
        {
            self.issues.push(BuildError::MismatchedCloseTag {
                expected: element.tag_name.clone(),
                found: found.to_string(),
                token_index,
            });
        }
    }
}
