//! Markup tree for the sprig scanner and tree builder.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships.
//! Parents own their children through the arena; the `parent` link on every
//! node is a plain index used for upward navigation, so the tree can never
//! form an ownership cycle.

use strum_macros::IntoStaticStr;

/// A type-safe index into the markup tree.
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The synthetic root node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// A single node stored in the arena.
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is, with its payload.
    pub node_type: NodeType,

    /// Structural parent. `None` only for the root.
    pub parent: Option<NodeId>,

    /// Ordered children, in document order. Only the root and elements
    /// ever have children.
    pub children: Vec<NodeId>,
}

/// The kind of a node and its payload.
///
/// Converting a `&NodeType` into `&'static str` yields the kind label
/// (`"ROOT"`, `"ELEMENT"`, `"CDATA"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    /// Synthetic container at [`NodeId::ROOT`]. Never has a tag or attributes.
    Root,
    /// `<!DOCTYPE ...>`: everything after the keyword, verbatim.
    Doctype(String),
    /// An element with its tag name and attributes.
    Element(ElementData),
    /// A raw run of non-whitespace text.
    Text(String),
    /// `<![CDATA[...]]>` body, verbatim.
    Cdata(String),
    /// `<!--...-->` body, verbatim.
    Comment(String),
    /// `&name;` reference, captured by name and never decoded.
    Entity(String),
}

impl NodeType {
    /// The kind label of this node type.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.into()
    }
}

/// Element-specific data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Tag name exactly as written in the source.
    pub tag_name: String,
    /// Attributes in first-seen order.
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create element data with no attributes.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs: AttributesMap::default(),
        }
    }
}

/// One piece of an attribute value that contains entity references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValuePart {
    /// Literal text.
    Text(String),
    /// An undecoded `&name;` reference.
    Entity(String),
}

/// The value of an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Presence-only attribute, e.g. `disabled`.
    Present,
    /// A value made of exactly one run of text.
    Text(String),
    /// Any other value: empty, entity-only, or text and entities interleaved.
    Mixed(Vec<ValuePart>),
}

impl AttrValue {
    /// The value as plain text, if it is a single text run.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The mixed parts, if this value was not reduced to a single string.
    #[must_use]
    pub fn as_parts(&self) -> Option<&[ValuePart]> {
        match self {
            Self::Mixed(parts) => Some(parts),
            _ => None,
        }
    }

    /// Returns true for presence-only attributes.
    #[must_use]
    pub const fn is_present_only(&self) -> bool {
        matches!(self, Self::Present)
    }
}

/// Map of attribute names to values for an element.
///
/// Keeps first-seen order. Setting an existing name replaces its value in
/// place, so a repeated attribute keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributesMap {
    entries: Vec<(String, AttrValue)>,
}

impl AttributesMap {
    /// Insert or replace the value for `name`.
    pub fn set(&mut self, name: &str, value: AttrValue) {
        if let Some(slot) = self.get_mut(name) {
            *slot = value;
        } else {
            self.entries.push((name.to_string(), value));
        }
    }

    /// Look up an attribute value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Look up an attribute value by name for modification.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut AttrValue> {
        self.entries
            .iter_mut()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Returns true if the attribute is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over `(name, value)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Number of attributes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no attributes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Arena-based markup tree with O(1) node access and traversal.
///
/// This structure stores all nodes in a contiguous vector, using indices
/// for all relationships. This provides:
/// - O(1) access to any node by `NodeId`
/// - O(1) parent traversal
/// - No borrowing issues (indices instead of references)
#[derive(Debug, Clone)]
pub struct MarkupTree {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The root node is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
}

impl MarkupTree {
    /// Create a new tree with just the root node.
    #[must_use]
    pub fn new() -> Self {
        let root = Node {
            node_type: NodeType::Root,
            parent: None,
            children: Vec::new(),
        };
        Self { nodes: vec![root] }
    }

    /// Get the root node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get the number of nodes in the tree, including the root.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the root has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.top_level().is_empty()
    }

    /// Create a node and append it as the last child of `parent`.
    ///
    /// This is the only way nodes enter the tree, so every node except the
    /// root has a parent that already exists.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not a node of this tree.
    pub fn append(&mut self, parent: NodeId, node_type: NodeType) -> NodeId {
        assert!(parent.0 < self.nodes.len(), "append to unknown node {parent:?}");
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// The root's children: the externally visible result of a build.
    #[must_use]
    pub fn top_level(&self) -> &[NodeId] {
        self.children(NodeId::ROOT)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Nesting depth of a node; the root is at depth 0.
    #[must_use]
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.nodes.get_mut(id.0).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// All elements named `tag` in document order, starting below `from`.
    #[must_use]
    pub fn elements_by_tag_name(&self, from: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(from)
            .filter(|&id| self.as_element(id).is_some_and(|e| e.tag_name == tag))
            .collect()
    }

    /// Concatenated text of all text descendants of a node.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut result = String::new();
        if let Some(text) = self.as_text(id) {
            result.push_str(text);
        }
        for descendant in self.descendants(id) {
            if let Some(text) = self.as_text(descendant) {
                result.push_str(text);
            }
        }
        result
    }

    /// Iterate over all descendants of a node in document order, not
    /// including the node itself.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        DescendantIterator {
            tree: self,
            pending: self.children(id).iter().rev().copied().collect(),
        }
    }
}

impl Default for MarkupTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a MarkupTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Depth-first iterator over descendants of a node.
///
/// Keeps its own stack, so arbitrarily deep trees never recurse.
pub struct DescendantIterator<'a> {
    tree: &'a MarkupTree,
    pending: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.pending.pop()?;
        self.pending
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
