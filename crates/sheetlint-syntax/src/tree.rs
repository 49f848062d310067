//! Arena-backed stylesheet tree.
//!
//! Nodes live in a [`SlotMap`] owned by the [`Stylesheet`]; parent, sibling and
//! child links are plain [`NodeId`] keys. A node can only be appended under a
//! parent that already exists, so parent chains are acyclic by construction.
//!
//! Every node keeps the raw whitespace that preceded it (and, for nodes with a
//! body, the whitespace before the closing brace) exactly as it appeared in the
//! source, newlines included.

use slotmap::{SlotMap, new_key_type};

use crate::{Error, Result};

new_key_type! {
    /// Identifier of a node inside one [`Stylesheet`].
    ///
    /// Ids are only meaningful for the stylesheet that produced them.
    pub struct NodeId;
}

/// The payload of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// A qualified rule: `selector { ... }`.
    Rule {
        /// Selector text, trailing whitespace removed, inner newlines kept.
        selector: String,
    },
    /// An at-rule, with or without a body: `@media screen { ... }`, `@import "a.css";`.
    AtRule {
        /// Name without the leading `@`.
        name: String,
        /// Prelude after the name, trimmed.
        params: String,
        /// Whether the at-rule carries a `{ ... }` body.
        has_body: bool,
    },
    /// A `property: value` pair.
    Declaration {
        property: String,
        /// Value text, surrounding whitespace removed, inner newlines kept.
        value: String,
    },
    /// A `/* ... */` comment, text without the delimiters.
    Comment { text: String },
}

/// Fieldless discriminant of [`NodeData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Rule,
    AtRule,
    Declaration,
    Comment,
}

impl NodeData {
    /// Get the kind of this payload.
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Rule { .. } => NodeKind::Rule,
            Self::AtRule { .. } => NodeKind::AtRule,
            Self::Declaration { .. } => NodeKind::Declaration,
            Self::Comment { .. } => NodeKind::Comment,
        }
    }
}

/// Raw whitespace attached to a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Raws {
    /// Text between the previous token and the start of this node.
    pub before: String,
    /// Text between the last child and the closing `}`; only set for nodes with a body.
    pub after: Option<String>,
}

impl Raws {
    /// Raws with only leading whitespace.
    pub fn before(before: impl Into<String>) -> Self {
        Self {
            before: before.into(),
            after: None,
        }
    }
}

/// Source lines covered by a node (1-indexed, inclusive).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceSpan {
    pub start_line: usize,
    pub end_line: usize,
}

impl SourceSpan {
    /// Create a span.
    pub fn new(start_line: usize, end_line: usize) -> Self {
        Self {
            start_line,
            end_line,
        }
    }

    /// A span covering a single line.
    pub fn line(line: usize) -> Self {
        Self::new(line, line)
    }
}

/// A node of the stylesheet tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// Node payload.
    pub data: NodeData,
    /// Raw whitespace.
    pub raws: Raws,
    /// Source lines.
    pub span: SourceSpan,
    parent: Option<NodeId>,
    prev: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// Get the node kind.
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    /// The parent node, or `None` when the parent is the stylesheet root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The immediately preceding sibling.
    pub fn prev(&self) -> Option<NodeId> {
        self.prev
    }

    /// Child nodes in source order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Selector text for rules.
    pub fn selector(&self) -> Option<&str> {
        match &self.data {
            NodeData::Rule { selector } => Some(selector),
            _ => None,
        }
    }

    /// Value text for declarations.
    pub fn value(&self) -> Option<&str> {
        match &self.data {
            NodeData::Declaration { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Check if this node is a qualified rule.
    pub fn is_rule(&self) -> bool {
        matches!(self.data, NodeData::Rule { .. })
    }

    /// Check if this node is a declaration.
    pub fn is_declaration(&self) -> bool {
        matches!(self.data, NodeData::Declaration { .. })
    }
}

/// A parsed stylesheet: the root of the tree and the arena holding every node.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    nodes: SlotMap<NodeId, Node>,
    roots: Vec<NodeId>,
    /// Whitespace after the last top-level node.
    pub after: String,
}

impl Stylesheet {
    /// Create an empty stylesheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node as the last child of `parent` (`None` for the root).
    pub fn append(
        &mut self,
        parent: Option<NodeId>,
        data: NodeData,
        raws: Raws,
        span: SourceSpan,
    ) -> Result<NodeId> {
        let siblings = match parent {
            Some(parent) => self.node(parent)?.children(),
            None => &self.roots,
        };
        let prev = siblings.last().copied();

        let id = self.nodes.insert(Node {
            data,
            raws,
            span,
            parent,
            prev,
            children: Vec::new(),
        });

        match parent {
            Some(parent) => self.nodes[parent].children.push(id),
            None => self.roots.push(id),
        }
        tracing::trace!(?id, ?parent, "appended node");
        Ok(id)
    }

    /// Get a node.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Get a node, failing for ids from another stylesheet.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(Error::UnknownNode(id))
    }

    /// Set the last line of a node.
    pub fn set_end_line(&mut self, id: NodeId, end_line: usize) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or(Error::UnknownNode(id))?;
        node.span.end_line = end_line;
        Ok(())
    }

    /// Set the whitespace before a node's closing brace.
    pub fn set_after(&mut self, id: NodeId, after: impl Into<String>) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or(Error::UnknownNode(id))?;
        node.raws.after = Some(after.into());
        Ok(())
    }

    /// Top-level nodes in source order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// The first top-level node.
    pub fn first(&self) -> Option<NodeId> {
        self.roots.first().copied()
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the stylesheet has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of ancestors between a node and the root.
    pub fn depth(&self, id: NodeId) -> Result<usize> {
        let mut depth = 0;
        let mut current = self.node(id)?.parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.node(parent)?.parent;
        }
        Ok(depth)
    }

    /// Visit every node depth-first, in document order.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            sheet: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }
}

static_assertions::assert_impl_all!(Stylesheet: Send, Sync);

/// Depth-first, pre-order iterator over a [`Stylesheet`].
pub struct Walk<'a> {
    sheet: &'a Stylesheet,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.sheet.nodes.get(id)?;
        self.stack.extend(node.children.iter().rev().copied());
        Some((id, node))
    }
}
