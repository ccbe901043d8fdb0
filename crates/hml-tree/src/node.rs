//! Node handles into a parsed document.
//!
//! Nodes live in an arena owned by their [`Document`]. A [`Node`] is a cheap
//! copyable handle: children are reached through the arena in document
//! order, and the parent link is a plain index that never owns anything.

use std::fmt;
use std::iter::FusedIterator;

use hml_parse::{Position, Properties};

use crate::Document;

/// Index of a node inside its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Arena storage for one node.
#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) indent: u32,
    pub(crate) name: String,
    pub(crate) text: Option<String>,
    pub(crate) properties: Properties,
    pub(crate) position: Position,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// A node of a parsed document.
#[derive(Clone, Copy)]
pub struct Node<'doc> {
    document: &'doc Document,
    id: NodeId,
}

impl<'doc> Node<'doc> {
    pub(crate) fn new(document: &'doc Document, id: NodeId) -> Self {
        Self { document, id }
    }

    fn data(self) -> &'doc NodeData {
        &self.document.nodes[self.id.0]
    }

    /// Index of this node inside its document.
    pub fn id(self) -> NodeId {
        self.id
    }

    /// The node name.
    pub fn name(self) -> &'doc str {
        &self.data().name
    }

    /// Text after `:`, if the line had any.
    pub fn text(self) -> Option<&'doc str> {
        self.data().text.as_deref()
    }

    /// Number of leading spaces on the node's line.
    pub fn indent(self) -> u32 {
        self.data().indent
    }

    /// Position of the node name in the source.
    pub fn position(self) -> Position {
        self.data().position
    }

    /// All properties, in declaration order.
    pub fn properties(self) -> &'doc Properties {
        &self.data().properties
    }

    /// Get a property value by name.
    pub fn property(self, name: &str) -> Option<&'doc str> {
        self.data().properties.get(name).map(String::as_str)
    }

    /// The node containing this one, `None` for the root.
    pub fn parent(self) -> Option<Node<'doc>> {
        self.data().parent.map(|id| Node::new(self.document, id))
    }

    /// First direct child with the given name.
    pub fn child(self, name: &str) -> Option<Node<'doc>> {
        self.children().find(|child| child.name() == name)
    }

    /// All direct children with the given name, in document order.
    pub fn children_named(self, name: &str) -> impl Iterator<Item = Node<'doc>> {
        self.children().filter(move |child| child.name() == name)
    }

    /// All direct children, in document order.
    pub fn children(self) -> Children<'doc> {
        Children {
            document: self.document,
            ids: self.data().children.iter(),
        }
    }

    /// Number of direct children.
    pub fn len(self) -> usize {
        self.data().children.len()
    }

    /// Whether this node has no children.
    pub fn is_empty(self) -> bool {
        self.data().children.is_empty()
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.document, other.document) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Node");
        debug
            .field("name", &self.name())
            .field("indent", &self.indent());
        if let Some(text) = self.text() {
            debug.field("text", &text);
        }
        if !self.properties().is_empty() {
            debug.field("properties", self.properties());
        }
        if !self.is_empty() {
            debug.field("children", &self.children().collect::<Vec<_>>());
        }
        debug.finish()
    }
}

impl<'doc> IntoIterator for Node<'doc> {
    type Item = Node<'doc>;
    type IntoIter = Children<'doc>;

    fn into_iter(self) -> Self::IntoIter {
        self.children()
    }
}

/// Iterator over the direct children of a node.
#[derive(Clone)]
pub struct Children<'doc> {
    document: &'doc Document,
    ids: std::slice::Iter<'doc, NodeId>,
}

impl<'doc> Iterator for Children<'doc> {
    type Item = Node<'doc>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|&id| Node::new(self.document, id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ids.next_back().map(|&id| Node::new(self.document, id))
    }
}

impl ExactSizeIterator for Children<'_> {}

impl FusedIterator for Children<'_> {}
