//! Tree builder from parsed node lines.

use hml_parse::{NodeLine, ParseError, Token};
use tracing::{debug, trace};

use crate::Document;
use crate::node::{NodeData, NodeId};

/// Builder that places node lines in a tree using their indentation.
///
/// The builder keeps a stack of open ancestors: a new line closes every
/// ancestor indented at least as deep as itself, then becomes a child of
/// the innermost one left.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
    stack: Vec<NodeId>,
    root: Option<NodeId>,
}

impl TreeBuilder {
    /// Create a new tree builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the next node line in the tree.
    pub fn push_line(&mut self, line: NodeLine) -> Result<NodeId, ParseError> {
        let indent = line.indent;

        if self.root.is_none() {
            let id = self.insert(line);
            debug!("Root node {:?}", self.nodes[id.0].name);
            self.root = Some(id);
            self.stack.push(id);
            return Ok(id);
        }

        while let Some(&top) = self.stack.last() {
            if self.nodes[top.0].indent < indent {
                break;
            }
            trace!("Closing {:?}", self.nodes[top.0].name);
            self.stack.pop();
        }

        let Some(&parent) = self.stack.last() else {
            return Err(ParseError::structural(
                "node indentation exceeds or equals an ancestor that should contain it",
                line.token,
            ));
        };

        if let Some(&sibling) = self.nodes[parent.0].children.first() {
            let expected = self.nodes[sibling.0].indent;
            if expected != indent {
                return Err(ParseError::structural(
                    format!(
                        "node is indented by {} spaces but its siblings by {}",
                        indent, expected
                    ),
                    line.token,
                ));
            }
        }

        let id = self.insert(line);
        self.append_child(parent, id);
        self.stack.push(id);
        Ok(id)
    }

    /// Finish building and return the document.
    pub fn finish(self, tokens: Vec<Token>) -> Document {
        Document {
            nodes: self.nodes,
            root: self.root,
            tokens,
        }
    }

    fn insert(&mut self, line: NodeLine) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            indent: line.indent,
            position: line.token.position,
            name: line.token.content,
            text: line.text,
            properties: line.properties,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        assert!(
            self.nodes[child.0].parent.is_none(),
            "node {:?} already has a parent",
            self.nodes[child.0].name
        );
        debug!(
            "Attaching {:?} (indent {}) to {:?}",
            self.nodes[child.0].name, self.nodes[child.0].indent, self.nodes[parent.0].name
        );
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }
}
