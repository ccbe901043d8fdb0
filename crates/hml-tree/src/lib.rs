#![doc = include_str!("../README.md")]
//! Document tree representation for HML files.
//!
//! This crate ties the lexer and line parser together and assembles the
//! resulting node lines into a tree.

mod builder;
mod node;

pub use builder::TreeBuilder;
pub use hml_parse::{ParseError, Position, Properties, Token, TokenKind};
pub use node::{Children, Node, NodeId};

use node::NodeData;

/// Parse an HML document into a tree.
pub fn parse(source: &str) -> Result<Document, ParseError> {
    let mut parser = hml_parse::Parser::new(source);
    let mut builder = TreeBuilder::new();
    while let Some(line) = parser.next_line()? {
        builder.push_line(line)?;
    }
    Ok(builder.finish(parser.into_tokens()))
}

/// A parsed HML document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: Option<NodeId>,
    tokens: Vec<Token>,
}

impl Document {
    /// Parse an HML document.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        parse(source)
    }

    /// The root node, `None` when the document has no node lines.
    pub fn root(&self) -> Option<Node<'_>> {
        self.root.map(|id| Node::new(self, id))
    }

    /// Every token of the source, ending with `EndOfDocument`.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Get a node by id.
    pub fn get(&self, id: NodeId) -> Option<Node<'_>> {
        (id.0 < self.nodes.len()).then(|| Node::new(self, id))
    }
}
