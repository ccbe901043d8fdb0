//! Pull-based line parser for HML.

use hml_tokenizer::{Lexer, Position, Token, TokenKind};
use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::ParseError;

/// Properties of a node, in declaration order.
pub type Properties = IndexMap<String, String>;

/// A fully parsed node line, not yet placed in a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLine {
    /// Number of leading spaces on the line.
    pub indent: u32,
    /// The identifier token naming the node.
    pub token: Token,
    /// Text after `:`, if any.
    pub text: Option<String>,
    /// Properties declared between parentheses.
    pub properties: Properties,
}

impl NodeLine {
    /// The node name.
    pub fn name(&self) -> &str {
        &self.token.content
    }

    /// Position of the node name.
    pub fn position(&self) -> Position {
        self.token.position
    }
}

/// Pull-based parser for HML node lines.
///
/// A parser is created per document and walks it once; all state for the
/// walk lives here.
#[derive(Clone)]
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    state: ParserState,
    /// Every token consumed so far, trivia included.
    tokens: Vec<Token>,
    /// The last accepted, non-ignored token.
    previous: Option<Token>,
    /// Indentation of the line being parsed.
    indent: u32,
    /// Node being accumulated on the current line.
    pending: Option<PendingNode>,
    /// Name of the property waiting for its value.
    property_name: Option<String>,
}

#[derive(Clone)]
struct PendingNode {
    token: Token,
    text: Option<String>,
    properties: Properties,
}

/// Parser state machine states, named after what was accepted last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    /// Nothing accepted yet.
    DocumentStart,
    /// After a line return.
    LineStart,
    /// After the leading spaces of a line.
    Indented,
    /// After the node name.
    NodeName,
    /// After `(`.
    PropertiesStart,
    /// After a property name.
    PropertyName,
    /// After `=`.
    Equals,
    /// After a quoted value.
    PropertyValue,
    /// After `,`.
    PropertiesSeparator,
    /// After `)`.
    PropertiesEnd,
    /// After `: text`.
    Text,
    /// End of document reached, or the parse failed.
    Finished,
}

impl ParserState {
    /// Token kinds accepted in this state, in the order reported on error.
    fn expected(self) -> &'static [TokenKind] {
        use TokenKind::*;
        match self {
            ParserState::DocumentStart | ParserState::LineStart => {
                &[Identifier, Whitespace, LineReturn, EndOfDocument]
            }
            ParserState::Indented => &[Identifier, LineReturn, EndOfDocument],
            ParserState::NodeName => &[PropertiesStart, Text, LineReturn, EndOfDocument],
            ParserState::PropertiesStart => &[Identifier, PropertiesEnd],
            ParserState::PropertyName => &[Equals],
            ParserState::Equals => &[PropertyValue],
            ParserState::PropertyValue => &[PropertiesSeparator, PropertiesEnd],
            ParserState::PropertiesSeparator => &[Identifier],
            ParserState::PropertiesEnd => &[Text, LineReturn, EndOfDocument],
            ParserState::Text => &[LineReturn, EndOfDocument],
            ParserState::Finished => &[],
        }
    }

    /// Whether a space run here is the indentation of a new line.
    fn at_line_start(self) -> bool {
        matches!(self, ParserState::DocumentStart | ParserState::LineStart)
    }
}

impl<'src> Parser<'src> {
    /// Create a new parser for the given source.
    pub fn new(source: &'src str) -> Self {
        Self {
            lexer: Lexer::new(source),
            state: ParserState::DocumentStart,
            tokens: Vec::new(),
            previous: None,
            indent: 0,
            pending: None,
            property_name: None,
        }
    }

    /// Get the next completed node line.
    ///
    /// Returns `Ok(None)` once the end of the document has been reached.
    /// After an error the parser is finished and yields nothing more.
    pub fn next_line(&mut self) -> Result<Option<NodeLine>, ParseError> {
        while self.state != ParserState::Finished {
            let token = self.lexer.next_token();
            match self.accept(token) {
                Ok(Some(line)) => return Ok(Some(line)),
                Ok(None) => continue,
                Err(error) => {
                    self.state = ParserState::Finished;
                    return Err(error);
                }
            }
        }
        Ok(None)
    }

    /// Parse every remaining line into a vector.
    pub fn parse_to_vec(mut self) -> Result<Vec<NodeLine>, ParseError> {
        let mut lines = Vec::new();
        while let Some(line) = self.next_line()? {
            lines.push(line);
        }
        Ok(lines)
    }

    /// Every token consumed so far, in source order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Take the consumed tokens.
    ///
    /// Once the parser has finished this is the whole token stream, ending
    /// with `EndOfDocument`.
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Feed one token through the state machine.
    fn accept(&mut self, mut token: Token) -> Result<Option<NodeLine>, ParseError> {
        if token.is_trivia() {
            if self.state.at_line_start() {
                token.kind = TokenKind::Indent;
                self.indent = token.position.length;
                self.state = ParserState::Indented;
                self.previous = Some(token.clone());
            } else {
                trace!("Skipping whitespace at {:?}", token.position);
            }
            self.tokens.push(token);
            return Ok(None);
        }

        let mut completed = None;
        let next = match (self.state, token.kind) {
            (
                ParserState::DocumentStart | ParserState::LineStart | ParserState::Indented,
                TokenKind::Identifier,
            ) => {
                self.pending = Some(PendingNode {
                    token: token.clone(),
                    text: None,
                    properties: Properties::new(),
                });
                ParserState::NodeName
            }

            // Blank line
            (
                ParserState::DocumentStart | ParserState::LineStart | ParserState::Indented,
                TokenKind::LineReturn,
            ) => {
                self.indent = 0;
                ParserState::LineStart
            }
            (
                ParserState::DocumentStart | ParserState::LineStart | ParserState::Indented,
                TokenKind::EndOfDocument,
            ) => ParserState::Finished,

            (ParserState::NodeName, TokenKind::PropertiesStart) => ParserState::PropertiesStart,

            (ParserState::PropertiesStart | ParserState::PropertiesSeparator, TokenKind::Identifier) => {
                self.property_name = Some(token.content.clone());
                ParserState::PropertyName
            }
            (ParserState::PropertyName, TokenKind::Equals) => ParserState::Equals,
            (ParserState::Equals, TokenKind::PropertyValue) => {
                if let (Some(pending), Some(name)) = (&mut self.pending, self.property_name.take()) {
                    pending.properties.insert(name, token.content.clone());
                }
                ParserState::PropertyValue
            }
            (ParserState::PropertyValue, TokenKind::PropertiesSeparator) => {
                ParserState::PropertiesSeparator
            }
            (ParserState::PropertiesStart | ParserState::PropertyValue, TokenKind::PropertiesEnd) => {
                ParserState::PropertiesEnd
            }

            (ParserState::NodeName | ParserState::PropertiesEnd, TokenKind::Text) => {
                if let Some(pending) = &mut self.pending {
                    pending.text = Some(token.content.clone());
                }
                ParserState::Text
            }

            (
                ParserState::NodeName | ParserState::PropertiesEnd | ParserState::Text,
                TokenKind::LineReturn | TokenKind::EndOfDocument,
            ) => {
                completed = self.complete_line();
                if token.kind == TokenKind::EndOfDocument {
                    ParserState::Finished
                } else {
                    ParserState::LineStart
                }
            }

            (state, _) => {
                return Err(ParseError::InvalidToken {
                    token,
                    previous: self.previous.take(),
                    expected: state.expected().to_vec(),
                });
            }
        };

        trace!("{:?} --{:?}--> {:?}", self.state, token.kind, next);
        self.state = next;
        self.previous = Some(token.clone());
        self.tokens.push(token);
        Ok(completed)
    }

    /// Finish the pending node and reset the per-line buffers.
    fn complete_line(&mut self) -> Option<NodeLine> {
        let indent = std::mem::take(&mut self.indent);
        self.property_name = None;
        let pending = self.pending.take()?;
        debug!(
            "Node line {:?} at [{}, {}], indent {}",
            pending.token.content, pending.token.position.line, pending.token.position.column, indent
        );
        Some(NodeLine {
            indent,
            token: pending.token,
            text: pending.text,
            properties: pending.properties,
        })
    }
}

impl Iterator for Parser<'_> {
    type Item = Result<NodeLine, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

#[cfg(test)]
mod tests;
