//! Errors raised while parsing a document.

use std::fmt;

use hml_tokenizer::{Position, Token, TokenKind};

/// A fatal parse error. The whole parse attempt is abandoned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The indentation of a node line does not fit the tree built so far.
    Structural {
        /// What went wrong.
        message: String,
        /// The token naming the misplaced node.
        token: Token,
    },
    /// A token that the grammar does not allow at this point.
    InvalidToken {
        /// The offending token.
        token: Token,
        /// The last accepted token, `None` at the start of the document.
        previous: Option<Token>,
        /// The kinds that would have been accepted, in order.
        expected: Vec<TokenKind>,
    },
}

impl ParseError {
    /// Create a structural error.
    pub fn structural(message: impl Into<String>, token: Token) -> Self {
        ParseError::Structural {
            message: message.into(),
            token,
        }
    }

    /// The token the error points at.
    pub fn token(&self) -> &Token {
        match self {
            ParseError::Structural { token, .. } | ParseError::InvalidToken { token, .. } => token,
        }
    }

    /// Where in the source the error happened.
    pub fn position(&self) -> Position {
        self.token().position
    }

    /// The error message, without source context.
    ///
    /// For invalid tokens this is the canonical form:
    ///
    /// ```text
    /// got token <identifier> at position [0, 5] (following ')'), expected: :'<value>, <line return>, <end of document>
    /// ```
    pub fn message(&self) -> String {
        match self {
            ParseError::Structural { message, .. } => message.clone(),
            ParseError::InvalidToken {
                token,
                previous,
                expected,
            } => {
                let previous = previous
                    .as_ref()
                    .map_or("start", |previous| previous.kind.label());
                let expected = expected
                    .iter()
                    .map(TokenKind::label)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "got token {} at position [{}, {}] (following {}), expected: {}",
                    token.kind.label(),
                    token.position.line,
                    token.position.column,
                    previous,
                    expected
                )
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ParseError {}
