//! Token types for the HML lexer.

use std::fmt;

use crate::Position;

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Any character the lexer has no rule for.
    Unknown,
    /// A run of spaces.
    Whitespace,
    /// A run of spaces that sets the indentation of a node line.
    ///
    /// The lexer never produces this kind itself: the parser reclassifies
    /// leading whitespace when it records the document's tokens.
    Indent,
    /// Node or property name: `node.name`, `_private`, `@meta`
    Identifier,
    /// `(`
    PropertiesStart,
    /// `)`
    PropertiesEnd,
    /// `,`
    PropertiesSeparator,
    /// `=`
    Equals,
    /// Quoted property value: `"value"`
    PropertyValue,
    /// Trailing free text: `: some text`
    Text,
    /// `\n`, `\r` or `\r\n`
    LineReturn,
    /// Synthetic zero-length token closing every stream.
    EndOfDocument,
}

impl TokenKind {
    /// Whether this token is insignificant spacing.
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Indent)
    }

    /// Label used for this kind in parse error messages.
    pub fn label(&self) -> &'static str {
        match self {
            TokenKind::EndOfDocument => "<end of document>",
            TokenKind::Equals => "'='",
            TokenKind::Identifier => "<identifier>",
            TokenKind::Indent | TokenKind::Whitespace => "' '",
            TokenKind::LineReturn => "<line return>",
            TokenKind::PropertiesEnd => "')'",
            TokenKind::PropertiesSeparator => "','",
            TokenKind::PropertiesStart => "'('",
            TokenKind::PropertyValue => "'\"'<value>'\"'",
            TokenKind::Text => ":'<value>",
            TokenKind::Unknown => "?",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A token with its kind, position, and content.
///
/// `content` is the meaningful text of the token, which is not always the
/// raw source: property values are unquoted and unescaped, and text drops
/// its `:` marker and the spaces that follow it. Use
/// [`Position::slice`] to recover the raw source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// Where the token starts and how many characters it consumed.
    pub position: Position,
    /// The token's content.
    pub content: String,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, position: Position, content: impl Into<String>) -> Self {
        Self {
            kind,
            position,
            content: content.into(),
        }
    }

    /// Whether this token is insignificant spacing.
    #[inline]
    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }
}
