//! Lexer for the HML markup language.

use crate::{Position, Token, TokenKind};
use tracing::trace;

/// A lexer that produces tokens from HML source text.
///
/// All cursor state lives in the lexer value, so every call to
/// [`Lexer::new`] starts an independent pass over its input.
#[derive(Clone)]
pub struct Lexer<'src> {
    /// The remaining source text.
    remaining: &'src str,
    /// Current character offset.
    offset: u32,
    /// Current line (0-based).
    line: u32,
    /// Current column (0-based).
    column: u32,
    /// Whether `EndOfDocument` has been handed out by the iterator.
    finished: bool,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            remaining: source,
            offset: 0,
            line: 0,
            column: 0,
            finished: false,
        }
    }

    /// Tokenize a whole document, `EndOfDocument` included.
    pub fn tokenize(source: &'src str) -> Vec<Token> {
        Lexer::new(source).collect()
    }

    /// Get the current position as an empty range.
    #[inline]
    pub fn current_position(&self) -> Position {
        Position::new(self.line, self.column, self.offset, 0)
    }

    /// Peek at the next character without consuming it.
    #[inline]
    fn peek(&self) -> Option<char> {
        self.remaining.chars().next()
    }

    /// Advance by one character and return it.
    ///
    /// Line and column follow the consumed character, so positions stay
    /// right even when a property value spans several lines.
    #[inline]
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.remaining = &self.remaining[c.len_utf8()..];
        self.offset += 1;
        match c {
            '\n' => self.next_line(),
            '\r' if self.peek() != Some('\n') => self.next_line(),
            _ => self.column += 1,
        }
        Some(c)
    }

    #[inline]
    fn next_line(&mut self) {
        self.line += 1;
        self.column = 0;
    }

    /// Consume characters while `accept` holds, appending them to `content`.
    fn advance_while(&mut self, content: &mut String, accept: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !accept(c) {
                break;
            }
            self.advance();
            content.push(c);
        }
    }

    /// Create a token spanning from `start` to the current position.
    fn token(&self, kind: TokenKind, start: Position, content: impl Into<String>) -> Token {
        let position = Position {
            length: self.offset - start.offset,
            ..start
        };
        let token = Token::new(kind, position, content);
        trace!(
            "Token {:?} at [{}, {}]: {:?}",
            token.kind, position.line, position.column, token.content
        );
        token
    }

    /// Get the next token.
    ///
    /// Once the input is exhausted every call returns `EndOfDocument`.
    pub fn next_token(&mut self) -> Token {
        let start = self.current_position();

        let Some(c) = self.peek() else {
            return self.token(TokenKind::EndOfDocument, start, "");
        };

        match c {
            c if is_identifier_start(c) => self.lex_identifier(),
            ' ' => self.lex_whitespace(),
            '\n' | '\r' => self.lex_line_return(),
            '"' => self.lex_property_value(),
            ':' => self.lex_text(),

            // Single-character tokens
            '=' | '(' | ')' | ',' => {
                self.advance();
                let kind = match c {
                    '=' => TokenKind::Equals,
                    '(' => TokenKind::PropertiesStart,
                    ')' => TokenKind::PropertiesEnd,
                    _ => TokenKind::PropertiesSeparator,
                };
                self.token(kind, start, c)
            }

            // Passed through; the parser decides whether it is acceptable.
            _ => {
                self.advance();
                self.token(TokenKind::Unknown, start, c)
            }
        }
    }

    /// Lex a node or property name.
    fn lex_identifier(&mut self) -> Token {
        let start = self.current_position();
        let mut content = String::new();
        if let Some(c) = self.advance() {
            content.push(c);
        }
        self.advance_while(&mut content, is_identifier_char);
        self.token(TokenKind::Identifier, start, content)
    }

    /// Lex a run of spaces. Tabs are not whitespace here.
    fn lex_whitespace(&mut self) -> Token {
        let start = self.current_position();
        let mut content = String::new();
        self.advance_while(&mut content, |c| c == ' ');
        self.token(TokenKind::Whitespace, start, content)
    }

    /// Lex `\n`, `\r`, or `\r\n` as a single line return.
    fn lex_line_return(&mut self) -> Token {
        let start = self.current_position();
        let mut content = String::new();
        if let Some(c) = self.advance() {
            content.push(c);
            if c == '\r' && self.peek() == Some('\n') {
                self.advance();
                content.push('\n');
            }
        }
        self.token(TokenKind::LineReturn, start, content)
    }

    /// Lex a quoted property value: `"..."`.
    ///
    /// `\"` stands for a literal quote; any other backslash is kept as is.
    /// An unterminated value runs to the end of input.
    fn lex_property_value(&mut self) -> Token {
        let start = self.current_position();
        let mut content = String::new();

        // Consume opening quote
        self.advance();

        while let Some(c) = self.advance() {
            match c {
                '"' => break,
                '\\' if self.peek() == Some('"') => {
                    self.advance();
                    content.push('"');
                }
                _ => content.push(c),
            }
        }

        self.token(TokenKind::PropertyValue, start, content)
    }

    /// Lex trailing text: `: rest of the line`.
    fn lex_text(&mut self) -> Token {
        let start = self.current_position();
        let mut content = String::new();

        // Consume `:` and the spaces after it
        self.advance();
        while self.peek() == Some(' ') {
            self.advance();
        }

        self.advance_while(&mut content, |c| c != '\n' && c != '\r');
        self.token(TokenKind::Text, start, content)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::EndOfDocument {
            self.finished = true;
        }
        Some(token)
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

/// Check if a character can start an identifier.
fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '@'
}

/// Check if a character can continue an identifier.
fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '.' | '-' | '_')
}
