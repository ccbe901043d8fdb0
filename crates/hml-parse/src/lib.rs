#![doc = include_str!("../README.md")]

pub use hml_tokenizer::{Lexer, Position, Token, TokenKind};

mod error;
pub use error::ParseError;

mod diagnostic;

mod parser;
pub use parser::{NodeLine, Parser, Properties};
