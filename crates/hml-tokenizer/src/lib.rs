#![doc = include_str!("../README.md")]

mod position;
pub use position::Position;

mod token;
pub use token::{Token, TokenKind};

mod lexer;
pub use lexer::Lexer;
