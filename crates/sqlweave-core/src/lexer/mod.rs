//! SQL tokenizer used by the pretty-printer.
//!
//! The lexer never interprets what it reads: every token keeps its span so
//! the printer can emit the original text verbatim.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
