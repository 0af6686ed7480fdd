//! SQL tokenizer implementation.

use super::{Keyword, Span, Token, TokenKind};
use crate::dialect::Dialect;
use crate::error::FormatError;

const OPERATOR_CHARS: &[char] = &[
    '+', '-', '*', '/', '%', '=', '<', '>', '!', '|', '&', '~', '^', ':', '?', '@', '#', '[', ']',
];

/// A lexer that splits SQL text into tokens.
pub struct Lexer<'a> {
    /// The input source text.
    input: &'a str,
    /// Dialect deciding the quoting rules.
    dialect: Dialect,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str, dialect: Dialect) -> Self {
        Self {
            input,
            dialect,
            pos: 0,
            start: 0,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the character after the current one without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Skips whitespace; returns true if any was skipped.
    fn skip_whitespace(&mut self) -> bool {
        let before = self.pos;
        self.advance_while(char::is_whitespace);
        self.pos > before
    }

    fn make_token(&self, kind: TokenKind, spaced: bool) -> Token {
        Token::new(kind, Span::new(self.start, self.pos), spaced)
    }

    fn error(&self, message: &str) -> FormatError {
        FormatError::new(message, self.start)
    }

    fn scan_line_comment(&mut self) -> TokenKind {
        self.advance_while(|c| c != '\n');
        TokenKind::LineComment
    }

    fn scan_block_comment(&mut self) -> Result<TokenKind, FormatError> {
        self.advance(); // *
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return Ok(TokenKind::BlockComment);
                }
                Some(_) => {}
                None => return Err(self.error("unterminated block comment")),
            }
        }
    }

    /// Scans up to and including the closing `quote`; a doubled quote is an
    /// escaped quote.
    fn scan_quoted(&mut self, quote: char, backslash: bool) -> Option<()> {
        loop {
            match self.advance()? {
                '\\' if backslash => {
                    self.advance()?;
                }
                c if c == quote => {
                    if self.peek() == Some(quote) {
                        self.advance();
                    } else {
                        return Some(());
                    }
                }
                _ => {}
            }
        }
    }

    /// Scans the rest of a `$tag$ ... $tag$` string; the opening `$` has
    /// been consumed. The tag may be empty.
    fn scan_dollar_quoted(&mut self) -> Result<TokenKind, FormatError> {
        self.advance_while(|c| c.is_alphanumeric() || c == '_');
        if self.peek() != Some('$') {
            return Err(self.error("unexpected character '$'"));
        }
        self.advance();

        let input = self.input;
        let delimiter = &input[self.start..self.pos];
        match input[self.pos..].find(delimiter) {
            Some(end) => {
                self.pos += end + delimiter.len();
                Ok(TokenKind::String)
            }
            None => Err(self.error("unterminated dollar-quoted string")),
        }
    }

    fn scan_number(&mut self) -> TokenKind {
        self.advance_while(|c| c.is_ascii_digit());
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.advance_while(|c| c.is_ascii_digit());
        }
        if self.peek().is_some_and(|c| c == 'e' || c == 'E')
            && self
                .peek_next()
                .is_some_and(|c| c.is_ascii_digit() || c == '+' || c == '-')
        {
            self.advance();
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            self.advance_while(|c| c.is_ascii_digit());
        }
        TokenKind::Number
    }

    fn scan_word(&mut self) -> TokenKind {
        self.advance_while(|c| c.is_alphanumeric() || c == '_' || c == '$');
        let text = &self.input[self.start..self.pos];
        Keyword::lookup(text).map_or(TokenKind::Word, TokenKind::Keyword)
    }

    fn scan_operator(&mut self) -> TokenKind {
        loop {
            match (self.peek(), self.peek_next()) {
                (Some('-'), Some('-')) | (Some('/'), Some('*')) => break,
                (Some('#'), _) if self.dialect.hash_comments() => break,
                (Some(c), _) if OPERATOR_CHARS.contains(&c) => {
                    self.advance();
                }
                _ => break,
            }
        }
        TokenKind::Operator
    }

    /// Scans the next token, or `None` at the end of input.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] on unterminated literals, quoted identifiers
    /// or block comments, and on characters that cannot start a token.
    pub fn next_token(&mut self) -> Result<Option<Token>, FormatError> {
        let spaced = self.skip_whitespace();
        self.start = self.pos;

        let Some(c) = self.advance() else {
            return Ok(None);
        };

        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '.' if self.peek().is_some_and(|n| n.is_ascii_digit()) => {
                self.pos = self.start;
                self.scan_number()
            }
            '.' => TokenKind::Dot,
            '-' if self.peek() == Some('-') => self.scan_line_comment(),
            '/' if self.peek() == Some('*') => self.scan_block_comment()?,
            '#' if self.dialect.hash_comments() => self.scan_line_comment(),
            '$' if self.peek().is_some_and(|n| n.is_ascii_digit()) => {
                self.advance_while(|n| n.is_ascii_digit());
                TokenKind::Placeholder
            }
            '$' if self.dialect.dollar_quoted_strings() => self.scan_dollar_quoted()?,
            ':' if self.peek().is_some_and(|n| n.is_alphabetic() || n == '_') => {
                self.advance_while(|n| n.is_alphanumeric() || n == '_');
                TokenKind::Placeholder
            }
            q if self.dialect.string_quotes().contains(&q) => {
                self.scan_quoted(q, self.dialect.backslash_escapes())
                    .ok_or_else(|| self.error("unterminated string literal"))?;
                TokenKind::String
            }
            q if self.dialect.identifier_quotes().contains(&q) => {
                self.scan_quoted(q, false)
                    .ok_or_else(|| self.error("unterminated quoted identifier"))?;
                TokenKind::QuotedIdentifier
            }
            c if c.is_ascii_digit() => {
                self.pos = self.start;
                self.scan_number()
            }
            c if c.is_alphabetic() || c == '_' => {
                self.pos = self.start;
                self.scan_word()
            }
            c if OPERATOR_CHARS.contains(&c) => {
                self.pos = self.start;
                self.scan_operator()
            }
            other => return Err(self.error(&format!("unexpected character '{other}'"))),
        };

        Ok(Some(self.make_token(kind, spaced)))
    }

    /// Tokenizes the entire input.
    ///
    /// # Errors
    ///
    /// Returns the first tokenizer error, see [`Lexer::next_token`].
    pub fn tokenize(mut self) -> Result<Vec<Token>, FormatError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }
}
