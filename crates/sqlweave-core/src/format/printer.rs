//! Token-based pretty-printer.
//!
//! Top-level clause keywords start a line of their own and their body is
//! indented one level below; commas at clause level break the line. The
//! column list of `CREATE TABLE` is laid out as an indented block. Anything
//! inside other parentheses stays on one line.

use super::{FormatOptions, KeywordCase, SqlFormatter};
use crate::error::FormatError;
use crate::lexer::{Keyword, Lexer, Token, TokenKind};

/// The built-in [`SqlFormatter`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyPrinter;

impl SqlFormatter for PrettyPrinter {
    fn format(&self, sql: &str, options: &FormatOptions) -> Result<String, FormatError> {
        let tokens = Lexer::new(sql, options.resolved_dialect()).tokenize()?;
        let separator = "\n".repeat(options.lines_between_statements + 1);

        let statements: Vec<String> = split_statements(&tokens)
            .map(|statement| StatementWriter::new(sql, options, statement).write(statement))
            .collect();

        Ok(statements.join(&separator))
    }
}

/// Splits at `;`, keeping the terminator with its statement. Empty
/// statements are dropped.
fn split_statements(tokens: &[Token]) -> impl Iterator<Item = &[Token]> + '_ {
    tokens
        .split_inclusive(|t| t.kind == TokenKind::Semicolon)
        .filter(|s| s.iter().any(|t| t.kind != TokenKind::Semicolon))
}

/// Whether the statement starts with `CREATE [TEMP|TEMPORARY] TABLE`.
fn is_create_table(tokens: &[Token]) -> bool {
    let mut words = tokens
        .iter()
        .filter(|t| !matches!(t.kind, TokenKind::LineComment | TokenKind::BlockComment))
        .map(Token::keyword);

    if words.next() != Some(Some(Keyword::Create)) {
        return false;
    }
    match words.next() {
        Some(Some(Keyword::Table)) => true,
        Some(Some(Keyword::Temp | Keyword::Temporary)) => {
            words.next() == Some(Some(Keyword::Table))
        }
        _ => false,
    }
}

/// `DEFAULT VALUES`, `FOR UPDATE` and referential actions such as
/// `ON DELETE SET NULL` continue the current line.
fn is_clause_start(keyword: Keyword, prev: Option<&Token>, next: Option<&Token>) -> bool {
    match keyword {
        Keyword::Select
        | Keyword::From
        | Keyword::Where
        | Keyword::Having
        | Keyword::Limit
        | Keyword::Offset
        | Keyword::Join
        | Keyword::Insert
        | Keyword::Union => true,
        Keyword::Set => !prev.is_some_and(|t| t.is(Keyword::Delete) || t.is(Keyword::Update)),
        Keyword::Values => !prev.is_some_and(|t| t.is(Keyword::Default)),
        Keyword::Update | Keyword::Delete => {
            !prev.is_some_and(|t| t.is(Keyword::For) || t.is(Keyword::On))
        }
        Keyword::Group | Keyword::Order => next.is_some_and(|t| t.is(Keyword::By)),
        Keyword::Inner | Keyword::Left | Keyword::Right | Keyword::Full | Keyword::Cross => {
            next.is_some_and(|t| t.is(Keyword::Join) || t.is(Keyword::Outer))
        }
        _ => false,
    }
}

/// Keywords that stay on the clause line after `keyword`.
const fn continuation(keyword: Keyword) -> &'static [Keyword] {
    match keyword {
        Keyword::Select => &[Keyword::Distinct, Keyword::All],
        Keyword::Group | Keyword::Order => &[Keyword::By],
        Keyword::Insert => &[Keyword::Into],
        Keyword::Delete => &[Keyword::From],
        Keyword::Left | Keyword::Right | Keyword::Full => &[Keyword::Outer, Keyword::Join],
        Keyword::Inner | Keyword::Cross | Keyword::Outer => &[Keyword::Join],
        Keyword::Union => &[Keyword::All],
        _ => &[],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    /// Not a `CREATE TABLE` statement.
    None,
    /// `CREATE TABLE` before its column list.
    Pending,
    /// Inside the column list, opened at this paren depth.
    Open(usize),
    Closed,
}

struct StatementWriter<'a> {
    source: &'a str,
    options: &'a FormatOptions,
    out: String,
    /// Indentation level of the line break owed before the next token.
    pending: Option<usize>,
    depth: usize,
    in_clause: bool,
    head: &'static [Keyword],
    block: Block,
}

impl<'a> StatementWriter<'a> {
    fn new(source: &'a str, options: &'a FormatOptions, tokens: &[Token]) -> Self {
        Self {
            source,
            options,
            out: String::new(),
            pending: None,
            depth: 0,
            in_clause: false,
            head: &[],
            block: if is_create_table(tokens) {
                Block::Pending
            } else {
                Block::None
            },
        }
    }

    fn write(mut self, tokens: &[Token]) -> String {
        for (i, token) in tokens.iter().enumerate() {
            let prev = i.checked_sub(1).and_then(|p| tokens.get(p));
            self.token(token, prev, tokens.get(i + 1));
        }
        self.out
    }

    fn token(&mut self, token: &Token, prev: Option<&Token>, next: Option<&Token>) {
        let text = token.text(self.source);

        if let Some(keyword) = token.keyword() {
            if self.head.contains(&keyword) {
                self.pending = None;
                let word = self.keyword_text(keyword, text);
                self.push(&word, true);
                self.head = continuation(keyword);
                self.pending = Some(1);
                return;
            }
        }
        self.head = &[];

        match token.kind {
            TokenKind::Keyword(keyword) if self.depth == 0 && is_clause_start(keyword, prev, next) => {
                self.pending = (!self.out.is_empty()).then_some(0);
                let word = self.keyword_text(keyword, text);
                self.push(&word, false);
                self.in_clause = true;
                self.head = continuation(keyword);
                self.pending = Some(1);
            }
            TokenKind::Keyword(keyword) => {
                let word = self.keyword_text(keyword, text);
                self.push(&word, token.spaced);
            }
            TokenKind::LeftParen if self.block == Block::Pending && self.depth == 0 => {
                self.push("(", true);
                self.depth += 1;
                self.block = Block::Open(self.depth);
                self.pending = Some(1);
            }
            TokenKind::LeftParen => {
                self.push("(", token.spaced);
                self.depth += 1;
            }
            TokenKind::RightParen => {
                if self.block == Block::Open(self.depth) {
                    self.block = Block::Closed;
                    self.pending = Some(0);
                }
                self.depth = self.depth.saturating_sub(1);
                self.push(")", false);
            }
            TokenKind::Comma => {
                self.push(",", false);
                if self.breaks_at_comma() {
                    self.pending = Some(1);
                }
            }
            TokenKind::LineComment => {
                self.push(text, token.spaced);
                self.pending = Some(self.body_level());
            }
            _ => self.push(text, token.spaced),
        }
    }

    fn keyword_text(&self, keyword: Keyword, text: &str) -> String {
        match self.options.keyword_case {
            KeywordCase::Preserve => text.to_string(),
            KeywordCase::Upper => keyword.as_str().to_string(),
            KeywordCase::Lower => keyword.as_str().to_ascii_lowercase(),
        }
    }

    fn breaks_at_comma(&self) -> bool {
        match self.block {
            Block::Open(depth) => self.depth == depth,
            Block::None | Block::Pending | Block::Closed => self.depth == 0 && self.in_clause,
        }
    }

    fn body_level(&self) -> usize {
        usize::from(self.in_clause || matches!(self.block, Block::Open(_)))
    }

    fn push(&mut self, text: &str, spaced: bool) {
        if let Some(level) = self.pending.take() {
            if !self.out.is_empty() {
                self.out.push('\n');
            }
            self.out
                .push_str(&" ".repeat(level * self.options.indent));
        } else if !self.out.is_empty() && self.wants_space(text, spaced) {
            self.out.push(' ');
        }
        self.out.push_str(text);
    }

    fn wants_space(&self, text: &str, spaced: bool) -> bool {
        if text.starts_with([',', ';', ')']) || self.out.ends_with('(') {
            return false;
        }
        spaced || self.out.ends_with(',')
    }
}
