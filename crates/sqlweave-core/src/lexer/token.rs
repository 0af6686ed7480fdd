//! Token types for the SQL lexer.

use super::Span;

macro_rules! keywords {
    ($($variant:ident => $text:literal),* $(,)?) => {
        /// SQL keywords the printer re-cases and uses for clause detection.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Keyword {
            $(
                #[doc = $text]
                $variant,
            )*
        }

        impl Keyword {
            /// Looks up a keyword (case-insensitive).
            #[must_use]
            pub fn lookup(word: &str) -> Option<Self> {
                match word.to_ascii_uppercase().as_str() {
                    $($text => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// Returns the upper-case spelling of the keyword.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)*
                }
            }
        }
    };
}

keywords! {
    Select => "SELECT",
    Distinct => "DISTINCT",
    From => "FROM",
    Where => "WHERE",
    Group => "GROUP",
    Order => "ORDER",
    By => "BY",
    Having => "HAVING",
    Limit => "LIMIT",
    Offset => "OFFSET",
    Join => "JOIN",
    Inner => "INNER",
    Left => "LEFT",
    Right => "RIGHT",
    Full => "FULL",
    Outer => "OUTER",
    Cross => "CROSS",
    On => "ON",
    Union => "UNION",
    All => "ALL",
    Any => "ANY",
    Insert => "INSERT",
    Into => "INTO",
    Values => "VALUES",
    Update => "UPDATE",
    Set => "SET",
    Delete => "DELETE",
    For => "FOR",
    Create => "CREATE",
    Temporary => "TEMPORARY",
    Temp => "TEMP",
    Table => "TABLE",
    Index => "INDEX",
    Unique => "UNIQUE",
    Primary => "PRIMARY",
    Foreign => "FOREIGN",
    References => "REFERENCES",
    Check => "CHECK",
    Default => "DEFAULT",
    Cascade => "CASCADE",
    Restrict => "RESTRICT",
    Not => "NOT",
    Null => "NULL",
    And => "AND",
    Or => "OR",
    In => "IN",
    Between => "BETWEEN",
    Like => "LIKE",
    Is => "IS",
    As => "AS",
    Asc => "ASC",
    Desc => "DESC",
    Exists => "EXISTS",
    True => "TRUE",
    False => "FALSE",
    If => "IF",
    Case => "CASE",
    When => "WHEN",
    Then => "THEN",
    Else => "ELSE",
    End => "END",
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A recognized keyword.
    Keyword(Keyword),
    /// Bare identifier, function name or data type.
    Word,
    /// Identifier wrapped in the dialect's identifier quotes.
    QuotedIdentifier,
    /// String literal, quotes included.
    String,
    /// Numeric literal.
    Number,
    /// Run of operator characters (`=`, `<>`, `::`, `*`, ...).
    Operator,
    /// Positional or named parameter (`$1`, `:name`).
    Placeholder,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `.`
    Dot,
    /// `-- ...` up to the end of the line.
    LineComment,
    /// `/* ... */`
    BlockComment,
}

/// A token with its location and leading-whitespace flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source text.
    pub span: Span,
    /// Whether whitespace separated this token from the previous one.
    pub spaced: bool,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span, spaced: bool) -> Self {
        Self { kind, span, spaced }
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    /// Returns true if this token is the given keyword.
    #[must_use]
    pub fn is(&self, keyword: Keyword) -> bool {
        self.keyword() == Some(keyword)
    }

    /// Returns the source text of the token.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.slice(source)
    }
}
