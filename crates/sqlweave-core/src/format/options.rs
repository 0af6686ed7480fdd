//! Pretty-printer configuration.

use crate::dialect::Dialect;

/// How recognized keywords are spelled in formatted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeywordCase {
    /// Keep the spelling found in the input.
    Preserve,
    /// `SELECT`.
    #[default]
    Upper,
    /// `select`.
    Lower,
}

/// Options passed to a [`SqlFormatter`](super::SqlFormatter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Dialect used to tokenize the input. `None` means PostgreSQL.
    pub dialect: Option<Dialect>,
    /// Spaces per indentation level.
    pub indent: usize,
    /// Keyword spelling.
    pub keyword_case: KeywordCase,
    /// Blank lines between consecutive statements.
    pub lines_between_statements: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            dialect: None,
            indent: 2,
            keyword_case: KeywordCase::Upper,
            lines_between_statements: 1,
        }
    }
}

impl FormatOptions {
    /// Options for the given dialect, everything else default.
    #[must_use]
    pub fn for_dialect(dialect: Dialect) -> Self {
        Self::default().dialect(dialect)
    }

    /// Sets the dialect.
    #[must_use]
    pub const fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    /// Sets the indentation width.
    #[must_use]
    pub const fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the keyword spelling.
    #[must_use]
    pub const fn keyword_case(mut self, keyword_case: KeywordCase) -> Self {
        self.keyword_case = keyword_case;
        self
    }

    /// Sets the number of blank lines between statements.
    #[must_use]
    pub const fn lines_between_statements(mut self, lines: usize) -> Self {
        self.lines_between_statements = lines;
        self
    }

    /// Returns the configured dialect, falling back to PostgreSQL.
    #[must_use]
    pub fn resolved_dialect(&self) -> Dialect {
        self.dialect.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = FormatOptions::default();
        assert_eq!(options.dialect, None);
        assert_eq!(options.resolved_dialect(), Dialect::PostgreSql);
        assert_eq!(options.indent, 2);
        assert_eq!(options.keyword_case, KeywordCase::Upper);
        assert_eq!(options.lines_between_statements, 1);
    }

    #[test]
    fn test_chained_setters() {
        let options = FormatOptions::for_dialect(Dialect::MySql)
            .indent(4)
            .keyword_case(KeywordCase::Lower)
            .lines_between_statements(0);
        assert_eq!(options.resolved_dialect(), Dialect::MySql);
        assert_eq!(options.indent, 4);
        assert_eq!(options.keyword_case, KeywordCase::Lower);
        assert_eq!(options.lines_between_statements, 0);
    }
}
