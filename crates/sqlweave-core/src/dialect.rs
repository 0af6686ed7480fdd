//! SQL dialect selection.
//!
//! The generated SQL is dialect-neutral text; the dialect only affects how the
//! pretty-printer tokenizes quoted identifiers and string literals.

use std::fmt;
use std::str::FromStr;

/// Target SQL dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// PostgreSQL. Used whenever no dialect is given.
    #[default]
    PostgreSql,
    /// MySQL / MariaDB.
    MySql,
    /// SQLite.
    Sqlite,
    /// ANSI SQL.
    Generic,
}

impl Dialect {
    /// Returns the dialect name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PostgreSql => "postgresql",
            Self::MySql => "mysql",
            Self::Sqlite => "sqlite",
            Self::Generic => "sql",
        }
    }

    /// Characters that open a quoted identifier.
    #[must_use]
    pub const fn identifier_quotes(self) -> &'static [char] {
        match self {
            Self::PostgreSql => &['"'],
            Self::MySql => &['`'],
            Self::Sqlite | Self::Generic => &['"', '`'],
        }
    }

    /// Characters that open a string literal.
    #[must_use]
    pub const fn string_quotes(self) -> &'static [char] {
        match self {
            Self::MySql => &['\'', '"'],
            Self::PostgreSql | Self::Sqlite | Self::Generic => &['\''],
        }
    }

    /// Whether a backslash escapes the next character inside string literals.
    #[must_use]
    pub const fn backslash_escapes(self) -> bool {
        matches!(self, Self::MySql)
    }

    /// Whether `$tag$ ... $tag$` is a string literal.
    #[must_use]
    pub const fn dollar_quoted_strings(self) -> bool {
        matches!(self, Self::PostgreSql)
    }

    /// Whether `#` starts a comment running to the end of the line.
    #[must_use]
    pub const fn hash_comments(self) -> bool {
        matches!(self, Self::MySql)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a dialect name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown SQL dialect '{0}' (expected postgresql, mysql, sqlite or sql)")]
pub struct ParseDialectError(pub String);

impl FromStr for Dialect {
    type Err = ParseDialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgresql" | "postgres" | "pg" => Ok(Self::PostgreSql),
            "mysql" | "mariadb" => Ok(Self::MySql),
            "sqlite" => Ok(Self::Sqlite),
            "sql" | "generic" => Ok(Self::Generic),
            _ => Err(ParseDialectError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dialect_is_postgresql() {
        assert_eq!(Dialect::default(), Dialect::PostgreSql);
        assert_eq!(Dialect::default().name(), "postgresql");
    }

    #[test]
    fn test_dialect_from_str() {
        assert_eq!("PostgreSQL".parse::<Dialect>(), Ok(Dialect::PostgreSql));
        assert_eq!("mysql".parse::<Dialect>(), Ok(Dialect::MySql));
        assert_eq!("sqlite".parse::<Dialect>(), Ok(Dialect::Sqlite));
        assert_eq!("sql".parse::<Dialect>(), Ok(Dialect::Generic));
        assert!("oracle".parse::<Dialect>().is_err());
    }

    #[test]
    fn test_dialect_quotes() {
        assert_eq!(Dialect::MySql.identifier_quotes(), &['`']);
        assert_eq!(Dialect::PostgreSql.identifier_quotes(), &['"']);
        assert!(Dialect::MySql.backslash_escapes());
        assert!(!Dialect::Sqlite.backslash_escapes());
    }

    #[test]
    fn test_dialect_specific_lexing() {
        assert!(Dialect::PostgreSql.dollar_quoted_strings());
        assert!(!Dialect::MySql.dollar_quoted_strings());
        assert!(Dialect::MySql.hash_comments());
        assert!(!Dialect::PostgreSql.hash_comments());
    }
}
