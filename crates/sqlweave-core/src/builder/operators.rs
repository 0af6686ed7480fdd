//! Condition and operator functions for WHERE/HAVING fragments.
//!
//! These are plain text templates. Arguments are inserted as given; only
//! [`contain`] quotes its input.
//!
//! ```rust
//! use sqlweave_core::builder::operators::{and, in_list, is_null, or};
//!
//! let cond = and([
//!     in_list("role", ["'admin'", "'owner'"]).as_str(),
//!     or(["age > 18", is_null("age").as_str()]).as_str(),
//! ]);
//! assert_eq!(cond, "(role IN ('admin', 'owner') AND (age > 18 OR (age IS NULL)))");
//! ```

use std::fmt;

use super::query::QueryBuilder;
use super::selection::IntoFragments;
use crate::value::quote_literal;

/// The always-true predicate.
pub const TRUE: &str = "TRUE";

/// Comparison operator used with [`all`] and [`any`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `=`
    Eq,
    /// `<>`
    NotEq,
    /// `!=`
    BangEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
}

impl CompareOp {
    /// Returns the operator symbol.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::BangEq => "!=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Lt => "<",
            Self::LtEq => "<=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The right-hand side of `IN`, `ALL` and `ANY`.
#[derive(Debug, Clone, PartialEq)]
pub enum SubQuery {
    /// Literal items, joined with commas.
    List(Vec<String>),
    /// A query given as text, without surrounding parentheses.
    Sql(String),
    /// A nested builder, rendered when the fragment is produced.
    Builder(Box<QueryBuilder>),
}

impl SubQuery {
    /// Builds a nested query from a fresh builder.
    #[must_use]
    pub fn with<F>(f: F) -> Self
    where
        F: FnOnce(QueryBuilder) -> QueryBuilder,
    {
        Self::Builder(Box::new(f(QueryBuilder::new())))
    }

    /// Renders the parenthesized fragment.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::List(items) => format!("({})", items.join(", ")),
            Self::Sql(sql) => format!("({sql})"),
            Self::Builder(builder) => format!("({})", builder.build()),
        }
    }
}

impl<S: Into<String>> From<Vec<S>> for SubQuery {
    fn from(items: Vec<S>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for SubQuery {
    fn from(items: [S; N]) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for SubQuery {
    fn from(sql: &str) -> Self {
        Self::Sql(String::from(sql))
    }
}

impl From<String> for SubQuery {
    fn from(sql: String) -> Self {
        Self::Sql(sql)
    }
}

impl From<QueryBuilder> for SubQuery {
    fn from(builder: QueryBuilder) -> Self {
        Self::Builder(Box::new(builder))
    }
}

impl From<&QueryBuilder> for SubQuery {
    fn from(builder: &QueryBuilder) -> Self {
        Self::Builder(Box::new(builder.clone()))
    }
}

/// `(a AND b ...)`.
#[must_use]
pub fn and(conditions: impl IntoFragments) -> String {
    format!("({})", conditions.into_fragments().join(" AND "))
}

/// `(a OR b ...)`.
#[must_use]
pub fn or(conditions: impl IntoFragments) -> String {
    format!("({})", conditions.into_fragments().join(" OR "))
}

/// `NOT expr`.
#[must_use]
pub fn not(expr: &str) -> String {
    format!("NOT {expr}")
}

/// `expr IN (...)`.
#[must_use]
pub fn in_list(expr: &str, list: impl Into<SubQuery>) -> String {
    format!("{expr} IN {}", list.into().render())
}

/// `expr BETWEEN low AND high`. An empty `expr` renders the bare
/// `BETWEEN low AND high` for the caller to prefix.
#[must_use]
pub fn between(expr: &str, low: &str, high: &str) -> String {
    if expr.is_empty() {
        format!("BETWEEN {low} AND {high}")
    } else {
        format!("{expr} BETWEEN {low} AND {high}")
    }
}

/// `(expr IS NULL)`.
#[must_use]
pub fn is_null(expr: &str) -> String {
    format!("({expr} IS NULL)")
}

/// `(expr IS NOT NULL)`.
#[must_use]
pub fn not_null(expr: &str) -> String {
    format!("({expr} IS NOT NULL)")
}

/// `expr op ALL (...)`.
#[must_use]
pub fn all(expr: &str, op: CompareOp, sub_query: impl Into<SubQuery>) -> String {
    format!("{expr} {op} ALL {}", sub_query.into().render())
}

/// `expr op ANY (...)`.
#[must_use]
pub fn any(expr: &str, op: CompareOp, sub_query: impl Into<SubQuery>) -> String {
    format!("{expr} {op} ANY {}", sub_query.into().render())
}

/// `column LIKE '%sub%'`, with `sub` quoted like any text literal.
#[must_use]
pub fn contain(column: &str, sub: &str) -> String {
    format!("{column} LIKE {}", quote_literal(&format!("%{sub}%")))
}

/// `expr LIKE pattern`.
#[must_use]
pub fn like(expr: &str, pattern: &str) -> String {
    format!("{expr} LIKE {pattern}")
}

/// `CONCAT(a, b ...)`.
#[must_use]
pub fn concat(parts: impl IntoFragments) -> String {
    format!("CONCAT({})", parts.into_fragments().join(", "))
}

/// Builds a nested query with `f` and returns its parenthesized text.
#[must_use]
pub fn sub_query<F>(f: F) -> String
where
    F: FnOnce(QueryBuilder) -> QueryBuilder,
{
    QueryBuilder::sub_query_with(f)
}
