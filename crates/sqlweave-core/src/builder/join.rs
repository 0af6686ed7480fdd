//! JOIN specifications.

use std::fmt;

use super::selection::Selection;

/// The kind of a JOIN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinKind {
    /// `INNER JOIN`.
    #[default]
    Inner,
    /// `LEFT JOIN`.
    Left,
    /// `RIGHT JOIN`.
    Right,
}

impl JoinKind {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inner => "INNER",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
        }
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Columns a join contributes to the SELECT list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinSelect {
    /// `alias.*`.
    All,
    /// The given columns, qualified by the join alias.
    Columns(Selection),
}

/// A join as described by the caller.
///
/// ```rust
/// use sqlweave_core::builder::JoinTable;
///
/// let join = JoinTable::left("posts")
///     .alias("p")
///     .on("p.user_id = u.id")
///     .select(["title", "created_at"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinTable {
    /// Joined table.
    pub name: String,
    /// Alias; defaults to the table name.
    pub alias: Option<String>,
    /// Join kind.
    pub kind: JoinKind,
    /// ON condition; defaults to `TRUE`.
    pub condition: Option<String>,
    /// Columns injected into the SELECT list.
    pub select: Option<JoinSelect>,
}

impl JoinTable {
    /// Creates an inner join on `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            kind: JoinKind::Inner,
            condition: None,
            select: None,
        }
    }

    /// Creates an inner join.
    pub fn inner(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    /// Creates a left join.
    pub fn left(name: impl Into<String>) -> Self {
        Self::new(name).kind(JoinKind::Left)
    }

    /// Creates a right join.
    pub fn right(name: impl Into<String>) -> Self {
        Self::new(name).kind(JoinKind::Right)
    }

    /// Sets the join kind.
    #[must_use]
    pub const fn kind(mut self, kind: JoinKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Sets the ON condition.
    #[must_use]
    pub fn on(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Injects the given columns into the SELECT list.
    #[must_use]
    pub fn select(mut self, selection: impl Into<Selection>) -> Self {
        self.select = Some(JoinSelect::Columns(selection.into()));
        self
    }

    /// Injects `alias.*` into the SELECT list.
    #[must_use]
    pub fn select_all(mut self) -> Self {
        self.select = Some(JoinSelect::All);
        self
    }

    /// Splits into the defaulted clause and the selection to inject.
    pub(crate) fn into_parts(self) -> (JoinClause, Option<Selection>) {
        let alias = self.alias.unwrap_or_else(|| self.name.clone());
        let selection = self.select.map(|select| match select {
            JoinSelect::All => Selection::from("*"),
            JoinSelect::Columns(selection) => selection,
        });
        let clause = JoinClause {
            name: self.name,
            alias,
            kind: self.kind,
            condition: self.condition.unwrap_or_else(|| String::from(super::operators::TRUE)),
        };
        (clause, selection)
    }
}

/// A join with every default applied, as recorded by the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct JoinClause {
    pub(crate) name: String,
    pub(crate) alias: String,
    pub(crate) kind: JoinKind,
    pub(crate) condition: String,
}

impl fmt::Display for JoinClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} JOIN \"{}\" {} ON ({})",
            self.kind, self.name, self.alias, self.condition
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_defaults() {
        let (clause, selection) = JoinTable::inner("posts").into_parts();
        assert_eq!(clause.alias, "posts");
        assert_eq!(clause.condition, "TRUE");
        assert_eq!(selection, None);
        assert_eq!(clause.to_string(), "INNER JOIN \"posts\" posts ON (TRUE)");
    }

    #[test]
    fn test_join_select_all_expands_to_star() {
        let (_, selection) = JoinTable::left("posts").alias("p").select_all().into_parts();
        assert_eq!(selection, Some(Selection::from("*")));
    }

    #[test]
    fn test_join_kind_rendering() {
        let (clause, _) = JoinTable::right("tags").alias("t").on("t.id = p.tag_id").into_parts();
        assert_eq!(clause.to_string(), "RIGHT JOIN \"tags\" t ON (t.id = p.tag_id)");
    }
}
