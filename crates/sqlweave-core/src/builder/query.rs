//! The chainable query builder.

use std::fmt;

use super::join::{JoinClause, JoinKind, JoinTable};
use super::selection::{IntoFragments, Order, OrderBy, SelectItem, Selection};
use crate::error::FormatError;
use crate::format::{FormatOptions, PrettyPrinter, SqlFormatter};
use crate::value::Value;

/// The statement a builder renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatementKind {
    /// `SELECT`.
    #[default]
    Select,
    /// `INSERT`.
    Insert,
    /// `UPDATE`.
    Update,
    /// `DELETE`.
    Delete,
}

/// The source table and its alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TableRef {
    pub(crate) name: String,
    pub(crate) alias: String,
}

/// Accumulates clauses through chained calls and renders one statement.
///
/// Every method takes the builder by value and returns it. Multi-valued
/// clauses accumulate; `from`, `limit`, `offset` and the raw SQL suffix
/// overwrite. Fields that the active [`StatementKind`] does not use are kept
/// but ignored when rendering.
///
/// ```rust
/// use sqlweave_core::builder::{JoinTable, Order, QueryBuilder};
///
/// let sql = QueryBuilder::new()
///     .select(["id", "email"])
///     .from_as("users", "u")
///     .left_join(JoinTable::new("posts").alias("p").on("p.user_id = u.id"))
///     .count_as("p.id", "posts")
///     .where_clause("u.active")
///     .group_by(["u.id", "u.email"])
///     .order_by(("posts", Order::Desc))
///     .limit(10)
///     .build();
///
/// assert_eq!(
///     sql,
///     "SELECT id, email, COUNT(p.id) AS posts FROM \"users\" u \
///      LEFT JOIN \"posts\" p ON (p.user_id = u.id) WHERE (u.active) \
///      GROUP BY u.id, u.email ORDER BY posts DESC LIMIT 10"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryBuilder {
    pub(super) kind: StatementKind,
    pub(super) table: Option<TableRef>,
    pub(super) selection: Vec<SelectItem>,
    pub(super) joins: Vec<JoinClause>,
    pub(super) filters: Vec<String>,
    pub(super) group_by: Vec<String>,
    pub(super) having: Vec<String>,
    pub(super) order_by: Vec<(String, Order)>,
    pub(super) limit: Option<u64>,
    pub(super) offset: Option<u64>,
    pub(super) insert_columns: Vec<String>,
    pub(super) rows: Vec<Vec<Value>>,
    pub(super) assignments: Vec<(String, Value)>,
    pub(super) raw: Option<String>,
}

impl QueryBuilder {
    /// Creates an empty SELECT builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the statement kind that will be rendered.
    #[must_use]
    pub const fn kind(&self) -> StatementKind {
        self.kind
    }

    // Source table

    /// Sets the source table; its alias is the table name.
    #[must_use]
    pub fn from(self, table: impl Into<String>) -> Self {
        let table = table.into();
        let alias = table.clone();
        self.from_as(table, alias)
    }

    /// Sets the source table with an alias.
    #[must_use]
    pub fn from_as(mut self, table: impl Into<String>, alias: impl Into<String>) -> Self {
        self.table = Some(TableRef {
            name: table.into(),
            alias: alias.into(),
        });
        self
    }

    // Selection

    /// Appends columns or expressions to the SELECT list.
    #[must_use]
    pub fn select(self, selection: impl Into<Selection>) -> Self {
        self.select_qualified(selection.into(), None)
    }

    /// Alias of [`QueryBuilder::select`].
    #[must_use]
    pub fn add_select(self, selection: impl Into<Selection>) -> Self {
        self.select(selection)
    }

    /// Appends columns qualified as `table.column`.
    #[must_use]
    pub fn select_from(self, selection: impl Into<Selection>, table: &str) -> Self {
        self.select_qualified(selection.into(), Some(table))
    }

    fn select_qualified(mut self, selection: Selection, table: Option<&str>) -> Self {
        selection.flatten_into(table, &mut self.selection);
        self
    }

    fn aggregate(self, expression: String, alias: Option<&str>) -> Self {
        match alias {
            Some(alias) => self.select(Selection::aliased(expression, alias)),
            None => self.select(expression),
        }
    }

    /// Selects `COUNT(column)`.
    #[must_use]
    pub fn count(self, column: &str) -> Self {
        self.aggregate(format!("COUNT({column})"), None)
    }

    /// Selects `COUNT(column) AS alias`.
    #[must_use]
    pub fn count_as(self, column: &str, alias: &str) -> Self {
        self.aggregate(format!("COUNT({column})"), Some(alias))
    }

    /// Selects `COUNT(*)`.
    #[must_use]
    pub fn count_all(self) -> Self {
        self.count("*")
    }

    /// Selects `COUNT(DISTINCT column)`.
    #[must_use]
    pub fn count_distinct(self, column: &str) -> Self {
        self.aggregate(format!("COUNT(DISTINCT {column})"), None)
    }

    /// Selects `COUNT(DISTINCT column) AS alias`.
    #[must_use]
    pub fn count_distinct_as(self, column: &str, alias: &str) -> Self {
        self.aggregate(format!("COUNT(DISTINCT {column})"), Some(alias))
    }

    /// Selects `SUM(column)`.
    #[must_use]
    pub fn sum(self, column: &str) -> Self {
        self.aggregate(format!("SUM({column})"), None)
    }

    /// Selects `SUM(column) AS alias`.
    #[must_use]
    pub fn sum_as(self, column: &str, alias: &str) -> Self {
        self.aggregate(format!("SUM({column})"), Some(alias))
    }

    /// Selects `AVG(column)`.
    #[must_use]
    pub fn avg(self, column: &str) -> Self {
        self.aggregate(format!("AVG({column})"), None)
    }

    /// Selects `AVG(column) AS alias`.
    #[must_use]
    pub fn avg_as(self, column: &str, alias: &str) -> Self {
        self.aggregate(format!("AVG({column})"), Some(alias))
    }

    /// Selects `MIN(column)`.
    #[must_use]
    pub fn min(self, column: &str) -> Self {
        self.aggregate(format!("MIN({column})"), None)
    }

    /// Selects `MIN(column) AS alias`.
    #[must_use]
    pub fn min_as(self, column: &str, alias: &str) -> Self {
        self.aggregate(format!("MIN({column})"), Some(alias))
    }

    /// Selects `MAX(column)`.
    #[must_use]
    pub fn max(self, column: &str) -> Self {
        self.aggregate(format!("MAX({column})"), None)
    }

    /// Selects `MAX(column) AS alias`.
    #[must_use]
    pub fn max_as(self, column: &str, alias: &str) -> Self {
        self.aggregate(format!("MAX({column})"), Some(alias))
    }

    // Filtering and grouping

    /// Adds WHERE predicates; all predicates are combined with AND.
    #[must_use]
    pub fn where_clause(mut self, conditions: impl IntoFragments) -> Self {
        self.filters.extend(conditions.into_fragments());
        self
    }

    /// Alias of [`QueryBuilder::where_clause`].
    #[must_use]
    pub fn and_where(self, conditions: impl IntoFragments) -> Self {
        self.where_clause(conditions)
    }

    /// Adds GROUP BY expressions.
    #[must_use]
    pub fn group_by(mut self, columns: impl IntoFragments) -> Self {
        self.group_by.extend(columns.into_fragments());
        self
    }

    /// Adds HAVING predicates; all predicates are combined with AND.
    #[must_use]
    pub fn having(mut self, conditions: impl IntoFragments) -> Self {
        self.having.extend(conditions.into_fragments());
        self
    }

    /// Alias of [`QueryBuilder::having`].
    #[must_use]
    pub fn and_having(self, conditions: impl IntoFragments) -> Self {
        self.having(conditions)
    }

    /// Adds ORDER BY entries.
    #[must_use]
    pub fn order_by(mut self, order: impl Into<OrderBy>) -> Self {
        self.order_by.extend(order.into().0);
        self
    }

    /// Sets LIMIT.
    #[must_use]
    pub const fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets OFFSET.
    #[must_use]
    pub const fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    // Joins

    /// Adds a join. Columns requested by the join are appended to the
    /// SELECT list now, qualified by the join alias.
    #[must_use]
    pub fn join(mut self, join: JoinTable) -> Self {
        let (clause, selection) = join.into_parts();
        if let Some(selection) = selection {
            selection.flatten_into(Some(&clause.alias), &mut self.selection);
        }
        self.joins.push(clause);
        self
    }

    /// Adds an INNER JOIN, whatever kind `join` carries.
    #[must_use]
    pub fn inner_join(self, join: JoinTable) -> Self {
        self.join(join.kind(JoinKind::Inner))
    }

    /// Adds a LEFT JOIN, whatever kind `join` carries.
    #[must_use]
    pub fn left_join(self, join: JoinTable) -> Self {
        self.join(join.kind(JoinKind::Left))
    }

    /// Adds a RIGHT JOIN, whatever kind `join` carries.
    #[must_use]
    pub fn right_join(self, join: JoinTable) -> Self {
        self.join(join.kind(JoinKind::Right))
    }

    // INSERT

    /// Switches to INSERT into `table` with the given columns.
    #[must_use]
    pub fn insert_into(mut self, table: impl Into<String>, columns: impl IntoFragments) -> Self {
        self.kind = StatementKind::Insert;
        self = self.from(table);
        self.insert_columns.extend(columns.into_fragments());
        self
    }

    /// Appends INSERT columns.
    #[must_use]
    pub fn columns(mut self, columns: impl IntoFragments) -> Self {
        self.insert_columns.extend(columns.into_fragments());
        self
    }

    /// Appends one row; values are matched to the columns by position.
    #[must_use]
    pub fn values<I, V>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
        self
    }

    /// Appends several rows.
    #[must_use]
    pub fn values_rows<R, I, V>(self, rows: R) -> Self
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        rows.into_iter().fold(self, Self::values)
    }

    // UPDATE

    /// Switches to UPDATE of `table`.
    #[must_use]
    pub fn update(mut self, table: impl Into<String>) -> Self {
        self.kind = StatementKind::Update;
        self.from(table)
    }

    /// Switches to UPDATE of `table` and merges `data` into the assignments.
    #[must_use]
    pub fn update_with<I, K, V>(self, table: impl Into<String>, data: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.update(table).set_all(data)
    }

    /// Assigns `value` to `column`; the last assignment to a column wins and
    /// keeps the column's original position.
    #[must_use]
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        let column = column.into();
        let value = value.into();
        match self.assignments.iter_mut().find(|(name, _)| *name == column) {
            Some(slot) => slot.1 = value,
            None => self.assignments.push((column, value)),
        }
        self
    }

    /// Merges several assignments, see [`QueryBuilder::set`].
    #[must_use]
    pub fn set_all<I, K, V>(self, data: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        data.into_iter()
            .fold(self, |builder, (column, value)| builder.set(column, value))
    }

    // DELETE

    /// Switches to DELETE from `table`.
    #[must_use]
    pub fn delete(mut self, table: impl Into<String>) -> Self {
        self.kind = StatementKind::Delete;
        self.from(table)
    }

    /// Sets SQL appended verbatim after every clause.
    #[must_use]
    pub fn add_raw_sql(mut self, sql: impl Into<String>) -> Self {
        self.raw = Some(sql.into());
        self
    }

    // Sub-queries

    /// Returns a fresh builder for composing a nested query.
    #[must_use]
    pub fn sub_query() -> Self {
        Self::new()
    }

    /// Builds a nested query with `f` and returns its parenthesized text.
    #[must_use]
    pub fn sub_query_with<F>(f: F) -> String
    where
        F: FnOnce(Self) -> Self,
    {
        format!("({})", f(Self::new()).build())
    }

    // Output

    /// Returns the rendered SQL. Same as [`QueryBuilder::build`].
    #[must_use]
    pub fn sql(&self) -> String {
        self.build()
    }

    /// Renders and pretty-prints with the built-in printer.
    ///
    /// # Errors
    ///
    /// Returns the printer's [`FormatError`] unmodified.
    pub fn format(&self, options: &FormatOptions) -> Result<String, FormatError> {
        self.format_with(&PrettyPrinter, options)
    }

    /// Renders and pretty-prints with `formatter`.
    ///
    /// # Errors
    ///
    /// Returns the formatter's [`FormatError`] unmodified.
    pub fn format_with(
        &self,
        formatter: &dyn SqlFormatter,
        options: &FormatOptions,
    ) -> Result<String, FormatError> {
        formatter.format(&self.build(), options)
    }

    /// Resets every clause, as if freshly constructed.
    pub fn clear(&mut self) -> &mut Self {
        *self = Self::default();
        self
    }
}

impl fmt::Display for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}
