//! Selection lists, ordering and predicate fragments accepted by the builder.

use std::fmt;

/// One rendered entry of a SELECT list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectItem {
    /// Column name or computed expression.
    pub expression: String,
    /// Optional `AS` alias.
    pub alias: Option<String>,
}

impl SelectItem {
    /// Creates an unaliased item.
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            alias: None,
        }
    }

    /// Creates an aliased item.
    pub fn aliased(expression: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            alias: Some(alias.into()),
        }
    }
}

impl fmt::Display for SelectItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{} AS {alias}", self.expression),
            None => f.write_str(&self.expression),
        }
    }
}

/// Anything that can be appended to a SELECT list.
///
/// A bare column name, a set of `expression AS alias` pairs, or a sequence
/// mixing both. Order is preserved when flattened.
///
/// ```rust
/// use sqlweave_core::builder::Selection;
///
/// let _ = Selection::from("id");
/// let _ = Selection::from(("COUNT(*)", "total"));
/// let _ = Selection::from(vec![Selection::from("id"), Selection::aliased("name", "n")]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A single column or expression.
    Column(String),
    /// Expression to alias pairs.
    Aliased(Vec<(String, String)>),
    /// A sequence of selections.
    Many(Vec<Selection>),
}

impl Selection {
    /// A single aliased expression.
    pub fn aliased(expression: impl Into<String>, alias: impl Into<String>) -> Self {
        Self::Aliased(vec![(expression.into(), alias.into())])
    }

    /// Appends the flattened items, qualifying every name with `table` when
    /// one is given.
    pub(crate) fn flatten_into(self, table: Option<&str>, items: &mut Vec<SelectItem>) {
        match self {
            Self::Column(name) => items.push(SelectItem::new(qualify(table, name))),
            Self::Aliased(pairs) => items.extend(
                pairs
                    .into_iter()
                    .map(|(name, alias)| SelectItem::aliased(qualify(table, name), alias)),
            ),
            Self::Many(selections) => {
                for selection in selections {
                    selection.flatten_into(table, items);
                }
            }
        }
    }
}

fn qualify(table: Option<&str>, name: String) -> String {
    match table {
        Some(table) => format!("{table}.{name}"),
        None => name,
    }
}

impl From<&str> for Selection {
    fn from(name: &str) -> Self {
        Self::Column(String::from(name))
    }
}

impl From<String> for Selection {
    fn from(name: String) -> Self {
        Self::Column(name)
    }
}

impl From<(&str, &str)> for Selection {
    fn from((expression, alias): (&str, &str)) -> Self {
        Self::aliased(expression, alias)
    }
}

impl From<(String, String)> for Selection {
    fn from((expression, alias): (String, String)) -> Self {
        Self::Aliased(vec![(expression, alias)])
    }
}

impl<T: Into<Self>> From<Vec<T>> for Selection {
    fn from(selections: Vec<T>) -> Self {
        Self::Many(selections.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>, const N: usize> From<[T; N]> for Selection {
    fn from(selections: [T; N]) -> Self {
        Self::Many(selections.into_iter().map(Into::into).collect())
    }
}

impl From<&[&str]> for Selection {
    fn from(names: &[&str]) -> Self {
        Self::Many(names.iter().map(|&name| Self::from(name)).collect())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl Order {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ORDER BY entries. Bare expressions sort ascending.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderBy(pub Vec<(String, Order)>);

impl From<&str> for OrderBy {
    fn from(expression: &str) -> Self {
        Self(vec![(String::from(expression), Order::Asc)])
    }
}

impl From<String> for OrderBy {
    fn from(expression: String) -> Self {
        Self(vec![(expression, Order::Asc)])
    }
}

impl From<(&str, Order)> for OrderBy {
    fn from((expression, order): (&str, Order)) -> Self {
        Self(vec![(String::from(expression), order)])
    }
}

impl From<(String, Order)> for OrderBy {
    fn from(entry: (String, Order)) -> Self {
        Self(vec![entry])
    }
}

impl<T: Into<Self>> From<Vec<T>> for OrderBy {
    fn from(entries: Vec<T>) -> Self {
        Self(entries.into_iter().flat_map(|e| e.into().0).collect())
    }
}

impl<T: Into<Self>, const N: usize> From<[T; N]> for OrderBy {
    fn from(entries: [T; N]) -> Self {
        Self(entries.into_iter().flat_map(|e| e.into().0).collect())
    }
}

/// One or many SQL fragments (predicates, column expressions).
pub trait IntoFragments {
    /// Converts into owned fragments, preserving order.
    fn into_fragments(self) -> Vec<String>;
}

impl IntoFragments for &str {
    fn into_fragments(self) -> Vec<String> {
        vec![String::from(self)]
    }
}

impl IntoFragments for String {
    fn into_fragments(self) -> Vec<String> {
        vec![self]
    }
}

impl<S: Into<String>> IntoFragments for Vec<S> {
    fn into_fragments(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: Into<String>, const N: usize> IntoFragments for [S; N] {
    fn into_fragments(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: AsRef<str>> IntoFragments for &[S] {
    fn into_fragments(self) -> Vec<String> {
        self.iter().map(|s| String::from(s.as_ref())).collect()
    }
}
