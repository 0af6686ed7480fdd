//! Declarations attached to a data-model definition.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::metadata::{ColumnMetadata, ForeignKeyMetadata, Index, TableMetadata};
use crate::builder::IntoFragments;
use crate::error::DeclarationError;
use crate::value::Value;

/// Referential action for `ON DELETE` / `ON UPDATE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CascadeAction {
    /// `RESTRICT`
    #[serde(rename = "RESTRICT", alias = "restrict")]
    Restrict,
    /// `CASCADE`
    #[serde(rename = "CASCADE", alias = "cascade")]
    Cascade,
    /// `SET NULL`
    #[serde(rename = "SET NULL", alias = "set null")]
    SetNull,
    /// `SET DEFAULT`
    #[serde(rename = "DEFAULT", alias = "SET DEFAULT", alias = "default")]
    Default,
    /// `NO ACTION`
    #[serde(rename = "NO ACTION", alias = "no action")]
    NoAction,
}

impl CascadeAction {
    /// Returns the SQL representation of the action.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::Default => "SET DEFAULT",
            Self::NoAction => "NO ACTION",
        }
    }
}

impl fmt::Display for CascadeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// A foreign-key declaration.
///
/// `column` is required when declared on the definition and defaults to the
/// property name when declared on a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// Referencing column.
    pub column: Option<String>,
    /// Referenced table and column, e.g. `users(id)`.
    pub reference: String,
    /// `ON DELETE` action.
    pub on_delete: Option<CascadeAction>,
    /// `ON UPDATE` action.
    pub on_update: Option<CascadeAction>,
}

impl ForeignKey {
    /// Declares a foreign key pointing at `reference`.
    pub fn references(reference: impl Into<String>) -> Self {
        Self {
            column: None,
            reference: reference.into(),
            on_delete: None,
            on_update: None,
        }
    }

    /// Sets the referencing column.
    #[must_use]
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Sets the `ON DELETE` action.
    #[must_use]
    pub const fn on_delete(mut self, action: CascadeAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    /// Sets the `ON UPDATE` action.
    #[must_use]
    pub const fn on_update(mut self, action: CascadeAction) -> Self {
        self.on_update = Some(action);
        self
    }

    fn with_column(self, column: String) -> ForeignKeyMetadata {
        ForeignKeyMetadata {
            column,
            reference: self.reference,
            on_delete: self.on_delete,
            on_update: self.on_update,
        }
    }
}

/// A column declaration on a property.
///
/// Omitted options take their defaults when the column is added to a
/// [`ModelDefinition`]: nullable, not unique, not primary, named after the
/// property.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    property: String,
    name: Option<String>,
    sql_type: String,
    nullable: Option<bool>,
    unique: Option<bool>,
    primary: Option<bool>,
    default: Option<Value>,
    check: Option<String>,
    foreign_key: Option<ForeignKey>,
}

impl Column {
    /// Declares a column for `property` with a raw SQL type such as
    /// `SERIAL` or `VARCHAR(50)`.
    pub fn new(property: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            name: None,
            sql_type: sql_type.into(),
            nullable: None,
            unique: None,
            primary: None,
            default: None,
            check: None,
            foreign_key: None,
        }
    }

    /// Overrides the column name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets nullability.
    #[must_use]
    pub const fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = Some(nullable);
        self
    }

    /// Marks the column NOT NULL.
    #[must_use]
    pub const fn not_null(self) -> Self {
        self.nullable(false)
    }

    /// Marks the column UNIQUE.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = Some(true);
        self
    }

    /// Makes the column (part of) the primary key.
    #[must_use]
    pub const fn primary(mut self) -> Self {
        self.primary = Some(true);
        self
    }

    /// Sets a default value, rendered through the value normalizer.
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Sets a raw SQL default such as `CURRENT_TIMESTAMP`.
    #[must_use]
    pub fn default_sql(self, sql: impl Into<String>) -> Self {
        self.default(Value::raw_sql(sql))
    }

    /// Adds a CHECK constraint.
    #[must_use]
    pub fn check(mut self, expression: impl Into<String>) -> Self {
        self.check = Some(expression.into());
        self
    }

    /// Adds a foreign key on this column. Any `column` set on `foreign_key`
    /// is replaced by this column's name.
    #[must_use]
    pub fn references(mut self, foreign_key: ForeignKey) -> Self {
        self.foreign_key = Some(foreign_key);
        self
    }
}

/// Builds the declarations of a definition at compile time.
///
/// Usually derived with `#[derive(Model)]` from `sqlweave-derive`.
pub trait Model {
    /// Returns the definition with all of its declarations.
    fn definition() -> ModelDefinition;
}

/// A data-model definition and everything declared on it.
///
/// ```rust
/// use sqlweave_core::schema::{CascadeAction, Column, ForeignKey, Index, ModelDefinition};
///
/// let post = ModelDefinition::new("Post")
///     .table()
///     .column(Column::new("id", "SERIAL").primary().not_null())
///     .column(
///         Column::new("author", "INTEGER")
///             .name("author_id")
///             .references(ForeignKey::references("users(id)").on_delete(CascadeAction::Cascade)),
///     )
///     .index(Index::new("post_author_idx", ["author_id"]));
///
/// assert_eq!(
///     post.metadata().unwrap().to_ddl(),
///     "CREATE TABLE post (id SERIAL NOT NULL, author_id INTEGER, PRIMARY KEY (id), \
///      FOREIGN KEY (author_id) REFERENCES users(id) ON DELETE CASCADE);\n\
///      CREATE INDEX post_author_idx ON post (author_id);"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDefinition {
    name: String,
    table: Option<String>,
    columns: Vec<ColumnMetadata>,
    primary_key: Vec<String>,
    foreign_keys: Vec<ForeignKey>,
    indexes: Vec<Index>,
}

impl ModelDefinition {
    /// Starts a definition named `name`. It is not a table until
    /// [`ModelDefinition::table`] or [`ModelDefinition::table_named`] is called.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: None,
            columns: Vec::new(),
            primary_key: Vec::new(),
            foreign_keys: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Declares a table named after the lower-cased definition name.
    #[must_use]
    pub fn table(mut self) -> Self {
        self.table = Some(self.name.to_lowercase());
        self
    }

    /// Declares a table with an explicit name.
    #[must_use]
    pub fn table_named(mut self, name: impl Into<String>) -> Self {
        self.table = Some(name.into());
        self
    }

    /// Adds a column in declaration order.
    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        let name = column.name.unwrap_or(column.property);
        let primary = column.primary.unwrap_or(false);

        if primary {
            self.primary_key.push(name.clone());
        }
        let foreign_key = column.foreign_key.map(|fk| fk.column(name.clone()));
        if let Some(foreign_key) = &foreign_key {
            self.foreign_keys.push(foreign_key.clone());
        }
        let foreign_key = foreign_key.map(|fk| fk.with_column(name.clone()));

        self.columns.push(ColumnMetadata {
            name,
            sql_type: column.sql_type,
            nullable: column.nullable.unwrap_or(true),
            unique: column.unique.unwrap_or(false),
            primary,
            default: column.default,
            check: column.check,
            foreign_key,
        });
        self
    }

    /// Declares a foreign key on the definition. Its `column` must be set;
    /// a missing column is reported by [`ModelDefinition::validate`].
    #[must_use]
    pub fn foreign_key(mut self, foreign_key: ForeignKey) -> Self {
        self.foreign_keys.push(foreign_key);
        self
    }

    /// Declares a foreign key on a property; the column defaults to the
    /// property name.
    #[must_use]
    pub fn property_foreign_key(mut self, property: &str, foreign_key: ForeignKey) -> Self {
        let foreign_key = match foreign_key.column {
            Some(_) => foreign_key,
            None => foreign_key.column(property),
        };
        self.foreign_keys.push(foreign_key);
        self
    }

    /// Appends columns to the primary key.
    #[must_use]
    pub fn primary_key(mut self, columns: impl IntoFragments) -> Self {
        self.primary_key.extend(columns.into_fragments());
        self
    }

    /// Appends one column to the primary key.
    #[must_use]
    pub fn primary_key_column(mut self, column: impl Into<String>) -> Self {
        self.primary_key.push(column.into());
        self
    }

    /// Adds an index.
    #[must_use]
    pub fn index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }

    /// The definition name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The table name, if a table was declared.
    #[must_use]
    pub fn table_name(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// Whether a table was declared.
    #[must_use]
    pub const fn is_table(&self) -> bool {
        self.table.is_some()
    }

    /// Checks that every foreign key has a column.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::MissingForeignKeyColumn`] for the first
    /// definition-level foreign key declared without a column.
    pub fn validate(&self) -> Result<(), DeclarationError> {
        match self.foreign_keys.iter().find(|fk| fk.column.is_none()) {
            Some(fk) => Err(DeclarationError::MissingForeignKeyColumn {
                definition: self.name.clone(),
                reference: fk.reference.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Aggregates the declarations into table metadata.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::NotATable`] when no table was declared and
    /// [`DeclarationError::MissingForeignKeyColumn`] when validation fails.
    pub fn metadata(&self) -> Result<TableMetadata, DeclarationError> {
        let name = self
            .table
            .clone()
            .ok_or_else(|| DeclarationError::NotATable {
                definition: self.name.clone(),
            })?;
        self.validate()?;

        let foreign_keys = self
            .foreign_keys
            .iter()
            .filter_map(|fk| fk.column.clone().map(|column| fk.clone().with_column(column)))
            .collect();

        Ok(TableMetadata {
            name,
            columns: self.columns.clone(),
            primary_key: self.primary_key.clone(),
            foreign_keys,
            indexes: self.indexes.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_defaults_are_normalized() {
        let metadata = ModelDefinition::new("User")
            .table()
            .column(Column::new("email", "TEXT"))
            .metadata()
            .unwrap();
        let column = &metadata.columns[0];
        assert_eq!(column.name, "email");
        assert!(column.nullable);
        assert!(!column.unique);
        assert!(!column.primary);
        assert_eq!(column.default, None);
    }

    #[test]
    fn test_table_name_is_lower_cased_definition_name() {
        let definition = ModelDefinition::new("UserProfile").table();
        assert_eq!(definition.table_name(), Some("userprofile"));
        let definition = ModelDefinition::new("UserProfile").table_named("profiles");
        assert_eq!(definition.table_name(), Some("profiles"));
    }

    #[test]
    fn test_primary_columns_accumulate_in_order() {
        let metadata = ModelDefinition::new("Membership")
            .table()
            .column(Column::new("user_id", "INTEGER").primary())
            .column(Column::new("group_id", "INTEGER").primary())
            .primary_key_column("tenant_id")
            .primary_key(["region"])
            .metadata()
            .unwrap();
        assert_eq!(
            metadata.primary_key,
            vec!["user_id", "group_id", "tenant_id", "region"]
        );
    }

    #[test]
    fn test_column_foreign_key_uses_column_name() {
        let metadata = ModelDefinition::new("Post")
            .table()
            .column(
                Column::new("author", "INTEGER")
                    .name("author_id")
                    .references(ForeignKey::references("users(id)").column("ignored")),
            )
            .metadata()
            .unwrap();
        assert_eq!(metadata.foreign_keys[0].column, "author_id");
        assert_eq!(metadata.foreign_keys[0].reference, "users(id)");
    }

    #[test]
    fn test_property_foreign_key_defaults_to_property() {
        let metadata = ModelDefinition::new("Post")
            .table()
            .property_foreign_key("author_id", ForeignKey::references("users(id)"))
            .metadata()
            .unwrap();
        assert_eq!(metadata.foreign_keys[0].column, "author_id");
    }

    #[test]
    fn test_definition_foreign_key_requires_column() {
        let definition = ModelDefinition::new("Post")
            .table()
            .foreign_key(ForeignKey::references("users(id)"));
        assert_eq!(
            definition.validate(),
            Err(DeclarationError::MissingForeignKeyColumn {
                definition: String::from("Post"),
                reference: String::from("users(id)"),
            })
        );
        assert!(definition.metadata().is_err());
    }

    #[test]
    fn test_metadata_requires_table() {
        let err = ModelDefinition::new("Session").metadata().unwrap_err();
        assert_eq!(
            err,
            DeclarationError::NotATable {
                definition: String::from("Session")
            }
        );
    }

    #[test]
    fn test_cascade_action_sql() {
        assert_eq!(CascadeAction::SetNull.as_sql(), "SET NULL");
        assert_eq!(CascadeAction::Default.to_string(), "SET DEFAULT");
        assert_eq!(CascadeAction::NoAction.as_sql(), "NO ACTION");
    }

    #[test]
    fn test_cascade_action_deserialize() {
        let action: CascadeAction = serde_json::from_str("\"SET NULL\"").unwrap();
        assert_eq!(action, CascadeAction::SetNull);
        let action: CascadeAction = serde_json::from_str("\"cascade\"").unwrap();
        assert_eq!(action, CascadeAction::Cascade);
    }
}
