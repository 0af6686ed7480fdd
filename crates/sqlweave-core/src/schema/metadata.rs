//! Aggregated table metadata and DDL rendering.

use tracing::debug;

use super::declaration::{CascadeAction, ModelDefinition};
use crate::builder::IntoFragments;
use crate::error::Result;
use crate::format::{FormatOptions, PrettyPrinter, SqlFormatter};
use crate::value::Value;

/// A column with every option resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMetadata {
    /// Column name.
    pub name: String,
    /// Raw SQL type.
    pub sql_type: String,
    /// Whether NULL is allowed.
    pub nullable: bool,
    /// Whether the column is UNIQUE.
    pub unique: bool,
    /// Whether the column is part of the primary key.
    pub primary: bool,
    /// Default value.
    pub default: Option<Value>,
    /// CHECK expression.
    pub check: Option<String>,
    /// Foreign key declared on the column.
    pub foreign_key: Option<ForeignKeyMetadata>,
}

impl ColumnMetadata {
    /// `name type [NOT NULL] [UNIQUE] [DEFAULT value] [CHECK (expr)]`.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.sql_type);
        if !self.nullable {
            sql.push_str(" NOT NULL");
        }
        if self.unique {
            sql.push_str(" UNIQUE");
        }
        if let Some(default) = &self.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(&default.to_sql());
        }
        if let Some(check) = &self.check {
            sql.push_str(&format!(" CHECK ({check})"));
        }
        sql
    }
}

/// A foreign key with its column resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyMetadata {
    /// Referencing column.
    pub column: String,
    /// Referenced table and column.
    pub reference: String,
    /// `ON DELETE` action.
    pub on_delete: Option<CascadeAction>,
    /// `ON UPDATE` action.
    pub on_update: Option<CascadeAction>,
}

impl ForeignKeyMetadata {
    /// `FOREIGN KEY (column) REFERENCES reference [ON DELETE a] [ON UPDATE a]`.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut sql = format!("FOREIGN KEY ({}) REFERENCES {}", self.column, self.reference);
        if let Some(action) = self.on_delete {
            sql.push_str(&format!(" ON DELETE {action}"));
        }
        if let Some(action) = self.on_update {
            sql.push_str(&format!(" ON UPDATE {action}"));
        }
        sql
    }
}

/// An index declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    /// Index name.
    pub name: String,
    /// Indexed columns.
    pub columns: Vec<String>,
    /// Whether the index is UNIQUE.
    pub unique: bool,
}

impl Index {
    /// Declares a non-unique index.
    pub fn new(name: impl Into<String>, columns: impl IntoFragments) -> Self {
        Self {
            name: name.into(),
            columns: columns.into_fragments(),
            unique: false,
        }
    }

    /// Makes the index UNIQUE.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// `CREATE [UNIQUE] INDEX name ON table (columns);`.
    #[must_use]
    pub fn to_sql(&self, table: &str) -> String {
        format!(
            "CREATE {}INDEX {} ON {table} ({});",
            if self.unique { "UNIQUE " } else { "" },
            self.name,
            self.columns.join(", ")
        )
    }
}

/// Everything declared for one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableMetadata {
    /// Table name.
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<ColumnMetadata>,
    /// Primary-key columns in declaration order.
    pub primary_key: Vec<String>,
    /// Foreign keys in declaration order.
    pub foreign_keys: Vec<ForeignKeyMetadata>,
    /// Indexes in declaration order.
    pub indexes: Vec<Index>,
}

impl TableMetadata {
    /// Renders `CREATE TABLE` followed by one `CREATE INDEX` per index, one
    /// statement per line, unformatted.
    #[must_use]
    pub fn to_ddl(&self) -> String {
        let mut elements: Vec<String> = self.columns.iter().map(ColumnMetadata::to_sql).collect();

        if !self.primary_key.is_empty() {
            elements.push(format!("PRIMARY KEY ({})", self.primary_key.join(", ")));
        }
        elements.extend(self.foreign_keys.iter().map(ForeignKeyMetadata::to_sql));

        let mut sql = format!("CREATE TABLE {} ({});", self.name, elements.join(", "));
        for index in &self.indexes {
            sql.push('\n');
            sql.push_str(&index.to_sql(&self.name));
        }
        sql
    }
}

/// Renders the DDL of `definition` and pretty-prints it with the built-in
/// printer. A missing dialect defaults to PostgreSQL.
///
/// # Errors
///
/// Returns a declaration error when `definition` is not a table or has an
/// invalid foreign key, and the printer's error unmodified.
pub fn table_schema(definition: &ModelDefinition, options: &FormatOptions) -> Result<String> {
    table_schema_with(definition, &PrettyPrinter, options)
}

/// Same as [`table_schema`] with a caller-supplied formatter.
///
/// # Errors
///
/// See [`table_schema`].
pub fn table_schema_with(
    definition: &ModelDefinition,
    formatter: &dyn SqlFormatter,
    options: &FormatOptions,
) -> Result<String> {
    let metadata = definition.metadata()?;
    debug!(
        definition = definition.name(),
        table = %metadata.name,
        columns = metadata.columns.len(),
        indexes = metadata.indexes.len(),
        "Rendering table DDL"
    );
    let options = FormatOptions {
        dialect: Some(options.resolved_dialect()),
        ..options.clone()
    };
    Ok(formatter.format(&metadata.to_ddl(), &options)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DeclarationError, Error};
    use crate::schema::{Column, ForeignKey};

    fn users() -> ModelDefinition {
        ModelDefinition::new("User")
            .table_named("users")
            .column(Column::new("id", "SERIAL").primary().not_null())
            .column(Column::new("email", "VARCHAR(255)").unique().not_null())
            .column(Column::new("role", "TEXT").default("member").check("role <> ''"))
            .column(Column::new("created_at", "TIMESTAMP").default_sql("CURRENT_TIMESTAMP"))
            .index(Index::new("users_email_idx", ["email"]).unique())
    }

    #[test]
    fn test_column_sql() {
        let metadata = users().metadata().unwrap();
        let rendered: Vec<String> = metadata.columns.iter().map(ColumnMetadata::to_sql).collect();
        assert_eq!(
            rendered,
            vec![
                "id SERIAL NOT NULL",
                "email VARCHAR(255) NOT NULL UNIQUE",
                "role TEXT DEFAULT 'member' CHECK (role <> '')",
                "created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP",
            ]
        );
    }

    #[test]
    fn test_to_ddl() {
        assert_eq!(
            users().metadata().unwrap().to_ddl(),
            "CREATE TABLE users (id SERIAL NOT NULL, email VARCHAR(255) NOT NULL UNIQUE, \
             role TEXT DEFAULT 'member' CHECK (role <> ''), \
             created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP, PRIMARY KEY (id));\n\
             CREATE UNIQUE INDEX users_email_idx ON users (email);"
        );
    }

    #[test]
    fn test_foreign_key_actions() {
        let fk = ForeignKeyMetadata {
            column: String::from("user_id"),
            reference: String::from("users(id)"),
            on_delete: Some(CascadeAction::SetNull),
            on_update: Some(CascadeAction::Cascade),
        };
        assert_eq!(
            fk.to_sql(),
            "FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE SET NULL ON UPDATE CASCADE"
        );
    }

    #[test]
    fn test_composite_primary_key_in_declaration_order() {
        let ddl = ModelDefinition::new("Membership")
            .table()
            .column(Column::new("user_id", "INTEGER").primary())
            .column(Column::new("group_id", "INTEGER").primary())
            .metadata()
            .unwrap()
            .to_ddl();
        assert_eq!(
            ddl,
            "CREATE TABLE membership (user_id INTEGER, group_id INTEGER, PRIMARY KEY (user_id, group_id));"
        );
    }

    #[test]
    fn test_table_schema_is_formatted() {
        let sql = table_schema(&users(), &FormatOptions::default()).unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE users (\n  id SERIAL NOT NULL,\n  email VARCHAR(255) NOT NULL UNIQUE,\n  \
             role TEXT DEFAULT 'member' CHECK (role <> ''),\n  \
             created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,\n  PRIMARY KEY (id)\n);\n\n\
             CREATE UNIQUE INDEX users_email_idx ON users (email);"
        );
    }

    #[test]
    fn test_table_schema_rejects_non_tables() {
        let err = table_schema(&ModelDefinition::new("Session"), &FormatOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Declaration(DeclarationError::NotATable { .. })
        ));
    }

    #[test]
    fn test_table_schema_propagates_format_errors() {
        let definition = ModelDefinition::new("Broken")
            .table()
            .column(Column::new("note", "TEXT").default_sql("'unterminated"));
        let err = table_schema(&definition, &FormatOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_table_schema_keeps_dollar_quoted_defaults() {
        let definition = ModelDefinition::new("Note")
            .table()
            .column(Column::new("body", "TEXT").default_sql("$$hello; world$$"));
        let sql = table_schema(&definition, &FormatOptions::default()).unwrap();
        assert!(sql.contains("  body TEXT DEFAULT $$hello; world$$\n"), "{sql}");
    }

    #[test]
    fn test_foreign_key_and_index_round_trip() {
        let ddl = ModelDefinition::new("Post")
            .table()
            .column(Column::new("author_id", "INTEGER"))
            .property_foreign_key("author_id", ForeignKey::references("users(id)"))
            .index(Index::new("post_author_idx", ["author_id"]))
            .metadata()
            .unwrap()
            .to_ddl();
        assert_eq!(ddl.matches("CREATE TABLE").count(), 1);
        assert_eq!(ddl.matches("CREATE INDEX").count(), 1);
        assert!(ddl.find("CREATE TABLE") < ddl.find("CREATE INDEX"));
        assert!(ddl.lines().all(|line| line.ends_with(';')));
    }
}
