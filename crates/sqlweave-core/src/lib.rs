//! # sqlweave-core
//!
//! Programmatic SQL text generation.
//!
//! This crate provides:
//! - A chainable [`QueryBuilder`] rendering SELECT, INSERT, UPDATE and DELETE
//! - Operator functions composing WHERE/HAVING fragments
//! - A schema registry rendering `CREATE TABLE` and `CREATE INDEX` statements
//! - A token-based pretty-printer for the generated text
//!
//! The builder is a text assembler: it does not parse, validate or execute
//! SQL. Literal values pass through [`Value::to_sql`], which single-quotes
//! text and doubles embedded single quotes; everything else is inserted as
//! given.
//!
//! ## Building queries
//!
//! ```rust
//! use sqlweave_core::builder::operators::{and, not_null};
//! use sqlweave_core::query;
//!
//! let sql = query()
//!     .select(["id", "email"])
//!     .from("users")
//!     .where_clause(and(["age >= 18", not_null("email").as_str()]))
//!     .limit(5)
//!     .build();
//!
//! assert_eq!(
//!     sql,
//!     "SELECT id, email FROM \"users\" users WHERE ((age >= 18 AND (email IS NOT NULL))) LIMIT 5"
//! );
//!
//! let sql = query().update("users").set("name", "O'Brien").where_clause("id = 1").build();
//! assert_eq!(sql, "UPDATE users SET \"name\" = 'O''Brien' WHERE (id = 1)");
//! ```
//!
//! ## Generating a schema
//!
//! ```rust
//! use sqlweave_core::schema::{Column, EmitOptions, ModelDefinition, SchemaRegistry};
//!
//! let mut registry = SchemaRegistry::new();
//! registry
//!     .register(
//!         ModelDefinition::new("Tag")
//!             .table()
//!             .column(Column::new("label", "TEXT").unique()),
//!     )
//!     .unwrap();
//!
//! let schema = registry.render_schema(&EmitOptions::default()).unwrap();
//! assert_eq!(schema, "CREATE TABLE tag (\n  label TEXT UNIQUE\n);");
//! ```

pub mod builder;
pub mod dialect;
pub mod error;
pub mod format;
pub mod lexer;
pub mod schema;
pub mod value;

pub use builder::{JoinTable, Order, QueryBuilder, StatementKind};
pub use dialect::Dialect;
pub use error::{DeclarationError, Error, FormatError, Result};
pub use format::{FormatOptions, KeywordCase, PrettyPrinter, SqlFormatter};
pub use schema::{Model, ModelDefinition, SchemaRegistry, TableMetadata};
pub use value::{normalize, RawSql, Value};

/// Returns a fresh [`QueryBuilder`].
#[must_use]
pub fn query() -> QueryBuilder {
    QueryBuilder::new()
}
