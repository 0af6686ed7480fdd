//! Schema metadata and DDL generation.
//!
//! A [`ModelDefinition`] collects column, key and index declarations. Once
//! a table is declared, its aggregated [`TableMetadata`] renders as
//! `CREATE TABLE` plus `CREATE INDEX` statements. A caller-owned
//! [`SchemaRegistry`] keeps definitions in registration order and emits the
//! whole schema to one file or one file per table.
//!
//! # Example
//!
//! ```rust
//! use sqlweave_core::format::FormatOptions;
//! use sqlweave_core::schema::{Column, Index, ModelDefinition, SchemaRegistry};
//!
//! let mut registry = SchemaRegistry::new();
//! registry
//!     .register(
//!         ModelDefinition::new("User")
//!             .table_named("users")
//!             .column(Column::new("id", "SERIAL").primary())
//!             .column(Column::new("email", "TEXT").not_null())
//!             .index(Index::new("users_email_idx", ["email"]).unique()),
//!     )
//!     .unwrap();
//!
//! let ddl = registry.table_schema("User", &FormatOptions::default()).unwrap();
//! assert_eq!(
//!     ddl,
//!     "CREATE TABLE users (\n  id SERIAL,\n  email TEXT NOT NULL,\n  PRIMARY KEY (id)\n);\n\n\
//!      CREATE UNIQUE INDEX users_email_idx ON users (email);"
//! );
//! ```

mod declaration;
mod emit;
mod metadata;
mod registry;

pub use declaration::{CascadeAction, Column, ForeignKey, Model, ModelDefinition};
pub use emit::{EmitOptions, SchemaTarget};
pub use metadata::{
    table_schema, table_schema_with, ColumnMetadata, ForeignKeyMetadata, Index, TableMetadata,
};
pub use registry::SchemaRegistry;
