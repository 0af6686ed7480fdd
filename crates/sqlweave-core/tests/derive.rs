//! Tests for the `#[derive(Model)]` macro output.

use sqlweave_core::schema::{Model, SchemaRegistry};
use sqlweave_core::FormatOptions;
use sqlweave_derive::Model;

// =============================================================================
// Test: explicit table name, column options and a unique index
// =============================================================================

#[allow(dead_code)]
#[derive(Debug, Model)]
#[table(name = "accounts")]
#[index(name = "accounts_email_idx", columns("email"), unique)]
pub struct Account {
    #[column(sql_type = "SERIAL", primary, not_null)]
    pub id: i64,
    #[column(sql_type = "VARCHAR(255)", not_null, unique)]
    pub email: String,
    #[column(sql_type = "TEXT", default = "member", check = "role <> ''")]
    pub role: String,
    #[column(sql_type = "TIMESTAMP", name = "created", default_sql = "CURRENT_TIMESTAMP")]
    pub created_at: String,
    pub cached_display_name: Option<String>,
}

#[test]
fn test_account_definition() {
    let definition = Account::definition();
    assert_eq!(definition.name(), "Account");
    assert_eq!(definition.table_name(), Some("accounts"));
}

#[test]
fn test_account_ddl() {
    assert_eq!(
        Account::definition().metadata().unwrap().to_ddl(),
        "CREATE TABLE accounts (id SERIAL NOT NULL, email VARCHAR(255) NOT NULL UNIQUE, \
         role TEXT DEFAULT 'member' CHECK (role <> ''), \
         created TIMESTAMP DEFAULT CURRENT_TIMESTAMP, PRIMARY KEY (id));\n\
         CREATE UNIQUE INDEX accounts_email_idx ON accounts (email);"
    );
}

// =============================================================================
// Test: derived table name, composite key and foreign keys
// =============================================================================

#[allow(dead_code)]
#[derive(Model)]
#[table]
#[primary_key("post_id", "tag_id")]
#[foreign_key(column = "tag_id", reference = "tag(id)", on_delete = "set null")]
pub struct PostTag {
    #[column(
        sql_type = "INTEGER",
        references = "posts(id)",
        on_delete = "CASCADE",
        on_update = "no action"
    )]
    pub post_id: i64,
    #[column(sql_type = "INTEGER", nullable)]
    pub tag_id: Option<i64>,
}

#[test]
fn test_post_tag_ddl() {
    assert_eq!(
        PostTag::definition().metadata().unwrap().to_ddl(),
        "CREATE TABLE posttag (post_id INTEGER, tag_id INTEGER, PRIMARY KEY (post_id, tag_id), \
         FOREIGN KEY (post_id) REFERENCES posts(id) ON DELETE CASCADE ON UPDATE NO ACTION, \
         FOREIGN KEY (tag_id) REFERENCES tag(id) ON DELETE SET NULL);"
    );
}

// =============================================================================
// Test: property-level primary and foreign keys
// =============================================================================

#[allow(dead_code)]
#[derive(Model)]
#[table(name = "comments")]
pub struct Comment {
    #[primary_key]
    #[column(sql_type = "SERIAL")]
    pub id: i64,
    #[foreign_key(reference = "posts(id)", on_delete = "DEFAULT")]
    #[column(sql_type = "INTEGER", nullable = false, default = 0)]
    pub post_id: i64,
}

#[test]
fn test_comment_ddl() {
    assert_eq!(
        Comment::definition().metadata().unwrap().to_ddl(),
        "CREATE TABLE comments (id SERIAL, post_id INTEGER NOT NULL DEFAULT 0, PRIMARY KEY (id), \
         FOREIGN KEY (post_id) REFERENCES posts(id) ON DELETE SET DEFAULT);"
    );
}

// =============================================================================
// Test: definitions without a table
// =============================================================================

#[allow(dead_code)]
#[derive(Model)]
pub struct Draft {
    #[column(sql_type = "TEXT")]
    pub body: String,
}

#[test]
fn test_registry_with_derived_models() {
    let mut registry = SchemaRegistry::new();
    registry.register_model::<Account>().unwrap();
    registry.register_model::<Draft>().unwrap();
    registry.register_model::<Comment>().unwrap();

    assert!(!Draft::definition().is_table());
    let tables: Vec<&str> = registry.tables().filter_map(|d| d.table_name()).collect();
    assert_eq!(tables, vec!["accounts", "comments"]);

    let ddl = registry
        .table_schema("Comment", &FormatOptions::default())
        .unwrap();
    assert_eq!(
        ddl,
        "CREATE TABLE comments (\n  id SERIAL,\n  post_id INTEGER NOT NULL DEFAULT 0,\n  \
         PRIMARY KEY (id),\n  FOREIGN KEY (post_id) REFERENCES posts(id) ON DELETE SET DEFAULT\n);"
    );
}
