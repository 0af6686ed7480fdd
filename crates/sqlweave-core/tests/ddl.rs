//! DDL rendering through the registry.

mod common;

use common::{blog_registry, posts, users};
use sqlweave_core::schema::{table_schema, Column, ForeignKey, Index, ModelDefinition};
use sqlweave_core::{DeclarationError, Error, FormatOptions, Value};

#[test]
fn test_users_table_schema() {
    let ddl = blog_registry()
        .table_schema("User", &FormatOptions::default())
        .unwrap();
    assert_eq!(
        ddl,
        "CREATE TABLE users (\n  id SERIAL NOT NULL,\n  email VARCHAR(255) NOT NULL UNIQUE,\n  \
         name TEXT,\n  PRIMARY KEY (id)\n);"
    );
}

#[test]
fn test_posts_unformatted_ddl() {
    assert_eq!(
        posts().metadata().unwrap().to_ddl(),
        "CREATE TABLE posts (id SERIAL NOT NULL, author_id INTEGER NOT NULL, title TEXT NOT NULL, \
         PRIMARY KEY (id), FOREIGN KEY (author_id) REFERENCES users(id) ON DELETE CASCADE);\n\
         CREATE INDEX posts_author_idx ON posts (author_id);"
    );
}

#[test]
fn test_posts_table_schema() {
    let ddl = table_schema(&posts(), &FormatOptions::default()).unwrap();
    assert_eq!(
        ddl,
        "CREATE TABLE posts (\n  id SERIAL NOT NULL,\n  author_id INTEGER NOT NULL,\n  \
         title TEXT NOT NULL,\n  PRIMARY KEY (id),\n  \
         FOREIGN KEY (author_id) REFERENCES users(id) ON DELETE CASCADE\n);\n\n\
         CREATE INDEX posts_author_idx ON posts (author_id);"
    );
}

#[test]
fn test_indent_option_is_honored() {
    let ddl = table_schema(&users(), &FormatOptions::default().indent(4)).unwrap();
    assert!(ddl.starts_with("CREATE TABLE users (\n    id SERIAL NOT NULL,\n"));
}

#[test]
fn test_composite_primary_key_from_columns() {
    let ddl = ModelDefinition::new("Membership")
        .table()
        .column(Column::new("user_id", "INTEGER").primary())
        .column(Column::new("group_id", "INTEGER").primary())
        .metadata()
        .unwrap()
        .to_ddl();
    assert!(ddl.contains("PRIMARY KEY (user_id, group_id)"));
}

#[test]
fn test_undecorated_definition_is_rejected() {
    let err = table_schema(
        &ModelDefinition::new("Session").column(Column::new("token", "TEXT")),
        &FormatOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::Declaration(DeclarationError::NotATable { definition }) if definition == "Session"
    ));
}

#[test]
fn test_one_column_one_index_one_foreign_key() {
    let ddl = ModelDefinition::new("Comment")
        .table()
        .column(Column::new("post_id", "INTEGER"))
        .foreign_key(ForeignKey::references("posts(id)").column("post_id"))
        .index(Index::new("comment_post_idx", ["post_id"]))
        .metadata()
        .unwrap()
        .to_ddl();

    let statements: Vec<&str> = ddl.lines().collect();
    assert_eq!(statements.len(), 2);
    assert!(statements[0].starts_with("CREATE TABLE comment ("));
    assert!(statements[1].starts_with("CREATE INDEX comment_post_idx"));
    assert!(statements.iter().all(|s| s.ends_with(';')));
}

#[test]
fn test_defaults_go_through_the_normalizer() {
    let metadata = ModelDefinition::new("Setting")
        .table()
        .column(Column::new("label", "TEXT").default("it's"))
        .column(Column::new("enabled", "BOOLEAN").default(false))
        .column(Column::new("ratio", "REAL").default(0.5))
        .column(Column::new("id", "UUID").default(Value::raw(|| String::from("gen_random_uuid()"))))
        .column(Column::new("tags", "JSONB").default(Value::Json(serde_json::json!(["a"]))))
        .metadata()
        .unwrap();

    let defaults: Vec<String> = metadata
        .columns
        .iter()
        .filter_map(|c| c.default.as_ref().map(Value::to_sql))
        .collect();
    assert_eq!(
        defaults,
        vec!["'it''s'", "FALSE", "0.5", "gen_random_uuid()", "'[\"a\"]'"]
    );
}
