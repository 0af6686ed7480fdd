#![allow(dead_code)]

use sqlweave_core::schema::{
    CascadeAction, Column, ForeignKey, Index, ModelDefinition, SchemaRegistry,
};
use sqlweave_core::{FormatOptions, QueryBuilder};

pub fn pretty(builder: &QueryBuilder) -> String {
    builder
        .format(&FormatOptions::default())
        .unwrap_or_else(|e| panic!("Failed to format: {}\nError: {e}", builder.build()))
}

pub fn users() -> ModelDefinition {
    ModelDefinition::new("User")
        .table_named("users")
        .column(Column::new("id", "SERIAL").primary().not_null())
        .column(Column::new("email", "VARCHAR(255)").not_null().unique())
        .column(Column::new("name", "TEXT"))
}

pub fn posts() -> ModelDefinition {
    ModelDefinition::new("Post")
        .table_named("posts")
        .column(Column::new("id", "SERIAL").primary().not_null())
        .column(
            Column::new("author", "INTEGER")
                .name("author_id")
                .not_null()
                .references(ForeignKey::references("users(id)").on_delete(CascadeAction::Cascade)),
        )
        .column(Column::new("title", "TEXT").not_null())
        .index(Index::new("posts_author_idx", ["author_id"]))
}

pub fn blog_registry() -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();
    registry
        .register(users())
        .unwrap_or_else(|e| panic!("Failed to register users: {e}"));
    registry
        .register(posts())
        .unwrap_or_else(|e| panic!("Failed to register posts: {e}"));
    registry
}
