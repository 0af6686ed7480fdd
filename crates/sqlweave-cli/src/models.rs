//! Model declaration files.
//!
//! A model file lists data-model definitions in JSON or TOML, chosen by the
//! file extension:
//!
//! ```toml
//! [[models]]
//! name = "User"
//! table = "users"
//!
//! [[models.columns]]
//! property = "id"
//! type = "SERIAL"
//! primary = true
//! ```

use std::path::Path;

use serde::Deserialize;
use sqlweave_core::schema::{CascadeAction, Column, ForeignKey, Index, ModelDefinition};
use sqlweave_core::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct ModelFile {
    #[serde(default)]
    pub models: Vec<ModelSpec>,
}

/// `table = true` derives the name from the model name.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TableSpec {
    Flag(bool),
    Named(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelSpec {
    pub name: String,
    pub table: Option<TableSpec>,
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub primary_key: Vec<String>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeySpec>,
    #[serde(default)]
    pub indexes: Vec<IndexSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnSpec {
    pub property: String,
    #[serde(rename = "type")]
    pub sql_type: String,
    pub name: Option<String>,
    pub nullable: Option<bool>,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub primary: bool,
    pub default: Option<serde_json::Value>,
    pub default_sql: Option<String>,
    pub check: Option<String>,
    pub references: Option<ForeignKeySpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForeignKeySpec {
    pub column: Option<String>,
    pub reference: String,
    pub on_delete: Option<CascadeAction>,
    pub on_update: Option<CascadeAction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndexSpec {
    pub name: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub unique: bool,
}

impl ForeignKeySpec {
    fn into_foreign_key(self) -> ForeignKey {
        let mut foreign_key = ForeignKey::references(self.reference);
        if let Some(column) = self.column {
            foreign_key = foreign_key.column(column);
        }
        if let Some(action) = self.on_delete {
            foreign_key = foreign_key.on_delete(action);
        }
        if let Some(action) = self.on_update {
            foreign_key = foreign_key.on_update(action);
        }
        foreign_key
    }
}

impl ColumnSpec {
    fn into_column(self) -> anyhow::Result<Column> {
        let mut column = Column::new(self.property, self.sql_type);
        if let Some(name) = self.name {
            column = column.name(name);
        }
        if let Some(nullable) = self.nullable {
            column = column.nullable(nullable);
        }
        if self.unique {
            column = column.unique();
        }
        if self.primary {
            column = column.primary();
        }
        column = match (self.default, self.default_sql) {
            (Some(_), Some(_)) => {
                anyhow::bail!("column cannot set both `default` and `default_sql`")
            }
            (Some(value), None) => column.default(Value::from(value)),
            (None, Some(sql)) => column.default_sql(sql),
            (None, None) => column,
        };
        if let Some(check) = self.check {
            column = column.check(check);
        }
        if let Some(references) = self.references {
            column = column.references(references.into_foreign_key());
        }
        Ok(column)
    }
}

impl ModelSpec {
    pub fn into_definition(self) -> anyhow::Result<ModelDefinition> {
        let name = self.name;
        let mut definition = ModelDefinition::new(name.clone());
        definition = match self.table {
            Some(TableSpec::Flag(true)) => definition.table(),
            Some(TableSpec::Named(table)) => definition.table_named(table),
            Some(TableSpec::Flag(false)) | None => definition,
        };

        for column in self.columns {
            let column = column
                .into_column()
                .map_err(|e| anyhow::anyhow!("model '{name}': {e}"))?;
            definition = definition.column(column);
        }
        if !self.primary_key.is_empty() {
            definition = definition.primary_key(self.primary_key);
        }
        for foreign_key in self.foreign_keys {
            definition = definition.foreign_key(foreign_key.into_foreign_key());
        }
        for index in self.indexes {
            let mut declared = Index::new(index.name, index.columns);
            if index.unique {
                declared = declared.unique();
            }
            definition = definition.index(declared);
        }
        Ok(definition)
    }
}

/// Parses model declarations; `extension` selects TOML (`toml`) or JSON
/// (anything else).
pub fn parse(raw: &str, extension: Option<&str>) -> anyhow::Result<Vec<ModelDefinition>> {
    let file: ModelFile = match extension {
        Some(ext) if ext.eq_ignore_ascii_case("toml") => toml::from_str(raw)?,
        _ => serde_json::from_str(raw)?,
    };
    file.models
        .into_iter()
        .map(ModelSpec::into_definition)
        .collect()
}

/// Reads and parses a model file.
pub fn load(path: &Path) -> anyhow::Result<Vec<ModelDefinition>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read model file {}: {e}", path.display()))?;
    let extension = path.extension().and_then(|ext| ext.to_str());
    parse(&raw, extension)
        .map_err(|e| anyhow::anyhow!("failed to parse model file {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_models() {
        let raw = r#"{
            "models": [
                {
                    "name": "User",
                    "table": "users",
                    "columns": [
                        { "property": "id", "type": "SERIAL", "primary": true, "nullable": false },
                        { "property": "role", "type": "TEXT", "default": "member" }
                    ],
                    "indexes": [{ "name": "users_role_idx", "columns": ["role"] }]
                },
                { "name": "Dto" }
            ]
        }"#;

        let definitions = parse(raw, Some("json")).unwrap();
        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].table_name(), Some("users"));
        assert!(!definitions[1].is_table());
        assert_eq!(
            definitions[0].metadata().unwrap().to_ddl(),
            "CREATE TABLE users (id SERIAL NOT NULL, role TEXT DEFAULT 'member', PRIMARY KEY (id));\n\
             CREATE INDEX users_role_idx ON users (role);"
        );
    }

    #[test]
    fn test_parse_toml_models() {
        let raw = r#"
            [[models]]
            name = "Post"
            table = true
            primary_key = ["id"]

            [[models.columns]]
            property = "id"
            type = "SERIAL"

            [[models.columns]]
            property = "author_id"
            type = "INTEGER"
            references = { reference = "users(id)", on_delete = "CASCADE" }

            [[models.foreign_keys]]
            column = "editor_id"
            reference = "users(id)"
            on_update = "set null"
        "#;

        let definitions = parse(raw, Some("toml")).unwrap();
        let metadata = definitions[0].metadata().unwrap();
        assert_eq!(metadata.name, "post");
        assert_eq!(metadata.primary_key, vec!["id"]);
        assert_eq!(metadata.foreign_keys.len(), 2);
        assert_eq!(
            metadata.foreign_keys[0].to_sql(),
            "FOREIGN KEY (author_id) REFERENCES users(id) ON DELETE CASCADE"
        );
        assert_eq!(
            metadata.foreign_keys[1].to_sql(),
            "FOREIGN KEY (editor_id) REFERENCES users(id) ON UPDATE SET NULL"
        );
    }

    #[test]
    fn test_json_defaults_keep_their_type() {
        let raw = r#"{ "models": [{ "name": "Flag", "table": true, "columns": [
            { "property": "enabled", "type": "BOOLEAN", "default": true },
            { "property": "weight", "type": "INTEGER", "default": 3 },
            { "property": "created_at", "type": "TIMESTAMP", "default_sql": "now()" }
        ]}]}"#;

        let metadata = parse(raw, None).unwrap()[0].metadata().unwrap();
        let defaults: Vec<String> = metadata
            .columns
            .iter()
            .filter_map(|c| c.default.as_ref().map(Value::to_sql))
            .collect();
        assert_eq!(defaults, vec!["TRUE", "3", "now()"]);
    }

    #[test]
    fn test_conflicting_defaults_are_rejected() {
        let raw = r#"{ "models": [{ "name": "Bad", "columns": [
            { "property": "x", "type": "TEXT", "default": "a", "default_sql": "b" }
        ]}]}"#;
        let err = parse(raw, Some("json")).unwrap_err();
        assert!(err.to_string().contains("model 'Bad'"));
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}
