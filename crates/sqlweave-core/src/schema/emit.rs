//! Writing schema artifacts to disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::registry::SchemaRegistry;
use crate::error::{Error, Result};
use crate::format::FormatOptions;

/// Where [`SchemaRegistry::emit`] writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaTarget {
    /// One file holding every table.
    File(PathBuf),
    /// One `<table>.schema.sql` file per table in this directory.
    Directory(PathBuf),
}

/// Options for schema rendering and emission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitOptions {
    /// Precede each table with a `-- table` comment (single-file mode).
    pub comments: bool,
    /// Pretty-printer options.
    pub format: FormatOptions,
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = contents.len(), "Wrote schema file");
    Ok(())
}

impl SchemaRegistry {
    /// Writes the schema to `target`, creating missing directories, and
    /// returns the written paths.
    ///
    /// # Errors
    ///
    /// Returns rendering errors and [`Error::Io`] when a directory or file
    /// cannot be written.
    pub fn emit(&self, target: &SchemaTarget, options: &EmitOptions) -> Result<Vec<PathBuf>> {
        match target {
            SchemaTarget::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    create_dir(parent)?;
                }
                let schema = self.render_schema(options)?;
                write_file(path, &schema)?;
                Ok(vec![path.clone()])
            }
            SchemaTarget::Directory(dir) => {
                create_dir(dir)?;
                let mut written = Vec::new();
                for definition in self.tables() {
                    let Some(table) = definition.table_name() else {
                        continue;
                    };
                    let ddl = self.table_schema(definition.name(), &options.format)?;
                    let path = dir.join(format!("{table}.schema.sql"));
                    write_file(&path, &ddl)?;
                    written.push(path);
                }
                Ok(written)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, ModelDefinition};

    fn registry() -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        registry
            .register(
                ModelDefinition::new("User")
                    .table_named("users")
                    .column(Column::new("id", "SERIAL")),
            )
            .unwrap();
        registry
            .register(
                ModelDefinition::new("Tag")
                    .table()
                    .column(Column::new("label", "TEXT")),
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_emit_single_file_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/schema.sql");

        let written = registry()
            .emit(&SchemaTarget::File(path.clone()), &EmitOptions::default())
            .unwrap();

        assert_eq!(written, vec![path.clone()]);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "CREATE TABLE users (\n  id SERIAL\n);\n\n\nCREATE TABLE tag (\n  label TEXT\n);"
        );
    }

    #[test]
    fn test_emit_directory_writes_one_file_per_table() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("schema");

        let written = registry()
            .emit(&SchemaTarget::Directory(target.clone()), &EmitOptions::default())
            .unwrap();

        assert_eq!(
            written,
            vec![target.join("users.schema.sql"), target.join("tag.schema.sql")]
        );
        assert_eq!(
            fs::read_to_string(target.join("tag.schema.sql")).unwrap(),
            "CREATE TABLE tag (\n  label TEXT\n);"
        );
    }

    #[test]
    fn test_emit_reports_io_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();

        let err = registry()
            .emit(
                &SchemaTarget::Directory(blocker.join("sub")),
                &EmitOptions::default(),
            )
            .unwrap_err();
        match err {
            Error::Io { path, .. } => assert_eq!(path, blocker.join("sub")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
