//! Caller-owned registry of model definitions.

use tracing::{debug, warn};

use super::declaration::{Model, ModelDefinition};
use super::emit::EmitOptions;
use super::metadata;
use crate::error::{DeclarationError, Result};
use crate::format::FormatOptions;

/// Ordered collection of model definitions.
///
/// Definitions are kept in registration order, which is also the order
/// tables appear in the generated schema.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    definitions: Vec<ModelDefinition>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::DuplicateDefinition`] when a definition
    /// with the same name is already registered and
    /// [`DeclarationError::MissingForeignKeyColumn`] when the definition
    /// does not validate.
    pub fn register(&mut self, definition: ModelDefinition) -> Result<(), DeclarationError> {
        definition.validate()?;
        if self.get(definition.name()).is_some() {
            return Err(DeclarationError::DuplicateDefinition(
                definition.name().to_string(),
            ));
        }
        debug!(
            definition = definition.name(),
            table = definition.table_name(),
            "Registered definition"
        );
        self.definitions.push(definition);
        Ok(())
    }

    /// Registers the definition produced by `M`.
    ///
    /// # Errors
    ///
    /// See [`SchemaRegistry::register`].
    pub fn register_model<M: Model>(&mut self) -> Result<(), DeclarationError> {
        self.register(M::definition())
    }

    /// Looks up a definition by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ModelDefinition> {
        self.definitions.iter().find(|d| d.name() == name)
    }

    /// All registered definitions, tables or not.
    #[must_use]
    pub fn definitions(&self) -> &[ModelDefinition] {
        &self.definitions
    }

    /// Definitions that declared a table, in registration order.
    pub fn tables(&self) -> impl Iterator<Item = &ModelDefinition> {
        self.definitions.iter().filter(|d| d.is_table())
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Renders the formatted DDL of the definition named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::NotATable`] when `name` is unknown or not
    /// a table, and any pretty-printer error unmodified.
    pub fn table_schema(&self, name: &str, options: &FormatOptions) -> Result<String> {
        let definition = self.get(name).ok_or_else(|| DeclarationError::NotATable {
            definition: name.to_string(),
        })?;
        metadata::table_schema(definition, options)
    }

    /// Renders every table into one schema text.
    ///
    /// Each table is optionally preceded by a `-- table` comment line;
    /// tables are separated by two blank lines.
    ///
    /// # Errors
    ///
    /// Returns the first rendering error.
    pub fn render_schema(&self, options: &EmitOptions) -> Result<String> {
        let mut parts = Vec::new();
        for definition in self.tables() {
            let ddl = metadata::table_schema(definition, &options.format).inspect_err(|e| {
                warn!(definition = definition.name(), error = %e, "Cannot render table");
            })?;
            match (options.comments, definition.table_name()) {
                (true, Some(table)) => parts.push(format!("-- {table}\n{ddl}")),
                _ => parts.push(ddl),
            }
        }
        Ok(parts.join("\n\n\n"))
    }
}
