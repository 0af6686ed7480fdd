//! Error types for schema declaration, formatting and emission.

use std::path::PathBuf;

/// Errors raised while processing or rendering table declarations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeclarationError {
    /// DDL was requested for a definition that never declared a table.
    #[error("definition '{definition}' is not registered as a table")]
    NotATable {
        /// Name of the offending definition.
        definition: String,
    },

    /// A definition-level foreign key was declared without a column.
    #[error(
        "foreign key referencing '{reference}' on definition '{definition}' requires an explicit column"
    )]
    MissingForeignKeyColumn {
        /// Name of the offending definition.
        definition: String,
        /// The reference the foreign key points to.
        reference: String,
    },

    /// The same definition name was registered twice.
    #[error("definition '{0}' is already registered")]
    DuplicateDefinition(String),
}

/// Error surfaced by the SQL pretty-printer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot format SQL at byte {offset}: {message}")]
pub struct FormatError {
    /// Human readable reason.
    pub message: String,
    /// Byte offset in the input where formatting failed.
    pub offset: usize,
}

impl FormatError {
    /// Creates a new format error.
    #[must_use]
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

/// Top-level error for schema generation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid or missing declarations.
    #[error(transparent)]
    Declaration(#[from] DeclarationError),

    /// The pretty-printer rejected the generated text.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Writing a schema artifact failed.
    #[error("IO error on '{path}': {source}")]
    Io {
        /// The file or directory being written.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for schema operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_error_messages() {
        let err = DeclarationError::NotATable {
            definition: String::from("Session"),
        };
        assert_eq!(
            err.to_string(),
            "definition 'Session' is not registered as a table"
        );

        let err = DeclarationError::MissingForeignKeyColumn {
            definition: String::from("Post"),
            reference: String::from("users(id)"),
        };
        assert!(err.to_string().contains("requires an explicit column"));
    }

    #[test]
    fn test_error_is_transparent_over_format_error() {
        let err: Error = FormatError::new("unterminated string literal", 7).into();
        assert_eq!(
            err.to_string(),
            "cannot format SQL at byte 7: unterminated string literal"
        );
    }
}
