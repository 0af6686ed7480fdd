//! SQL pretty-printing.
//!
//! Rendering never depends on formatting: builders and the DDL renderer
//! produce single-line text, and a [`SqlFormatter`] re-indents it at the end.
//! [`PrettyPrinter`] is the built-in implementation.
//!
//! ```rust
//! use sqlweave_core::format::{format, FormatOptions};
//!
//! let sql = format("SELECT id, name FROM users WHERE id = 1", &FormatOptions::default()).unwrap();
//! assert_eq!(sql, "SELECT\n  id,\n  name\nFROM\n  users\nWHERE\n  id = 1");
//! ```

mod options;
mod printer;

pub use options::{FormatOptions, KeywordCase};
pub use printer::PrettyPrinter;

use crate::error::FormatError;

/// Re-indents SQL text.
pub trait SqlFormatter {
    /// Formats `sql` according to `options`.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] when the text cannot be processed.
    fn format(&self, sql: &str, options: &FormatOptions) -> Result<String, FormatError>;
}

/// Formats `sql` with the built-in [`PrettyPrinter`].
///
/// # Errors
///
/// Returns a [`FormatError`] when the text cannot be tokenized.
pub fn format(sql: &str, options: &FormatOptions) -> Result<String, FormatError> {
    PrettyPrinter.format(sql, options)
}
