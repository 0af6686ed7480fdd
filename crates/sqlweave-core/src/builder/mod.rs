//! Chainable SQL query builder.
//!
//! One [`QueryBuilder`] accumulates clause state and renders a single
//! SELECT, INSERT, UPDATE or DELETE statement. Predicates are plain text
//! fragments; the [`operators`] module composes them.
//!
//! # Example
//!
//! ```rust
//! use sqlweave_core::builder::operators::{in_list, is_null, SubQuery};
//! use sqlweave_core::builder::QueryBuilder;
//!
//! let sql = QueryBuilder::new()
//!     .select(["id", "email"])
//!     .from("users")
//!     .where_clause(in_list("id", SubQuery::with(|q| q.select("user_id").from("admins"))))
//!     .and_where(is_null("deleted_at"))
//!     .build();
//!
//! assert_eq!(
//!     sql,
//!     "SELECT id, email FROM \"users\" users \
//!      WHERE (id IN (SELECT user_id FROM \"admins\" admins)) AND ((deleted_at IS NULL))"
//! );
//! ```

mod join;
pub mod operators;
mod query;
mod render;
mod selection;

pub use join::{JoinKind, JoinSelect, JoinTable};
pub use operators::{CompareOp, SubQuery};
pub use query::{QueryBuilder, StatementKind};
pub use selection::{IntoFragments, Order, OrderBy, SelectItem, Selection};
