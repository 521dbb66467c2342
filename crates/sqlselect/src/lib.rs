//! # sqlselect
//!
//! A small fluent builder for plain-text SQL `SELECT` statements.
//!
//! ## Features
//!
//! - **Ordered columns**: columns render in the order they were added
//! - **Deterministic filters**: `WHERE` conditions always render sorted by column name
//! - **Copy-out descriptors**: [`SelectQueryBuilder::build`] snapshots the builder into an
//!   immutable [`SelectQuery`] that can be shared freely
//! - **Verbatim output**: names and values are inserted as-is (no quoting, no escaping,
//!   no parameter binding)
//!
//! ## Example
//!
//! ```
//! use sqlselect::SelectQueryBuilder;
//!
//! let query = SelectQueryBuilder::new()
//!     .add_column("name")
//!     .add_column("phone")
//!     .add_from("students")
//!     .add_where("id", "42")
//!     .add_where("name", "John")
//!     .build();
//!
//! assert_eq!(
//!     query.build_query(),
//!     "SELECT name, phone FROM students WHERE id=42 AND name=John;"
//! );
//! ```
//!
//! A query without a table renders as an empty string. Use
//! [`SelectQuery::try_build_query`] when that case should be an error instead.

pub mod builder;
pub mod error;
pub mod filter;
pub mod query;

pub use builder::SelectQueryBuilder;
pub use error::{QueryError, QueryResult};
pub use filter::Filters;
pub use query::SelectQuery;
