//! Fluent accumulator for SELECT statements.
//!
//! Every configuration method takes `&mut self` and returns `&mut Self`, so calls chain
//! off a temporary as well as off a named binding:
//!
//! ```
//! use sqlselect::SelectQueryBuilder;
//!
//! let mut qb = SelectQueryBuilder::new();
//! qb.add_columns(["name", "phone", "email"]).add_from("students");
//! qb.add_where("id", "42");
//!
//! assert_eq!(
//!     qb.build().build_query(),
//!     "SELECT name, phone, email FROM students WHERE id=42;"
//! );
//! ```

use crate::filter::Filters;
use crate::query::SelectQuery;

/// Structured SELECT statement builder.
#[derive(Debug, Clone, Default)]
pub struct SelectQueryBuilder {
    /// SELECT columns, in insertion order (empty renders as `*`)
    columns: Vec<String>,
    /// FROM table (empty means unset)
    table: String,
    /// WHERE equality filters
    filters: Filters,
}

impl SelectQueryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one SELECT column.
    ///
    /// Duplicates and empty names are kept verbatim.
    pub fn add_column(&mut self, name: impl Into<String>) -> &mut Self {
        self.columns.push(name.into());
        self
    }

    /// Append multiple SELECT columns, preserving their order.
    pub fn add_columns<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(names.into_iter().map(Into::into));
        self
    }

    /// Set the FROM table, replacing any previous one.
    pub fn add_from(&mut self, table: impl Into<String>) -> &mut Self {
        self.table = table.into();
        self
    }

    /// Add `column=value` to the WHERE clause, replacing an existing value for `column`.
    pub fn add_where(&mut self, column: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.filters.set(column, value);
        self
    }

    /// Add several `column=value` pairs to the WHERE clause.
    ///
    /// Unlike [`add_where`](Self::add_where), a column that already has a filter keeps its
    /// current value; the incoming one is ignored.
    pub fn add_where_all<I, K, V>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.filters.merge(pairs);
        self
    }

    /// SELECT columns in insertion order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// FROM table (empty if unset).
    pub fn table(&self) -> &str {
        &self.table
    }

    /// WHERE equality filters.
    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Snapshot the current state into an independent [`SelectQuery`].
    ///
    /// The builder stays usable; later changes do not affect descriptors built earlier.
    pub fn build(&self) -> SelectQuery {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            columns = self.columns.len(),
            filters = self.filters.len(),
            table = %self.table,
            "building select query"
        );

        SelectQuery::new(
            self.columns.clone(),
            self.table.clone(),
            self.filters.clone(),
        )
    }
}
