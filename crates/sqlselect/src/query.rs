//! Immutable SELECT descriptor and its SQL rendering.
//!
//! Rendered text follows this grammar exactly:
//!
//! ```text
//! query      := "" | "SELECT " columns " FROM " table where? ";"
//! columns    := "*" | column (", " column)*
//! where      := " WHERE " condition (" AND " condition)*
//! condition  := column "=" value
//! ```
//!
//! Conditions are ordered by column name. Nothing is quoted or escaped.

use crate::error::{QueryError, QueryResult};
use crate::filter::Filters;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A finished SELECT statement description.
///
/// Obtained from [`SelectQueryBuilder::build`](crate::SelectQueryBuilder::build). It owns its
/// data, so it can be sent to and read from other threads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectQuery {
    #[serde(default)]
    columns: Vec<String>,
    #[serde(default)]
    table: String,
    #[serde(default)]
    filters: Filters,
}

impl SelectQuery {
    pub(crate) fn new(columns: Vec<String>, table: String, filters: Filters) -> Self {
        Self {
            columns,
            table,
            filters,
        }
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

    /// Returns `true` if a table name is set, i.e. rendering produces a statement.
    pub fn is_buildable(&self) -> bool {
        !self.table.is_empty()
    }

    /// Render the statement.
    ///
    /// Returns an empty string when no table name is set.
    pub fn build_query(&self) -> String {
        if !self.is_buildable() {
            #[cfg(feature = "tracing")]
            tracing::debug!("no table set, rendering empty query");
            return String::new();
        }

        let mut sql = String::from("SELECT ");

        if self.columns.is_empty() {
            sql.push('*');
        } else {
            for (i, col) in self.columns.iter().enumerate() {
                if i > 0 {
                    sql.push_str(", ");
                }
                sql.push_str(col);
            }
        }

        sql.push_str(" FROM ");
        sql.push_str(&self.table);

        if !self.filters.is_empty() {
            sql.push_str(" WHERE ");
            for (i, (col, value)) in self.filters.iter().enumerate() {
                if i > 0 {
                    sql.push_str(" AND ");
                }
                sql.push_str(col);
                sql.push('=');
                sql.push_str(value);
            }
        }

        sql.push(';');

        #[cfg(feature = "tracing")]
        tracing::debug!(sql = %sql, "rendered select query");

        sql
    }

    /// Render the statement, failing with [`QueryError::MissingTable`] when no table is set.
    pub fn try_build_query(&self) -> QueryResult<String> {
        if !self.is_buildable() {
            return Err(QueryError::MissingTable);
        }
        Ok(self.build_query())
    }
}

impl fmt::Display for SelectQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build_query())
    }
}
