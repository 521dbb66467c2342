//! Error types for sqlselect

use thiserror::Error;

/// Result type alias for sqlselect operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors raised by the strict rendering path.
///
/// The lenient [`SelectQuery::build_query`](crate::SelectQuery::build_query) never fails;
/// these only surface through [`SelectQuery::try_build_query`](crate::SelectQuery::try_build_query).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// No table name was set on the builder
    #[error("missing table name: SELECT requires a FROM clause")]
    MissingTable,
}

impl QueryError {
    /// Check if this is a missing table error
    pub fn is_missing_table(&self) -> bool {
        matches!(self, Self::MissingTable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_table_message() {
        let err = QueryError::MissingTable;
        assert!(err.is_missing_table());
        assert_eq!(
            err.to_string(),
            "missing table name: SELECT requires a FROM clause"
        );
    }
}
