//! Equality filters for the `WHERE` clause.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;

/// Unique `column -> value` pairs, iterated in ascending column order.
///
/// Two insertion policies are exposed:
/// - [`Filters::set`] replaces the value of an existing column.
/// - [`Filters::merge`] only inserts columns that are not present yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filters(BTreeMap<String, String>);

impl Filters {
    /// Create an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the value for `column`.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.0.insert(column.into(), value.into());
    }

    /// Insert every pair whose column is not present yet.
    ///
    /// Existing values win on collision. When `pairs` repeats a column, the first
    /// occurrence wins.
    pub fn merge<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (column, value) in pairs {
            if let btree_map::Entry::Vacant(slot) = self.0.entry(column.into()) {
                slot.insert(value.into());
            }
        }
    }

    /// Value for `column`, if any.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    /// Returns `true` if `column` has a filter.
    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(column, value)` pairs in ascending column order.
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.0.iter())
    }
}

/// Borrowing iterator over [`Filters`], in ascending column order.
#[derive(Debug, Clone)]
pub struct Iter<'a>(btree_map::Iter<'a, String, String>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Filters {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Filters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filters = Self::new();
        filters.merge(iter);
        filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites() {
        let mut f = Filters::new();
        f.set("id", "1");
        f.set("id", "2");
        assert_eq!(f.get("id"), Some("2"));
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn merge_keeps_existing() {
        let mut f = Filters::new();
        f.set("id", "1");
        f.merge([("id", "2"), ("name", "John")]);
        assert_eq!(f.get("id"), Some("1"));
        assert_eq!(f.get("name"), Some("John"));
        assert!(f.contains("name"));
        assert!(!f.contains("age"));
    }

    #[test]
    fn merge_first_duplicate_wins() {
        let mut f = Filters::new();
        f.merge([("age", "22"), ("age", "23")]);
        assert_eq!(f.get("age"), Some("22"));
    }

    #[test]
    fn iter_is_sorted_by_column() {
        let f: Filters = [("name", "John"), ("age", "22"), ("id", "42")]
            .into_iter()
            .collect();
        let cols: Vec<&str> = f.iter().map(|(c, _)| c).collect();
        assert_eq!(cols, vec!["age", "id", "name"]);
    }

    #[test]
    fn borrowed_iteration_matches_iter() {
        let f: Filters = [("name", "John"), ("id", "42")].into_iter().collect();
        let mut looped = Vec::new();
        for (column, value) in &f {
            looped.push((column, value));
        }
        assert_eq!(looped, f.iter().collect::<Vec<_>>());
        assert_eq!(looped, vec![("id", "42"), ("name", "John")]);
        assert_eq!(f.iter().len(), 2);
    }

    #[test]
    fn lexicographic_not_numeric() {
        let f: Filters = [("b", "1"), ("B", "2"), ("a10", "3"), ("a2", "4")]
            .into_iter()
            .collect();
        let cols: Vec<&str> = f.iter().map(|(c, _)| c).collect();
        assert_eq!(cols, vec!["B", "a10", "a2", "b"]);
    }
}
