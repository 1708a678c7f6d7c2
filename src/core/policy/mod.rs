//! Policy store: the immutable table of permitted (user, catalog) pairs
//!
//! The store is built once from a row source and never changes afterwards.
//! A new policy means a new store (and a new evaluator around it).
//!
//! Lookups are exact, case-sensitive string comparisons on both fields.

mod index;

pub use index::PolicyIndex;

use crate::core::source::RowSource;
use crate::error::PolicyLoadError;
use tracing::info;

/// One permitted pairing: `user` may access `catalog`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PolicyEntry {
    user: String,
    catalog: String,
}

impl PolicyEntry {
    /// Create a new entry
    pub fn new(user: impl Into<String>, catalog: impl Into<String>) -> Self {
        PolicyEntry {
            user: user.into(),
            catalog: catalog.into(),
        }
    }

    /// Principal name this entry grants access to
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Catalog this entry grants access on
    pub fn catalog(&self) -> &str {
        &self.catalog
    }

    /// Check whether this entry is exactly `(user, catalog)`
    pub fn matches(&self, user: &str, catalog: &str) -> bool {
        self.user == user && self.catalog == catalog
    }
}

impl<U: Into<String>, C: Into<String>> From<(U, C)> for PolicyEntry {
    fn from((user, catalog): (U, C)) -> Self {
        PolicyEntry::new(user, catalog)
    }
}

/// Ordered, immutable sequence of policy entries
///
/// Duplicates are kept as loaded; they do not change any decision.
#[derive(Debug, Clone, Default)]
pub struct PolicyStore {
    entries: Vec<PolicyEntry>,
}

impl PolicyStore {
    /// Build a store from a finite sequence of rows
    ///
    /// The first failing row aborts the build; nothing partial is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_acl::PolicyStore;
    ///
    /// let rows = vec![Ok(("alice", "sales")), Ok(("alice", "hr"))];
    /// let store = PolicyStore::build(rows).unwrap();
    /// assert_eq!(store.len(), 2);
    /// assert!(store.contains("alice", "sales"));
    /// assert!(!store.contains("Alice", "sales"));
    /// ```
    pub fn build<I, U, C>(rows: I) -> Result<Self, PolicyLoadError>
    where
        I: IntoIterator<Item = Result<(U, C), PolicyLoadError>>,
        U: Into<String>,
        C: Into<String>,
    {
        let entries = rows
            .into_iter()
            .map(|row| row.map(PolicyEntry::from))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PolicyStore { entries })
    }

    /// Fetch every row from `source` and build a store from them
    pub fn from_source(source: &dyn RowSource) -> Result<Self, PolicyLoadError> {
        let rows = source.fetch()?;
        let store = PolicyStore::build(rows.into_iter().map(Ok))?;

        info!(
            "Loaded {} policy entries from {}",
            store.len(),
            source.describe()
        );

        Ok(store)
    }

    /// All entries in load order
    pub fn entries(&self) -> &[PolicyEntry] {
        &self.entries
    }

    /// Linear scan for an exact `(user, catalog)` match
    ///
    /// O(n) per call. Use [`PolicyStore::index`] when the table is large.
    pub fn contains(&self, user: &str, catalog: &str) -> bool {
        self.entries.iter().any(|entry| entry.matches(user, catalog))
    }

    /// Build a hash index answering the same question as [`PolicyStore::contains`]
    pub fn index(&self) -> PolicyIndex {
        PolicyIndex::from_entries(&self.entries)
    }

    /// Number of entries, duplicates included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<PolicyEntry> for PolicyStore {
    fn from_iter<T: IntoIterator<Item = PolicyEntry>>(iter: T) -> Self {
        PolicyStore {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PolicyStore {
        PolicyStore::from_iter([
            PolicyEntry::new("alice", "sales"),
            PolicyEntry::new("alice", "hr"),
            PolicyEntry::new("bob", "finance"),
        ])
    }

    #[test]
    fn test_contains_exact_match() {
        let store = sample();

        assert!(store.contains("alice", "sales"));
        assert!(store.contains("bob", "finance"));
        assert!(!store.contains("bob", "sales"));
        assert!(!store.contains("alice", "finance"));
    }

    #[test]
    fn test_contains_is_case_sensitive() {
        let store = sample();

        assert!(!store.contains("ALICE", "sales"));
        assert!(!store.contains("alice", "Sales"));
        assert!(!store.contains("alice ", "sales"));
    }

    #[test]
    fn test_build_keeps_order_and_duplicates() {
        let rows = vec![Ok(("u", "a")), Ok(("u", "a")), Ok(("v", "b"))];
        let store = PolicyStore::build(rows).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(store.entries()[0], PolicyEntry::new("u", "a"));
        assert_eq!(store.entries()[2].user(), "v");
        assert!(store.contains("u", "a"));
    }

    #[test]
    fn test_build_fails_on_bad_row() {
        let rows: Vec<Result<(&str, &str), PolicyLoadError>> = vec![
            Ok(("alice", "sales")),
            Err(PolicyLoadError::Source("lost connection".to_string())),
            Ok(("bob", "hr")),
        ];

        assert!(PolicyStore::build(rows).is_err());
    }

    #[test]
    fn test_empty_store_denies_everything() {
        let store = PolicyStore::default();

        assert!(store.is_empty());
        assert!(!store.contains("", ""));
        assert!(!store.contains("alice", "sales"));
    }

    #[test]
    fn test_empty_strings_are_ordinary_values() {
        let store = PolicyStore::from_iter([PolicyEntry::new("", "")]);

        assert!(store.contains("", ""));
        assert!(!store.contains("", "sales"));
    }
}
