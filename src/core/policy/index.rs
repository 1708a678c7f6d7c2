//! Hash index over policy entries
//!
//! Maps each user to the set of catalogs it may access. Built once from a
//! store and never mutated, so it answers exactly what a linear scan would.

use super::PolicyEntry;
use ahash::{AHashMap, AHashSet};

/// `user -> {catalog}` lookup table
#[derive(Debug, Clone, Default)]
pub struct PolicyIndex {
    catalogs_by_user: AHashMap<String, AHashSet<String>>,
}

impl PolicyIndex {
    /// Index a slice of entries
    pub fn from_entries(entries: &[PolicyEntry]) -> Self {
        let mut catalogs_by_user: AHashMap<String, AHashSet<String>> = AHashMap::new();

        for entry in entries {
            catalogs_by_user
                .entry(entry.user().to_string())
                .or_default()
                .insert(entry.catalog().to_string());
        }

        PolicyIndex { catalogs_by_user }
    }

    /// Check for an exact `(user, catalog)` pair
    pub fn contains(&self, user: &str, catalog: &str) -> bool {
        self.catalogs_by_user
            .get(user)
            .is_some_and(|catalogs| catalogs.contains(catalog))
    }

    /// Catalogs granted to `user`, if any
    pub fn catalogs_for(&self, user: &str) -> Option<&AHashSet<String>> {
        self.catalogs_by_user.get(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_entries() {
        let entries = vec![
            PolicyEntry::new("alice", "sales"),
            PolicyEntry::new("alice", "hr"),
            PolicyEntry::new("alice", "hr"),
            PolicyEntry::new("bob", "sales"),
        ];
        let index = PolicyIndex::from_entries(&entries);

        assert_eq!(index.catalogs_for("bob").map(|c| c.len()), Some(1));
        assert_eq!(index.catalogs_for("alice").map(|c| c.len()), Some(2));
        assert!(index.contains("alice", "hr"));
        assert!(index.contains("bob", "sales"));
        assert!(!index.contains("bob", "hr"));
        assert!(!index.contains("carol", "sales"));
    }

    #[test]
    fn test_index_is_case_sensitive() {
        let index = PolicyIndex::from_entries(&[PolicyEntry::new("alice", "sales")]);

        assert!(!index.contains("Alice", "sales"));
        assert!(!index.contains("alice", "SALES"));
        assert!(index.catalogs_for("Alice").is_none());
    }
}
