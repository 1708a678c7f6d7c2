//! Access evaluator over an immutable policy store
//!
//! Every decision reduces to one predicate, [`AccessEvaluator::can_access`]:
//! - `check_access` turns a negative answer into `AclError::Denied`
//! - `filter_resources` keeps the catalogs the identity may access
//! - `filter_child_resources` passes children through iff the parent is accessible
//!
//! Evaluation performs no I/O and holds no mutable state, so one evaluator
//! can be shared freely across threads.

use crate::core::identity::Identity;
use crate::core::policy::{PolicyIndex, PolicyStore};
use crate::error::{AclError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;
use std::str::FromStr;
use tracing::debug;

/// How `can_access` searches the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum LookupMode {
    /// Linear scan over all entries, O(n) per call
    #[default]
    Scan,
    /// Hash index built once at construction
    Indexed,
}

impl FromStr for LookupMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scan" => Ok(LookupMode::Scan),
            "indexed" | "index" => Ok(LookupMode::Indexed),
            _ => Err(format!(
                "Invalid lookup mode '{}'. Valid options: scan, indexed",
                s
            )),
        }
    }
}

impl TryFrom<String> for LookupMode {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

#[derive(Debug)]
enum Lookup {
    Scan,
    Indexed(PolicyIndex),
}

/// Stateless decision logic over one policy store
#[derive(Debug)]
pub struct AccessEvaluator {
    store: PolicyStore,
    lookup: Lookup,
}

impl AccessEvaluator {
    /// Create an evaluator using linear scan lookup
    pub fn new(store: PolicyStore) -> Self {
        Self::with_lookup(store, LookupMode::Scan)
    }

    /// Create an evaluator with an explicit lookup mode
    pub fn with_lookup(store: PolicyStore, mode: LookupMode) -> Self {
        let lookup = match mode {
            LookupMode::Scan => Lookup::Scan,
            LookupMode::Indexed => Lookup::Indexed(store.index()),
        };

        AccessEvaluator { store, lookup }
    }

    /// The store this evaluator answers from
    pub fn store(&self) -> &PolicyStore {
        &self.store
    }

    /// Lookup mode in use
    pub fn lookup_mode(&self) -> LookupMode {
        match self.lookup {
            Lookup::Scan => LookupMode::Scan,
            Lookup::Indexed(_) => LookupMode::Indexed,
        }
    }

    /// Every catalog `identity` may access, in name order
    pub fn granted_catalogs(&self, identity: &Identity) -> BTreeSet<&str> {
        match &self.lookup {
            Lookup::Scan => self
                .store
                .entries()
                .iter()
                .filter(|entry| entry.user() == identity.user())
                .map(|entry| entry.catalog())
                .collect(),
            Lookup::Indexed(index) => index
                .catalogs_for(identity.user())
                .map(|catalogs| catalogs.iter().map(String::as_str).collect())
                .unwrap_or_default(),
        }
    }

    /// Check if `identity` may access `catalog`
    ///
    /// True iff the store holds an entry whose user and catalog both equal
    /// the inputs exactly (case-sensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_acl::{AccessEvaluator, Identity, PolicyEntry, PolicyStore};
    ///
    /// let store = PolicyStore::from_iter([PolicyEntry::new("alice", "sales")]);
    /// let evaluator = AccessEvaluator::new(store);
    ///
    /// assert!(evaluator.can_access(&Identity::new("alice"), "sales"));
    /// assert!(!evaluator.can_access(&Identity::new("bob"), "sales"));
    /// ```
    pub fn can_access(&self, identity: &Identity, catalog: &str) -> bool {
        match &self.lookup {
            Lookup::Scan => self.store.contains(identity.user(), catalog),
            Lookup::Indexed(index) => index.contains(identity.user(), catalog),
        }
    }

    /// Same predicate as [`can_access`](Self::can_access), failing with
    /// `AclError::Denied` instead of returning false
    pub fn check_access(&self, identity: &Identity, catalog: &str) -> Result<()> {
        if self.can_access(identity, catalog) {
            return Ok(());
        }

        debug!("Denied catalog access: user={} catalog={}", identity, catalog);
        Err(AclError::denied(catalog))
    }

    /// Keep only the catalogs `identity` may access
    ///
    /// The result is always a subset of the input.
    pub fn filter_resources<S>(&self, identity: &Identity, catalogs: HashSet<S>) -> HashSet<S>
    where
        S: AsRef<str> + Eq + Hash,
    {
        let requested = catalogs.len();
        let allowed: HashSet<S> = catalogs
            .into_iter()
            .filter(|catalog| self.can_access(identity, catalog.as_ref()))
            .collect();

        debug!(
            "Filtered catalogs for {}: {} of {} visible",
            identity,
            allowed.len(),
            requested
        );
        allowed
    }

    /// Children of `catalog`, visible only when the catalog itself is
    ///
    /// Access to the parent catalog is necessary and sufficient: the children
    /// are returned untouched when it is granted and dropped entirely when it
    /// is not.
    pub fn filter_child_resources<T>(
        &self,
        identity: &Identity,
        catalog: &str,
        children: HashSet<T>,
    ) -> HashSet<T>
    where
        T: Eq + Hash,
    {
        if !self.can_access(identity, catalog) {
            debug!(
                "Hiding {} children of inaccessible catalog {} from {}",
                children.len(),
                catalog,
                identity
            );
            return HashSet::new();
        }

        children
    }
}
