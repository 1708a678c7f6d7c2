//! # catalog-acl - Database-Backed Catalog Access Control
//!
//! `catalog-acl` decides which catalogs a user of a SQL query engine may see
//! and use. Permissions come from a table of `(user, catalog)` rows loaded
//! once at startup:
//!
//! - **Immutable policy store** built from SQLite or any [`RowSource`]
//! - **Access evaluator** with exact, case-sensitive matching
//! - **Catalog-scoped listings**: schemas and tables are visible iff their catalog is
//! - **Explicit always-allow policy** for every finer-grained hook
//! - **Construct-and-swap reload** for replacing the policy without locking readers
//!
//! ## Quick Start
//!
//! ```rust
//! use catalog_acl::{AccessEvaluator, Identity, PolicyStore};
//! use std::collections::HashSet;
//!
//! # fn main() -> catalog_acl::Result<()> {
//! let rows = vec![Ok(("alice", "sales")), Ok(("alice", "hr"))];
//! let evaluator = AccessEvaluator::new(PolicyStore::build(rows)?);
//!
//! let alice = Identity::new("alice");
//! evaluator.check_access(&alice, "sales")?;
//!
//! let requested: HashSet<&str> = ["sales", "hr", "finance"].into();
//! let visible = evaluator.filter_resources(&alice, requested);
//! assert_eq!(visible, HashSet::from(["sales", "hr"]));
//! # Ok(())
//! # }
//! ```
//!
//! ## From Host Properties
//!
//! ```rust,no_run
//! use catalog_acl::{AccessControlFactory, DbAccessControlFactory, Identity, SystemAccessControl};
//! use std::collections::HashMap;
//!
//! # fn main() -> catalog_acl::Result<()> {
//! let mut properties = HashMap::new();
//! properties.insert("db-path".to_string(), "/var/lib/acl/policy.db".to_string());
//! properties.insert("db-table".to_string(), "user_catalog".to_string());
//!
//! let control = DbAccessControlFactory.create(&properties)?;
//! control.check_can_access_catalog(&Identity::new("alice"), "sales")?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;

pub use crate::config::AclConfig;
pub use crate::core::{
    build_control, AccessControlFactory, AccessEvaluator, CatalogAccessControl, CatalogSchemaName,
    CatalogSchemaTableName, DbAccessControlFactory, Hook, HookPolicy, Identity, LookupMode,
    MemorySource, PolicyEntry, PolicyIndex, PolicyRow, PolicyStore, Privilege, RowSource,
    SchemaTableName, SharedAccessControl, SqlIdentifier, SqliteSource, SystemAccessControl,
};
pub use crate::error::{AclError, PolicyLoadError, Result};
