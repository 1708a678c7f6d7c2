//! Factories that stand up an access control from host properties
//!
//! Construction is the only fallible step: once a factory returns, every
//! decision is answered from memory.

use crate::config::AclConfig;
use crate::core::control::{CatalogAccessControl, SystemAccessControl};
use crate::core::evaluator::AccessEvaluator;
use crate::core::policy::PolicyStore;
use crate::core::source::RowSource;
use crate::error::Result;
use std::collections::HashMap;
use tracing::info;

/// Named constructor for a [`SystemAccessControl`]
pub trait AccessControlFactory: Send + Sync {
    /// Name the host uses to select this factory
    fn name(&self) -> &str;

    /// Build a ready access control from host properties
    fn create(&self, properties: &HashMap<String, String>) -> Result<Box<dyn SystemAccessControl>>;
}

/// Access control whose policy table is read from SQLite
#[derive(Debug, Clone, Copy, Default)]
pub struct DbAccessControlFactory;

impl DbAccessControlFactory {
    /// Factory name
    pub const NAME: &'static str = "db";

    /// Load the policy table described by `config`
    pub fn build(&self, config: &AclConfig) -> Result<CatalogAccessControl> {
        let source = config.source()?;
        build_control(&source, config)
    }
}

impl AccessControlFactory for DbAccessControlFactory {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn create(&self, properties: &HashMap<String, String>) -> Result<Box<dyn SystemAccessControl>> {
        let config = AclConfig::from_properties(properties)?;
        Ok(Box::new(self.build(&config)?))
    }
}

/// Load every row from `source` and wrap the result in a control
pub fn build_control(source: &dyn RowSource, config: &AclConfig) -> Result<CatalogAccessControl> {
    let store = PolicyStore::from_source(source)?;
    let evaluator = AccessEvaluator::with_lookup(store, config.lookup);

    info!(
        "Catalog access control ready ({:?} lookup, {} entries)",
        evaluator.lookup_mode(),
        evaluator.store().len()
    );

    Ok(CatalogAccessControl::new(evaluator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::evaluator::LookupMode;
    use crate::core::identity::Identity;
    use crate::core::source::MemorySource;
    use crate::error::AclError;

    #[test]
    fn test_factory_name() {
        assert_eq!(DbAccessControlFactory.name(), "db");
    }

    #[test]
    fn test_build_control_from_memory() {
        let source = MemorySource::new([("alice", "sales")]);
        let config = AclConfig::new("unused.db", "unused").with_lookup(LookupMode::Indexed);
        let control = build_control(&source, &config).unwrap();

        assert_eq!(control.evaluator().lookup_mode(), LookupMode::Indexed);
        assert!(control
            .check_can_access_catalog(&Identity::new("alice"), "sales")
            .is_ok());
    }

    #[test]
    fn test_create_requires_properties() {
        let result = DbAccessControlFactory.create(&HashMap::new());
        assert!(matches!(result, Err(AclError::Config(_))));
    }

    #[test]
    fn test_create_with_unreachable_database() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut properties = HashMap::new();
        properties.insert(
            "db-path".to_string(),
            dir.path().join("missing.db").display().to_string(),
        );
        properties.insert("db-table".to_string(), "user_catalog".to_string());

        let result = DbAccessControlFactory.create(&properties);
        assert!(matches!(result, Err(AclError::PolicyLoad(_))));
    }
}
