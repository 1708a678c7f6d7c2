//! Construct-and-swap holder for the active access control
//!
//! Readers take a cheap `Arc` clone of the current control and evaluate
//! against it without holding any lock. A reload builds a complete new
//! control first and only then replaces the pointer, so a reader sees the
//! old control or the new one, never anything in between.

use crate::core::control::SystemAccessControl;
use crate::core::factory::AccessControlFactory;
use crate::error::Result;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Shared, swappable access control
#[derive(Clone)]
pub struct SharedAccessControl {
    current: Arc<RwLock<Arc<dyn SystemAccessControl>>>,
}

impl SharedAccessControl {
    /// Put `control` into service
    pub fn new(control: impl SystemAccessControl + 'static) -> Self {
        Self::from_arc(Arc::new(control))
    }

    /// Put an already shared control into service
    pub fn from_arc(control: Arc<dyn SystemAccessControl>) -> Self {
        SharedAccessControl {
            current: Arc::new(RwLock::new(control)),
        }
    }

    /// Control currently in service
    pub fn current(&self) -> Arc<dyn SystemAccessControl> {
        Arc::clone(&self.current.read())
    }

    /// Swap in `control`, returning the one it replaces
    pub fn replace(&self, control: Arc<dyn SystemAccessControl>) -> Arc<dyn SystemAccessControl> {
        let previous = std::mem::replace(&mut *self.current.write(), control);
        info!("Swapped in new catalog access control");
        previous
    }

    /// Build a fresh control with `factory` and swap it in
    ///
    /// On failure the control in service is left untouched.
    pub fn reload(
        &self,
        factory: &dyn AccessControlFactory,
        properties: &HashMap<String, String>,
    ) -> Result<()> {
        match factory.create(properties) {
            Ok(control) => {
                self.replace(Arc::from(control));
                Ok(())
            }
            Err(e) => {
                warn!("Reload via '{}' failed, keeping current policy: {}", factory.name(), e);
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for SharedAccessControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedAccessControl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::control::CatalogAccessControl;
    use crate::core::evaluator::AccessEvaluator;
    use crate::core::factory::DbAccessControlFactory;
    use crate::core::identity::Identity;
    use crate::core::policy::{PolicyEntry, PolicyStore};

    fn control_for(user: &str, catalog: &str) -> CatalogAccessControl {
        let store = PolicyStore::from_iter([PolicyEntry::new(user, catalog)]);
        CatalogAccessControl::new(AccessEvaluator::new(store))
    }

    #[test]
    fn test_replace_publishes_new_policy() {
        let shared = SharedAccessControl::new(control_for("alice", "sales"));
        let alice = Identity::new("alice");

        let before = shared.current();
        assert!(before.check_can_access_catalog(&alice, "sales").is_ok());

        shared.replace(Arc::new(control_for("alice", "hr")));

        // a handle taken before the swap keeps answering from the old policy
        assert!(before.check_can_access_catalog(&alice, "sales").is_ok());

        let after = shared.current();
        assert!(after.check_can_access_catalog(&alice, "sales").is_err());
        assert!(after.check_can_access_catalog(&alice, "hr").is_ok());
    }

    #[test]
    fn test_failed_reload_keeps_current() {
        let shared = SharedAccessControl::new(control_for("alice", "sales"));

        let result = shared.reload(&DbAccessControlFactory, &HashMap::new());
        assert!(result.is_err());

        assert!(shared
            .current()
            .check_can_access_catalog(&Identity::new("alice"), "sales")
            .is_ok());
    }
}
