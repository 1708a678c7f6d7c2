//! Core policy store, evaluator and host-facing access control

pub mod control;
pub mod evaluator;
pub mod factory;
pub mod identity;
pub mod policy;
pub mod reload;
pub mod source;
pub mod validation;

pub use control::{
    CatalogAccessControl, CatalogSchemaName, CatalogSchemaTableName, Hook, HookPolicy, Privilege,
    SchemaTableName, SystemAccessControl,
};
pub use evaluator::{AccessEvaluator, LookupMode};
pub use factory::{build_control, AccessControlFactory, DbAccessControlFactory};
pub use identity::Identity;
pub use policy::{PolicyEntry, PolicyIndex, PolicyStore};
pub use reload::SharedAccessControl;
pub use source::{MemorySource, PolicyRow, RowSource, SqliteSource};
pub use validation::SqlIdentifier;
