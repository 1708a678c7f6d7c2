//! Host-facing access-control surface
//!
//! [`SystemAccessControl`] mirrors the checks a SQL engine issues per query.
//! [`CatalogAccessControl`] answers them:
//! - catalog checks and listings go to the [`AccessEvaluator`]
//! - schema and table listings are visible iff the parent catalog is
//! - every other hook is decided by the configured [`HookPolicy`]

mod hooks;
mod names;

pub use hooks::{Hook, HookPolicy};
pub use names::{CatalogSchemaName, CatalogSchemaTableName, Privilege, SchemaTableName};

use crate::core::evaluator::AccessEvaluator;
use crate::core::identity::Identity;
use crate::error::Result;
use std::collections::HashSet;

/// Access-control checks invoked by the host engine
///
/// `check_*` methods return `Ok(())` to permit and `Err` to deny.
/// `filter_*` methods return the subset the identity may see.
pub trait SystemAccessControl: Send + Sync {
    fn check_can_set_user(&self, principal: Option<&str>, user: &str) -> Result<()>;

    fn check_can_set_system_session_property(&self, identity: &Identity, property: &str)
        -> Result<()>;

    fn check_can_access_catalog(&self, identity: &Identity, catalog: &str) -> Result<()>;

    fn filter_catalogs(&self, identity: &Identity, catalogs: HashSet<String>) -> HashSet<String>;

    fn check_can_create_schema(&self, identity: &Identity, schema: &CatalogSchemaName)
        -> Result<()>;

    fn check_can_drop_schema(&self, identity: &Identity, schema: &CatalogSchemaName) -> Result<()>;

    fn check_can_rename_schema(
        &self,
        identity: &Identity,
        schema: &CatalogSchemaName,
        new_schema: &str,
    ) -> Result<()>;

    fn check_can_show_schemas(&self, identity: &Identity, catalog: &str) -> Result<()>;

    fn filter_schemas(
        &self,
        identity: &Identity,
        catalog: &str,
        schemas: HashSet<String>,
    ) -> HashSet<String>;

    fn check_can_create_table(&self, identity: &Identity, table: &CatalogSchemaTableName)
        -> Result<()>;

    fn check_can_drop_table(&self, identity: &Identity, table: &CatalogSchemaTableName)
        -> Result<()>;

    fn check_can_rename_table(
        &self,
        identity: &Identity,
        table: &CatalogSchemaTableName,
        new_table: &CatalogSchemaTableName,
    ) -> Result<()>;

    fn check_can_show_tables_metadata(
        &self,
        identity: &Identity,
        schema: &CatalogSchemaName,
    ) -> Result<()>;

    fn filter_tables(
        &self,
        identity: &Identity,
        catalog: &str,
        tables: HashSet<SchemaTableName>,
    ) -> HashSet<SchemaTableName>;

    fn check_can_add_column(&self, identity: &Identity, table: &CatalogSchemaTableName)
        -> Result<()>;

    fn check_can_drop_column(&self, identity: &Identity, table: &CatalogSchemaTableName)
        -> Result<()>;

    fn check_can_rename_column(&self, identity: &Identity, table: &CatalogSchemaTableName)
        -> Result<()>;

    fn check_can_select_from_table(
        &self,
        identity: &Identity,
        table: &CatalogSchemaTableName,
    ) -> Result<()>;

    fn check_can_insert_into_table(
        &self,
        identity: &Identity,
        table: &CatalogSchemaTableName,
    ) -> Result<()>;

    fn check_can_delete_from_table(
        &self,
        identity: &Identity,
        table: &CatalogSchemaTableName,
    ) -> Result<()>;

    fn check_can_create_view(&self, identity: &Identity, view: &CatalogSchemaTableName)
        -> Result<()>;

    fn check_can_drop_view(&self, identity: &Identity, view: &CatalogSchemaTableName)
        -> Result<()>;

    fn check_can_select_from_view(&self, identity: &Identity, view: &CatalogSchemaTableName)
        -> Result<()>;

    fn check_can_create_view_with_select_from_table(
        &self,
        identity: &Identity,
        table: &CatalogSchemaTableName,
    ) -> Result<()>;

    fn check_can_create_view_with_select_from_view(
        &self,
        identity: &Identity,
        view: &CatalogSchemaTableName,
    ) -> Result<()>;

    fn check_can_set_catalog_session_property(
        &self,
        identity: &Identity,
        catalog: &str,
        property: &str,
    ) -> Result<()>;

    fn check_can_grant_table_privilege(
        &self,
        identity: &Identity,
        privilege: Privilege,
        table: &CatalogSchemaTableName,
        grantee: &str,
        with_grant_option: bool,
    ) -> Result<()>;

    fn check_can_revoke_table_privilege(
        &self,
        identity: &Identity,
        privilege: Privilege,
        table: &CatalogSchemaTableName,
        revokee: &str,
        grant_option_for: bool,
    ) -> Result<()>;
}

/// Catalog-level access control backed by a policy table
#[derive(Debug)]
pub struct CatalogAccessControl {
    evaluator: AccessEvaluator,
    hooks: HookPolicy,
}

impl CatalogAccessControl {
    /// Wrap an evaluator with the default (always-allow) hook policy
    pub fn new(evaluator: AccessEvaluator) -> Self {
        Self::with_hook_policy(evaluator, HookPolicy::default())
    }

    /// Wrap an evaluator with an explicit hook policy
    pub fn with_hook_policy(evaluator: AccessEvaluator, hooks: HookPolicy) -> Self {
        CatalogAccessControl { evaluator, hooks }
    }

    /// The evaluator answering catalog checks
    pub fn evaluator(&self) -> &AccessEvaluator {
        &self.evaluator
    }

    /// Policy applied to every non-catalog hook
    pub fn hook_policy(&self) -> HookPolicy {
        self.hooks
    }
}

impl SystemAccessControl for CatalogAccessControl {
    fn check_can_set_user(&self, _principal: Option<&str>, _user: &str) -> Result<()> {
        self.hooks.decide(Hook::SetUser)
    }

    fn check_can_set_system_session_property(
        &self,
        _identity: &Identity,
        _property: &str,
    ) -> Result<()> {
        self.hooks.decide(Hook::SetSystemSessionProperty)
    }

    fn check_can_access_catalog(&self, identity: &Identity, catalog: &str) -> Result<()> {
        self.evaluator.check_access(identity, catalog)
    }

    fn filter_catalogs(&self, identity: &Identity, catalogs: HashSet<String>) -> HashSet<String> {
        self.evaluator.filter_resources(identity, catalogs)
    }

    fn check_can_create_schema(
        &self,
        _identity: &Identity,
        _schema: &CatalogSchemaName,
    ) -> Result<()> {
        self.hooks.decide(Hook::CreateSchema)
    }

    fn check_can_drop_schema(&self, _identity: &Identity, _schema: &CatalogSchemaName) -> Result<()> {
        self.hooks.decide(Hook::DropSchema)
    }

    fn check_can_rename_schema(
        &self,
        _identity: &Identity,
        _schema: &CatalogSchemaName,
        _new_schema: &str,
    ) -> Result<()> {
        self.hooks.decide(Hook::RenameSchema)
    }

    fn check_can_show_schemas(&self, _identity: &Identity, _catalog: &str) -> Result<()> {
        self.hooks.decide(Hook::ShowSchemas)
    }

    fn filter_schemas(
        &self,
        identity: &Identity,
        catalog: &str,
        schemas: HashSet<String>,
    ) -> HashSet<String> {
        self.evaluator.filter_child_resources(identity, catalog, schemas)
    }

    fn check_can_create_table(
        &self,
        _identity: &Identity,
        _table: &CatalogSchemaTableName,
    ) -> Result<()> {
        self.hooks.decide(Hook::CreateTable)
    }

    fn check_can_drop_table(
        &self,
        _identity: &Identity,
        _table: &CatalogSchemaTableName,
    ) -> Result<()> {
        self.hooks.decide(Hook::DropTable)
    }

    fn check_can_rename_table(
        &self,
        _identity: &Identity,
        _table: &CatalogSchemaTableName,
        _new_table: &CatalogSchemaTableName,
    ) -> Result<()> {
        self.hooks.decide(Hook::RenameTable)
    }

    fn check_can_show_tables_metadata(
        &self,
        _identity: &Identity,
        _schema: &CatalogSchemaName,
    ) -> Result<()> {
        self.hooks.decide(Hook::ShowTablesMetadata)
    }

    fn filter_tables(
        &self,
        identity: &Identity,
        catalog: &str,
        tables: HashSet<SchemaTableName>,
    ) -> HashSet<SchemaTableName> {
        self.evaluator.filter_child_resources(identity, catalog, tables)
    }

    fn check_can_add_column(
        &self,
        _identity: &Identity,
        _table: &CatalogSchemaTableName,
    ) -> Result<()> {
        self.hooks.decide(Hook::AddColumn)
    }

    fn check_can_drop_column(
        &self,
        _identity: &Identity,
        _table: &CatalogSchemaTableName,
    ) -> Result<()> {
        self.hooks.decide(Hook::DropColumn)
    }

    fn check_can_rename_column(
        &self,
        _identity: &Identity,
        _table: &CatalogSchemaTableName,
    ) -> Result<()> {
        self.hooks.decide(Hook::RenameColumn)
    }

    fn check_can_select_from_table(
        &self,
        _identity: &Identity,
        _table: &CatalogSchemaTableName,
    ) -> Result<()> {
        self.hooks.decide(Hook::SelectFromTable)
    }

    fn check_can_insert_into_table(
        &self,
        _identity: &Identity,
        _table: &CatalogSchemaTableName,
    ) -> Result<()> {
        self.hooks.decide(Hook::InsertIntoTable)
    }

    fn check_can_delete_from_table(
        &self,
        _identity: &Identity,
        _table: &CatalogSchemaTableName,
    ) -> Result<()> {
        self.hooks.decide(Hook::DeleteFromTable)
    }

    fn check_can_create_view(
        &self,
        _identity: &Identity,
        _view: &CatalogSchemaTableName,
    ) -> Result<()> {
        self.hooks.decide(Hook::CreateView)
    }

    fn check_can_drop_view(&self, _identity: &Identity, _view: &CatalogSchemaTableName) -> Result<()> {
        self.hooks.decide(Hook::DropView)
    }

    fn check_can_select_from_view(
        &self,
        _identity: &Identity,
        _view: &CatalogSchemaTableName,
    ) -> Result<()> {
        self.hooks.decide(Hook::SelectFromView)
    }

    fn check_can_create_view_with_select_from_table(
        &self,
        _identity: &Identity,
        _table: &CatalogSchemaTableName,
    ) -> Result<()> {
        self.hooks.decide(Hook::CreateViewWithSelectFromTable)
    }

    fn check_can_create_view_with_select_from_view(
        &self,
        _identity: &Identity,
        _view: &CatalogSchemaTableName,
    ) -> Result<()> {
        self.hooks.decide(Hook::CreateViewWithSelectFromView)
    }

    fn check_can_set_catalog_session_property(
        &self,
        _identity: &Identity,
        _catalog: &str,
        _property: &str,
    ) -> Result<()> {
        self.hooks.decide(Hook::SetCatalogSessionProperty)
    }

    fn check_can_grant_table_privilege(
        &self,
        _identity: &Identity,
        _privilege: Privilege,
        _table: &CatalogSchemaTableName,
        _grantee: &str,
        _with_grant_option: bool,
    ) -> Result<()> {
        self.hooks.decide(Hook::GrantTablePrivilege)
    }

    fn check_can_revoke_table_privilege(
        &self,
        _identity: &Identity,
        _privilege: Privilege,
        _table: &CatalogSchemaTableName,
        _revokee: &str,
        _grant_option_for: bool,
    ) -> Result<()> {
        self.hooks.decide(Hook::RevokeTablePrivilege)
    }
}
