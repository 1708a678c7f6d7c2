//! Fine-grained hooks and the policy that decides them
//!
//! Schema, table, column, view, grant and session-property checks carry no
//! policy of their own. Each is named here and routed through [`HookPolicy`],
//! which currently allows all of them.

use crate::error::Result;

/// Every access-control hook that is not a catalog check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    SetUser,
    SetSystemSessionProperty,
    SetCatalogSessionProperty,
    ShowSchemas,
    CreateSchema,
    DropSchema,
    RenameSchema,
    ShowTablesMetadata,
    CreateTable,
    DropTable,
    RenameTable,
    AddColumn,
    DropColumn,
    RenameColumn,
    SelectFromTable,
    InsertIntoTable,
    DeleteFromTable,
    CreateView,
    DropView,
    SelectFromView,
    CreateViewWithSelectFromTable,
    CreateViewWithSelectFromView,
    GrantTablePrivilege,
    RevokeTablePrivilege,
}

impl Hook {
    /// All hooks, in declaration order
    pub const ALL: [Hook; 24] = [
        Hook::SetUser,
        Hook::SetSystemSessionProperty,
        Hook::SetCatalogSessionProperty,
        Hook::ShowSchemas,
        Hook::CreateSchema,
        Hook::DropSchema,
        Hook::RenameSchema,
        Hook::ShowTablesMetadata,
        Hook::CreateTable,
        Hook::DropTable,
        Hook::RenameTable,
        Hook::AddColumn,
        Hook::DropColumn,
        Hook::RenameColumn,
        Hook::SelectFromTable,
        Hook::InsertIntoTable,
        Hook::DeleteFromTable,
        Hook::CreateView,
        Hook::DropView,
        Hook::SelectFromView,
        Hook::CreateViewWithSelectFromTable,
        Hook::CreateViewWithSelectFromView,
        Hook::GrantTablePrivilege,
        Hook::RevokeTablePrivilege,
    ];
}

/// Decision rule for [`Hook`] checks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HookPolicy {
    /// Permit every hook without looking at the request
    #[default]
    AlwaysAllow,
}

impl HookPolicy {
    /// Decide a hook check
    pub fn decide(&self, hook: Hook) -> Result<()> {
        match self {
            HookPolicy::AlwaysAllow => {
                tracing::trace!("Allowing {:?} under always-allow policy", hook);
                Ok(())
            }
        }
    }
}
