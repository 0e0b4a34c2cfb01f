use std::collections::{HashMap, HashSet};

use crate::types::internal::Role;

/// Closed set of named permissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    // Data operations
    CreateRecord,
    EditRecord,
    ViewRecord,
    SearchRecord,
    CopyTable,

    // Archive operations
    ArchiveData,
    ViewArchive,
    ExportExcel,

    // Statistics
    ViewStatistics,
    ViewDashboard,

    // Settings management
    ManageSettings,
    DeactivateSettings,

    // User management
    ManageUsers,

    // Installment orders field-level split
    EditInstallmentBasic,
    EditInstallmentAdmin,
}

/// Finance records carry an attribute-based override on top of role
/// permissions, split by operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinanceOperation {
    View,
    Manage,
}

/// Static permission-to-roles table
///
/// Built once at startup and handed to the API layer; never mutated
/// afterwards. Any (role, permission) pair absent from the table denies.
pub struct PermissionMatrix {
    grants: HashMap<Permission, HashSet<Role>>,
}

impl PermissionMatrix {
    pub fn new(grants: HashMap<Permission, HashSet<Role>>) -> Self {
        Self { grants }
    }

    /// The production permission table
    pub fn default_matrix() -> Self {
        use Permission::*;
        use Role::*;

        let mut grants: HashMap<Permission, HashSet<Role>> = HashMap::new();
        let mut grant = |permission: Permission, roles: &[Role]| {
            grants.insert(permission, roles.iter().copied().collect());
        };

        grant(CreateRecord, &[Admin, Moderator, User]);
        grant(EditRecord, &[Admin, Moderator]);
        grant(ViewRecord, &[Admin, Moderator, User]);
        grant(SearchRecord, &[Admin, Moderator, User]);
        grant(CopyTable, &[Admin, Moderator, User]);

        grant(ArchiveData, &[Admin, Moderator]);
        grant(ViewArchive, &[Admin, Moderator]);
        grant(ExportExcel, &[Admin, Moderator]);

        grant(ViewStatistics, &[Admin, Moderator]);
        grant(ViewDashboard, &[Admin, Moderator]);

        grant(ManageSettings, &[Admin, Moderator]);
        grant(DeactivateSettings, &[Admin]);

        grant(ManageUsers, &[Admin]);

        grant(EditInstallmentBasic, &[Admin, Moderator, User]);
        grant(EditInstallmentAdmin, &[Admin, Moderator]);

        Self::new(grants)
    }

    /// Strict membership test; deny-by-default
    pub fn has_permission(&self, role: Role, permission: Permission) -> bool {
        self.grants
            .get(&permission)
            .is_some_and(|roles| roles.contains(&role))
    }
}

/// Attribute-based finance authorization
///
/// View is granted to every authenticated role. Manage is exactly the
/// per-user attribute, independent of role: an admin without the attribute
/// cannot manage finance records, a plain user with it can.
pub fn has_finance_access(role: Role, has_finance_attr: bool, op: FinanceOperation) -> bool {
    let _ = role;
    match op {
        FinanceOperation::View => true,
        FinanceOperation::Manage => has_finance_attr,
    }
}
