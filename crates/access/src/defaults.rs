//! Seed permission templates per role.

use crate::grant::OperationRole;
use crate::permissions::{Action, Module, PermissionSet};

/// Produce the seed permission template for a role.
///
/// Used by the grant-management workflow when a grant is created or its
/// customization is reset. The resolver never consults this: the viewer
/// no-override baseline is hard-coded there, so a template change cannot
/// silently alter live resolution.
pub fn defaults_for(role: OperationRole) -> PermissionSet {
    let mut set = PermissionSet::new();
    for module in Module::ALL {
        for &action in module.actions() {
            let allowed = match role {
                OperationRole::Owner | OperationRole::Admin => true,
                OperationRole::Viewer => matches!(action, Action::View | Action::Export),
            };
            set.insert(module, action, allowed);
        }
    }
    set
}
