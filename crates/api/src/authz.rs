//! Permission checks at the handler boundary.

use larder_auth::{AuthzError, GroupMembership, OperationAuthorization, Permission, Principal, Role, authorize};

use crate::context::{GroupContext, PrincipalContext};

pub const COOKBOOKS_READ: &str = "cookbooks.read";
pub const COOKBOOKS_WRITE: &str = "cookbooks.write";

/// Check every permission an operation requires in the current request context.
pub fn authorize_operation<O: OperationAuthorization>(
    group: &GroupContext,
    principal: &PrincipalContext,
    operation: &O,
) -> Result<(), AuthzError> {
    let membership = GroupMembership {
        group_id: group.group_id(),
        roles: principal.roles().to_vec(),
        permissions: permissions_from_roles(principal.roles()),
    };

    let principal = Principal {
        principal_id: principal.principal_id(),
        active_group_id: group.group_id(),
        membership,
    };

    for perm in operation.required_permissions() {
        authorize(&principal, perm)?;
    }

    Ok(())
}

/// Static role → permission policy.
///
/// `admin` gets everything, `editor` reads and writes cookbooks, `viewer`
/// only reads. Unknown roles grant nothing.
pub fn permissions_from_roles(roles: &[Role]) -> Vec<Permission> {
    let mut perms: Vec<Permission> = Vec::new();
    for role in roles {
        let granted: &[&'static str] = match role.as_str() {
            "admin" => return vec![Permission::new(Permission::WILDCARD)],
            "editor" => &[COOKBOOKS_READ, COOKBOOKS_WRITE],
            "viewer" => &[COOKBOOKS_READ],
            _ => &[],
        };
        for name in granted {
            let perm = Permission::new(*name);
            if !perms.contains(&perm) {
                perms.push(perm);
            }
        }
    }
    perms
}
