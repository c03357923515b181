use larder_core::GroupId;
use thiserror::Error;

use crate::{GroupMembership, Permission, PrincipalId};

/// A principal resolved for one authorization decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub principal_id: PrincipalId,
    pub active_group_id: GroupId,
    pub membership: GroupMembership,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("group mismatch")]
    GroupMismatch,

    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

/// Implemented by operations that need permissions before they run.
pub trait OperationAuthorization {
    fn required_permissions(&self) -> &[Permission];
}

/// Check one permission for a principal in its active group.
///
/// Pure policy check: no IO, no panics.
pub fn authorize(principal: &Principal, required: &Permission) -> Result<(), AuthzError> {
    if principal.active_group_id != principal.membership.group_id {
        return Err(AuthzError::GroupMismatch);
    }

    let granted = principal
        .membership
        .permissions
        .iter()
        .any(|p| p.is_wildcard() || p == required);

    if granted {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(group_id: GroupId, permissions: Vec<Permission>) -> Principal {
        Principal {
            principal_id: PrincipalId::new(),
            active_group_id: group_id,
            membership: GroupMembership {
                group_id,
                roles: vec![],
                permissions,
            },
        }
    }

    #[test]
    fn wildcard_grants_everything() {
        let p = principal(GroupId::new(), vec![Permission::new("*")]);
        assert!(authorize(&p, &Permission::new("cookbooks.write")).is_ok());
    }

    #[test]
    fn explicit_permission_grants_only_itself() {
        let p = principal(GroupId::new(), vec![Permission::new("cookbooks.read")]);
        assert!(authorize(&p, &Permission::new("cookbooks.read")).is_ok());
        assert_eq!(
            authorize(&p, &Permission::new("cookbooks.write")),
            Err(AuthzError::Forbidden("cookbooks.write".to_string()))
        );
    }

    #[test]
    fn membership_in_another_group_is_rejected() {
        let mut p = principal(GroupId::new(), vec![Permission::new("*")]);
        p.active_group_id = GroupId::new();
        assert_eq!(
            authorize(&p, &Permission::new("cookbooks.read")),
            Err(AuthzError::GroupMismatch)
        );
    }
}
