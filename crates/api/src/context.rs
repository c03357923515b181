use larder_auth::{PrincipalId, Role};
use larder_core::GroupId;

/// Group a request acts in, taken from the access token.
///
/// Immutable and present on every cookbook route.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GroupContext {
    group_id: GroupId,
}

impl GroupContext {
    pub fn new(group_id: GroupId) -> Self {
        Self { group_id }
    }

    pub fn group_id(&self) -> GroupId {
        self.group_id
    }
}

/// Authenticated identity + roles for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal_id: PrincipalId,
    roles: Vec<Role>,
}

impl PrincipalContext {
    pub fn new(principal_id: PrincipalId, roles: Vec<Role>) -> Self {
        Self { principal_id, roles }
    }

    pub fn principal_id(&self) -> PrincipalId {
        self.principal_id
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }
}
