use larder_auth::{OperationAuthorization, Permission};

/// Pairs a request payload with the permissions needed to act on it.
pub struct Guarded<T> {
    pub inner: T,
    pub required: Vec<Permission>,
}

impl<T> Guarded<T> {
    pub fn new(inner: T, permission: &'static str) -> Self {
        Self {
            inner,
            required: vec![Permission::new(permission)],
        }
    }
}

impl<T> OperationAuthorization for Guarded<T> {
    fn required_permissions(&self) -> &[Permission] {
        &self.required
    }
}
