//! `larder-auth`: authentication/authorization boundary.
//!
//! Decoupled from HTTP and storage: the API crate turns a bearer token into
//! claims here and asks `authorize` before mutating anything.

pub mod authorize;
pub mod claims;
pub mod jwt;
pub mod permissions;
pub mod principal;
pub mod roles;

pub use authorize::{authorize, AuthzError, OperationAuthorization, Principal};
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use jwt::{Hs256JwtValidator, JwtError, JwtValidator};
pub use permissions::Permission;
pub use principal::{GroupMembership, PrincipalId};
pub use roles::Role;
