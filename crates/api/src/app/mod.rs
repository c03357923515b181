//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: repository/catalog wiring and response assembly
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: JSON mapping helpers
//! - `errors.rs`: consistent error responses and repository error translation

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router.
///
/// `/health` is public; everything else requires a bearer token whose claims
/// supply the group.
pub fn build_app(services: Arc<AppServices>, jwt_secret: String) -> Router {
    let jwt = Arc::new(larder_auth::Hs256JwtValidator::new(jwt_secret.into_bytes()));
    let auth_state = middleware::AuthState { jwt };

    let protected = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
