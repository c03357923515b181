use axum::{routing::get, Router};

pub mod common;
pub mod cookbooks;
pub mod system;

/// Router for all authenticated (group-scoped) endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/groups/cookbooks", cookbooks::router())
}
