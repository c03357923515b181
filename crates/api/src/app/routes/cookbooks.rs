//! Group cookbooks: list, create, bulk update, get by id or slug, update, delete.
//!
//! Handlers are thin. The group always comes from the token, persistence is
//! the repository's job, and repository failures go through
//! `errors::repository_error_to_response`.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::{error, info};

use larder_cookbooks::{CookBook, CookBookKey, CreateCookBook, UpdateCookBook, order_by_position};
use larder_core::{CookBookId, GroupId};
use larder_infra::RepositoryError;

use crate::app::routes::common::Guarded;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::authz::{self, COOKBOOKS_READ, COOKBOOKS_WRITE};
use crate::context::{GroupContext, PrincipalContext};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_cookbooks).post(create_cookbook).put(update_many_cookbooks))
        .route(
            "/:item_id",
            get(get_cookbook).put(update_cookbook).delete(delete_cookbook),
        )
}

pub async fn list_cookbooks(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(group): Extension<GroupContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = require(&group, &principal, (), COOKBOOKS_READ) {
        return resp;
    }
    let group_id = group.group_id();

    let books = match services.cookbooks(group_id).get_all().await {
        Ok(b) => b,
        Err(e) => return repository_failure("list", group_id, e),
    };
    let books = order_by_position(books);

    match services.summaries(group_id, &books).await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => repository_failure("list", group_id, e),
    }
}

pub async fn create_cookbook(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(group): Extension<GroupContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<CreateCookBook>,
) -> axum::response::Response {
    let body = match require(&group, &principal, body, COOKBOOKS_WRITE) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    let group_id = group.group_id();

    let save = match body.into_save(group_id) {
        Ok(s) => s,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let book = match services.cookbooks(group_id).create(save).await {
        Ok(b) => b,
        Err(e) => return repository_failure("create", group_id, e),
    };
    info!(group_id = %group_id, cookbook_id = %book.id, slug = %book.slug, "cookbook created");

    match services.summary(group_id, &book).await {
        Ok(v) => (StatusCode::CREATED, Json(v)).into_response(),
        Err(e) => repository_failure("create", group_id, e),
    }
}

/// Apply each update in order. Not atomic: a failure part-way returns the
/// error and leaves earlier updates committed.
pub async fn update_many_cookbooks(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(group): Extension<GroupContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<Vec<UpdateCookBook>>,
) -> axum::response::Response {
    let body = match require(&group, &principal, body, COOKBOOKS_WRITE) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    let group_id = group.group_id();

    let mut updated = Vec::with_capacity(body.len());
    for item in body {
        match update_one(&services, group_id, item.id, item.data).await {
            Ok(book) => updated.push(dto::cookbook_to_json(&book)),
            Err(resp) => return resp,
        }
    }

    (StatusCode::OK, Json(updated)).into_response()
}

pub async fn get_cookbook(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(group): Extension<GroupContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(item_id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = require(&group, &principal, (), COOKBOOKS_READ) {
        return resp;
    }
    let group_id = group.group_id();
    let key = CookBookKey::parse(&item_id);

    let book = match services.cookbooks(group_id).get_one(&key).await {
        Ok(Some(b)) => b,
        Ok(None) => return not_found(),
        Err(e) => return repository_failure("get", group_id, e),
    };

    match services.expanded(group_id, &book).await {
        Ok(v) => (StatusCode::OK, Json(v)).into_response(),
        Err(e) => repository_failure("get", group_id, e),
    }
}

pub async fn update_cookbook(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(group): Extension<GroupContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(item_id): Path<String>,
    Json(body): Json<CreateCookBook>,
) -> axum::response::Response {
    let body = match require(&group, &principal, body, COOKBOOKS_WRITE) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    let group_id = group.group_id();

    let id: CookBookId = match item_id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let book = match update_one(&services, group_id, id, body).await {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    match services.summary(group_id, &book).await {
        Ok(v) => (StatusCode::OK, Json(v)).into_response(),
        Err(e) => repository_failure("update", group_id, e),
    }
}

pub async fn delete_cookbook(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(group): Extension<GroupContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(item_id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = require(&group, &principal, (), COOKBOOKS_WRITE) {
        return resp;
    }
    let group_id = group.group_id();

    let id: CookBookId = match item_id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let repo = services.cookbooks(group_id);
    match repo.get_one(&CookBookKey::Id(id)).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found(),
        Err(e) => return repository_failure("delete", group_id, e),
    }

    let book = match repo.delete(id).await {
        Ok(b) => b,
        Err(e) => return repository_failure("delete", group_id, e),
    };
    info!(group_id = %group_id, cookbook_id = %book.id, "cookbook deleted");

    match services.summary(group_id, &book).await {
        Ok(v) => (StatusCode::OK, Json(v)).into_response(),
        Err(e) => repository_failure("delete", group_id, e),
    }
}

/// Validate, check existence, then replace. Shared by single and bulk update.
async fn update_one(
    services: &AppServices,
    group_id: GroupId,
    id: CookBookId,
    data: CreateCookBook,
) -> Result<CookBook, axum::response::Response> {
    let save = data.into_save(group_id).map_err(errors::domain_error_to_response)?;

    let repo = services.cookbooks(group_id);
    match repo.get_one(&CookBookKey::Id(id)).await {
        Ok(Some(_)) => {}
        Ok(None) => return Err(not_found()),
        Err(e) => return Err(repository_failure("update", group_id, e)),
    }

    let book = repo
        .update(id, save)
        .await
        .map_err(|e| repository_failure("update", group_id, e))?;
    info!(group_id = %group_id, cookbook_id = %book.id, "cookbook updated");
    Ok(book)
}

fn require<T>(
    group: &GroupContext,
    principal: &PrincipalContext,
    payload: T,
    permission: &'static str,
) -> Result<T, axum::response::Response> {
    let op = Guarded::new(payload, permission);
    authz::authorize_operation(group, principal, &op)
        .map_err(|e| errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string()))?;
    Ok(op.inner)
}

fn not_found() -> axum::response::Response {
    errors::json_error(StatusCode::NOT_FOUND, "not_found", "cookbook not found")
}

fn repository_failure(operation: &'static str, group_id: GroupId, err: RepositoryError) -> axum::response::Response {
    error!(operation, group_id = %group_id, error = %err, "cookbook repository failure");
    errors::repository_error_to_response(&err)
}
