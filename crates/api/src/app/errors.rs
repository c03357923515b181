use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use larder_core::DomainError;
use larder_infra::{RepositoryError, RepositoryErrorKind};

/// Message used for repository failures with no registered translation.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// A translated repository failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RegisteredException {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: &'static str,
}

/// Repository failure kinds with a user-facing translation.
const REGISTERED_EXCEPTIONS: &[(RepositoryErrorKind, RegisteredException)] = &[
    (
        RepositoryErrorKind::PermissionDenied,
        RegisteredException {
            status: StatusCode::FORBIDDEN,
            code: "permission_denied",
            message: "You do not have permission to perform this action.",
        },
    ),
    (
        RepositoryErrorKind::NotFound,
        RegisteredException {
            status: StatusCode::NOT_FOUND,
            code: "not_found",
            message: "No entry was found.",
        },
    ),
    (
        RepositoryErrorKind::Integrity,
        RegisteredException {
            status: StatusCode::BAD_REQUEST,
            code: "integrity_error",
            message: "An entry with the same unique values already exists.",
        },
    ),
];

const UNREGISTERED: RegisteredException = RegisteredException {
    status: StatusCode::INTERNAL_SERVER_ERROR,
    code: "unexpected_error",
    message: UNEXPECTED_ERROR_MESSAGE,
};

/// Look up the translation for a failure kind, falling back to the generic one.
pub fn registered_exception(kind: RepositoryErrorKind) -> RegisteredException {
    REGISTERED_EXCEPTIONS
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, e)| *e)
        .unwrap_or(UNREGISTERED)
}

pub fn repository_error_to_response(err: &RepositoryError) -> axum::response::Response {
    let translated = registered_exception(err.kind());
    (
        translated.status,
        axum::Json(json!({
            "error": translated.code,
            "message": translated.message,
            "exception": err.to_string(),
        })),
    )
        .into_response()
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
