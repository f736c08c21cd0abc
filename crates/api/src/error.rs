use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use numisroma_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`sqlx::Error`] for storage
/// failures.
/// Every variant renders as `{ "error": <message>, "code": <CODE> }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(errors.to_string()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Database(err) => classify_sqlx_error(err),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    let message = err.to_string();
    match err {
        CoreError::Unauthenticated(msg) => {
            (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", msg.clone())
        }
        CoreError::SessionTerminated => {
            (StatusCode::UNAUTHORIZED, "SESSION_TERMINATED", message)
        }
        CoreError::InvalidCredentials => {
            (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS", message)
        }
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::IncorrectPassword => {
            (StatusCode::BAD_REQUEST, "INCORRECT_PASSWORD", message)
        }
        CoreError::CannotTerminateCurrent => {
            (StatusCode::BAD_REQUEST, "CANNOT_TERMINATE_CURRENT", message)
        }
        CoreError::InvalidOperation(msg) => {
            (StatusCode::BAD_REQUEST, "INVALID_OPERATION", msg.clone())
        }
        CoreError::NotFollowing => (StatusCode::BAD_REQUEST, "NOT_FOLLOWING", message),
        CoreError::AlreadyRegistered => (StatusCode::CONFLICT, "ALREADY_REGISTERED", message),
        CoreError::AlreadyFollowing => (StatusCode::CONFLICT, "ALREADY_FOLLOWING", message),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal error");
            internal()
        }
    }
}

/// Map a sqlx error onto a status, code, and message.
///
/// `RowNotFound` is a 404 and a unique violation on a `uq_*` constraint is a
/// 409. Anything else is logged and reported as a sanitized 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    if matches!(err, sqlx::Error::RowNotFound) {
        return (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        );
    }

    let duplicate = err
        .as_database_error()
        .filter(|db_err| db_err.is_unique_violation())
        .and_then(|db_err| db_err.constraint())
        .filter(|constraint| constraint.starts_with("uq_"));
    if let Some(constraint) = duplicate {
        return (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Duplicate value violates unique constraint: {constraint}"),
        );
    }

    tracing::error!(error = %err, "Database error");
    internal()
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
