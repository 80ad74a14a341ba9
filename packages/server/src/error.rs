use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::storage::StorageError;
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `TOKEN_MISSING`,
    /// `TOKEN_INVALID`, `PERMISSION_DENIED`, `NOT_FOUND`, `UNIQUE_CONFLICT`,
    /// `CONFLICT`, `UPSTREAM_ERROR`, `INTERNAL_ERROR`.
    #[schema(example = "UNIQUE_CONFLICT")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Name must be unique.")]
    pub message: String,
    /// Offending request field (camelCase), present for `UNIQUE_CONFLICT`.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "name")]
    pub field: Option<String>,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    TokenMissing,
    TokenInvalid,
    PermissionDenied,
    NotFound(String),
    /// A uniqueness constraint rejected the write. `field` is the camelCase
    /// request field the constraint guards.
    UniqueConflict {
        field: String,
    },
    /// The row is still referenced by another record.
    Conflict(String),
    /// The blob store failed.
    Upstream(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        let (status, code, message, field) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg, None),
            AppError::TokenMissing => (
                StatusCode::UNAUTHORIZED,
                "TOKEN_MISSING",
                "Authentication required".into(),
                None,
            ),
            AppError::TokenInvalid => (
                StatusCode::UNAUTHORIZED,
                "TOKEN_INVALID",
                "Invalid or expired token".into(),
                None,
            ),
            AppError::PermissionDenied => (
                StatusCode::FORBIDDEN,
                "PERMISSION_DENIED",
                "Insufficient permissions".into(),
                None,
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            AppError::UniqueConflict { field } => (
                StatusCode::CONFLICT,
                "UNIQUE_CONFLICT",
                format!("{} must be unique.", title_case(&field)),
                Some(field),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg, None),
            AppError::Upstream(detail) => {
                tracing::error!("Blob store error: {}", detail);
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "Image storage is unavailable".into(),
                    None,
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An unexpected error occurred".into(),
                    None,
                )
            }
        };
        (
            status,
            ErrorBody {
                code,
                message,
                field,
            },
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                match constraint_name(&detail).and_then(constraint_field) {
                    Some(field) => AppError::UniqueConflict { field },
                    None => AppError::Internal(detail),
                }
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                if detail.contains("update or delete on table") {
                    AppError::Conflict("Record is still referenced by other records".into())
                } else {
                    AppError::Validation("Referenced record does not exist".into())
                }
            }
            _ => match err {
                DbErr::RecordNotFound(msg) => AppError::NotFound(msg),
                DbErr::RecordNotUpdated => AppError::NotFound("Record not found".into()),
                other => AppError::Internal(other.to_string()),
            },
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidKey(msg) => AppError::Validation(msg),
            other => AppError::Upstream(other.to_string()),
        }
    }
}

/// Extract the quoted constraint name from a PostgreSQL violation message,
/// e.g. `duplicate key value violates unique constraint "colours__name__key"`.
fn constraint_name(detail: &str) -> Option<&str> {
    let start = detail.find("constraint \"")? + "constraint \"".len();
    let rest = &detail[start..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}

/// Map a `<table>__<column_words>__key` constraint name to its camelCase field.
fn constraint_field(name: &str) -> Option<String> {
    let mut parts = name.split("__");
    let (_table, column, suffix) = (parts.next()?, parts.next()?, parts.next()?);
    if suffix != "key" || parts.next().is_some() || column.is_empty() {
        return None;
    }

    let mut field = String::with_capacity(column.len());
    for (i, word) in column.split('_').filter(|w| !w.is_empty()).enumerate() {
        if i == 0 {
            field.push_str(word);
        } else {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                field.extend(first.to_uppercase());
                field.push_str(chars.as_str());
            }
        }
    }
    Some(field)
}

/// `orderNum` -> `Order Num`.
fn title_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for (i, c) in field.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            out.push(' ');
            out.push(c);
        } else {
            out.push(c);
        }
    }
    out
}
