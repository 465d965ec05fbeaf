use std::collections::BTreeMap;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::domain::DomainError;

/// Field name to human readable messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

const REDACTED_DETAIL: &str = "Unexpected error, please try again later";

/// Cause of a 500, attached to the response extensions. The body stays redacted
/// unless the app runs in debug mode (see `app::expose_internal_detail`).
#[derive(Debug, Clone)]
pub struct InternalDetail(pub String);

#[derive(Debug, Error)]
pub enum AppError {
    #[error("The given data was invalid")]
    Validation(FieldErrors),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidState(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("ORM error: {0}")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Single-field validation failure.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.into(), vec![message.into()]);
        AppError::Validation(errors)
    }

    pub fn not_found(what: &str) -> Self {
        AppError::NotFound(format!("{what} not found"))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidState(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::DbError(_) | AppError::OrmError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::InvalidState(err.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        collect_validation_errors(None, &errors, &mut fields);
        AppError::Validation(fields)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => AppError::field("body", err.body_text()),
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::field("query", rejection.body_text())
    }
}

fn collect_validation_errors(prefix: Option<&str>, errors: &ValidationErrors, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{field}"),
            None => field.to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                let messages = out.entry(path).or_default();
                for err in list {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid ({})", err.code));
                    messages.push(message);
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_validation_errors(Some(&path), nested, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_validation_errors(Some(&format!("{path}.{index}")), nested, out);
                }
            }
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub errors: FieldErrors,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (message, errors) = match self {
            AppError::Validation(fields) => ("The given data was invalid".to_string(), fields),
            AppError::Unauthorized(msg) => keyed("authentication", msg),
            AppError::Forbidden(msg) => keyed("authorization", msg),
            AppError::NotFound(msg) => keyed("resource", msg),
            AppError::InvalidState(msg) => keyed("state", msg),
            AppError::BadRequest(msg) => keyed("request", msg),
            internal => {
                tracing::error!(error = %internal, "request failed");
                let mut response =
                    (status, axum::Json(ErrorResponse::internal(REDACTED_DETAIL))).into_response();
                response
                    .extensions_mut()
                    .insert(InternalDetail(internal.to_string()));
                return response;
            }
        };

        let body = ErrorResponse {
            success: false,
            message,
            errors,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl ErrorResponse {
    /// Body of a 500 carrying `detail` under `system`.
    pub fn internal(detail: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert("system".into(), vec![detail.into()]);
        Self {
            success: false,
            message: "Internal Server Error".into(),
            errors,
        }
    }
}

fn keyed(key: &str, message: String) -> (String, FieldErrors) {
    let mut errors = FieldErrors::new();
    errors.insert(key.to_string(), vec![message.clone()]);
    (message, errors)
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn domain_errors_map_to_bad_request() {
        let err: AppError = DomainError::ArtistNotPending.into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[test]
    fn validation_errors_are_keyed_by_field() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "price",
            ValidationError::new("range").with_message("Price must be between 500 and 10000".into()),
        );
        errors.add("title", ValidationError::new("length"));

        let AppError::Validation(fields) = AppError::from(errors) else {
            panic!("expected validation error");
        };
        assert_eq!(fields["price"], vec!["Price must be between 500 and 10000".to_string()]);
        assert_eq!(fields["title"], vec!["title is invalid (length)".to_string()]);
    }

    #[test]
    fn internal_error_body_is_redacted_and_detail_kept_aside() {
        let response = AppError::Internal(anyhow::anyhow!("pool exhausted")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let detail = response.extensions().get::<InternalDetail>().expect("detail");
        assert!(detail.0.contains("pool exhausted"));
    }

    #[test]
    fn internal_errors_are_server_errors() {
        let err = AppError::Internal(anyhow::anyhow!("boom"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            AppError::Unauthorized("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::field("email", "taken").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
