//! Error responses for list endpoints

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::error::CompileError;

/// Errors a list request can end with
#[derive(Debug, Error)]
pub enum ServiceError {
    /// `filterBy` / `sortBy` rejected by the compiler
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Query execution failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ServiceError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Every compile error is a client-side validation failure
            ServiceError::Compile(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
}

impl From<&ServiceError> for ErrorResponse {
    fn from(err: &ServiceError) -> Self {
        let kind = match err {
            ServiceError::Compile(e) => Some(e.kind()),
            ServiceError::Database(_) => None,
        };
        let error = match err {
            // Driver messages stay in the logs
            ServiceError::Database(_) => "internal error".to_string(),
            ServiceError::Compile(e) => e.to_string(),
        };
        Self {
            error,
            code: err.status_code().as_u16(),
            kind,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        if let ServiceError::Database(ref e) = self {
            tracing::error!(error = %e, "List query failed");
        }
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;

    #[test]
    fn test_compile_errors_are_unprocessable() {
        let errors = [
            CompileError::MalformedExpression {
                param: "filterBy",
                input: "name".into(),
                expected: "field.value or field.operator.value",
            },
            CompileError::EmptyComponent {
                param: "sortBy",
                input: ".asc".into(),
            },
            CompileError::UnknownOperator("xx".into()),
            CompileError::UnknownField {
                entity: "boardgames".into(),
                field: "rating".into(),
            },
            CompileError::TypeMismatch {
                field: "name".into(),
                field_type: FieldType::String,
                reason: "comparison operators are not supported, use field.value",
            },
            CompileError::InvalidValueType {
                field: "price".into(),
                field_type: FieldType::Float,
                value: "abc".into(),
            },
            CompileError::InvalidDirection("sideways".into()),
            CompileError::NotSortable {
                field: "tags".into(),
            },
        ];

        for err in errors {
            let err = ServiceError::from(err);
            assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        }
    }

    #[test]
    fn test_error_body() {
        let err = ServiceError::from(CompileError::UnknownOperator("xx".into()));
        let body = ErrorResponse::from(&err);

        assert_eq!(body.code, 422);
        assert_eq!(body.kind, Some("unknown_operator"));
        assert!(body.error.contains("xx"));
    }

    #[test]
    fn test_database_errors_hide_details() {
        let err = ServiceError::from(sqlx::Error::RowNotFound);
        let body = ErrorResponse::from(&err);

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "internal error");
        assert_eq!(body.kind, None);
    }
}
