use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::AppError;
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::{ValidationError, ValidationErrors};

/// Body of a 500 caused by a storage failure
#[derive(Debug, Serialize, ToSchema)]
pub struct InternalErrorBody {
    #[schema(example = "Internal server error")]
    pub error: &'static str,
}

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(i32),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Constraint violation: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<DbErr> for ProductError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg))
            | Some(SqlErr::ForeignKeyConstraintViolation(msg)) => ProductError::Conflict(msg),
            _ => ProductError::Database(err.to_string()),
        }
    }
}

impl From<ValidationErrors> for ProductError {
    fn from(err: ValidationErrors) -> Self {
        ProductError::Validation(err.to_string())
    }
}

impl From<ValidationError> for ProductError {
    fn from(err: ValidationError) -> Self {
        ProductError::Validation(err.to_string())
    }
}

/// Missing products answer with plain text and storage failures with a bare
/// `{"error": ...}` body; existing clients match on both. Client errors use
/// the structured [`AppError`] envelope.
impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        match self {
            ProductError::NotFound(_) => {
                (StatusCode::NOT_FOUND, "product not found").into_response()
            }
            ProductError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(InternalErrorBody {
                    error: "Internal server error",
                }),
            )
                .into_response(),
            ProductError::Validation(msg) => AppError::BadRequest(msg).into_response(),
            ProductError::Conflict(msg) => AppError::Conflict(msg).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::json;

    async fn body_bytes(response: Response) -> Vec<u8> {
        response.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    #[tokio::test]
    async fn test_not_found_is_plain_text() {
        let response = ProductError::NotFound(9).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_bytes(response).await, b"product not found");
    }

    #[tokio::test]
    async fn test_database_error_hides_details() {
        let response = ProductError::Database("connection refused".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body, json!({ "error": "Internal server error" }));
    }

    #[tokio::test]
    async fn test_conflict_uses_structured_body() {
        let response = ProductError::Conflict("duplicate key".into()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["error"], "CONFLICT");
    }

    #[test]
    fn test_db_err_without_constraint_is_database_error() {
        let err: ProductError = DbErr::Custom("timeout".into()).into();
        assert!(matches!(err, ProductError::Database(msg) if msg.contains("timeout")));
    }

    #[tokio::test]
    async fn test_validation_is_bad_request() {
        let response = ProductError::Validation("price".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
