use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(i64),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses.
///
/// Validation and database errors keep their source so the shared error
/// body carries field details and the connection/query distinction.
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            ProductError::Validation(errors) => AppError::ValidationError(errors),
            ProductError::Database(db_err) => AppError::Database(db_err),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductInput;
    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use sea_orm::ConnAcquireErr;
    use serde_json::Value;
    use validator::Validate;

    async fn body_of(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = ProductError::NotFound(7).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_validation_keeps_field_details() {
        let errors = ProductInput::new("  ", -1.0).validate().unwrap_err();
        let response = ProductError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_of(response).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert!(body["details"]["name"].is_array());
        assert!(body["details"]["price"].is_array());
    }

    #[tokio::test]
    async fn test_query_failure_maps_to_500() {
        let err: ProductError = DbErr::Custom("syntax error".into()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(response).await["error"], "DATABASE_ERROR");
    }

    #[tokio::test]
    async fn test_pool_exhaustion_maps_to_503() {
        let err: ProductError = DbErr::ConnectionAcquire(ConnAcquireErr::Timeout).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_of(response).await["error"], "DATABASE_CONNECTION");
    }
}
