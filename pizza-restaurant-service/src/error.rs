use axum::{http::StatusCode, response::Json};
use serde_json::json;
use tracing::{error, warn};

pub const RESTAURANT_NOT_FOUND: &str = "Restaurant not found";
pub const VALIDATION_ERRORS: &str = "validation errors";
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong.";

/// Reasons a `RestaurantPizza` creation request is rejected before anything
/// is written.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
    #[error("Price required")]
    MissingPrice,
    #[error("Price must be an integer greater than 0")]
    InvalidPrice,
    #[error("pizza_id must be an integer id")]
    InvalidPizzaId,
    #[error("restaurant_id must be an integer id")]
    InvalidRestaurantId,
    #[error("Pizza {0} does not exist")]
    UnknownPizza(i32),
    #[error("Restaurant {0} does not exist")]
    UnknownRestaurant(i32),
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Restaurant not found")]
    RestaurantNotFound,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("Connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("Validation failed: {0}")]
    Validation(ValidationError),
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::RestaurantNotFound => ApiError::NotFound(RESTAURANT_NOT_FOUND.to_string()),
            ServiceError::Validation(e) => ApiError::Validation(e),
            e => ApiError::InternalError(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(e)
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            ApiError::Validation(reason) => {
                warn!(%reason, "rejected request");
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "errors": [VALIDATION_ERRORS] }),
                )
            }
            ApiError::InternalError(detail) => {
                error!(%detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "errors": [SOMETHING_WENT_WRONG] }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::response::IntoResponse;

    use super::*;

    async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_carries_message() {
        let (status, body) = body_json(ServiceError::RestaurantNotFound.into()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Restaurant not found" }));
    }

    #[tokio::test]
    async fn test_validation_reason_is_not_disclosed() {
        let (status, body) = body_json(ValidationError::UnknownPizza(42).into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "errors": ["validation errors"] }));
    }

    #[tokio::test]
    async fn test_database_error_is_generic() {
        let error: ApiError = ServiceError::Database(diesel::result::Error::BrokenTransactionManager).into();
        let (status, body) = body_json(error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "errors": ["Something went wrong."] }));
    }
}
