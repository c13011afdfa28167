use axum::{http::StatusCode, response::IntoResponse, Json};
use tracing::warn;

use crate::{check::response::ErrorResponse, correction::CheckError, ApiError};

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status_code, message) = match self {
            ApiError::ClientError(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound => {
                (StatusCode::NOT_FOUND, "Not found".to_string())
            }
            ApiError::Unavailable(message) => {
                (StatusCode::SERVICE_UNAVAILABLE, message)
            }
        };

        (status_code, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<CheckError> for ApiError {
    fn from(err: CheckError) -> Self {
        match err {
            CheckError::Validation => ApiError::ClientError(err.to_string()),
            CheckError::SecondaryMisconfigured(_) | CheckError::Unavailable => {
                warn!(task = "check", err = %err);
                ApiError::Unavailable(err.to_string())
            }
        }
    }
}

pub type ApiResponse<T> = Result<T, ApiError>;
