use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::warn;

pub mod request;
pub mod response;

use crate::correction::CorrectionResult;
use crate::response::ApiResponse;
use crate::{ApiError, ApiState};

use self::request::CheckRequest;

static INVALID_BODY: &str =
    "Please send your writing as JSON, for example {\"text\": \"...\"}.";

/// Check a piece of writing
#[utoipa::path(
    post,
    path = "/check",
    tag = "check",
    request_body = CheckRequest,
    responses(
        (status = 200, description = "Writing was reviewed", body = CorrectionResult),
        (status = 400, description = "Empty or malformed submission", body = response::ErrorResponse),
        (status = 503, description = "No correction service could answer", body = response::ErrorResponse)
    )
)]
pub async fn post_check(
    State(state): State<ApiState>,
    body: Result<Json<CheckRequest>, JsonRejection>,
) -> ApiResponse<Json<CorrectionResult>> {
    let Json(body) = body.map_err(|e| {
        warn!(task = "check", err = %e, "rejected request body");
        ApiError::ClientError(INVALID_BODY.to_string())
    })?;

    let result = state.gateway.check(&body.text).await?;

    Ok(Json(result))
}
