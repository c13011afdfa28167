use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::ApiState;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Providers in the order they are tried.
    pub providers: Vec<String>,
}

/// Liveness and provider chain
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn get_health(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        providers: state
            .gateway
            .providers()
            .iter()
            .map(|name| name.to_string())
            .collect(),
    })
}
