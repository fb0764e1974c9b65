use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    /// `configured` or `missing_credential`.
    completion: String,
    model: Option<String>,
    prompt_version: Option<String>,
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let response = match state.auditor.as_ref() {
        Some(auditor) => HealthResponse {
            status: "OK".to_string(),
            completion: "configured".to_string(),
            model: Some(auditor.model().to_string()),
            prompt_version: Some(auditor.prompt_version().to_string()),
        },
        None => HealthResponse {
            status: "OK".to_string(),
            completion: "missing_credential".to_string(),
            model: None,
            prompt_version: None,
        },
    };
    debug!(completion = %response.completion, "health check");
    Json(response)
}
