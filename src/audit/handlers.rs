use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::{
    app_state::{AppState, MISSING_API_KEY_MESSAGE},
    audit::{
        dtos::{AuditRequest, AuditResponse, ErrorResponse},
        service::AuditError,
    },
    fetcher::FetchError,
    scrape::ScrapeError,
};

pub(crate) fn status_for(err: &AuditError) -> StatusCode {
    match err {
        AuditError::EmptyUrl
        | AuditError::Scrape(ScrapeError::Fetch(
            FetchError::InvalidUrl(_) | FetchError::UnsupportedScheme(_),
        )) => StatusCode::BAD_REQUEST,
        AuditError::Scrape(_) | AuditError::Completion { .. } => StatusCode::BAD_GATEWAY,
    }
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/v1/audit",
    tag = "audit",
    request_body = AuditRequest,
    responses(
        (status = 200, description = "Compliance report generated", body = AuditResponse),
        (status = 400, description = "Missing or invalid URL", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse),
        (status = 502, description = "Page could not be scraped or the completion service failed", body = ErrorResponse),
        (status = 503, description = "Completion service credential not configured", body = ErrorResponse)
    )
)]
pub async fn audit(State(state): State<AppState>, Json(payload): Json<AuditRequest>) -> Response {
    if let Err(error) = payload.validate() {
        return error_response(StatusCode::BAD_REQUEST, error);
    }

    let Some(auditor) = state.auditor.as_ref() else {
        return error_response(StatusCode::SERVICE_UNAVAILABLE, MISSING_API_KEY_MESSAGE);
    };

    match auditor.audit(&payload.url).await {
        Ok(report) => (StatusCode::OK, Json(AuditResponse::from(report))).into_response(),
        Err(err) => {
            warn!(url = %payload.url, error = %err, "audit failed");
            error_response(status_for(&err), err.to_string())
        }
    }
}
