use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    app_state::AppState,
    audit::{self, dtos},
    health,
    middleware::{RateLimit, rate_limit_middleware},
};

#[derive(OpenApi)]
#[openapi(
    info(title = "ZeroWash", description = "Green Claims compliance audits for web pages"),
    paths(audit::handlers::audit, health::health_check),
    components(schemas(
        dtos::AuditRequest,
        dtos::AuditResponse,
        dtos::ErrorResponse,
        health::HealthResponse
    )),
    tags(
        (name = "audit", description = "Scrape a page and audit its environmental claims"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

/// Full application router. Serve it with connect info so the rate limiter
/// can see client addresses.
pub fn router(state: AppState) -> Router {
    let rate_limit = RateLimit::new(
        state.config.rate_limit_max(),
        state.config.rate_limit_window_secs(),
    );

    let audit_routes = Router::new()
        .route("/audit", post(audit::pages::audit_page))
        .route("/v1/audit", post(audit::handlers::audit))
        .route_layer(from_fn_with_state(rate_limit, rate_limit_middleware));

    Router::new()
        .route("/", get(audit::pages::index))
        .route("/healthz", get(health::health_check))
        .merge(audit_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}
