use axum::{
    Json,
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};
use tracing::warn;

use crate::audit::dtos::ErrorResponse;

/// Fixed-window request counter keyed by client IP.
#[derive(Clone)]
pub struct RateLimit {
    store: Arc<DashMap<String, RateLimitData>>,
    last_sweep: Arc<Mutex<DateTime<Utc>>>,
    max_requests: u32,
    window_seconds: i64,
}

#[derive(Debug, Clone)]
struct RateLimitData {
    count: u32,
    window_start: DateTime<Utc>,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_seconds: i64) -> Self {
        Self {
            store: Arc::new(DashMap::new()),
            last_sweep: Arc::new(Mutex::new(Utc::now())),
            max_requests,
            window_seconds,
        }
    }

    /// Count one request for `key`; `false` once the window's budget is spent.
    pub fn check(&self, key: &str, now: DateTime<Utc>) -> bool {
        self.sweep_expired(now);

        let mut entry = self
            .store
            .entry(key.to_string())
            .or_insert_with(|| RateLimitData {
                count: 0,
                window_start: now,
            });
        let data = entry.value_mut();

        if now.signed_duration_since(data.window_start) >= Duration::seconds(self.window_seconds) {
            data.count = 0;
            data.window_start = now;
        }

        data.count += 1;
        data.count <= self.max_requests
    }

    /// Drops clients whose window has ended, at most once per window.
    fn sweep_expired(&self, now: DateTime<Utc>) {
        let window = Duration::seconds(self.window_seconds);
        // Another request is already sweeping
        let Ok(mut last_sweep) = self.last_sweep.try_lock() else {
            return;
        };
        if now.signed_duration_since(*last_sweep) < window {
            return;
        }
        *last_sweep = now;
        drop(last_sweep);

        self.store
            .retain(|_, data| now.signed_duration_since(data.window_start) < window);
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.store.len()
    }
}

/// IP-based rate limiting for the audit routes; each audit costs an outbound
/// fetch and a paid completion call.
pub async fn rate_limit_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(rate_limit): State<RateLimit>,
    req: Request,
    next: Next,
) -> Response {
    let ip = addr.ip().to_string();

    if !rate_limit.check(&ip, Utc::now()) {
        warn!(%ip, "rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ErrorResponse {
                error: "Rate limit exceeded".to_string(),
            }),
        )
            .into_response();
    }

    next.run(req).await
}
