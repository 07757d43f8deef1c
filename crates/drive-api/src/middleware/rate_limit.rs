//! Fixed-window rate limiter for non-admin callers.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use dashmap::DashMap;
use tracing::debug;

use drive_core::config::server::RateLimitConfig;
use drive_core::error::AppError;
use drive_entity::user::Role;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    started: Instant,
}

/// In-memory fixed-window limiter keyed by client IP.
///
/// Windows are counted from the first request in them. Expired windows
/// are dropped lazily on the next hit and eagerly by the periodic sweep,
/// which keeps the map bounded by the set of recently active clients.
#[derive(Debug)]
pub struct RateLimiter {
    windows: DashMap<String, Window>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    /// Create a limiter from configuration.
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            windows: DashMap::new(),
            max_requests: config.max_requests,
            window: Duration::from_secs(config.window_seconds),
        }
    }

    /// Count a request against the key. Returns `false` when the window
    /// is exhausted.
    pub fn check(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut entry = self.windows.entry(key.to_string()).or_insert(Window {
            count: 0,
            started: now,
        });

        if now.duration_since(entry.started) >= self.window {
            entry.count = 0;
            entry.started = now;
        }

        if entry.count >= self.max_requests {
            return false;
        }
        entry.count += 1;
        true
    }

    /// Drop every window that has fully elapsed.
    ///
    /// Removals are counted inside the retain pass; comparing map sizes
    /// before and after would race with concurrent inserts.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0;
        self.windows.retain(|_, w| {
            let live = now.duration_since(w.started) < self.window;
            if !live {
                removed += 1;
            }
            live
        });
        removed
    }

    /// Number of tracked windows.
    pub fn tracked(&self) -> usize {
        self.windows.len()
    }
}

/// Spawn the periodic sweep task for a limiter.
pub fn spawn_sweeper(
    limiter: Arc<RateLimiter>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await; // first tick fires immediately
        loop {
            ticker.tick().await;
            let dropped = limiter.sweep();
            if dropped > 0 {
                debug!(dropped, "Swept expired rate-limit windows");
            }
        }
    })
}

/// Axum middleware applying the limiter to every request that does not
/// carry a valid admin token.
pub async fn rate_limit(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    if is_admin(&state, &request) {
        return next.run(request).await;
    }

    let key = client_ip(&request).unwrap_or_else(|| addr.ip().to_string());
    if !state.rate_limiter.check(&key) {
        return ApiError(AppError::rate_limit("Too many requests")).into_response();
    }

    next.run(request).await
}

fn is_admin(state: &AppState, request: &Request) -> bool {
    request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .and_then(|token| state.jwt_decoder.decode(token).ok())
        .is_some_and(|claims| claims.role == Role::Admin)
}

fn client_ip(request: &Request) -> Option<String> {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
