//! Route definitions for the Breeze Drive HTTP API.
//!
//! All routes live under `/api`. The rate-limit middleware wraps the
//! whole API surface; admin tokens bypass it.

use axum::{
    Router,
    http::HeaderValue,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(folder_routes())
        .merge(file_routes())
        .merge(query_routes())
        .route("/health", get(handlers::health::health));

    let cors = build_cors_layer(&state.config.server.cors_origins);

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::rate_limit,
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/guest", post(handlers::auth::guest))
        .route("/auth/password", put(handlers::auth::change_password))
}

fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/folders", get(handlers::folder::list_root))
        .route("/folders", post(handlers::folder::create_folder))
        .route("/folders/{id}", get(handlers::folder::list_folder))
        .route("/nodes/{id}", delete(handlers::folder::delete_node))
}

fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files/upload", post(handlers::file::init_upload))
        .route("/files/{id}/finalize", post(handlers::file::finalize_upload))
        .route("/files/{id}/download", get(handlers::file::download))
}

fn query_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(handlers::query::search))
        .route("/recents", get(handlers::query::recents))
        .route("/starred", get(handlers::query::starred))
        .route("/trash", get(handlers::query::trash))
        .route("/nodes/{id}/star", post(handlers::query::toggle_star))
        .route("/nodes/{id}/trash", post(handlers::query::soft_delete))
        .route("/nodes/{id}/restore", post(handlers::query::restore))
}

fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new();
    }
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| o.parse::<HeaderValue>().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods(Any)
        .allow_headers(Any)
}
