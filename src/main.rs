//! Breeze Drive server entry point.
//!
//! Wires configuration, database, cache, object storage, services and the
//! HTTP router together, then runs until a shutdown signal arrives.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use drive_api::middleware::rate_limit::{RateLimiter, spawn_sweeper};
use drive_api::router::build_router;
use drive_api::state::AppState;
use drive_auth::jwt::JwtDecoder;
use drive_cache::memory::MemoryListingCache;
use drive_core::config::AppConfig;
use drive_core::error::AppError;
use drive_database::repositories::node::NodeRepository;
use drive_database::repositories::user::UserRepository;
use drive_entity::node::Node;
use drive_service::{
    AccountService, DeletionService, FolderService, NodeListingCache, QueryService, UploadService,
};
use drive_storage::s3::S3ObjectStore;
use drive_worker::jobs::reaper::Reaper;
use drive_worker::scheduler::CronScheduler;

#[tokio::main]
async fn main() {
    let env = std::env::var("DRIVE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Breeze Drive v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!("Connecting to database...");
    let db_pool = drive_database::connection::create_pool(&config.database).await?;

    tracing::info!("Running database migrations...");
    drive_database::migration::run_migrations(&db_pool).await?;
    tracing::info!("Database migrations complete");

    let listing_cache: Arc<NodeListingCache> = Arc::new(MemoryListingCache::<Node>::new());

    tracing::info!("Initializing object storage (bucket: {})...", config.storage.bucket);
    let object_store = Arc::new(S3ObjectStore::new(&config.storage).await?);

    let node_repo = Arc::new(NodeRepository::new(db_pool.clone()));
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));

    let accounts = Arc::new(AccountService::new(user_repo.clone(), &config.auth));
    let folders = Arc::new(FolderService::new(node_repo.clone(), listing_cache.clone()));
    let queries = Arc::new(QueryService::new(node_repo.clone(), listing_cache.clone()));
    let uploads = Arc::new(UploadService::new(
        node_repo.clone(),
        listing_cache.clone(),
        object_store.clone(),
        &config.storage,
    ));
    let deletions = Arc::new(DeletionService::new(
        node_repo.clone(),
        listing_cache.clone(),
        object_store.clone(),
    ));

    if let Some(admin) = accounts.bootstrap_admin().await? {
        tracing::info!(username = %admin.username, "Bootstrapped initial admin account");
    }

    let rate_limiter = Arc::new(RateLimiter::new(&config.rate_limit));
    let sweeper = spawn_sweeper(
        rate_limiter.clone(),
        Duration::from_secs(config.rate_limit.sweep_interval_seconds),
    );

    let mut scheduler = if config.worker.enabled {
        let reaper = Reaper::new(node_repo.clone(), config.worker.pending_ttl_hours);
        let scheduler = CronScheduler::new(&config.worker, reaper).await?;
        scheduler.start().await?;
        tracing::info!(schedule = %config.worker.reaper_schedule, "Pending-node reaper scheduled");
        Some(scheduler)
    } else {
        tracing::info!("Background worker disabled");
        None
    };

    let state = AppState {
        config: Arc::new(config.clone()),
        db_pool,
        jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
        accounts,
        folders,
        queries,
        uploads,
        deletions,
        rate_limiter,
    };

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Breeze Drive listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    sweeper.abort();
    if let Some(scheduler) = scheduler.as_mut() {
        scheduler.shutdown().await?;
    }

    tracing::info!("Breeze Drive shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
