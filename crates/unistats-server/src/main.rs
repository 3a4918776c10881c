mod config;

use axum::{Router, routing::get};
use config::AppConfig;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use unistats_api::{
    AppState, get_city, get_university, github_stats, health, list_cities, list_universities,
};
use unistats_db::{create_pool, run_migrations};
use unistats_github::GithubApiClient;

#[tokio::main]
async fn main() {
    // Initialize tracing (RUST_LOG, defaulting to info)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Install SQLite and Postgres drivers for sqlx::Any
    sqlx::any::install_default_drivers();

    // TLS provider for outbound GitHub requests
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    // Load configuration
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config.report.validate() {
        error!("Invalid report configuration: {}", e);
        std::process::exit(1);
    }

    info!(
        "Configuration loaded successfully, reporting on {}",
        config.report.slug()
    );

    // Create database connection pool
    let db_pool = match create_pool(&config.database.url, config.database.max_connections).await {
        Ok(pool) => {
            info!("Database connection pool created: {}", config.database.url);
            pool
        }
        Err(e) => {
            error!("Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    // Run database migrations
    if let Err(e) = run_migrations(&db_pool).await {
        error!("Failed to run database migrations: {}", e);
        std::process::exit(1);
    }
    info!("Database migrations completed successfully");

    // Create GitHub API client
    let github_client = match GithubApiClient::new(
        config.github.credentials(),
        config.github.api_url.as_deref(),
    ) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create GitHub API client: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState::new(db_pool, Arc::new(github_client), config.report.clone());

    // Build Axum router
    let app = Router::new()
        .route("/health", get(health))
        .route("/githubstats", get(github_stats))
        .route("/api/universities", get(list_universities))
        .route("/api/universities/{id}", get(get_university))
        .route("/api/cities", get(list_cities))
        .route("/api/cities/{id}", get(get_city))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("Server listening on http://{}", addr);

    // Run server with graceful shutdown
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    info!("Server shutdown complete");
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C), initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}
