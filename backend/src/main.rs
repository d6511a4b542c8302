//! ExerciseDB backend
//!
//! Serves the exercise catalog and OTP authentication over HTTP.
//!
//! ## Architecture
//!
//! - Routes: request extraction, validation, envelopes
//! - Services: catalog and account rules
//! - Repositories: PostgreSQL or in-memory collections

use anyhow::Result;
use exercisedb_backend::{
    config::{AppConfig, StorageBackend},
    db, routes,
    state::AppState,
};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    init_tracing();

    let config = AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if AppConfig::is_production() { "production" } else { "development" },
        backend = ?config.database.backend,
        "Starting ExerciseDB backend"
    );

    if AppConfig::is_production() {
        config.validate_for_production()?;
    }

    let state = build_state(&config).await?;
    let app = routes::create_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn build_state(config: &AppConfig) -> Result<AppState> {
    match config.database.backend {
        StorageBackend::Postgres => {
            info!("Connecting to database...");
            let pool = db::connect(&config.database).await?;

            // Production runs migrations as a separate job
            if !AppConfig::is_production() {
                db::run_migrations(&pool).await?;
            }

            Ok(AppState::with_postgres(pool, config.clone()))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; data will not survive a restart");
            Ok(AppState::in_memory(config.clone()))
        }
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if AppConfig::is_production() {
            "exercisedb_backend=info,tower_http=info".into()
        } else {
            "exercisedb_backend=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if AppConfig::is_production() {
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
