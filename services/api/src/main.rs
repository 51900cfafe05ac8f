use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use campus_api::{
    AppState, config::AppConfig, create_router, credentials::PasswordHasher,
    repositories::postgres::MIGRATOR,
};
use common::database::{self, DatabaseConfig, init_pool};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting campus API service");

    let config = AppConfig::from_env()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    if config.run_migrations {
        database::run_migrations(&pool, &MIGRATOR).await?;
    } else {
        warn!("Skipping database migrations");
    }

    let state = AppState::postgres(pool.clone(), PasswordHasher::new(config.bcrypt_cost));
    let app = create_router(state, &config);

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("API service listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down gracefully...");
    pool.close().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
