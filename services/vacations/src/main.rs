use std::sync::Arc;

use anyhow::Result;
use common::{
    cache::{RedisConfig, RedisPool},
    database::{DatabaseConfig, health_check, init_pool, run_migrations},
};
use tokio::net::TcpListener;
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

use vacations::{
    MIGRATOR,
    config::ServerConfig,
    routes,
    session::{RedisSessionStore, SessionManager},
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_max_level(Level::INFO)
        .init();

    info!("Starting vacations service");

    let server_config = ServerConfig::from_env()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    run_migrations(&pool, &MIGRATOR).await?;

    // Sessions live in Redis
    let redis_config = RedisConfig::from_env()?;
    let redis_pool = RedisPool::new(&redis_config).await?;
    if !redis_pool.health_check().await.unwrap_or(false) {
        warn!("Redis is not reachable yet; logins will fail until it is");
    }

    let sessions = SessionManager::new(
        Arc::new(RedisSessionStore::new(redis_pool)),
        server_config.session_settings(),
    );
    let app_state = AppState::with_pool(pool, sessions);

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = TcpListener::bind(&server_config.bind_address).await?;
    info!("Vacations service listening on {}", server_config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
