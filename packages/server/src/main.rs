use std::net::SocketAddr;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mergington_server::config::AppConfig;
use mergington_server::state::AppState;
use mergington_server::{build_router, database, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let db = database::init_db(&config.database)
        .await
        .context("failed to initialize database")?;

    if config.seed.enabled {
        if seed::seed_activities(&db).await? {
            info!("Database was empty; seeded default activities");
        } else {
            info!("Activities already present; skipping seed");
        }
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid server host/port")?;

    let app = build_router(AppState { db, config });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running at http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
