use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::info;

use crate::config::DatabaseConfig;

/// Returns true for `sqlite:` URLs.
pub fn is_sqlite(url: &str) -> bool {
    url.starts_with("sqlite:")
}

pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.clone());

    if is_sqlite(&config.url) {
        // SQLite has no row locks; a single connection serializes every
        // transaction so signup checks and writes cannot interleave.
        opt.max_connections(1)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(8))
            .acquire_timeout(Duration::from_secs(8))
            .sqlx_logging(false);
    } else {
        opt.max_connections(config.max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(8))
            .acquire_timeout(Duration::from_secs(8))
            .idle_timeout(Duration::from_secs(60))
            .sqlx_logging(false);
    }

    let db = Database::connect(opt).await?;
    db.get_schema_registry("mergington_server::entity::*")
        .sync(&db)
        .await?;

    info!(backend = ?db.get_database_backend(), "Database schema ready");

    Ok(db)
}
