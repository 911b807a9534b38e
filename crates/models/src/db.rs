//! Connection pool ownership.
//!
//! `Store` is built once at startup, handed to the services through axum state
//! and closed after the HTTP server has drained.

use std::time::Duration;

use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::info;

pub async fn connect_with_config(cfg: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    Database::connect(opts).await
}

#[derive(Clone, Debug)]
pub struct Store {
    conn: DatabaseConnection,
}

impl Store {
    pub async fn open(cfg: &DatabaseConfig) -> anyhow::Result<Self> {
        let conn = connect_with_config(cfg).await?;
        info!(max_connections = cfg.max_connections, backend = ?conn.get_database_backend(), "database pool ready");
        Ok(Self { conn })
    }

    /// Fresh in-memory SQLite store with the schema applied.
    pub async fn open_in_memory() -> anyhow::Result<Self> {
        let store = Self::open(&DatabaseConfig::in_memory()).await?;
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<(), DbErr> {
        migration::Migrator::up(&self.conn, None).await?;
        info!("database migrations applied");
        Ok(())
    }

    pub fn conn(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Close every pooled connection. Clones held elsewhere become unusable.
    pub async fn close(self) -> Result<(), DbErr> {
        self.conn.close().await?;
        info!("database pool closed");
        Ok(())
    }
}
