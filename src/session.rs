use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, Transaction};

use crate::config::StoreConfig;
use crate::repository::StoreError;

/// Process-wide handle to the Postgres pool. Built once in `main`, cloned into
/// the repository, and closed once after the server has stopped.
#[derive(Debug, Clone)]
pub struct SessionFactory {
    pool: PgPool,
}

impl SessionFactory {
    pub async fn connect(url: &str, config: &StoreConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect(url)
            .await?;
        log::info!("Connected to PostgreSQL");

        let factory = Self { pool };
        if config.run_migrations {
            factory.migrate().await?;
        }
        Ok(factory)
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|err| StoreError::Migration(err.to_string()))?;
        log::info!("Database migrations applied");
        Ok(())
    }

    /// A pooled connection for a single read. Returned to the pool on drop.
    pub async fn open_session(&self) -> Result<PoolConnection<Postgres>, StoreError> {
        Ok(self.pool.acquire().await?)
    }

    /// A unit of work. Rolled back on drop unless committed.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, StoreError> {
        Ok(self.pool.begin().await?)
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    pub async fn close(&self) {
        self.pool.close().await;
        log::info!("Closed PostgreSQL pool");
    }
}
