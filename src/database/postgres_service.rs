// =============================================================================
// DATABASE SERVICE - Single PostgreSQL pool + schema initialization
// =============================================================================

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, Executor, PgPool};
use tracing::{info, log::LevelFilter};

use crate::config::environment::EnvironmentVariables;

// =============================================================================
// SQL CONSTANTS
// =============================================================================

/// Idempotent schema: tables, indexes and the updated_at trigger
const INIT_SCHEMA_SQL: &str = include_str!("sql/schema_init.sql");

// =============================================================================
// DATABASE SERVICE
// =============================================================================

/// Database service owning the application's PostgreSQL connection pool.
#[derive(Clone, Debug)]
pub struct DatabaseService {
    pool: PgPool,
    config: Arc<EnvironmentVariables>,
}

/// Snapshot of pool usage reported by the health endpoint
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct PoolStats {
    pub size: u32,
    pub idle: usize,
    pub max_connections: u32,
}

impl DatabaseService {
    /// Creates a new DatabaseService instance.
    /// The pool is lazy: no connection is opened until the first query.
    pub fn new(config: Arc<EnvironmentVariables>) -> Result<Self> {
        let connect_options: PgConnectOptions = Self::create_connect_options(&config)?;

        let pool: PgPool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_seconds))
            .idle_timeout(Duration::from_secs(30))
            .connect_lazy_with(connect_options);

        Ok(Self { pool, config })
    }

    /// Verifies connectivity and runs the schema initialization script.
    pub async fn initialize(&self) -> Result<()> {
        info!("Initializing DatabaseService...");

        self.ping().await.context("Failed to connect to the database")?;
        self.initialize_schema().await?;

        info!("DatabaseService initialized successfully");
        Ok(())
    }

    /// Gracefully shuts down the service.
    pub async fn shutdown(&self) {
        info!("Initiating DatabaseService shutdown...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }

    /// Returns the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trips a trivial query
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Database ping failed")?;
        Ok(())
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            size: self.pool.size(),
            idle: self.pool.num_idle(),
            max_connections: self.config.db_max_connections,
        }
    }
}

// =============================================================================
// INTERNAL HELPERS
// =============================================================================

impl DatabaseService {
    /// Parses DATABASE_URL and pins timezone and application name
    fn create_connect_options(config: &EnvironmentVariables) -> Result<PgConnectOptions> {
        let options: PgConnectOptions = PgConnectOptions::from_str(&config.database_url)
            .context("Invalid DATABASE_URL")?
            .log_statements(LevelFilter::Debug)
            .options([("timezone", "UTC")])
            .application_name("infog2-api");

        Ok(options)
    }

    /// Runs the initialization SQL
    async fn initialize_schema(&self) -> Result<()> {
        info!("Executing schema initialization...");

        self.pool
            .execute(INIT_SCHEMA_SQL)
            .await
            .context("Failed to execute schema initialization SQL")?;

        info!("Schema initialization completed");
        Ok(())
    }
}
