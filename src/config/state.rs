// Application state shared by every handler

use std::sync::Arc;
use crate::auth::jwt::JwtManager;
use crate::config::environment::EnvironmentVariables;
use crate::database::DatabaseService;

#[derive(Debug, Clone)]
pub struct AppState {
    pub environment: Arc<EnvironmentVariables>,
    pub database: DatabaseService,
    pub jwt: JwtManager,
}

impl AppState {
    /// Builds the state from an already loaded configuration.
    /// The database pool connects lazily, so this never touches the network.
    pub fn new(environment: EnvironmentVariables) -> anyhow::Result<Self> {
        let environment_arc: Arc<EnvironmentVariables> = Arc::new(environment);

        let database: DatabaseService = DatabaseService::new(environment_arc.clone())?;
        let jwt: JwtManager = JwtManager::new(
            environment_arc.secret_key.as_bytes(),
            environment_arc.algorithm,
            environment_arc.access_token_expire_minutes,
        )?;

        Ok(Self {
            environment: environment_arc,
            database,
            jwt,
        })
    }

    /// Loads the configuration from the environment and builds the state
    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(EnvironmentVariables::load()?)
    }

    /// Runs schema initialization against the database
    pub async fn initialize(&self) -> anyhow::Result<()> {
        self.database.initialize().await?;
        tracing::info!("Services initialized successfully");
        Ok(())
    }

    /// Gracefully shutdown all database connections
    pub async fn shutdown(&self) {
        self.database.shutdown().await;
    }
}
