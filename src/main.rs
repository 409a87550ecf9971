use anyhow::Result;
use axum::serve;
use tokio::net::TcpListener;
use tracing::info;

use infog2_api::core::{init_tracing, setup_listener, shutdown_signal};
use infog2_api::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let state: AppState = AppState::from_env()?;
    info!("Configuration loaded: {:?}", state.environment);

    state.initialize().await?;

    let listener: TcpListener = setup_listener(&state.environment).await?;
    info!("Listening on {}", listener.local_addr()?);

    let app = create_app(state.clone());

    serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await?;

    Ok(())
}
