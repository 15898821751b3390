use eyre::Result;
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use video_pipeline::services::actions::MockActionProvider;
use video_service::{AppState, ServiceConfig, connect_store, create_router};

// Extract initialization logic to a testable function
pub fn initialize_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| eyre::eyre!("setting default subscriber failed: {}", e))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Received shutdown signal, initiating graceful shutdown...");
}

#[tokio::main]
async fn main() -> Result<()> {
    initialize_tracing()?;

    info!("Starting Auto Video Generator Service");

    let config = ServiceConfig::from_env()?;
    let addr = config.socket_addr();

    let store = connect_store(&config).await;
    let state = AppState::new(store.clone(), Arc::new(MockActionProvider), config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Starting HTTP server on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Closing record store...");
    store.close().await;

    info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_tracing_only_once() {
        assert!(initialize_tracing().is_ok());
        assert!(initialize_tracing().is_err());
    }
}
