use backend_lib::{config::Settings, router, store::FlatFileStore, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing or empty token secret fails here, before any socket is
    // bound.
    let settings = Settings::load()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_level.clone())),
        )
        .init();

    // Open the credential store
    let store = FlatFileStore::open(&settings.data_dir)?;

    // Create application state
    let bind_addr = settings.bind_addr;
    let state = Arc::new(AppState::new(store, settings)?);

    // Create the router
    let app = router::create_router(state);

    // Start the server
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!(%bind_addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
