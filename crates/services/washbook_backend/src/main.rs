// File: services/washbook_backend/src/main.rs
mod app_state;
mod service_factory;

use std::error::Error;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use washbook_config::load_config;

use crate::app_state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = Arc::new(load_config()?);
    // Flushes the file log on drop, so it must live until the server stops
    let _log_guard = washbook_common::init_with_config(&config.logging);

    let app_state = AppState::new(config.clone()).await?;
    let app = app_state.router()?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
