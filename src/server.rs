use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::sync::Mutex;

use crate::{Error, Result, api, config, types::PkceToken};

pub fn router(state: Arc<Mutex<Option<PkceToken>>>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)))
}

/// Serves the OAuth callback on [`config::server_addr`] until the process ends.
pub async fn start_api_server(state: Arc<Mutex<Option<PkceToken>>>) -> Result<()> {
    let addr = SocketAddr::from_str(&config::server_addr())
        .map_err(|e| Error::Config(format!("Failed to parse server address: {}", e)))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}
