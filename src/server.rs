use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{Error, Res, api, config::Config, management::PlaylistGenerator};

/// Shared state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub generator: Arc<PlaylistGenerator>,
}

impl AppState {
    pub fn new(config: Config, generator: PlaylistGenerator) -> Self {
        Self {
            config: Arc::new(config),
            generator: Arc::new(generator),
        }
    }

    pub fn from_config(config: Config) -> Res<Self> {
        let generator = PlaylistGenerator::from_config(&config)?;
        Ok(Self::new(config, generator))
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/api/playlist", post(api::playlist))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_api_server(state: AppState) -> Res<()> {
    let addr = SocketAddr::from_str(&state.config.server_addr).map_err(|e| {
        Error::InvalidConfig(format!(
            "cannot parse server address {}: {}",
            state.config.server_addr, e
        ))
    })?;

    let missing = state.config.missing_secrets();
    if !missing.is_empty() {
        tracing::warn!(?missing, "required secrets absent, requests will report needsSetup");
    }

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
