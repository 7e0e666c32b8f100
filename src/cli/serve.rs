use tracing_subscriber::EnvFilter;

use crate::{config::Config, error, server, success};

pub async fn serve(config: Config) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("moodradio=info,tower_http=info")),
        )
        .init();

    let addr = config.server_addr.clone();
    let state = match server::AppState::from_config(config) {
        Ok(state) => state,
        Err(e) => error!("Failed to initialize service: {}", e),
    };

    success!("MoodRadio listening on http://{}", addr);
    if let Err(e) = server::start_api_server(state).await {
        error!("Server stopped: {}", e);
    }
}
