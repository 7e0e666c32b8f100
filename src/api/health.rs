use axum::{extract::State, response::Json};
use serde_json::{Value, json};

use crate::server::AppState;

/// `GET /health`
///
/// Always 200. `configured` is false while required secrets are absent, in
/// which case playlist requests answer with `needsSetup`.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let missing = state.config.missing_secrets();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "configured": missing.is_empty(),
        "missing": missing,
    }))
}
