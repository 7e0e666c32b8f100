use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{Value, json};
use tracing::{error, info, warn};

use crate::{Error, server::AppState, types::PlaylistResult};

/// `POST /api/playlist`
///
/// Expects `{ "vibe": string }` and answers with the generated playlist.
/// Every failure is mapped to a response exactly once, here.
pub async fn playlist(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PlaylistResult>, Error> {
    let vibe = extract_vibe(payload)?;

    state.config.ensure_configured()?;

    info!(vibe = %vibe, "generating playlist");
    let result = state.generator.generate(&vibe).await?;
    Ok(Json(result))
}

fn extract_vibe(payload: Result<Json<Value>, JsonRejection>) -> Result<String, Error> {
    let Json(body) = payload.map_err(|e| Error::Validation(format!("Invalid request body: {}", e.body_text())))?;

    body.get("vibe")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|vibe| !vibe.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::Validation("Vibe is required".into()))
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Error::Validation(message) => {
                warn!(code = self.code(), "{}", message);
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            Error::Config { missing } => {
                error!(code = self.code(), ?missing, "service not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": self.to_string(), "needsSetup": true }),
                )
            }
            Error::UpstreamAuth { .. } | Error::UpstreamRecommendation { .. } => {
                error!(code = self.code(), details = ?self.details(), "{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": self.to_string(), "details": self.details() }),
                )
            }
            _ => {
                error!(code = self.code(), error = %self, "playlist generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Failed to generate playlist", "details": self.details() }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
