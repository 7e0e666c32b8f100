//! Error types for the MoodRadio pipeline.
//!
//! Each variant corresponds to one failure condition of the playlist
//! pipeline. Classification failures never leave the classifier; everything
//! else propagates up to the HTTP handler, which maps it to a response.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Inbound payload is malformed or carries no usable vibe.
    #[error("{0}")]
    Validation(String),

    /// One or more required secrets are absent.
    #[error("Integration not configured. Please add {} environment variables.", .missing.join(", "))]
    Config { missing: Vec<&'static str> },

    /// A configuration value is present but unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The client-credentials exchange was rejected.
    #[error("Failed to get Spotify token (status {status})")]
    UpstreamAuth { status: u16, details: String },

    /// The language model call failed or produced nothing usable.
    #[error("Genre classification failed: {0}")]
    Classification(String),

    /// The recommendations endpoint answered with a non-success status.
    #[error("Failed to get Spotify recommendations (status {status})")]
    UpstreamRecommendation { status: u16, details: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Short machine-readable code, logged alongside each failure.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Validation(_) => "VALIDATION",
            Error::Config { .. } => "CONFIG",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::UpstreamAuth { .. } => "UPSTREAM_AUTH",
            Error::Classification(_) => "CLASSIFICATION",
            Error::UpstreamRecommendation { .. } => "UPSTREAM_RECOMMENDATION",
            Error::Http(_) => "HTTP",
            Error::Io(_) => "IO",
        }
    }

    /// Diagnostic text safe to hand back to the caller, if any.
    pub fn details(&self) -> Option<String> {
        match self {
            Error::UpstreamAuth { status, details }
            | Error::UpstreamRecommendation { status, details } => {
                if details.trim().is_empty() {
                    Some(format!("upstream status {status}"))
                } else {
                    Some(format!("upstream status {status}: {}", details.trim()))
                }
            }
            Error::Http(e) => Some(e.to_string()),
            Error::Io(e) => Some(e.to_string()),
            Error::Classification(msg) | Error::InvalidConfig(msg) => Some(msg.clone()),
            Error::Validation(_) | Error::Config { .. } => None,
        }
    }

    pub fn needs_setup(&self) -> bool {
        matches!(self, Error::Config { .. })
    }
}
