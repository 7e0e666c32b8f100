//! Configuration management for MoodRadio.
//!
//! This module handles loading configuration values from environment
//! variables and `.env` files. Values are read once into an immutable
//! [`Config`] that is shared by reference with every component.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use crate::{Error, Res};

pub const GROQ_API_KEY: &str = "GROQ_API_KEY";
pub const SPOTIFY_CLIENT_ID: &str = "SPOTIFY_CLIENT_ID";
pub const SPOTIFY_CLIENT_SECRET: &str = "SPOTIFY_CLIENT_SECRET";

const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";
const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Loads environment variables from `.env` files.
///
/// Looks in the working directory first, then in the platform-specific
/// local data directory under `moodradio/.env`. Neither file is required.
/// `dotenv` never overrides variables already present in the process
/// environment, so real environment variables always win.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/moodradio/.env`
/// - macOS: `~/Library/Application Support/moodradio/.env`
/// - Windows: `%LOCALAPPDATA%/moodradio/.env`
///
/// # Errors
///
/// Returns an error if the data directory cannot be created.
pub async fn load_env() -> Res<()> {
    dotenv::dotenv().ok();

    let path = data_env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path).ok();
    }
    Ok(())
}

fn data_env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("moodradio/.env");
    path
}

/// Runtime configuration.
///
/// Secrets are optional here on purpose: a missing secret must surface as a
/// setup hint on the first request instead of aborting the process.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub groq_api_key: Option<String>,
    pub groq_api_url: String,
    pub groq_model: String,
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
    pub spotify_api_url: String,
    pub spotify_token_url: String,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: DEFAULT_SERVER_ADDRESS.to_string(),
            groq_api_key: None,
            groq_api_url: DEFAULT_GROQ_API_URL.to_string(),
            groq_model: DEFAULT_GROQ_MODEL.to_string(),
            spotify_client_id: None,
            spotify_client_secret: None,
            spotify_api_url: DEFAULT_SPOTIFY_API_URL.to_string(),
            spotify_token_url: DEFAULT_SPOTIFY_TOKEN_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// Call [`load_env`] first if `.env` files should be honoured.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let http_timeout = var("HTTP_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.http_timeout);

        Self {
            server_addr: var("SERVER_ADDRESS").unwrap_or(defaults.server_addr),
            groq_api_key: var(GROQ_API_KEY),
            groq_api_url: var("GROQ_API_URL").unwrap_or(defaults.groq_api_url),
            groq_model: var("GROQ_MODEL").unwrap_or(defaults.groq_model),
            spotify_client_id: var(SPOTIFY_CLIENT_ID),
            spotify_client_secret: var(SPOTIFY_CLIENT_SECRET),
            spotify_api_url: var("SPOTIFY_API_URL").unwrap_or(defaults.spotify_api_url),
            spotify_token_url: var("SPOTIFY_API_TOKEN_URL").unwrap_or(defaults.spotify_token_url),
            http_timeout,
        }
    }

    /// Names of the required secrets that are absent, in a stable order.
    pub fn missing_secrets(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.groq_api_key.is_none() {
            missing.push(GROQ_API_KEY);
        }
        if self.spotify_client_id.is_none() {
            missing.push(SPOTIFY_CLIENT_ID);
        }
        if self.spotify_client_secret.is_none() {
            missing.push(SPOTIFY_CLIENT_SECRET);
        }
        missing
    }

    pub fn ensure_configured(&self) -> Res<()> {
        let missing = self.missing_secrets();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::Config { missing })
        }
    }

    /// Builds the HTTP client shared by every outbound call.
    pub fn http_client(&self) -> Res<reqwest::Client> {
        let client = reqwest::Client::builder()
            .timeout(self.http_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(client)
    }
}

/// Reads an environment variable, treating blank values as absent.
fn var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
