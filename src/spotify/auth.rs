use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{Client, header::AUTHORIZATION};

use crate::{
    Error, Res,
    config::{self, Config},
    management::TokenSource,
    types::IssuedToken,
};

/// Client-credentials exchange against the Spotify accounts service.
///
/// No user is involved: the service authenticates as itself with its client
/// id and secret and receives a short-lived bearer token.
#[derive(Debug, Clone)]
pub struct SpotifyTokenSource {
    client: Client,
    token_url: String,
    client_id: Option<String>,
    client_secret: Option<String>,
}

impl SpotifyTokenSource {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            token_url: config.spotify_token_url.clone(),
            client_id: config.spotify_client_id.clone(),
            client_secret: config.spotify_client_secret.clone(),
        }
    }
}

/// Value of the `Authorization` header for the exchange.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{client_id}:{client_secret}"))
    )
}

#[async_trait]
impl TokenSource for SpotifyTokenSource {
    async fn fetch_token(&self) -> Res<IssuedToken> {
        let (Some(client_id), Some(client_secret)) =
            (self.client_id.as_deref(), self.client_secret.as_deref())
        else {
            let mut missing = Vec::new();
            if self.client_id.is_none() {
                missing.push(config::SPOTIFY_CLIENT_ID);
            }
            if self.client_secret.is_none() {
                missing.push(config::SPOTIFY_CLIENT_SECRET);
            }
            return Err(Error::Config { missing });
        };

        let res = self
            .client
            .post(&self.token_url)
            .header(AUTHORIZATION, basic_auth_header(client_id, client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let details = res.text().await.unwrap_or_default();
            return Err(Error::UpstreamAuth {
                status: status.as_u16(),
                details,
            });
        }

        Ok(res.json::<IssuedToken>().await?)
    }
}
