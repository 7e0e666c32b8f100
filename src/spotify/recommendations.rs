use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::{
    Error, Res,
    config::Config,
    management::TokenManager,
    types::{AudioFeatures, RecommendationsResponse, Track},
    vibe::genres::MAX_GENRES,
};

/// Upper bound on tracks requested from the recommendations endpoint.
pub const RECOMMENDATION_LIMIT: u32 = 20;

/// Looks up tracks for a set of seed genres and feature targets.
#[async_trait]
pub trait Recommender: Send + Sync {
    async fn recommend(&self, genres: &[String], features: &AudioFeatures) -> Res<Vec<Track>>;
}

/// Spotify `/recommendations` client.
pub struct SpotifyRecommender {
    client: Client,
    api_url: String,
    tokens: Arc<TokenManager>,
}

impl SpotifyRecommender {
    pub fn new(client: Client, config: &Config, tokens: Arc<TokenManager>) -> Self {
        Self {
            client,
            api_url: config.spotify_api_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }
}

/// Query parameters for one recommendations lookup.
pub fn recommendation_query(genres: &[String], features: &AudioFeatures) -> Vec<(&'static str, String)> {
    let seeds: Vec<&str> = genres.iter().take(MAX_GENRES).map(String::as_str).collect();
    vec![
        ("seed_genres", seeds.join(",")),
        ("limit", RECOMMENDATION_LIMIT.to_string()),
        ("target_energy", format!("{:.2}", features.energy)),
        ("target_valence", format!("{:.2}", features.valence)),
        ("target_danceability", format!("{:.2}", features.danceability)),
    ]
}

#[async_trait]
impl Recommender for SpotifyRecommender {
    async fn recommend(&self, genres: &[String], features: &AudioFeatures) -> Res<Vec<Track>> {
        let token = self.tokens.get_valid_token().await?;
        let query = recommendation_query(genres, features);
        debug!(?query, "requesting recommendations");

        let response = self
            .client
            .get(format!("{}/recommendations", self.api_url))
            .bearer_auth(token)
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                // token revoked upstream; the next request performs a fresh exchange
                self.tokens.invalidate().await;
            }
            let details = response.text().await.unwrap_or_default();
            return Err(Error::UpstreamRecommendation {
                status: status.as_u16(),
                details,
            });
        }

        let res = response.json::<RecommendationsResponse>().await?;

        Ok(res
            .tracks
            .unwrap_or_default()
            .into_iter()
            .map(Track::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_formats_targets_with_two_decimals() {
        let genres = vec!["chill".to_string(), "ambient".to_string()];
        let features = AudioFeatures {
            energy: 0.3,
            valence: 0.5,
            danceability: 0.8,
        };

        let query = recommendation_query(&genres, &features);
        assert_eq!(
            query,
            vec![
                ("seed_genres", "chill,ambient".to_string()),
                ("limit", "20".to_string()),
                ("target_energy", "0.30".to_string()),
                ("target_valence", "0.50".to_string()),
                ("target_danceability", "0.80".to_string()),
            ]
        );
    }

    #[test]
    fn query_never_seeds_more_than_five_genres() {
        let genres: Vec<String> = ["a", "b", "c", "d", "e", "f"].iter().map(|s| s.to_string()).collect();
        let query = recommendation_query(&genres, &AudioFeatures::default());
        assert_eq!(query[0].1, "a,b,c,d,e");
    }
}
