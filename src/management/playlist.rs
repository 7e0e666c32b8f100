use std::sync::Arc;

use tracing::info;

use crate::{
    Error, Res,
    config::Config,
    llm::{GroqClient, LanguageModel},
    spotify::{Recommender, SpotifyRecommender, SpotifyTokenSource},
    types::PlaylistResult,
    vibe::{VibeClassifier, map_features, validate_genres},
};

use super::TokenManager;

/// Maximum number of tracks handed back to the caller.
pub const MAX_TRACKS: usize = 10;

pub const NO_TRACKS_MESSAGE: &str =
    "No tracks found for this vibe. Try describing it differently.";

/// Runs the vibe → genres → features → recommendations pipeline.
#[derive(Clone)]
pub struct PlaylistGenerator {
    classifier: VibeClassifier,
    recommender: Arc<dyn Recommender>,
}

impl PlaylistGenerator {
    pub fn new(model: Arc<dyn LanguageModel>, recommender: Arc<dyn Recommender>) -> Self {
        Self {
            classifier: VibeClassifier::new(model),
            recommender,
        }
    }

    /// Wires the production clients. All of them share one HTTP client and
    /// the recommender owns the process-wide token cache.
    pub fn from_config(config: &Config) -> Res<Self> {
        let client = config.http_client()?;
        let tokens = Arc::new(TokenManager::new(Arc::new(SpotifyTokenSource::new(
            client.clone(),
            config,
        ))));

        Ok(Self::new(
            Arc::new(GroqClient::new(client.clone(), config)),
            Arc::new(SpotifyRecommender::new(client, config, tokens)),
        ))
    }

    pub async fn generate(&self, vibe: &str) -> Res<PlaylistResult> {
        let vibe = vibe.trim();
        if vibe.is_empty() {
            return Err(Error::Validation("Vibe is required".into()));
        }

        let classification = self.classifier.classify(vibe).await;
        let used_fallback = classification.is_fallback();
        let features = map_features(vibe);
        let genres = validate_genres(classification.tags());
        info!(?genres, used_fallback, ?features, "mapped vibe");

        let mut tracks = self.recommender.recommend(&genres, &features).await?;
        info!(count = tracks.len(), "found tracks");
        tracks.truncate(MAX_TRACKS);

        let error = tracks.is_empty().then(|| NO_TRACKS_MESSAGE.to_string());

        Ok(PlaylistResult {
            tracks,
            genres,
            vibe: vibe.to_string(),
            error,
            used_fallback,
        })
    }
}
