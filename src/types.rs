use serde::{Deserialize, Serialize};
use tabled::Tabled;

pub const UNKNOWN_TRACK: &str = "Unknown Track";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Token as issued by the client-credentials exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: u64,
}

/// Audio-feature targets passed to the recommendations endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub energy: f64,
    pub valence: f64,
    pub danceability: f64,
}

impl Default for AudioFeatures {
    fn default() -> Self {
        Self {
            energy: 0.5,
            valence: 0.5,
            danceability: 0.5,
        }
    }
}

/// Track as returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub artist: String,
    pub url: String,
    pub preview_url: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistRequest {
    pub vibe: String,
}

/// Result of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistResult {
    pub tracks: Vec<Track>,
    pub genres: Vec<String>,
    pub vibe: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
    /// Whether the genres came from the offline heuristic.
    #[serde(skip)]
    pub used_fallback: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationsResponse {
    #[serde(default)]
    pub tracks: Option<Vec<UpstreamTrack>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamTrack {
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Option<Vec<Option<UpstreamArtist>>>,
    pub external_urls: Option<ExternalUrls>,
    pub preview_url: Option<String>,
    pub album: Option<UpstreamAlbum>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamArtist {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamAlbum {
    #[serde(default)]
    pub images: Option<Vec<Option<UpstreamImage>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamImage {
    pub url: Option<String>,
}

impl From<UpstreamTrack> for Track {
    fn from(track: UpstreamTrack) -> Self {
        let artist = track
            .artists
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .filter_map(|a| a.name)
            .filter(|name| !name.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        let image = track
            .album
            .and_then(|album| album.images)
            .and_then(|images| images.into_iter().flatten().find_map(|image| image.url));

        Track {
            name: track
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_TRACK.to_string()),
            artist: if artist.is_empty() {
                UNKNOWN_ARTIST.to_string()
            } else {
                artist
            },
            url: track
                .external_urls
                .and_then(|urls| urls.spotify)
                .unwrap_or_default(),
            preview_url: track.preview_url,
            image,
        }
    }
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub name: String,
    pub artist: String,
    pub url: String,
}

impl From<&Track> for TrackTableRow {
    fn from(track: &Track) -> Self {
        TrackTableRow {
            name: track.name.clone(),
            artist: track.artist.clone(),
            url: track.url.clone(),
        }
    }
}
