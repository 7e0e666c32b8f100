//! # Spotify Integration Module
//!
//! HTTP clients for the two Spotify services the playlist pipeline talks to.
//!
//! ```text
//! PlaylistGenerator
//!        ↓
//! SpotifyRecommender ── GET /recommendations (bearer)
//!        ↓
//! TokenManager (cache)
//!        ↓
//! SpotifyTokenSource ── POST /api/token (client credentials, basic auth)
//! ```
//!
//! ## Modules
//!
//! - [`auth`] - Client-credentials token exchange
//! - [`recommendations`] - Recommendation lookup and response normalization
//!
//! Every call is a single attempt; failures surface as [`crate::Error`]
//! variants carrying the upstream status and body for diagnostics.

pub mod auth;
pub mod recommendations;

pub use auth::SpotifyTokenSource;
pub use recommendations::{Recommender, SpotifyRecommender};
