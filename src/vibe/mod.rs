//! # Vibe Module
//!
//! Everything that reads the free-text vibe:
//!
//! - [`classifier`] asks a language model for genre tags and falls back to an
//!   offline keyword heuristic when the model is unavailable.
//! - [`features`] maps keywords onto energy, valence and danceability targets.
//! - [`genres`] normalizes tags against the genre whitelist.

pub mod classifier;
pub mod features;
pub mod genres;

pub use classifier::{Classification, VibeClassifier};
pub use features::map_features;
pub use genres::validate_genres;
