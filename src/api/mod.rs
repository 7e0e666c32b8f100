//! # API Module
//!
//! HTTP endpoints of the MoodRadio service.
//!
//! - [`playlist`] - `POST /api/playlist`, turns a vibe into tracks
//! - [`health`] - `GET /health`, status and version for monitoring
//!
//! Error responses are produced by the [`axum::response::IntoResponse`]
//! implementation for [`crate::Error`] in the playlist module:
//!
//! | Condition | Status | Body |
//! |---|---|---|
//! | missing or blank vibe | 400 | `{ error }` |
//! | secrets not configured | 500 | `{ error, needsSetup: true }` |
//! | upstream auth / recommendation failure | 500 | `{ error, details }` |
//! | anything else | 500 | `{ error, details? }` |

mod health;
mod playlist;

pub use health::health;
pub use playlist::playlist;
