mod auth;
mod playlist;

pub use auth::{Clock, SAFETY_MARGIN_SECS, SystemClock, TokenManager, TokenSource};
pub use playlist::{MAX_TRACKS, NO_TRACKS_MESSAGE, PlaylistGenerator};
