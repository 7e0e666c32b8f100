//! MoodRadio Library
//!
//! This library turns a free-text mood description ("vibe") into a short list
//! of Spotify tracks. A language model tags the vibe with genres, a keyword
//! mapper derives audio-feature targets, and the Spotify recommendations
//! endpoint supplies the tracks.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the playlist service
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy shared by every stage of the pipeline
//! - `llm` - Language model client used for genre tagging
//! - `management` - Credential cache and the playlist pipeline
//! - `server` - Router construction and the HTTP listener
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `vibe` - Vibe classification, feature mapping and genre validation
//!
//! # Example
//!
//! ```
//! use moodradio::{config, management::PlaylistGenerator};
//!
//! #[tokio::main]
//! async fn main() -> moodradio::Res<()> {
//!     let config = config::Config::from_env();
//!     let generator = PlaylistGenerator::from_config(&config)?;
//!     let result = generator.generate("late night coding").await?;
//!     println!("{} tracks for {}", result.tracks.len(), result.genres.join(", "));
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod vibe;

pub use error::Error;

/// A convenient Result type alias for operations that may fail.
///
/// Every fallible stage of the pipeline reports through [`Error`], so the
/// HTTP layer can map each condition to a response in one place.
pub type Res<T> = std::result::Result<T, Error>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Generating playlist for {}", vibe);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal CLI errors. Request handlers report through [`Error`]
/// instead and must never call this.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
