//! # CLI Module
//!
//! User-facing commands of the `moodradio` binary.
//!
//! - [`serve`] - Runs the HTTP service
//! - [`playlist`] - Runs the pipeline once and prints the tracks as a table
//! - [`genres`] - Prints the accepted seed genres
//!
//! Commands report through the console macros exported by the crate root
//! and terminate the process with `error!` on fatal failures.

mod genres;
mod playlist;
mod serve;

pub use genres::genres;
pub use playlist::playlist;
pub use serve::serve;
