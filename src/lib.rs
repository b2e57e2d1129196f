//! Original Album Tracer CLI Library
//!
//! This library provides functionality for tracing the tracks of a Spotify
//! playlist back to the studio albums they were originally released on. It
//! can tally how many tracks come from each original album, or build a new
//! playlist that swaps compilation and reissue versions for album versions.
//!
//! # Modules
//!
//! - `analysis` - Original album resolution, frequency report and playlist rebuild
//! - `api` - HTTP API endpoints for the local callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Crate error type and retry classification
//! - `management` - Access token lifecycle and caching
//! - `retry` - Retry policy with exponential backoff
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use indicatif::ProgressBar;
//! use origalbum::{analysis, config, management::TokenManager, spotify::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> origalbum::Result<()> {
//!     config::load_env().await?;
//!     let client = SpotifyClient::from_env(TokenManager::client_credentials().await?)?;
//!     let pb = ProgressBar::hidden();
//!     for entry in analysis::album_frequencies(&client, "37i9dQZF1DXcBWIGoYBM5M", &pb).await? {
//!         println!("{}", entry);
//!     }
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod retry;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{Error, Result};

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Reading playlist {}", playlist_id);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Playlist {} created", name);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Used for unrecoverable errors
/// that require immediate program termination.
///
/// # Behavior
///
/// This macro will cause the program to exit immediately after printing
/// the error message. It should only be used for fatal errors where
/// recovery is not possible.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, such as a failed request attempt that is
/// about to be retried, or user input that ends the run without an error.
///
/// # Example
///
/// ```
/// warning!("Attempt {} of {} failed", attempt, max_attempts);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
