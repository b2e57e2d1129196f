//! # CLI Module
//!
//! User-facing commands of origalbum. Each command validates input, builds a
//! [`SpotifyClient`] for the run, drives the [`crate::analysis`] layer and
//! presents the result.
//!
//! ## Commands
//!
//! - [`auth`] - Authorizes origalbum to manage the user's private playlists
//! - [`albums`] - Prints how many playlist tracks come from each original album
//! - [`rebuild`] - Creates a copy of a playlist with album versions of its tracks
//! - [`interactive`] - Prompts for a playlist link and one of the two modes
//!
//! ## Access
//!
//! The frequency report only reads data. It uses the cached user token when
//! `origalbum auth` was run before, and an app-only token otherwise. Rebuilding
//! writes a playlist to the user's account and therefore needs the user token.
//!
//! ## Error Handling
//!
//! Bad input (an unrecognised playlist link or menu option) ends the run with
//! a message and exit code 0. Remote failures that survive the retry policy
//! end it with exit code 1.
//!
//! ## Usage Patterns
//!
//! ```bash
//! origalbum auth
//! origalbum albums https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M
//! origalbum rebuild https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M
//! origalbum                                    # interactive
//! ```

mod albums;
mod auth;
mod interactive;
mod rebuild;

pub use albums::albums;
pub use auth::auth;
pub use interactive::interactive;
pub use rebuild::rebuild;

use crate::{error, management::TokenManager, spotify::SpotifyClient};

/// What a command is going to do with the user's library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    ReadOnly,
    Modify,
}

async fn connect(access: Access) -> SpotifyClient {
    let tokens = match (TokenManager::load().await, access) {
        (Ok(tokens), _) => tokens,
        (Err(e), Access::Modify) => {
            error!(
                "Failed to load token. Please run {} auth\n Error: {}",
                env!("CARGO_PKG_NAME"),
                e
            );
        }
        (Err(_), Access::ReadOnly) => match TokenManager::client_credentials().await {
            Ok(tokens) => tokens,
            Err(e) => {
                error!(
                    "Cannot get an app token ({}). Set SPOTIFY_API_AUTH_CLIENT_SECRET or run {} auth",
                    e,
                    env!("CARGO_PKG_NAME")
                );
            }
        },
    };

    match SpotifyClient::from_env(tokens) {
        Ok(client) => client,
        Err(e) => error!("Cannot create Spotify client. Err: {}", e),
    }
}
