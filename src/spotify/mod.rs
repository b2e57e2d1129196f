//! # Spotify Integration Module
//!
//! This module is the integration layer between origalbum and the Spotify Web
//! API. It implements authentication, catalog lookups and playlist management,
//! and hides HTTP details, retries and token renewal from the analysis code.
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer
//!     ↓
//! Analysis Layer (resolver, frequency report, playlist rebuild)
//!     ↓  depends only on the SpotifyApi trait
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE, Client Credentials)
//!     ├── Tracks (lookup, search)
//!     ├── Albums (lookup)
//!     ├── Playlists (metadata, items, create, add)
//!     └── Users (current user)
//!          ↓
//! HTTP Layer (reqwest, JSON, RetryPolicy)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Capability Trait
//!
//! [`SpotifyApi`] is the full set of remote operations the analysis needs.
//! [`SpotifyClient`] implements it against the real API; tests implement it
//! with in-memory fakes.
//!
//! ## API Coverage
//!
//! - `GET /tracks/{id}` - Track with its album and artists
//! - `GET /albums/{id}` - Album name, type and artists
//! - `GET /search?type=track` - Structured catalog search
//! - `GET /playlists/{id}` - Playlist name and link
//! - `GET /playlists/{id}/tracks` - Paged playlist items
//! - `GET /me` - Authenticated user
//! - `POST /users/{user_id}/playlists` - Create a playlist
//! - `POST /playlists/{playlist_id}/tracks` - Add up to 100 tracks
//! - `POST /api/token` - Token exchange, refresh and client credentials
//!
//! ## Error Handling
//!
//! Non-success responses become [`crate::Error::Api`] carrying status, body
//! and the `Retry-After` hint. Timeouts, connection failures, 429 and 5xx are
//! retried with exponential backoff by the client's [`crate::retry::RetryPolicy`];
//! everything else reaches the caller on the first failure.
//!
//! ## Usage
//!
//! ```rust
//! let tokens = TokenManager::load().await?;
//! let client = SpotifyClient::from_env(tokens)?;
//! let track = client.track("3n3Ppam7vgaVa1iaRUc9Lp").await?;
//! ```

use async_trait::async_trait;

use crate::{
    Result,
    types::{Album, CreatePlaylistRequest, Playlist, PlaylistItemsPage, Track, User},
};

pub mod auth;

mod albums;
mod client;
mod playlist;
mod tracks;
mod users;

pub use client::SpotifyClient;

/// Remote operations the analysis depends on.
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    /// Full track detail by id.
    async fn track(&self, id: &str) -> Result<Track>;

    /// Album detail by id.
    async fn album(&self, id: &str) -> Result<Album>;

    /// Track search with a structured query, at most `limit` results in
    /// relevance order.
    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>>;

    /// Playlist metadata by id.
    async fn playlist(&self, id: &str) -> Result<Playlist>;

    /// One page of playlist items starting at `offset`.
    async fn playlist_items(
        &self,
        id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<PlaylistItemsPage>;

    /// The user owning the access token.
    async fn current_user(&self) -> Result<User>;

    /// Creates a playlist owned by `user_id`.
    async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<Playlist>;

    /// Appends `uris` to a playlist in one call and returns the snapshot id.
    async fn add_items(&self, playlist_id: &str, uris: &[String]) -> Result<String>;
}
