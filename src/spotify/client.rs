use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, header::RETRY_AFTER};
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;

use crate::{
    Error, Result, config,
    management::TokenManager,
    retry::RetryPolicy,
    spotify::SpotifyApi,
    types::{Album, CreatePlaylistRequest, Playlist, PlaylistItemsPage, Track, User},
};

/// Spotify Web API client scoped to a single run.
///
/// Owns the HTTP connection pool, the token source and the retry policy.
/// Every request goes through [`RetryPolicy::run`], so transient failures are
/// retried the same way no matter which endpoint is called.
pub struct SpotifyClient {
    pub(super) http: Client,
    pub(super) api_url: String,
    pub(super) retry: RetryPolicy,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(http: Client, api_url: String, tokens: TokenManager, retry: RetryPolicy) -> Self {
        Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            retry,
            tokens: Mutex::new(tokens),
        }
    }

    /// Builds a client from the environment: API base URL, HTTP timeout and
    /// retry policy all come from [`config`].
    pub fn from_env(tokens: TokenManager) -> Result<Self> {
        let http = Client::builder().timeout(config::http_timeout()?).build()?;
        Ok(Self::new(
            http,
            config::spotify_apiurl(),
            tokens,
            config::retry_policy()?,
        ))
    }

    pub(super) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    async fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.tokens.lock().await.get_valid_token().await?;
        Ok(request.bearer_auth(token))
    }

    pub(super) async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.http.get(self.endpoint(path)).query(query);
        let response = self.authorized(request).await?.send().await?;
        read_json(response).await
    }

    pub(super) async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.http.post(self.endpoint(path)).json(body);
        let response = self.authorized(request).await?.send().await?;
        read_json(response).await
    }
}

/// Decodes a success body, or turns the response into [`Error::Api`] with the
/// `Retry-After` hint preserved.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        let body = response.bytes().await?;
        return Ok(serde_json::from_slice(&body)?);
    }

    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());
    let message = response.text().await.unwrap_or_default();

    Err(Error::Api {
        status,
        message,
        retry_after,
    })
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    async fn track(&self, id: &str) -> Result<Track> {
        self.get_track(id).await
    }

    async fn album(&self, id: &str) -> Result<Album> {
        self.get_album(id).await
    }

    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>> {
        self.search_track(query, limit).await
    }

    async fn playlist(&self, id: &str) -> Result<Playlist> {
        self.get_playlist(id).await
    }

    async fn playlist_items(
        &self,
        id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<PlaylistItemsPage> {
        self.get_playlist_items(id, offset, limit).await
    }

    async fn current_user(&self) -> Result<User> {
        self.me().await
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<Playlist> {
        self.create_user_playlist(user_id, request).await
    }

    async fn add_items(&self, playlist_id: &str, uris: &[String]) -> Result<String> {
        self.add_tracks(playlist_id, uris).await
    }
}
