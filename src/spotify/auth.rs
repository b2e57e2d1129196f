use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::{
    Error, Result, config,
    server::start_api_server,
    types::{PkceToken, Token},
    utils, warning,
};

/// Shape of the token endpoint answer for every grant type.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

impl TokenResponse {
    fn into_token(self, previous_refresh_token: Option<&str>) -> Token {
        Token {
            access_token: self.access_token,
            // Spotify may omit the refresh token on refresh; keep the old one then
            refresh_token: self
                .refresh_token
                .or_else(|| previous_refresh_token.map(str::to_string)),
            scope: self.scope.unwrap_or_default(),
            expires_in: self.expires_in,
            obtained_at: Utc::now().timestamp() as u64,
        }
    }
}

/// Runs the OAuth 2.0 Authorization Code flow with PKCE.
///
/// 1. Generates the code verifier and its SHA256 challenge
/// 2. Starts the local callback server
/// 3. Opens the authorization URL in the default browser
/// 4. Waits up to 60 seconds for the callback to exchange the code
///
/// The granted token carries the scopes from [`config::spotify_scope`], by
/// default `playlist-modify-private playlist-read-private`, which the
/// playlist rebuild needs.
///
/// # Errors
///
/// Fails when the client id is not configured or no token arrived in time.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Result<Token> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let auth_url = reqwest::Url::parse_with_params(
        &config::spotify_apiauth_url(),
        &[
            ("client_id", config::spotify_client_id()?),
            ("response_type", "code".to_string()),
            ("redirect_uri", config::spotify_redirect_uri()),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256".to_string()),
            ("scope", config::spotify_scope()),
        ],
    )
    .map_err(|e| Error::Config(format!("Invalid authorization URL: {}", e)))?;

    // Store verifier in shared state before redirect
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            token: None,
        });
    }

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    wait_for_token(shared_state)
        .await
        .ok_or_else(|| Error::Auth("Authentication failed or timed out.".to_string()))
}

/// Polls the shared state once per second until the callback stored a token,
/// giving up after 60 seconds.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(pkce_token) = lock.as_ref() {
            if let Some(token) = &pkce_token.token {
                return Some(token.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges an authorization code for a user token, proving possession of
/// the PKCE `verifier`.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri();

    let res = Client::new()
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await?;

    Ok(read_token_response(res).await?.into_token(None))
}

/// Trades a refresh token for a fresh user token.
pub async fn refresh_token(refresh_token: &str) -> Result<Token> {
    let client_id = config::spotify_client_id()?;

    let res = Client::new()
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id.as_str()),
        ])
        .send()
        .await?;

    Ok(read_token_response(res)
        .await?
        .into_token(Some(refresh_token)))
}

/// Requests an app-only token with the Client Credentials grant.
///
/// App-only tokens can read public catalog and playlist data but cannot act
/// on behalf of a user, so they are only good for the frequency report.
pub async fn request_client_token() -> Result<Token> {
    let client_id = config::spotify_client_id()?;
    let client_secret = config::spotify_client_secret()?;

    let res = Client::new()
        .post(config::spotify_apitoken_url())
        .basic_auth(client_id, Some(client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    Ok(read_token_response(res).await?.into_token(None))
}

async fn read_token_response(res: reqwest::Response) -> Result<TokenResponse> {
    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        return Err(Error::Auth(format!(
            "token endpoint returned {}: {}",
            status, body
        )));
    }

    Ok(serde_json::from_str(&body)?)
}
