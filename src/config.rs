//! Configuration management for the Original Album Tracer.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, endpoints, server settings and
//! the retry policy applied to every remote call.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::{Error, Result, retry::RetryPolicy};

const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
const DEFAULT_SCOPE: &str = "playlist-modify-private playlist-read-private";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from `origalbum/.env` inside the platform-specific
/// local data directory. A missing file is fine: every value can also come
/// from the process environment.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/origalbum/.env`
/// - macOS: `~/Library/Application Support/origalbum/.env`
/// - Windows: `%LOCALAPPDATA%/origalbum/.env`
///
/// # Errors
///
/// Fails if the directory cannot be created or an existing `.env` file
/// cannot be parsed.
pub async fn load_env() -> Result<()> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| Error::Config(e.to_string()))?;
    }
    Ok(())
}

/// Platform data directory holding `.env` and the token cache.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(env!("CARGO_PKG_NAME"));
    path
}

/// Address the local OAuth callback server binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Spotify application client id (`SPOTIFY_API_AUTH_CLIENT_ID`).
pub fn spotify_client_id() -> Result<String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Spotify application client secret (`SPOTIFY_API_AUTH_CLIENT_SECRET`).
///
/// Only needed for app-only access through the Client Credentials grant.
/// The secret should be kept confidential and never exposed in logs.
pub fn spotify_client_secret() -> Result<String> {
    required("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// OAuth redirect URI (`SPOTIFY_API_REDIRECT_URI`). Must match the URI
/// registered in the Spotify application settings.
pub fn spotify_redirect_uri() -> String {
    var_or("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

/// Scopes requested during user authorization (`SPOTIFY_API_AUTH_SCOPE`).
pub fn spotify_scope() -> String {
    var_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Per-request timeout of the HTTP client (`ORIGALBUM_HTTP_TIMEOUT_SECS`).
pub fn http_timeout() -> Result<Duration> {
    let secs = parse_or(
        "ORIGALBUM_HTTP_TIMEOUT_SECS",
        env::var("ORIGALBUM_HTTP_TIMEOUT_SECS").ok(),
        30u64,
    )?;
    Ok(Duration::from_secs(secs))
}

/// Retry policy for remote calls, tunable through
/// `ORIGALBUM_RETRY_ATTEMPTS` and `ORIGALBUM_RETRY_BASE_DELAY_MS`.
pub fn retry_policy() -> Result<RetryPolicy> {
    let defaults = RetryPolicy::default();
    let max_attempts = parse_or(
        "ORIGALBUM_RETRY_ATTEMPTS",
        env::var("ORIGALBUM_RETRY_ATTEMPTS").ok(),
        defaults.max_attempts,
    )?;
    let base_delay_ms = parse_or(
        "ORIGALBUM_RETRY_BASE_DELAY_MS",
        env::var("ORIGALBUM_RETRY_BASE_DELAY_MS").ok(),
        defaults.base_delay.as_millis() as u64,
    )?;

    if max_attempts == 0 {
        return Err(Error::Config(
            "ORIGALBUM_RETRY_ATTEMPTS must be at least 1".to_string(),
        ));
    }

    Ok(RetryPolicy {
        max_attempts,
        base_delay: Duration::from_millis(base_delay_ms),
        ..defaults
    })
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn required(name: &str) -> Result<String> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::Config(format!("{} must be set", name)))
}

/// Parses an optional raw value, falling back to `default` when unset or blank.
pub fn parse_or<T>(name: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse::<T>()
            .map_err(|e| Error::Config(format!("{} has invalid value {:?}: {}", name, value, e))),
    }
}
