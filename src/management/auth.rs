use std::path::PathBuf;

use chrono::Utc;

use crate::{Error, Result, config, spotify, types::Token};

/// Seconds before expiry at which a token is already treated as stale.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// How the current token was granted, which decides how it is renewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    /// User-delegated token from `origalbum auth`, renewed by refresh token.
    AuthorizationCode,
    /// App-only token, renewed by asking for a new one.
    ClientCredentials,
}

pub struct TokenManager {
    token: Token,
    grant: Grant,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager {
            token,
            grant: Grant::AuthorizationCode,
        }
    }

    /// Loads the user token cached by a previous `origalbum auth`.
    pub async fn load() -> Result<Self> {
        let content = async_fs::read_to_string(Self::token_path()).await?;
        let token: Token = serde_json::from_str(&content)?;
        Ok(Self::new(token))
    }

    /// Obtains an app-only token through the Client Credentials grant.
    pub async fn client_credentials() -> Result<Self> {
        let token = spotify::auth::request_client_token().await?;
        Ok(Self {
            token,
            grant: Grant::ClientCredentials,
        })
    }

    pub async fn persist(&self) -> Result<()> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.token)?;
        async_fs::write(path, json).await?;
        Ok(())
    }

    /// Returns an access token that is valid for at least a few more minutes,
    /// renewing it first when needed.
    pub async fn get_valid_token(&mut self) -> Result<String> {
        if self.is_expired(Utc::now().timestamp() as u64) {
            self.token = self.renew().await?;
            if self.grant == Grant::AuthorizationCode {
                self.persist().await?;
            }
        }

        Ok(self.token.access_token.clone())
    }

    fn is_expired(&self, now: u64) -> bool {
        let lifetime = self.token.expires_in.saturating_sub(EXPIRY_MARGIN_SECS);
        now >= self.token.obtained_at + lifetime
    }

    async fn renew(&self) -> Result<Token> {
        match self.grant {
            Grant::ClientCredentials => spotify::auth::request_client_token().await,
            Grant::AuthorizationCode => match &self.token.refresh_token {
                Some(refresh_token) => spotify::auth::refresh_token(refresh_token).await,
                None => Err(Error::Auth(format!(
                    "Token expired and cannot be refreshed. Please run {} auth",
                    env!("CARGO_PKG_NAME")
                ))),
            },
        }
    }

    fn token_path() -> PathBuf {
        config::data_dir().join("cache/token.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(obtained_at: u64, expires_in: u64) -> Token {
        Token {
            access_token: "access".into(),
            refresh_token: Some("refresh".into()),
            scope: "playlist-modify-private".into(),
            expires_in,
            obtained_at,
        }
    }

    #[test]
    fn test_token_is_stale_within_margin() {
        let manager = TokenManager::new(token(1_000, 3_600));
        assert!(!manager.is_expired(1_000));
        assert!(!manager.is_expired(1_000 + 3_600 - EXPIRY_MARGIN_SECS - 1));
        assert!(manager.is_expired(1_000 + 3_600 - EXPIRY_MARGIN_SECS));
        assert!(manager.is_expired(10_000));
    }

    #[test]
    fn test_short_lived_token_does_not_underflow() {
        let manager = TokenManager::new(token(1_000, 60));
        assert!(manager.is_expired(1_000));
    }

    #[test]
    fn test_cached_token_uses_authorization_code_grant() {
        let manager = TokenManager::new(token(0, 3_600));
        assert_eq!(manager.grant, Grant::AuthorizationCode);
    }
}
