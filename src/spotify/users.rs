use crate::{Result, spotify::SpotifyClient, types::User};

impl SpotifyClient {
    /// `GET /me`: the user the token was granted by. Fails with 401 for
    /// app-only tokens.
    pub async fn me(&self) -> Result<User> {
        self.retry
            .run("fetch current user", || {
                self.get_json::<User, _>("/me", &[] as &[(&str, &str)])
            })
            .await
    }
}
