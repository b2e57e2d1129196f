use crate::{Result, spotify::SpotifyClient, types::Album};

impl SpotifyClient {
    /// `GET /albums/{id}`
    pub async fn get_album(&self, id: &str) -> Result<Album> {
        let path = format!("/albums/{}", id);
        self.retry
            .run("fetch album", || {
                self.get_json::<Album, _>(&path, &[] as &[(&str, &str)])
            })
            .await
    }
}
