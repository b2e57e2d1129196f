use crate::{
    Result,
    spotify::SpotifyClient,
    types::{SearchResponse, Track},
};

impl SpotifyClient {
    /// `GET /tracks/{id}`: full track object including its album.
    pub async fn get_track(&self, id: &str) -> Result<Track> {
        let path = format!("/tracks/{}", id);
        self.retry
            .run("fetch track", || {
                self.get_json::<Track, _>(&path, &[] as &[(&str, &str)])
            })
            .await
    }

    /// `GET /search?type=track`: catalog search with a structured query such
    /// as `track:Yesterday artist:The Beatles`. Results keep Spotify's
    /// relevance order.
    pub async fn search_track(&self, query: &str, limit: u32) -> Result<Vec<Track>> {
        let limit = limit.to_string();
        let params = [("q", query), ("type", "track"), ("limit", limit.as_str())];

        let response = self
            .retry
            .run("search tracks", || {
                self.get_json::<SearchResponse, _>("/search", &params)
            })
            .await?;

        Ok(response.tracks.items)
    }
}
