use crate::{
    Result,
    spotify::SpotifyClient,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest, Playlist,
        PlaylistItemsPage,
    },
};

impl SpotifyClient {
    /// `GET /playlists/{id}` restricted to the fields the tool reads.
    pub async fn get_playlist(&self, id: &str) -> Result<Playlist> {
        let path = format!("/playlists/{}", id);
        let params = [("fields", "id,name,public,external_urls")];

        self.retry
            .run("fetch playlist", || self.get_json::<Playlist, _>(&path, &params))
            .await
    }

    /// `GET /playlists/{id}/tracks`: one page of items, track ids only.
    pub async fn get_playlist_items(
        &self,
        id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<PlaylistItemsPage> {
        let path = format!("/playlists/{}/tracks", id);
        let offset = offset.to_string();
        let limit = limit.to_string();
        let params = [
            ("offset", offset.as_str()),
            ("limit", limit.as_str()),
            ("additional_types", "track"),
            ("fields", "items(track(id)),next,total"),
        ];

        self.retry
            .run("fetch playlist items", || {
                self.get_json::<PlaylistItemsPage, _>(&path, &params)
            })
            .await
    }

    /// `POST /users/{user_id}/playlists`
    pub async fn create_user_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<Playlist> {
        let path = format!("/users/{}/playlists", user_id);

        self.retry
            .run("create playlist", || self.post_json::<Playlist, _>(&path, request))
            .await
    }

    /// `POST /playlists/{id}/tracks`: appends up to 100 URIs, returning the
    /// new snapshot id.
    pub async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<String> {
        let path = format!("/playlists/{}/tracks", playlist_id);
        let body = AddTrackToPlaylistRequest {
            uris: uris.to_vec(),
        };

        let response = self
            .retry
            .run("add tracks to playlist", || {
                self.post_json::<AddTrackToPlaylistResponse, _>(&path, &body)
            })
            .await?;

        Ok(response.snapshot_id)
    }
}
