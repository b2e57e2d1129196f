#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use origalbum::{Error, Result, spotify::SpotifyApi, types::*};
use reqwest::StatusCode;

/// In-memory Spotify catalog that records every call made against it.
pub struct FakeSpotify {
    pub tracks: HashMap<String, Track>,
    pub albums: HashMap<String, Album>,
    pub search_results: HashMap<String, Vec<Track>>,
    pub playlist: Playlist,
    pub items: Vec<PlaylistItem>,
    /// Largest page the fake serves, regardless of the requested limit.
    pub server_page_size: u32,
    pub user: User,

    pub searches: Mutex<Vec<String>>,
    pub track_lookups: Mutex<Vec<String>>,
    pub page_requests: Mutex<Vec<(u32, u32)>>,
    pub created: Mutex<Vec<(String, CreatePlaylistRequest)>>,
    pub add_batches: Mutex<Vec<Vec<String>>>,
}

impl FakeSpotify {
    pub fn new() -> Self {
        Self {
            tracks: HashMap::new(),
            albums: HashMap::new(),
            search_results: HashMap::new(),
            playlist: Playlist {
                id: "source".into(),
                name: "Road Trip".into(),
                public: Some(true),
                external_urls: ExternalUrls::default(),
            },
            items: Vec::new(),
            server_page_size: 100,
            user: User {
                id: "listener".into(),
                display_name: Some("Listener".into()),
            },
            searches: Mutex::new(Vec::new()),
            track_lookups: Mutex::new(Vec::new()),
            page_requests: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            add_batches: Mutex::new(Vec::new()),
        }
    }

    /// Registers an album and returns its embedded form for track objects.
    pub fn album(
        &mut self,
        id: &str,
        name: &str,
        album_type: AlbumType,
        artist: &str,
    ) -> SimplifiedAlbum {
        self.albums.insert(
            id.to_string(),
            Album {
                id: id.to_string(),
                name: name.to_string(),
                album_type,
                artists: vec![artist_named(artist)],
            },
        );
        SimplifiedAlbum {
            id: id.to_string(),
            name: name.to_string(),
            album_type,
            artists: vec![artist_named(artist)],
        }
    }

    /// Registers a track in the catalog without adding it to the playlist.
    pub fn track(
        &mut self,
        id: &str,
        name: &str,
        album: &SimplifiedAlbum,
        artist: &str,
    ) -> Track {
        let track = make_track(id, name, album, artist);
        self.tracks.insert(id.to_string(), track.clone());
        track
    }

    /// Registers a track and appends it to the playlist.
    pub fn playlist_track(
        &mut self,
        id: &str,
        name: &str,
        album: &SimplifiedAlbum,
        artist: &str,
    ) -> Track {
        let track = self.track(id, name, album, artist);
        self.items.push(PlaylistItem {
            track: Some(PlaylistTrackRef {
                id: Some(id.to_string()),
            }),
        });
        track
    }

    pub fn unavailable_entry(&mut self) {
        self.items.push(PlaylistItem { track: None });
    }

    pub fn local_file_entry(&mut self) {
        self.items.push(PlaylistItem {
            track: Some(PlaylistTrackRef { id: None }),
        });
    }

    pub fn search_returns(&mut self, query: &str, results: Vec<Track>) {
        self.search_results.insert(query.to_string(), results);
    }

    pub fn search_count(&self) -> usize {
        self.searches.lock().unwrap().len()
    }
}

pub fn artist_named(name: &str) -> SimplifiedArtist {
    SimplifiedArtist {
        id: Some(format!("{}-id", name.to_lowercase().replace(' ', "-"))),
        name: name.to_string(),
    }
}

/// Track object as returned by search, not registered in the catalog.
pub fn make_track(id: &str, name: &str, album: &SimplifiedAlbum, artist: &str) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        uri: format!("spotify:track:{}", id),
        album: album.clone(),
        artists: vec![artist_named(artist)],
    }
}

fn not_found(what: &str) -> Error {
    Error::Api {
        status: StatusCode::NOT_FOUND,
        message: format!("{} not found", what),
        retry_after: None,
    }
}

#[async_trait]
impl SpotifyApi for FakeSpotify {
    async fn track(&self, id: &str) -> Result<Track> {
        self.track_lookups.lock().unwrap().push(id.to_string());
        self.tracks.get(id).cloned().ok_or_else(|| not_found(id))
    }

    async fn album(&self, id: &str) -> Result<Album> {
        self.albums.get(id).cloned().ok_or_else(|| not_found(id))
    }

    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>> {
        self.searches.lock().unwrap().push(query.to_string());
        let mut results = self.search_results.get(query).cloned().unwrap_or_default();
        results.truncate(limit as usize);
        Ok(results)
    }

    async fn playlist(&self, id: &str) -> Result<Playlist> {
        if id == self.playlist.id {
            Ok(self.playlist.clone())
        } else {
            Err(not_found(id))
        }
    }

    async fn playlist_items(
        &self,
        id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<PlaylistItemsPage> {
        if id != self.playlist.id {
            return Err(not_found(id));
        }
        self.page_requests.lock().unwrap().push((offset, limit));

        let start = (offset as usize).min(self.items.len());
        let end = (start + limit.min(self.server_page_size) as usize).min(self.items.len());
        let next = (end < self.items.len()).then(|| format!("offset={}", end));

        Ok(Paging {
            items: self.items[start..end].to_vec(),
            next,
            total: Some(self.items.len() as u64),
        })
    }

    async fn current_user(&self) -> Result<User> {
        Ok(self.user.clone())
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<Playlist> {
        self.created
            .lock()
            .unwrap()
            .push((user_id.to_string(), request.clone()));

        Ok(Playlist {
            id: "rebuilt".into(),
            name: request.name.clone(),
            public: Some(request.public),
            external_urls: ExternalUrls {
                spotify: Some("https://open.spotify.com/playlist/rebuilt".into()),
            },
        })
    }

    async fn add_items(&self, playlist_id: &str, uris: &[String]) -> Result<String> {
        assert_eq!(playlist_id, "rebuilt");
        let mut batches = self.add_batches.lock().unwrap();
        batches.push(uris.to_vec());
        Ok(format!("snapshot-{}", batches.len()))
    }
}
