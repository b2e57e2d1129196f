use indicatif::ProgressBar;

use crate::{
    Result,
    analysis::{
        pager::PlaylistPager,
        resolver::{resolve_track, search_album_version},
    },
    spotify::SpotifyApi,
    types::{CreatePlaylistRequest, Playlist},
};

/// Largest number of URIs Spotify accepts in one add-items call.
pub const MAX_TRACKS_PER_ADD: usize = 100;

/// Name of the rebuilt copy of a playlist.
pub fn replacement_playlist_name(original: &str) -> String {
    format!("{} (Original Albums)", original)
}

/// The URI chosen for one source track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub original_uri: String,
    pub uri: String,
}

impl Replacement {
    pub fn is_substituted(&self) -> bool {
        self.original_uri != self.uri
    }
}

/// Chosen URIs in source playlist order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementList {
    entries: Vec<Replacement>,
}

impl ReplacementList {
    pub fn push(&mut self, replacement: Replacement) {
        self.entries.push(replacement);
    }

    pub fn uris(&self) -> Vec<String> {
        self.entries.iter().map(|r| r.uri.clone()).collect()
    }

    pub fn substituted(&self) -> usize {
        self.entries.iter().filter(|r| r.is_substituted()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct RebuiltPlaylist {
    pub playlist: Playlist,
    pub replacements: ReplacementList,
}

/// Picks a URI for every track of the playlist, in order.
///
/// Each track goes through the original album resolver like in the frequency
/// report. The replacement itself comes from a separate catalog search using
/// the same matching rule; without a match the track keeps its own URI.
pub async fn collect_replacements<A>(
    api: &A,
    playlist_id: &str,
    pb: &ProgressBar,
) -> Result<ReplacementList>
where
    A: SpotifyApi + ?Sized,
{
    let mut replacements = ReplacementList::default();
    let mut pager = PlaylistPager::new(api, playlist_id);

    while let Some(track_ids) = pager.next_page().await? {
        for track_id in track_ids {
            pb.set_message(format!(
                "Looking up album version of track {}...",
                replacements.len() + 1
            ));

            let track = api.track(&track_id).await?;
            resolve_track(api, &track).await?;

            let uri = match search_album_version(api, &track).await? {
                Some(candidate) => candidate.uri,
                None => track.uri.clone(),
            };

            replacements.push(Replacement {
                original_uri: track.uri,
                uri,
            });
        }
    }

    Ok(replacements)
}

/// Creates a private playlist named after the source with album versions of
/// its tracks, added in batches of at most [`MAX_TRACKS_PER_ADD`].
///
/// A failing batch aborts the run and leaves the partially filled playlist
/// in place.
pub async fn rebuild_playlist<A>(
    api: &A,
    playlist_id: &str,
    pb: &ProgressBar,
) -> Result<RebuiltPlaylist>
where
    A: SpotifyApi + ?Sized,
{
    let source = api.playlist(playlist_id).await?;
    let replacements = collect_replacements(api, playlist_id, pb).await?;

    pb.set_message("Creating playlist...");
    let user = api.current_user().await?;
    let request = CreatePlaylistRequest {
        name: replacement_playlist_name(&source.name),
        description: format!("Original album versions of {}", source.name),
        public: false,
        collaborative: false,
    };
    let playlist = api.create_playlist(&user.id, &request).await?;

    let uris = replacements.uris();
    for (batch, chunk) in uris.chunks(MAX_TRACKS_PER_ADD).enumerate() {
        pb.set_message(format!(
            "Adding tracks {}-{}...",
            batch * MAX_TRACKS_PER_ADD + 1,
            batch * MAX_TRACKS_PER_ADD + chunk.len()
        ));
        api.add_items(&playlist.id, chunk).await?;
    }

    Ok(RebuiltPlaylist {
        playlist,
        replacements,
    })
}
