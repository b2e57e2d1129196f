use crate::{
    analysis,
    cli::{Access, connect},
    error, info,
    spotify::SpotifyClient,
    success, utils, warning,
};

pub async fn rebuild(playlist_url: &str) {
    let Some(playlist_id) = utils::extract_playlist_id(playlist_url) else {
        warning!("Invalid Spotify playlist URL.");
        return;
    };

    let client = connect(Access::Modify).await;
    rebuild_with_original_albums(&client, &playlist_id).await;
}

pub(super) async fn rebuild_with_original_albums(client: &SpotifyClient, playlist_id: &str) {
    info!("Rebuilding playlist {} with original album versions", playlist_id);

    let pb = utils::spinner("Reading playlist...");
    let result = analysis::rebuild_playlist(client, playlist_id, &pb).await;
    pb.finish_and_clear();

    let rebuilt = match result {
        Ok(rebuilt) => rebuilt,
        Err(e) => error!("Failed to create playlist: {}", e),
    };

    success!(
        "Created playlist: {} ({} tracks, {} replaced)",
        rebuilt.playlist.name,
        rebuilt.replacements.len(),
        rebuilt.replacements.substituted()
    );
    info!("Playlist URL: {}", rebuilt.playlist.url());
}
