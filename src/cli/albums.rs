use crate::{
    analysis,
    cli::{Access, connect},
    error, info,
    spotify::SpotifyClient,
    success, utils, warning,
};

pub async fn albums(playlist_url: &str) {
    let Some(playlist_id) = utils::extract_playlist_id(playlist_url) else {
        warning!("Invalid Spotify playlist URL.");
        return;
    };

    let client = connect(Access::ReadOnly).await;
    report_album_frequencies(&client, &playlist_id).await;
}

pub(super) async fn report_album_frequencies(client: &SpotifyClient, playlist_id: &str) {
    info!("Counting tracks of playlist {} by original album", playlist_id);

    let pb = utils::spinner("Reading playlist...");
    let result = analysis::album_frequencies(client, playlist_id, &pb).await;
    pb.finish_and_clear();

    let report = match result {
        Ok(report) => report,
        Err(e) => error!("Failed to count tracks by original album: {}", e),
    };

    if report.is_empty() {
        warning!("Playlist {} has no tracks.", playlist_id);
        return;
    }

    println!("\nAlbum Frequencies:");
    for entry in &report {
        println!("{}", entry);
    }

    let tracks: usize = report.iter().map(|entry| entry.count).sum();
    success!("{} tracks from {} original albums", tracks, report.len());
}
