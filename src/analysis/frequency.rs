use std::collections::HashMap;

use indicatif::ProgressBar;

use crate::{
    Result,
    analysis::{pager::PlaylistPager, resolver::resolve_original_album},
    spotify::SpotifyApi,
    types::AlbumFrequency,
};

/// Number of playlist tracks per original album id.
#[derive(Debug, Clone, Default)]
pub struct AlbumFrequencyTable {
    counts: HashMap<String, usize>,
}

impl AlbumFrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, album_id: &str) {
        *self.counts.entry(album_id.to_string()).or_insert(0) += 1;
    }

    pub fn count(&self, album_id: &str) -> usize {
        self.counts.get(album_id).copied().unwrap_or(0)
    }

    /// Sum over all albums, equal to the number of tracks recorded.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries by count, highest first. Ties are ordered by album id so the
    /// report is stable between runs.
    pub fn sorted(&self) -> Vec<(String, usize)> {
        let mut entries: Vec<(String, usize)> = self
            .counts
            .iter()
            .map(|(id, count)| (id.clone(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }
}

/// Resolves the original album of every track in the playlist and counts them.
pub async fn count_original_albums<A>(
    api: &A,
    playlist_id: &str,
    pb: &ProgressBar,
) -> Result<AlbumFrequencyTable>
where
    A: SpotifyApi + ?Sized,
{
    let mut table = AlbumFrequencyTable::new();
    let mut pager = PlaylistPager::new(api, playlist_id);
    let mut processed = 0;

    while let Some(track_ids) = pager.next_page().await? {
        for track_id in track_ids {
            processed += 1;
            pb.set_message(format!("Resolving original album of track {}...", processed));

            let resolution = resolve_original_album(api, &track_id).await?;
            table.record(&resolution.album_id);
        }
    }

    Ok(table)
}

/// Frequency report for a playlist: one entry per original album with its
/// display name and primary artist, most frequent first.
pub async fn album_frequencies<A>(
    api: &A,
    playlist_id: &str,
    pb: &ProgressBar,
) -> Result<Vec<AlbumFrequency>>
where
    A: SpotifyApi + ?Sized,
{
    let table = count_original_albums(api, playlist_id, pb).await?;
    let mut report = Vec::with_capacity(table.len());

    pb.set_message("Fetching album details...");
    for (album_id, count) in table.sorted() {
        let album = api.album(&album_id).await?;
        report.push(AlbumFrequency {
            name: album.name.clone(),
            artist: album.primary_artist().to_string(),
            album_id,
            count,
        });
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_counts_and_sorts() {
        let mut table = AlbumFrequencyTable::new();
        for id in ["b", "a", "c", "a", "b", "a"] {
            table.record(id);
        }

        assert_eq!(table.count("a"), 3);
        assert_eq!(table.count("missing"), 0);
        assert_eq!(table.total(), 6);
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.sorted(),
            vec![
                ("a".to_string(), 3),
                ("b".to_string(), 2),
                ("c".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_ties_are_ordered_by_album_id() {
        let mut table = AlbumFrequencyTable::new();
        for id in ["z", "m", "a"] {
            table.record(id);
        }

        let ids: Vec<String> = table.sorted().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["a", "m", "z"]);
    }
}
