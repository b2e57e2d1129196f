use crate::{Result, spotify::SpotifyApi};

/// Page size used for playlist items, Spotify's default and maximum.
pub const PLAYLIST_PAGE_SIZE: u32 = 100;

/// Walks the items of a playlist from offset 0 until Spotify reports no
/// further page or returns an empty one.
///
/// Items without a track, or whose track has no id (local files, removed
/// tracks), are dropped.
pub struct PlaylistPager<'a, A: ?Sized> {
    api: &'a A,
    playlist_id: &'a str,
    offset: u32,
    page_size: u32,
    exhausted: bool,
}

impl<'a, A> PlaylistPager<'a, A>
where
    A: SpotifyApi + ?Sized,
{
    pub fn new(api: &'a A, playlist_id: &'a str) -> Self {
        Self {
            api,
            playlist_id,
            offset: 0,
            page_size: PLAYLIST_PAGE_SIZE,
            exhausted: false,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Track ids of the next page, or `None` once the playlist is exhausted.
    /// A page may yield an empty list when all of its entries were skipped.
    pub async fn next_page(&mut self) -> Result<Option<Vec<String>>> {
        if self.exhausted {
            return Ok(None);
        }

        let page = self
            .api
            .playlist_items(self.playlist_id, self.offset, self.page_size)
            .await?;

        if page.items.is_empty() {
            self.exhausted = true;
            return Ok(None);
        }

        self.offset += page.items.len() as u32;
        if page.next.is_none() {
            self.exhausted = true;
        }

        let track_ids = page
            .items
            .into_iter()
            .filter_map(|item| item.track.and_then(|track| track.id))
            .collect();

        Ok(Some(track_ids))
    }

    /// Offset the next request will start at.
    pub fn offset(&self) -> u32 {
        self.offset
    }
}
