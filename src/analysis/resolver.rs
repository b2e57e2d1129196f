use crate::{
    Result,
    spotify::SpotifyApi,
    types::{AlbumType, SimplifiedAlbum, Track},
};

/// Album name fragments that mark greatest-hits style releases.
pub const COMPILATION_MARKERS: [&str; 3] = ["hits", "collection", "essential"];

/// Number of search results inspected when looking for an album version.
pub const SEARCH_LIMIT: u32 = 10;

/// How the original album of a track was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlbumOrigin {
    /// The track's own album already is a regular studio album.
    Canonical,
    /// A catalog search found the track on a studio album.
    SearchMatch,
    /// Nothing better was found; the track's own album is kept.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub album_id: String,
    pub origin: AlbumOrigin,
}

/// True for regular albums whose name carries no compilation marker.
pub fn is_canonical_album(album: &SimplifiedAlbum) -> bool {
    let name = album.name.to_lowercase();
    album.album_type == AlbumType::Album
        && !COMPILATION_MARKERS.iter().any(|marker| name.contains(marker))
}

/// Structured search query for other releases of `track`.
pub fn search_query(track: &Track) -> String {
    match track.first_artist() {
        Some(artist) => format!("track:{} artist:{}", track.name, artist),
        None => format!("track:{}", track.name),
    }
}

/// First candidate, in search order, on a regular album whose lower-cased
/// track title is contained in the lower-cased track title of `original`.
pub fn find_album_version<'a>(original: &Track, candidates: &'a [Track]) -> Option<&'a Track> {
    let original_name = original.name.to_lowercase();

    candidates.iter().find(|candidate| {
        candidate.album.album_type == AlbumType::Album
            && original_name.contains(&candidate.name.to_lowercase())
    })
}

/// Searches the catalog for an album release of `track`.
pub async fn search_album_version<A>(api: &A, track: &Track) -> Result<Option<Track>>
where
    A: SpotifyApi + ?Sized,
{
    let candidates = api.search_tracks(&search_query(track), SEARCH_LIMIT).await?;
    Ok(find_album_version(track, &candidates).cloned())
}

/// Decides the original album of an already fetched track. Searches only
/// when the track's own album is not canonical.
pub async fn resolve_track<A>(api: &A, track: &Track) -> Result<Resolution>
where
    A: SpotifyApi + ?Sized,
{
    if is_canonical_album(&track.album) {
        return Ok(Resolution {
            album_id: track.album.id.clone(),
            origin: AlbumOrigin::Canonical,
        });
    }

    let resolution = match search_album_version(api, track).await? {
        Some(candidate) => Resolution {
            album_id: candidate.album.id,
            origin: AlbumOrigin::SearchMatch,
        },
        None => Resolution {
            album_id: track.album.id.clone(),
            origin: AlbumOrigin::Fallback,
        },
    };

    Ok(resolution)
}

/// Fetches the track and decides its original album.
pub async fn resolve_original_album<A>(api: &A, track_id: &str) -> Result<Resolution>
where
    A: SpotifyApi + ?Sized,
{
    let track = api.track(track_id).await?;
    resolve_track(api, &track).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SimplifiedArtist;

    fn album(name: &str, album_type: AlbumType) -> SimplifiedAlbum {
        SimplifiedAlbum {
            id: format!("{}-id", name),
            name: name.to_string(),
            album_type,
            artists: Vec::new(),
        }
    }

    fn track(name: &str, album: SimplifiedAlbum, artists: &[&str]) -> Track {
        Track {
            id: format!("{}-track", name),
            name: name.to_string(),
            uri: format!("spotify:track:{}", name),
            album,
            artists: artists
                .iter()
                .map(|a| SimplifiedArtist {
                    id: None,
                    name: a.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_compilation_markers_are_case_insensitive() {
        assert!(is_canonical_album(&album("Abbey Road", AlbumType::Album)));
        assert!(!is_canonical_album(&album("Greatest HITS", AlbumType::Album)));
        assert!(!is_canonical_album(&album("The Collection", AlbumType::Album)));
        assert!(!is_canonical_album(&album("The Essential Cash", AlbumType::Album)));
        assert!(!is_canonical_album(&album("Abbey Road", AlbumType::Compilation)));
        assert!(!is_canonical_album(&album("Help!", AlbumType::Single)));
    }

    #[test]
    fn test_search_query_uses_first_artist() {
        let t = track(
            "Under Pressure",
            album("Hot Space", AlbumType::Album),
            &["Queen", "David Bowie"],
        );
        assert_eq!(search_query(&t), "track:Under Pressure artist:Queen");

        let anonymous = track("Intro", album("Tape", AlbumType::Album), &[]);
        assert_eq!(search_query(&anonymous), "track:Intro");
    }

    #[test]
    fn test_find_album_version_takes_first_album_match() {
        let original = track(
            "Yesterday - Remastered 2009",
            album("1", AlbumType::Compilation),
            &["The Beatles"],
        );
        let candidates = vec![
            track("Yesterday", album("Love Songs", AlbumType::Compilation), &[]),
            track("Yesterday", album("Help!", AlbumType::Album), &[]),
            track("Yesterday", album("Anthology 2", AlbumType::Album), &[]),
        ];

        let found = find_album_version(&original, &candidates).unwrap();
        assert_eq!(found.album.name, "Help!");
    }

    #[test]
    fn test_containment_is_checked_from_candidate_into_original() {
        let original = track("Yesterday", album("1", AlbumType::Compilation), &[]);
        let longer = vec![track(
            "Yesterday - Live",
            album("Live At The BBC", AlbumType::Album),
            &[],
        )];
        assert!(find_album_version(&original, &longer).is_none());

        // a short candidate title matches generously
        let short = vec![track("Yes", album("Fragile", AlbumType::Album), &[])];
        assert_eq!(
            find_album_version(&original, &short).unwrap().album.name,
            "Fragile"
        );
    }

    #[test]
    fn test_album_title_plays_no_part_in_matching() {
        let original = track("Help!", album("1", AlbumType::Compilation), &[]);
        let candidates = vec![track("Ticket To Ride", album("Help!", AlbumType::Album), &[])];
        assert!(find_album_version(&original, &candidates).is_none());
    }
}
