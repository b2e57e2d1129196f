//! # Analysis Module
//!
//! Traces playlist tracks back to the studio albums they were first released
//! on. Everything here talks to Spotify only through [`SpotifyApi`], one call
//! at a time and in playlist order.
//!
//! - [`resolver`] - Decides the original album of a single track
//! - [`pager`] - Walks a playlist page by page
//! - [`frequency`] - Counts tracks per original album and builds the report
//! - [`rebuild`] - Creates a copy of a playlist using album versions of its tracks
//!
//! The album matching is a heuristic. A track on a regular album whose name
//! does not look like a compilation is taken as is. Otherwise the catalog is
//! searched and the first album release whose track title is contained in the
//! original title wins. Short candidate titles match generously; that
//! behavior is kept on purpose.
//!
//! [`SpotifyApi`]: crate::spotify::SpotifyApi

pub mod frequency;
pub mod pager;
pub mod rebuild;
pub mod resolver;

pub use frequency::{AlbumFrequencyTable, album_frequencies, count_original_albums};
pub use pager::{PLAYLIST_PAGE_SIZE, PlaylistPager};
pub use rebuild::{
    MAX_TRACKS_PER_ADD, RebuiltPlaylist, Replacement, ReplacementList, collect_replacements,
    rebuild_playlist, replacement_playlist_name,
};
pub use resolver::{AlbumOrigin, Resolution, resolve_original_album, resolve_track};
