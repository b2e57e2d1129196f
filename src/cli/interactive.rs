use std::io::{self, BufRead, Write};

use crate::{
    cli::{
        Access, albums::report_album_frequencies, connect, rebuild::rebuild_with_original_albums,
    },
    error,
    utils::{self, MenuChoice},
    warning,
};

/// Playlist and mode picked at the prompt.
#[derive(Debug, PartialEq, Eq)]
struct Selection {
    playlist_id: String,
    choice: MenuChoice,
}

/// Prompts for a playlist link and a mode, then runs it.
pub async fn interactive<R: BufRead, W: Write>(input: &mut R, output: &mut W) {
    let selection = match select(input, output) {
        Ok(Some(selection)) => selection,
        Ok(None) => return,
        Err(e) => error!("Cannot read input: {}", e),
    };

    match selection.choice {
        MenuChoice::AlbumFrequencies => {
            let client = connect(Access::ReadOnly).await;
            report_album_frequencies(&client, &selection.playlist_id).await;
        }
        MenuChoice::RebuildPlaylist => {
            let client = connect(Access::Modify).await;
            rebuild_with_original_albums(&client, &selection.playlist_id).await;
        }
    }
}

/// Reads the playlist link and the menu option. An unusable link or option
/// is reported and yields `None`.
fn select<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Option<Selection>> {
    let url = utils::prompt(input, output, "Enter Spotify Playlist URL: ")?;
    let Some(playlist_id) = utils::extract_playlist_id(&url) else {
        warning!("Invalid Spotify playlist URL.");
        return Ok(None);
    };

    writeln!(output, "\nChoose an option:")?;
    writeln!(output, "1. Count tracks by original album")?;
    writeln!(output, "2. Create playlist with original album versions")?;

    let choice = utils::prompt(input, output, "Enter option number: ")?;
    match utils::parse_menu_choice(&choice) {
        Some(choice) => Ok(Some(Selection {
            playlist_id,
            choice,
        })),
        None => {
            warning!("Invalid option. Exiting.");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> (Option<Selection>, String) {
        let mut output = Vec::new();
        let selection = select(&mut input.as_bytes(), &mut output).unwrap();
        (selection, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_invalid_url_stops_before_the_menu() {
        let (selection, output) = run("https://example.com/album/abc\n1\n");
        assert_eq!(selection, None);
        assert_eq!(output, "Enter Spotify Playlist URL: ");
    }

    #[test]
    fn test_invalid_option_exits_without_selection() {
        let (selection, output) = run("https://open.spotify.com/playlist/37i9dQZF1DX\n3\n");
        assert_eq!(selection, None);
        assert!(output.contains("1. Count tracks by original album"));
        assert!(output.ends_with("Enter option number: "));
    }

    #[test]
    fn test_menu_options_select_mode() {
        let (selection, _) = run("https://open.spotify.com/playlist/37i9dQZF1DX?si=x\n2\n");
        assert_eq!(
            selection,
            Some(Selection {
                playlist_id: "37i9dQZF1DX".into(),
                choice: MenuChoice::RebuildPlaylist,
            })
        );

        let (selection, _) = run("https://open.spotify.com/playlist/abc\n 1 \n");
        assert_eq!(selection.map(|s| s.choice), Some(MenuChoice::AlbumFrequencies));
    }

    #[test]
    fn test_closed_input_is_an_invalid_url() {
        let (selection, _) = run("");
        assert_eq!(selection, None);
    }
}
