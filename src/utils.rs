use std::{
    io::{self, BufRead, Write},
    sync::LazyLock,
    time::Duration,
};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};
use regex::Regex;
use sha2::{Digest, Sha256};

static PLAYLIST_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"playlist/([A-Za-z0-9]+)").expect("playlist id pattern"));

/// What the user picked from the interactive menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AlbumFrequencies,
    RebuildPlaylist,
}

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Extracts the playlist id from a Spotify playlist link such as
/// `https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=...`.
pub fn extract_playlist_id(url: &str) -> Option<String> {
    PLAYLIST_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn parse_menu_choice(input: &str) -> Option<MenuChoice> {
    match input.trim() {
        "1" => Some(MenuChoice::AlbumFrequencies),
        "2" => Some(MenuChoice::RebuildPlaylist),
        _ => None,
    }
}

/// Prints `message` and reads one trimmed line from `input`.
pub fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> io::Result<String> {
    write!(output, "{}", message)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
