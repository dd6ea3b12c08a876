//! Splitting of composite page headers and link titles.
//!
//! The wiki packs several fields into one string: album headings read `Name (Year)`, album pages
//! are titled `Artist:Name (Year)` and song links carry `Artist:Song` in their `title` attribute.

const MISSING_PAGE_MARKER: &str = "(page does not exist)";

/// Splits `His Young Heart (2011)` into its name and year. The year is the content of the last
/// parenthetical; without one, the year is `None`.
pub fn parse_album_header(text: &str) -> (String, Option<String>) {
    match text.rsplit_once('(') {
        Some((name, year)) => (name.trim().to_string(), Some(year.replace(')', "").trim().to_string())),
        None => (text.trim().to_string(), None),
    }
}

/// Splits `Artist:Album (Year)` into artist, album name and year.
pub fn split_header(text: &str) -> (String, String, Option<String>) {
    let (artist, album_title) = text.split_once(':').unwrap_or((text, text));
    let (album_name, album_year) = parse_album_header(album_title);
    (artist.trim().to_string(), album_name, album_year)
}

/// Splits a song link title into the performing artist and the song name.
///
/// Artist names may themselves contain `:` (`Ex:Re`). When the expected artist is known and
/// present in the title, the title is split after as many `:`-segments as the artist name has.
/// Otherwise the artist is assumed to be a single segment. Returns `None` when the title carries
/// no separator at all.
pub fn parse_song_title(title: &str, known_artist: Option<&str>) -> Option<(String, String)> {
    let title = title.replace(MISSING_PAGE_MARKER, "");
    let title = title.trim().replace("//", "");

    let artist_segments = match known_artist {
        Some(artist) if !artist.is_empty() && title.contains(artist) => artist.split(':').count(),
        _ => 1,
    };

    let title = title.replace("/wiki/", "");
    let parts: Vec<&str> = title.split(':').collect();
    if parts.len() <= artist_segments {
        return None;
    }
    let artist = parts[..artist_segments].join(":");
    let song = parts[artist_segments..].join(":");
    Some((artist.trim().to_string(), song.trim().to_string()))
}

/// Splits a song page header such as `Daughter:Run Lyrics` into artist and song name.
pub fn split_song_header(text: &str) -> (String, String) {
    let mut parts = text.split(':');
    let artist = parts.next().unwrap_or_default().trim().to_string();
    let last = text.rsplit(':').next().unwrap_or_default().trim_end();
    let song = last.strip_suffix(" Lyrics").unwrap_or(last).trim().to_string();
    (artist, song)
}
