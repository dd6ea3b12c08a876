//! Songs and their lyrics.

use std::fmt;

use tracing::warn;

use crate::album::AlbumType;
use crate::artist::Artist;
use crate::config::DEFAULT_BASE_URL;
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::headers::split_song_header;
use crate::names::canonicalize;
use crate::remote::{song_href, split_wiki_url, AlbumId, ArtistId, Cached, RemoteIdentity};
use crate::scrape::{get_header, get_lyrics, Links};
use crate::serialize::{to_json_value, Encoding, SongRecord};

/// A song page. `artist_name` is the performing artist, which for covers and features differs from
/// the artist owning the album the song is listed on.
#[derive(Debug, Clone)]
pub struct Song {
    artist_name: String,
    name: String,
    album_name: Option<String>,
    album_year: Option<String>,
    album_type: Option<AlbumType>,
    base: String,
    href: Option<String>,
    artist: Option<ArtistId>,
    album: Option<AlbumId>,
    lyrics: Cached<String>,
    links: Cached<Links>,
}

impl Song {
    pub fn new(artist_name: &str, name: &str) -> Self {
        Self::with_base(artist_name, name, DEFAULT_BASE_URL)
    }

    pub fn with_base(artist_name: &str, name: &str, base: &str) -> Self {
        let artist_name = canonicalize(artist_name);
        let name = canonicalize(name);
        Self {
            href: song_href(&artist_name, &name),
            artist_name,
            name,
            album_name: None,
            album_year: None,
            album_type: None,
            base: base.to_string(),
            artist: None,
            album: None,
            lyrics: Cached::Unfetched,
            links: Cached::Unfetched,
        }
    }

    /// Sets the album the song was released on.
    pub fn on_album(mut self, album_name: &str, album_year: Option<&str>, album_type: Option<AlbumType>) -> Self {
        self.set_album(Some(album_name), album_year, album_type);
        self
    }

    /// Rebuilds a song from the URL of its lyrics page, e.g. `.../wiki/Daughter:Run`. The song is
    /// looked up in its artist's discography; a song missing from it is returned on its own.
    pub fn from_url(url: &str, fetcher: &dyn Fetcher) -> Option<Song> {
        let (base, _) = split_wiki_url(url)?;
        let doc = fetcher.fetch(url)?;
        let Some(header) = get_header(&doc) else {
            warn!("No page header found at {url}. `None` was returned");
            return None;
        };
        let (artist_name, song_name) = split_song_header(&header);
        let mut artist = Artist::with_base(&artist_name, base);
        let mut song = match artist.search_song(fetcher, &song_name) {
            Some(song) => song.clone(),
            None => Song::with_base(&artist_name, &song_name, base),
        };
        if !song.lyrics.is_fetched() {
            song.lyrics.set(get_lyrics(&doc));
        }
        Some(song)
    }

    pub fn artist_name(&self) -> &str {
        &self.artist_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn album_name(&self) -> Option<&str> {
        self.album_name.as_deref()
    }

    pub fn album_year(&self) -> Option<&str> {
        self.album_year.as_deref()
    }

    pub fn album_type(&self) -> Option<AlbumType> {
        self.album_type
    }

    /// The artist owning the album this song was added to.
    pub fn artist_id(&self) -> Option<&ArtistId> {
        self.artist.as_ref()
    }

    pub fn album_id(&self) -> Option<&AlbumId> {
        self.album.as_ref()
    }

    pub(crate) fn set_artist_name(&mut self, artist_name: &str) {
        self.artist_name = canonicalize(artist_name);
        self.href = song_href(&self.artist_name, &self.name);
    }

    pub(crate) fn set_album(
        &mut self,
        album_name: Option<&str>,
        album_year: Option<&str>,
        album_type: Option<AlbumType>,
    ) {
        self.album_name = album_name.map(canonicalize);
        self.album_year = album_year.map(str::to_string);
        self.album_type = album_type;
    }

    pub(crate) fn register(&mut self, artist: Option<ArtistId>, album: AlbumId) {
        self.artist = artist;
        self.album = Some(album);
    }

    /// Clears the links to the song's album and artist. The names are kept.
    pub fn unregister(&mut self) {
        self.artist = None;
        self.album = None;
    }

    /// The lyrics, fetched from the song page on first access. Empty when the page is unavailable.
    pub fn lyrics(&mut self, fetcher: &dyn Fetcher) -> &str {
        let Some(url) = self.url() else {
            return "";
        };
        self.lyrics
            .get_or_fetch(|| fetcher.fetch(&url).map(|doc| get_lyrics(&doc)))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn set_lyrics(&mut self, lyrics: impl Into<String>) {
        self.lyrics.set(lyrics.into());
    }

    pub fn clear_lyrics(&mut self) {
        self.lyrics.clear();
    }

    pub fn to_record(&mut self, fetcher: &dyn Fetcher) -> SongRecord {
        let lyrics = self.lyrics(fetcher).to_string();
        let links = self.links(fetcher).clone();
        SongRecord {
            artist: self.artist_name.clone(),
            album: self.album_name.clone(),
            year: self.album_year.clone(),
            song: self.name.clone(),
            lyrics,
            url: self.url(),
            links,
        }
    }

    pub fn to_json(&mut self, fetcher: &dyn Fetcher, encoding: Encoding) -> Result<serde_json::Value> {
        to_json_value(&self.to_record(fetcher), encoding)
    }
}

impl RemoteIdentity for Song {
    fn base(&self) -> &str {
        &self.base
    }

    fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    fn links_cache(&mut self) -> &mut Cached<Links> {
        &mut self.links
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: \"{}\"", self.artist_name, self.name)?;
        if let Some(album_name) = &self.album_name {
            write!(f, ", from")?;
            if let Some(album_type) = self.album_type {
                write!(f, " {album_type}")?;
            }
            write!(f, " \"{album_name}\"")?;
        }
        if let Some(year) = &self.album_year {
            write!(f, " ({year})")?;
        }
        Ok(())
    }
}
