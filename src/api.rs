//! Entry point bundling a fetcher with the search and export helpers.

use serde::{Deserialize, Serialize};

use crate::album::Album;
use crate::artist::{Artist, ScrapeOptions};
use crate::config::Config;
use crate::error::{LyricWikiError, Result};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::serialize::Encoding;
use crate::song::Song;

/// One song of an artist's discography with its lyrics, as returned by [`LyricWiki::get_lyrics`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricsEntry {
    pub artist: String,
    pub album: Option<String>,
    pub song: String,
    pub lyrics: String,
}

pub struct LyricWiki<F: Fetcher = HttpFetcher> {
    fetcher: F,
    base_url: String,
}

impl LyricWiki<HttpFetcher> {
    pub fn new(config: Config) -> Self {
        let base_url = config.base_url.clone();
        Self { fetcher: HttpFetcher::new(config), base_url }
    }
}

impl<F: Fetcher> LyricWiki<F> {
    pub fn with_fetcher(fetcher: F, base_url: &str) -> Self {
        Self { fetcher, base_url: base_url.trim_end_matches('/').to_string() }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// An artist with its discography loaded.
    pub fn search_artist(&self, artist_name: &str, options: ScrapeOptions) -> Artist {
        let mut artist = Artist::with_base(artist_name, &self.base_url);
        artist.albums(&self.fetcher, options);
        artist
    }

    pub fn search_album(&self, artist_name: &str, album_name: &str) -> Option<Album> {
        Artist::with_base(artist_name, &self.base_url).into_album(&self.fetcher, album_name)
    }

    /// A song addressed by name. Nothing is fetched until its lyrics are read.
    pub fn search_song(&self, artist_name: &str, song_name: &str) -> Song {
        Song::with_base(artist_name, song_name, &self.base_url)
    }

    /// Free-text search across the wiki. The wiki offers no search page to scrape.
    pub fn search_query(&self, _query: &str) -> Result<Vec<Song>> {
        Err(LyricWikiError::NotImplemented("search_query"))
    }

    /// The lyrics of every song in an artist's discography, one page request per song.
    pub fn get_lyrics(&self, artist_name: &str, options: ScrapeOptions) -> Vec<LyricsEntry> {
        let mut artist = self.search_artist(artist_name, options);
        let songs: Vec<Song> = artist.songs(&self.fetcher, options).cloned().collect();
        songs
            .into_iter()
            .map(|mut song| LyricsEntry {
                artist: song.artist_name().to_string(),
                album: song.album_name().map(str::to_string),
                song: song.name().to_string(),
                lyrics: song.lyrics(&self.fetcher).to_string(),
            })
            .collect()
    }

    pub fn get_albums(&self, artist_name: &str, options: ScrapeOptions) -> Vec<Album> {
        let mut artist = self.search_artist(artist_name, options);
        artist.albums(&self.fetcher, options).to_vec()
    }

    /// The nested JSON export of an artist.
    pub fn get_discography(
        &self,
        artist_name: &str,
        options: ScrapeOptions,
        encoding: Encoding,
    ) -> Result<serde_json::Value> {
        let mut artist = self.search_artist(artist_name, options);
        artist.to_json(&self.fetcher, encoding)
    }
}
