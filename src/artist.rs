//! Artists and their discographies.
//!
//! An artist page lists every release as a second-level heading followed by its track listing.
//! The discography is scraped from that page once, on first access, and kept afterwards.

use std::fmt;

use scraper::Html;
use tracing::{debug, warn};

use crate::album::Album;
use crate::config::DEFAULT_BASE_URL;
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::headers::{parse_album_header, parse_song_title};
use crate::names::{canonicalize, same_name};
use crate::remote::{artist_href, split_wiki_url, AlbumId, ArtistId, Cached, Reconcile, RemoteIdentity};
use crate::scrape::{
    get_artist_info, get_external_links, get_header, is_canonical_track, scrape_albums, scrape_songs, section_heading,
    text_of, ArtistInfo, Links, ALL_LISTS, CANONICAL_LISTS,
};
use crate::serialize::{to_json_value, ArtistRecord, Encoding};
use crate::song::Song;

static EMPTY_INFO: ArtistInfo = ArtistInfo::new();

/// Which parts of a discography to scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrapeOptions {
    /// Keep songs performed by other artists (covers, features).
    pub cover: bool,
    /// Read compilations, remixes and other releases listed outside ordered track listings.
    pub other: bool,
}

impl ScrapeOptions {
    pub fn all() -> Self {
        Self { cover: true, other: true }
    }
}

#[derive(Debug, Clone)]
pub struct Artist {
    name: String,
    base: String,
    href: Option<String>,
    albums: Cached<Vec<Album>>,
    info: Cached<ArtistInfo>,
    links: Cached<Links>,
}

impl Artist {
    pub fn new(name: &str) -> Self {
        Self::with_base(name, DEFAULT_BASE_URL)
    }

    pub fn with_base(name: &str, base: &str) -> Self {
        let name = canonicalize(name);
        Self {
            href: artist_href(&name),
            name,
            base: base.to_string(),
            albums: Cached::Unfetched,
            info: Cached::Unfetched,
            links: Cached::Unfetched,
        }
    }

    /// Rebuilds an artist from the URL of its page, e.g. `.../wiki/Daughter`.
    pub fn from_url(url: &str, fetcher: &dyn Fetcher) -> Option<Artist> {
        let (base, _) = split_wiki_url(url)?;
        let doc = fetcher.fetch(url)?;
        let Some(header) = get_header(&doc) else {
            warn!("No page header found at {url}. `None` was returned");
            return None;
        };
        let mut artist = Artist::with_base(&header, base);
        artist.load_page(&doc, ScrapeOptions::all());
        Some(artist)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> ArtistId {
        ArtistId::of(&self.name)
    }

    /// Fills every cache that is still empty from an already fetched artist page.
    fn load_page(&mut self, doc: &Html, options: ScrapeOptions) {
        if !self.albums.is_fetched() {
            self.albums.set(scrape_discography(doc, &self.name, &self.base, options));
        }
        if !self.info.is_fetched() {
            self.info.set(get_artist_info(doc));
        }
        if !self.links.is_fetched() {
            self.links.set(get_external_links(doc));
        }
    }

    /// The artist's albums in page order. Albums without any song are left out. The discography is
    /// scraped once with the given options; later calls return it regardless of their options.
    pub fn albums(&mut self, fetcher: &dyn Fetcher, options: ScrapeOptions) -> &[Album] {
        if self.albums.begin_fetch() {
            match self.connect(fetcher) {
                Some(doc) => self.load_page(&doc, options),
                None => self.albums.finish_fetch(None),
            }
        }
        self.albums.get().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every song of every album, in page order.
    pub fn songs(&mut self, fetcher: &dyn Fetcher, options: ScrapeOptions) -> impl Iterator<Item = &Song> {
        self.albums(fetcher, options).iter().flat_map(|album| album.tracks())
    }

    /// Resolves an album id against this artist's loaded albums.
    pub fn album(&self, id: &AlbumId) -> Option<&Album> {
        self.albums.get()?.iter().find(|album| &album.id() == id)
    }

    /// The album a song of this artist belongs to.
    pub fn album_of(&self, song: &Song) -> Option<&Album> {
        song.album_id().and_then(|id| self.album(id))
    }

    pub fn search_album(&mut self, fetcher: &dyn Fetcher, album_name: &str) -> Option<&Album> {
        let artist_name = self.name.clone();
        let found = self.albums(fetcher, ScrapeOptions::all()).iter().find(|a| same_name(a.name(), album_name));
        if found.is_none() {
            warn!(
                "Not Found: No albums named \"{album_name}\" found in \"{artist_name}\" discography. \
                 `None` was returned"
            );
        }
        found
    }

    pub fn search_song(&mut self, fetcher: &dyn Fetcher, song_name: &str) -> Option<&Song> {
        let artist_name = self.name.clone();
        let found = self.songs(fetcher, ScrapeOptions::all()).find(|s| same_name(s.name(), song_name));
        if found.is_none() {
            warn!(
                "Not Found: No songs named \"{song_name}\" found in \"{artist_name}\" discography. `None` was returned"
            );
        }
        found
    }

    /// Takes an album out of the discography.
    pub fn into_album(mut self, fetcher: &dyn Fetcher, album_name: &str) -> Option<Album> {
        self.albums(fetcher, ScrapeOptions::all());
        let albums = self.albums.loaded_mut();
        match albums.iter().position(|a| same_name(a.name(), album_name)) {
            Some(position) => Some(albums.remove(position)),
            None => {
                warn!(
                    "Not Found: No albums named \"{album_name}\" found in \"{}\" discography. `None` was returned",
                    self.name
                );
                None
            }
        }
    }

    /// Appends an album. An album credited to another artist is kept as-is with a warning, or
    /// re-credited to this artist with [`Reconcile::Force`].
    pub fn add_album(&mut self, mut album: Album, reconcile: Reconcile) {
        if !same_name(album.artist_name(), &self.name) {
            match reconcile {
                Reconcile::Warn => warn!(
                    "Invalid Name: Artist name from \"{}\" does not match parent artist {}. The album has been added, \
                     but you can update its information to its parent with Reconcile::Force",
                    album.artist_name(),
                    self.name
                ),
                Reconcile::Force => album.set_artist_name(&self.name),
            }
        }
        album.register_artist(self.id());
        self.albums.loaded_mut().push(album);
    }

    /// Appends an empty album by name.
    pub fn add_album_named(&mut self, album_name: &str) {
        let album = Album::with_base(&self.name, album_name, None, &self.base);
        self.add_album(album, Reconcile::Warn);
    }

    /// Band members, genres, labels and the like, from the artist page.
    pub fn info(&mut self, fetcher: &dyn Fetcher) -> &ArtistInfo {
        let Some(url) = self.url() else {
            return &EMPTY_INFO;
        };
        self.info.get_or_fetch(|| fetcher.fetch(&url).map(|doc| get_artist_info(&doc))).unwrap_or(&EMPTY_INFO)
    }

    pub fn set_info(&mut self, info: ArtistInfo) {
        self.info.set(info);
    }

    pub fn clear_albums(&mut self) {
        self.albums.clear();
    }

    pub fn to_record(&mut self, fetcher: &dyn Fetcher) -> ArtistRecord {
        self.albums(fetcher, ScrapeOptions::all());
        let info = self.info(fetcher).clone();
        let links = self.links(fetcher).clone();
        let albums = match &mut self.albums {
            Cached::Fetched(albums) => albums.iter_mut().map(|album| album.to_record(fetcher)).collect(),
            _ => Vec::new(),
        };
        ArtistRecord { artist: self.name.clone(), info, url: self.url(), links, albums }
    }

    pub fn to_json(&mut self, fetcher: &dyn Fetcher, encoding: Encoding) -> Result<serde_json::Value> {
        to_json_value(&self.to_record(fetcher), encoding)
    }
}

impl RemoteIdentity for Artist {
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

impl fmt::Display for Artist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Artist: {}", self.name)
    }
}

/// Builds the albums listed on an artist page.
fn scrape_discography(doc: &Html, artist_name: &str, base: &str, options: ScrapeOptions) -> Vec<Album> {
    let list_tags = if options.other { ALL_LISTS } else { CANONICAL_LISTS };
    let artist_id = ArtistId::of(artist_name);
    let lowered_artist = artist_name.to_lowercase();
    let mut albums = Vec::new();

    for label in scrape_albums(doc) {
        let album_title = text_of(label);
        let (album_name, album_year) = parse_album_header(album_title.trim());
        let Some(heading) = section_heading(label) else {
            continue;
        };
        let mut album = Album::with_base(artist_name, &album_name, album_year.as_deref(), base);
        album.register_artist(artist_id.clone());

        // The release type is judged from the last link in the section, kept or not.
        let mut last_link = None;
        for link in scrape_songs(heading, list_tags) {
            last_link = Some(link);
            let Some(song_title) = link.value().attr("title") else {
                debug!("Skipping song link without title in {album_name}");
                continue;
            };
            let Some((performer, song_name)) = parse_song_title(song_title.trim(), Some(artist_name)) else {
                warn!("Skipping unparseable song title {song_title:?} in {album_name}");
                continue;
            };
            if !options.cover && !performer.to_lowercase().contains(&lowered_artist) {
                continue;
            }
            let song = Song::with_base(&performer, &song_name, base).on_album(&album_name, album_year.as_deref(), None);
            album.add_song(song, Reconcile::Warn);
        }

        if album.is_empty() {
            debug!("Discarding {} without songs", album_title.trim());
            continue;
        }
        if last_link.is_some_and(is_canonical_track) {
            album.set_album_type();
        }
        albums.push(album);
    }

    albums
}
