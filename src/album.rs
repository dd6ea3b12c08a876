//! Albums and their track listings.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::artist::Artist;
use crate::config::DEFAULT_BASE_URL;
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::headers::split_header;
use crate::names::{canonicalize, same_name};
use crate::remote::{album_href, split_wiki_url, AlbumId, ArtistId, Cached, Reconcile, RemoteIdentity};
use crate::scrape::{get_header, Links};
use crate::serialize::{to_json_value, AlbumRecord, Encoding};
use crate::song::Song;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlbumType {
    Single,
    #[serde(rename = "EP")]
    Ep,
    Album,
}

impl AlbumType {
    /// 1 track is a single, 2 to 5 an EP, anything longer an album.
    pub fn from_track_count(count: usize) -> Option<Self> {
        match count {
            0 => None,
            1 => Some(AlbumType::Single),
            2..=5 => Some(AlbumType::Ep),
            _ => Some(AlbumType::Album),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlbumType::Single => "Single",
            AlbumType::Ep => "EP",
            AlbumType::Album => "Album",
        }
    }
}

impl fmt::Display for AlbumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Album {
    artist_name: String,
    name: String,
    year: Option<String>,
    album_type: Option<AlbumType>,
    base: String,
    href: Option<String>,
    artist: Option<ArtistId>,
    songs: Cached<Vec<Song>>,
    links: Cached<Links>,
}

impl Album {
    pub fn new(artist_name: &str, name: &str, year: Option<&str>) -> Self {
        Self::with_base(artist_name, name, year, DEFAULT_BASE_URL)
    }

    pub fn with_base(artist_name: &str, name: &str, year: Option<&str>, base: &str) -> Self {
        let artist_name = canonicalize(artist_name);
        let name = canonicalize(name);
        let year = year.map(str::to_string);
        Self {
            href: album_href(&artist_name, &name, year.as_deref()),
            artist_name,
            name,
            year,
            album_type: None,
            base: base.to_string(),
            artist: None,
            songs: Cached::Unfetched,
            links: Cached::Unfetched,
        }
    }

    pub fn with_type(mut self, album_type: Option<AlbumType>) -> Self {
        self.album_type = album_type;
        self
    }

    /// Rebuilds an album from the URL of its page, e.g. `.../wiki/Daughter:His_Young_Heart_(2011)`.
    pub fn from_url(url: &str, fetcher: &dyn Fetcher) -> Option<Album> {
        let (base, _) = split_wiki_url(url)?;
        let doc = fetcher.fetch(url)?;
        let Some(header) = get_header(&doc) else {
            warn!("No page header found at {url}. `None` was returned");
            return None;
        };
        let (artist_name, album_name, _) = split_header(&header);
        Artist::with_base(&artist_name, base).into_album(fetcher, &album_name)
    }

    pub fn artist_name(&self) -> &str {
        &self.artist_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn year(&self) -> Option<&str> {
        self.year.as_deref()
    }

    pub fn album_type(&self) -> Option<AlbumType> {
        self.album_type
    }

    pub fn id(&self) -> AlbumId {
        AlbumId::of(&self.artist_name, &self.name)
    }

    /// The artist this album was registered with, if any.
    pub fn artist_id(&self) -> Option<&ArtistId> {
        self.artist.as_ref()
    }

    pub(crate) fn set_artist_name(&mut self, artist_name: &str) {
        self.artist_name = canonicalize(artist_name);
        self.href = album_href(&self.artist_name, &self.name, self.year.as_deref());
    }

    /// Links the album, and the songs it already holds, to an artist.
    pub fn register_artist(&mut self, artist: ArtistId) {
        let album_id = self.id();
        if let Cached::Fetched(songs) = &mut self.songs {
            for song in songs {
                song.register(Some(artist.clone()), album_id.clone());
            }
        }
        self.artist = Some(artist);
    }

    pub fn unregister(&mut self) {
        self.artist = None;
    }

    /// Songs loaded so far, without fetching anything.
    pub fn tracks(&self) -> &[Song] {
        self.songs.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.tracks().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks().is_empty()
    }

    /// The album's songs. An album created on its own finds its track listing on its artist's page
    /// the first time this is called.
    pub fn songs(&mut self, fetcher: &dyn Fetcher) -> &[Song] {
        self.load_songs(fetcher);
        self.tracks()
    }

    fn load_songs(&mut self, fetcher: &dyn Fetcher) {
        if self.songs.is_fetched() {
            return;
        }
        let artist = Artist::with_base(&self.artist_name, &self.base);
        let Some(mut album) = artist.into_album(fetcher, &self.name) else {
            return;
        };
        for mut song in album.songs.take().unwrap_or_default() {
            song.unregister();
            self.add_song(song, Reconcile::Warn);
        }
        if self.album_type.is_none() {
            self.album_type = album.album_type;
        }
    }

    /// Adds a song to the end of the track listing. A song whose album name differs from this album
    /// is kept as-is with a warning, or takes over this album's names with [`Reconcile::Force`].
    pub fn add_song(&mut self, mut song: Song, reconcile: Reconcile) {
        if !same_name(song.album_name().unwrap_or_default(), &self.name) {
            match reconcile {
                Reconcile::Warn => warn!(
                    "Invalid Names: Album name from \"{}\" does not match parent album {}. The song has been added, \
                     but you can update its album information to its parent with Reconcile::Force",
                    song.album_name().unwrap_or_default(),
                    self.name
                ),
                Reconcile::Force => {
                    song.set_artist_name(&self.artist_name);
                    song.set_album(Some(&self.name), self.year.as_deref(), self.album_type);
                }
            }
        }
        song.register(self.artist.clone(), self.id());
        self.songs.loaded_mut().push(song);
    }

    /// Adds an empty song by name, carrying this album's names.
    pub fn add_song_named(&mut self, song_name: &str) {
        let song = Song::with_base(&self.artist_name, song_name, &self.base).on_album(
            &self.name,
            self.year.as_deref(),
            self.album_type,
        );
        self.add_song(song, Reconcile::Warn);
    }

    /// Removes a song from the track listing and clears its links to this album and its artist.
    pub fn take_song(&mut self, song_name: &str) -> Option<Song> {
        let songs = self.songs.loaded_mut();
        let Some(position) = songs.iter().position(|s| same_name(s.name(), song_name)) else {
            warn!("Not Found: No songs named \"{song_name}\" found in \"{}\" playlist. `None` was returned", self.name);
            return None;
        };
        let mut song = songs.remove(position);
        song.unregister();
        Some(song)
    }

    pub fn search_song(&mut self, fetcher: &dyn Fetcher, song_name: &str) -> Option<&Song> {
        let album_name = self.name.clone();
        let found = self.songs(fetcher).iter().find(|s| same_name(s.name(), song_name));
        if found.is_none() {
            warn!("Not Found: No songs named \"{song_name}\" found in \"{album_name}\" playlist. `None` was returned");
        }
        found
    }

    /// Derives the album type from the number of songs, and applies it to the songs as well.
    pub fn set_album_type(&mut self) {
        self.album_type = AlbumType::from_track_count(self.len());
        let (name, year, album_type) = (self.name.clone(), self.year.clone(), self.album_type);
        if let Cached::Fetched(songs) = &mut self.songs {
            for song in songs {
                song.set_album(Some(&name), year.as_deref(), album_type);
            }
        }
    }

    pub fn clear_songs(&mut self) {
        self.songs.clear();
    }

    pub fn to_record(&mut self, fetcher: &dyn Fetcher) -> AlbumRecord {
        self.load_songs(fetcher);
        let links = self.links(fetcher).clone();
        let songs = match &mut self.songs {
            Cached::Fetched(songs) => songs.iter_mut().map(|song| song.to_record(fetcher)).collect(),
            _ => Vec::new(),
        };
        AlbumRecord {
            artist: self.artist_name.clone(),
            album: self.name.clone(),
            album_type: self.album_type,
            year: self.year.clone(),
            url: self.url(),
            links,
            songs,
        }
    }

    pub fn to_json(&mut self, fetcher: &dyn Fetcher, encoding: Encoding) -> Result<serde_json::Value> {
        to_json_value(&self.to_record(fetcher), encoding)
    }
}

impl RemoteIdentity for Album {
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

impl Index<usize> for Album {
    type Output = Song;

    fn index(&self, index: usize) -> &Song {
        &self.tracks()[index]
    }
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.artist_name)?;
        if let Some(album_type) = self.album_type {
            write!(f, " {album_type}")?;
        }
        write!(f, " \"{}\"", self.name)?;
        if let Some(year) = &self.year {
            write!(f, " ({year})")?;
        }
        if !self.is_empty() {
            write!(f, ", Songs: {}", self.len())?;
        }
        Ok(())
    }
}
