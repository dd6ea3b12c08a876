//! Identity and lazy loading shared by artists, albums and songs.
//!
//! Every entity is addressed by a wiki path built from the ids of its names, and loads its
//! expensive data (album lists, lyrics, info, links) from that page on first access. Entities refer
//! to their parents by id rather than by pointer; the artist owns its albums and each album owns its
//! songs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fetch::Fetcher;
use crate::names::slug;
use crate::scrape::{get_external_links, Links};

static EMPTY_LINKS: Links = Links::new();

/// Id of an artist page, the slug of the artist's name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtistId(pub String);

impl ArtistId {
    pub fn of(artist_name: &str) -> Self {
        Self(slug(artist_name))
    }
}

/// Id of an album: the slugs of its artist and its name. The year is not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AlbumId {
    pub artist: String,
    pub album: String,
}

impl AlbumId {
    pub fn of(artist_name: &str, album_name: &str) -> Self {
        Self { artist: slug(artist_name), album: slug(album_name) }
    }
}

/// How to resolve a child whose names disagree with the parent it is added to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reconcile {
    /// Log a warning and keep the child's own names.
    #[default]
    Warn,
    /// Overwrite the child's names with the parent's.
    Force,
}

/// A lazily loaded value.
#[derive(Debug, Clone)]
pub enum Cached<T> {
    Unfetched,
    Fetching,
    Fetched(T),
}

impl<T> Default for Cached<T> {
    fn default() -> Self {
        Cached::Unfetched
    }
}

impl<T> Cached<T> {
    pub fn get(&self) -> Option<&T> {
        match self {
            Cached::Fetched(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_fetched(&self) -> bool {
        matches!(self, Cached::Fetched(_))
    }

    pub fn set(&mut self, value: T) {
        *self = Cached::Fetched(value);
    }

    pub fn clear(&mut self) {
        *self = Cached::Unfetched;
    }

    pub fn take(&mut self) -> Option<T> {
        match std::mem::replace(self, Cached::Unfetched) {
            Cached::Fetched(value) => Some(value),
            _ => None,
        }
    }

    /// Marks the value as being fetched. Returns false if it is already loaded.
    pub fn begin_fetch(&mut self) -> bool {
        match self {
            Cached::Fetched(_) => false,
            Cached::Fetching => {
                debug!("Restarting a fetch that did not complete");
                true
            }
            Cached::Unfetched => {
                *self = Cached::Fetching;
                true
            }
        }
    }

    /// Stores the result of a fetch. `None` leaves the value unloaded so that a later access retries.
    pub fn finish_fetch(&mut self, value: Option<T>) {
        *self = match value {
            Some(value) => Cached::Fetched(value),
            None => Cached::Unfetched,
        };
    }

    pub fn get_or_fetch(&mut self, fetch: impl FnOnce() -> Option<T>) -> Option<&T> {
        if self.begin_fetch() {
            self.finish_fetch(fetch());
        }
        self.get()
    }
}

impl<T: Default> Cached<T> {
    /// The loaded value, treating an unloaded one as empty. Adding to an unloaded collection thus
    /// marks it as loaded.
    pub fn loaded_mut(&mut self) -> &mut T {
        if !self.is_fetched() {
            *self = Cached::Fetched(T::default());
        }
        match self {
            Cached::Fetched(value) => value,
            _ => unreachable!("value was just loaded"),
        }
    }
}

/// An entity backed by a page on the wiki.
pub trait RemoteIdentity {
    /// Scheme and host of the wiki.
    fn base(&self) -> &str;

    /// Path of the entity's page, if its names are complete enough to form one.
    fn href(&self) -> Option<&str>;

    fn links_cache(&mut self) -> &mut Cached<Links>;

    fn url(&self) -> Option<String> {
        self.href().map(|href| format!("{}{}", self.base(), href))
    }

    fn connect(&self, fetcher: &dyn Fetcher) -> Option<scraper::Html> {
        self.url().and_then(|url| fetcher.fetch(&url))
    }

    /// Links to other platforms from the entity's page, loaded once.
    fn links(&mut self, fetcher: &dyn Fetcher) -> &Links {
        let Some(url) = self.url() else {
            return &EMPTY_LINKS;
        };
        self.links_cache()
            .get_or_fetch(|| fetcher.fetch(&url).map(|doc| get_external_links(&doc)))
            .unwrap_or(&EMPTY_LINKS)
    }

    fn set_links(&mut self, links: Links) {
        self.links_cache().set(links);
    }
}

pub fn artist_href(artist_name: &str) -> Option<String> {
    let artist_id = slug(artist_name);
    (!artist_id.is_empty()).then(|| format!("/wiki/{artist_id}"))
}

/// Album pages are only addressable when the year is known.
pub fn album_href(artist_name: &str, album_name: &str, album_year: Option<&str>) -> Option<String> {
    let artist_id = slug(artist_name);
    let album_id = slug(album_name);
    match album_year {
        Some(year) if !artist_id.is_empty() && !album_id.is_empty() && !year.is_empty() => {
            Some(format!("/wiki/{artist_id}:{album_id}_({year})"))
        }
        _ => None,
    }
}

pub fn song_href(artist_name: &str, song_name: &str) -> Option<String> {
    let artist_id = slug(artist_name);
    let song_id = slug(song_name);
    (!artist_id.is_empty() && !song_id.is_empty()).then(|| format!("/wiki/{artist_id}:{song_id}"))
}

pub fn artist_url(base: &str, artist_name: &str) -> Option<String> {
    artist_href(artist_name).map(|href| format!("{base}{href}"))
}

pub fn album_url(base: &str, artist_name: &str, album_name: &str, album_year: Option<&str>) -> Option<String> {
    album_href(artist_name, album_name, album_year).map(|href| format!("{base}{href}"))
}

pub fn song_url(base: &str, artist_name: &str, song_name: &str) -> Option<String> {
    song_href(artist_name, song_name).map(|href| format!("{base}{href}"))
}

/// Splits a page URL into the wiki base and the page path (`/wiki/...`).
pub fn split_wiki_url(url: &str) -> Option<(&str, &str)> {
    url.find("/wiki/").map(|idx| url.split_at(idx))
}
