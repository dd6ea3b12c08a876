pub mod album;
pub mod api;
pub mod artist;
pub mod common;
pub mod config;
pub mod error;
pub mod fetch;
pub mod headers;
pub mod lyrics;
pub mod names;
pub mod remote;
pub mod scrape;
pub mod serialize;
pub mod song;

pub use album::{Album, AlbumType};
pub use api::{LyricWiki, LyricsEntry};
pub use artist::{Artist, ScrapeOptions};
pub use config::Config;
pub use error::{ExpectedError, LyricWikiError, Result};
pub use fetch::{Fetcher, HttpFetcher, PageStore};
pub use remote::{AlbumId, ArtistId, Reconcile, RemoteIdentity};
pub use serialize::Encoding;
pub use song::Song;

#[cfg(test)]
mod testing;

#[cfg(test)]
mod scrape_test;
#[cfg(test)]
mod song_test;
