//! JSON export of artists, albums and songs.
//!
//! Each entity is flattened into a record holding its names, its page URL and its loaded data. A
//! record nests the records of its children, so exporting an artist exports its whole discography.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::album::AlbumType;
use crate::error::Result;
use crate::scrape::{ArtistInfo, Links};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRecord {
    pub artist: String,
    pub album: Option<String>,
    pub year: Option<String>,
    pub song: String,
    pub lyrics: String,
    pub url: Option<String>,
    pub links: Links,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumRecord {
    pub artist: String,
    pub album: String,
    #[serde(rename = "type")]
    pub album_type: Option<AlbumType>,
    pub year: Option<String>,
    pub url: Option<String>,
    pub links: Links,
    pub songs: Vec<SongRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRecord {
    pub artist: String,
    pub info: ArtistInfo,
    pub url: Option<String>,
    pub links: Links,
    pub albums: Vec<AlbumRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Names and lyrics are written as found on the wiki.
    #[default]
    Unicode,
    /// Every key and string is transliterated to ASCII.
    Ascii,
}

pub fn to_json_value<T: Serialize>(record: &T, encoding: Encoding) -> Result<Value> {
    let value = serde_json::to_value(record)?;
    Ok(match encoding {
        Encoding::Unicode => value,
        Encoding::Ascii => transliterate(value),
    })
}

fn transliterate(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(any_ascii::any_ascii(&s)),
        Value::Array(items) => Value::Array(items.into_iter().map(transliterate).collect()),
        Value::Object(entries) => Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| (any_ascii::any_ascii(&k), transliterate(v)))
                .collect::<Map<String, Value>>(),
        ),
        other => other,
    }
}
